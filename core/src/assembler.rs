//! Line assembler
//!
//! The server sends notification text in fragments; a fragment ending in a
//! newline closes the block. Chat and system lines are tagged by a leading
//! control byte and never join a block.

use crate::text;

const CHAT_MARKER: char = '\u{1}';
const SERVER_MARKER: char = '\u{2}';

/// Result of feeding one print fragment to the assembler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assembled {
    /// Decoded player chat line
    Chat(String),
    /// Decoded server/system line
    Server(String),
    /// Fragment buffered, block not yet complete
    Pending,
    /// Completed notification block, one entry per fragment
    Block(Vec<String>),
}

#[derive(Debug, Default)]
pub struct LineAssembler {
    pending: Vec<String>,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: &str) -> Assembled {
        if fragment.is_empty() {
            return Assembled::Pending;
        }
        if let Some(chat) = fragment.strip_prefix(CHAT_MARKER) {
            return Assembled::Chat(text::decode(chat.trim_end_matches('\n')));
        }
        if let Some(server) = fragment.strip_prefix(SERVER_MARKER) {
            return Assembled::Server(text::decode(server.trim_end_matches('\n')));
        }

        match fragment.strip_suffix('\n') {
            Some(last) => {
                self.pending.push(last.to_string());
                Assembled::Block(std::mem::take(&mut self.pending))
            }
            None => {
                self.pending.push(fragment.to_string());
                Assembled::Pending
            }
        }
    }

    /// Drop any incomplete block, returning what was buffered.
    pub fn flush(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }
}
