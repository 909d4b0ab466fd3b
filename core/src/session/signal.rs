use crate::matcher::Match;

/// Signals emitted by the SessionProcessor for print messages.
/// State-only messages (time, names, colours) produce no signal.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionSignal {
    /// Decoded player chat line
    Chat { time: f32, text: String },
    /// Decoded server/system line
    Server { time: f32, text: String },
    /// A notification block matched a catalog definition and was scored
    Matched { time: f32, event: Match },
    /// A notification block matched nothing and was discarded
    Unmatched { time: f32, lines: Vec<String> },
}
