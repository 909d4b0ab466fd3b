//! Decoded session messages
//!
//! The recording decoder emits one JSON object per message, tagged by `type`.

use serde::{Deserialize, Serialize};

use crate::roster::ClientId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    /// Session header; the first model path is the map
    ServerInfo {
        #[serde(default)]
        models: Vec<String>,
        #[serde(default)]
        level_name: String,
    },
    Time {
        time: f32,
    },
    Intermission,
    Finale,
    UpdateName {
        client: ClientId,
        name: String,
    },
    UpdateFrags {
        client: ClientId,
        count: i32,
    },
    /// Packed top/bottom colour nibbles
    UpdateColors {
        client: ClientId,
        color: u8,
    },
    Print {
        text: String,
    },
}

impl Message {
    /// Parse one JSON line.
    pub fn from_json(line: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(line)
    }
}

/// Map name from a model path: file stem of `maps/e1m1.bsp` is `e1m1`.
pub fn map_name_from_model(model: &str) -> Option<&str> {
    std::path::Path::new(model).file_stem()?.to_str()
}
