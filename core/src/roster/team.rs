//! Team derivation from player colours.
//!
//! Teams are never transmitted. The server paints team members with
//! reserved shirt/pants colours, so a reserved value on either nibble
//! decides the team and anything else is a spectator.

use serde::{Deserialize, Serialize};

/// Colour index reserved for the red team
pub const RED_COLOR: u8 = 4;
/// Colour index reserved for the blue team
pub const BLUE_COLOR: u8 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Red,
    Blue,
    #[default]
    Spectator,
}

impl Team {
    /// Red wins if both nibbles carry a reserved value.
    pub fn from_colors(top: u8, bottom: u8) -> Team {
        if top == RED_COLOR || bottom == RED_COLOR {
            Team::Red
        } else if top == BLUE_COLOR || bottom == BLUE_COLOR {
            Team::Blue
        } else {
            Team::Spectator
        }
    }

    /// Split a packed colour byte into `(top, bottom)` nibbles.
    pub fn unpack(packed: u8) -> (u8, u8) {
        ((packed & 0xf0) >> 4, packed & 0x0f)
    }

    pub fn is_scoring(&self) -> bool {
        !matches!(self, Team::Spectator)
    }

    /// Spectators are nobody's teammates, including each other's.
    pub fn is_teammate(&self, other: Team) -> bool {
        self.is_scoring() && *self == other
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Team::Red => "red",
            Team::Blue => "blue",
            Team::Spectator => "spectator",
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpack() {
        assert_eq!(Team::unpack(0x4d), (4, 13));
        assert_eq!(Team::unpack(0x00), (0, 0));
    }

    #[test]
    fn test_from_colors() {
        assert_eq!(Team::from_colors(4, 0), Team::Red);
        assert_eq!(Team::from_colors(0, 4), Team::Red);
        assert_eq!(Team::from_colors(13, 13), Team::Blue);
        assert_eq!(Team::from_colors(4, 13), Team::Red);
        assert_eq!(Team::from_colors(1, 2), Team::Spectator);
    }

    #[test]
    fn test_teammates() {
        assert!(Team::Red.is_teammate(Team::Red));
        assert!(!Team::Red.is_teammate(Team::Blue));
        assert!(!Team::Spectator.is_teammate(Team::Spectator));
    }
}
