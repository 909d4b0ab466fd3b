use serde::Serialize;

use super::stats::{Stat, StatCounters};
use super::team::Team;
use crate::text;

/// Session-local client slot number.
pub type ClientId = u8;

#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub id: ClientId,
    /// Decoded display name
    pub name: String,
    /// Name as transmitted, used for notification matching
    pub raw_name: String,
    /// Spectator until a colour update places the player on a team
    pub team: Team,
    /// Server-reported frag count
    pub frags: i32,
    pub stats: StatCounters,
    /// Game time the player picked up the flag, `None` when not carrying
    pub carrying_since: Option<f32>,
    pub top_color: u8,
    pub bottom_color: u8,
}

impl Player {
    pub fn new(id: ClientId, raw_name: &str) -> Self {
        Self {
            id,
            name: text::decode(raw_name),
            raw_name: raw_name.to_string(),
            team: Team::default(),
            frags: 0,
            stats: StatCounters::new(),
            carrying_since: None,
            top_color: 0,
            bottom_color: 0,
        }
    }

    pub fn rename(&mut self, raw_name: &str) {
        self.name = text::decode(raw_name);
        self.raw_name = raw_name.to_string();
    }

    /// Apply a packed colour byte and re-derive the team.
    pub fn set_colors(&mut self, packed: u8) -> Team {
        let (top, bottom) = Team::unpack(packed);
        self.top_color = top;
        self.bottom_color = bottom;
        self.team = Team::from_colors(top, bottom);
        self.team
    }

    pub fn stat(&self, stat: Stat) -> i32 {
        self.stats.get(stat)
    }

    pub fn is_spectator(&self) -> bool {
        !self.team.is_scoring()
    }

    pub fn is_carrying(&self) -> bool {
        self.carrying_since.is_some()
    }

    /// Frag total reconstructed from tracked events: kills plus CTF points
    /// minus suicides. Should equal `frags` when the catalog covers every
    /// scoring message the server printed.
    pub fn derived_score(&self) -> i32 {
        self.stat(Stat::Kills) + self.stat(Stat::CtfPoints) - self.stat(Stat::Suicides)
    }
}
