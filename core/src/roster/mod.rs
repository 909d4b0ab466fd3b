//! Roster and player state store
//!
//! One record per client slot, indexed by slot and by raw name. Players are
//! kept in join order so exported records are stable across runs.

mod player;
mod stats;
mod team;

pub use player::{ClientId, Player};
pub use stats::{Stat, StatCounters};
pub use team::{BLUE_COLOR, RED_COLOR, Team};

use hashbrown::HashMap;

/// Pure storage for player state.
/// Scoring logic lives in the scoring engine.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: Vec<Player>,
    by_id: HashMap<ClientId, usize>,
    by_raw_name: HashMap<String, usize>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the player for `id`, or rename it if the slot is already known.
    ///
    /// A previous raw name keeps resolving to the same player until another
    /// player takes it over.
    pub fn set_name(&mut self, id: ClientId, raw_name: &str) -> &Player {
        let idx = match self.by_id.get(&id) {
            Some(&idx) => {
                let player = &mut self.players[idx];
                if player.raw_name != raw_name {
                    tracing::debug!(id, from = %player.name, to = %crate::text::decode(raw_name), "Player renamed");
                    player.rename(raw_name);
                }
                idx
            }
            None => {
                let idx = self.players.len();
                self.players.push(Player::new(id, raw_name));
                self.by_id.insert(id, idx);
                tracing::debug!(id, name = %self.players[idx].name, "Player joined");
                idx
            }
        };
        self.by_raw_name.insert(raw_name.to_string(), idx);
        &self.players[idx]
    }

    /// Apply a colour update. `None` for slots that were never named.
    pub fn set_colors(&mut self, id: ClientId, packed: u8) -> Option<Team> {
        let player = self.get_mut(id)?;
        let previous = player.team;
        let team = player.set_colors(packed);
        if previous != team {
            tracing::debug!(id, name = %player.name, %previous, %team, "Team changed");
        }
        Some(team)
    }

    /// Apply a server frag count. `None` for slots that were never named.
    pub fn set_frags(&mut self, id: ClientId, count: i32) -> Option<&Player> {
        let player = self.get_mut(id)?;
        player.frags = count;
        Some(player)
    }

    // --- Accessors ---

    pub fn get(&self, id: ClientId) -> Option<&Player> {
        self.by_id.get(&id).map(|&idx| &self.players[idx])
    }

    pub fn get_mut(&mut self, id: ClientId) -> Option<&mut Player> {
        self.by_id.get(&id).map(|&idx| &mut self.players[idx])
    }

    /// Exact raw-name lookup.
    pub fn by_raw_name(&self, raw_name: &str) -> Option<&Player> {
        self.by_raw_name.get(raw_name).map(|&idx| &self.players[idx])
    }

    pub fn resolve(&self, raw_name: &str) -> Option<ClientId> {
        self.by_raw_name(raw_name).map(|p| p.id)
    }

    /// All players in join order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    /// Players on a scoring team, in join order.
    pub fn scoring_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.is_spectator())
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_name_creates_player() {
        let mut roster = Roster::new();
        roster.set_name(3, "Bob");
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.get(3).unwrap().raw_name, "Bob");
        assert_eq!(roster.resolve("Bob"), Some(3));
    }

    #[test]
    fn test_second_name_is_rename() {
        let mut roster = Roster::new();
        roster.set_name(3, "Bob");
        roster.get_mut(3).unwrap().stats.increment(Stat::Kills);
        roster.set_name(3, "Robert");

        assert_eq!(roster.len(), 1);
        let player = roster.get(3).unwrap();
        assert_eq!(player.name, "Robert");
        assert_eq!(player.stat(Stat::Kills), 1);
        assert_eq!(roster.resolve("Robert"), Some(3));
        assert_eq!(roster.resolve("Bob"), Some(3));
    }

    #[test]
    fn test_raw_name_taken_over() {
        let mut roster = Roster::new();
        roster.set_name(1, "Bob");
        roster.set_name(1, "Robert");
        roster.set_name(2, "Bob");
        assert_eq!(roster.resolve("Bob"), Some(2));
    }

    #[test]
    fn test_display_name_decoded() {
        let mut roster = Roster::new();
        roster.set_name(0, "\u{90}cop\u{91}\u{c2}ob");
        let player = roster.get(0).unwrap();
        assert_eq!(player.name, "[cop]Bob");
        assert_eq!(roster.resolve("[cop]Bob"), None);
    }

    #[test]
    fn test_colors_unknown_player() {
        let mut roster = Roster::new();
        assert_eq!(roster.set_colors(7, 0x44), None);
        assert!(roster.set_frags(7, 10).is_none());
        assert!(roster.is_empty());
    }

    #[test]
    fn test_colors_last_write_wins() {
        let mut roster = Roster::new();
        roster.set_name(1, "Bob");
        assert_eq!(roster.set_colors(1, 0x44), Some(Team::Red));
        assert_eq!(roster.set_colors(1, 0xdd), Some(Team::Blue));
        assert_eq!(roster.set_colors(1, 0x12), Some(Team::Spectator));
        let player = roster.get(1).unwrap();
        assert_eq!((player.top_color, player.bottom_color), (1, 2));
        assert!(player.is_spectator());
    }

    #[test]
    fn test_scoring_players_in_join_order() {
        let mut roster = Roster::new();
        roster.set_name(5, "Carl");
        roster.set_name(1, "Ann");
        roster.set_name(2, "Spec");
        roster.set_colors(5, 0x44);
        roster.set_colors(1, 0xdd);
        let ids: Vec<_> = roster.scoring_players().map(|p| p.id).collect();
        assert_eq!(ids, vec![5, 1]);
    }

    #[test]
    fn test_uncoloured_player_does_not_score() {
        let mut roster = Roster::new();
        roster.set_name(1, "Ann");
        roster.set_frags(1, 3);
        let player = roster.get(1).unwrap();
        assert_eq!(player.team, Team::Spectator);
        assert_eq!(roster.scoring_players().count(), 0);

        roster.set_colors(1, 0x04);
        assert_eq!(roster.scoring_players().map(|p| p.id).collect::<Vec<_>>(), vec![1]);
    }
}
