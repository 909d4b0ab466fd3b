//! Frag and item ledgers
//!
//! Append-only snapshots of a player's counters taken whenever a scoring
//! event touches them. Export seeds one zero row per scoring player so
//! every series starts at the origin.

use serde::Serialize;

use crate::roster::{ClientId, Player, Roster, Stat, Team};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FragEntry {
    pub timestamp: f32,
    pub player_id: ClientId,
    pub frags: i32,
    pub deaths: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemEntry {
    pub timestamp: f32,
    pub player_id: ClientId,
    pub quad: i32,
    pub pent: i32,
    pub flagtk: i32,
    pub flagcap: i32,
}

/// Exported frag row, joined with the player's final name and team
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FragRow {
    pub timestamp: f32,
    pub player_id: ClientId,
    pub name: String,
    pub team: Team,
    pub frags: i32,
    pub deaths: i32,
}

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    frags: Vec<FragEntry>,
    items: Vec<ItemEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot frags and deaths. A suicide records one frag less than the
    /// current count; the server's own decrement arrives later.
    pub fn log_frags(&mut self, timestamp: f32, player: &Player, suicide: bool) {
        let frags = if suicide { player.frags - 1 } else { player.frags };
        self.frags.push(FragEntry {
            timestamp,
            player_id: player.id,
            frags,
            deaths: player.stat(Stat::Deaths),
        });
    }

    pub fn log_items(&mut self, timestamp: f32, player: &Player) {
        self.items.push(ItemEntry {
            timestamp,
            player_id: player.id,
            quad: player.stat(Stat::QuadPickups),
            pent: player.stat(Stat::PentPickups),
            flagtk: player.stat(Stat::FlagPickups),
            flagcap: player.stat(Stat::FlagCaptures),
        });
    }

    pub fn frags(&self) -> &[FragEntry] {
        &self.frags
    }

    pub fn items(&self) -> &[ItemEntry] {
        &self.items
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────────

    /// Frag rows with a zero seed per scoring player, then every entry in
    /// emission order.
    pub fn frag_rows(&self, roster: &Roster) -> Vec<FragRow> {
        let seeds = roster.scoring_players().map(|p| FragRow {
            timestamp: 0.0,
            player_id: p.id,
            name: p.name.clone(),
            team: p.team,
            frags: 0,
            deaths: 0,
        });
        let entries = self.frags.iter().filter_map(|entry| {
            let Some(player) = roster.get(entry.player_id) else {
                tracing::trace!(player_id = entry.player_id, "Frag entry for unknown player");
                return None;
            };
            Some(FragRow {
                timestamp: entry.timestamp,
                player_id: entry.player_id,
                name: player.name.clone(),
                team: player.team,
                frags: entry.frags,
                deaths: entry.deaths,
            })
        });
        seeds.chain(entries).collect()
    }

    /// Item rows with a zero seed per scoring player, then every entry.
    pub fn item_rows(&self, roster: &Roster) -> Vec<ItemEntry> {
        roster
            .scoring_players()
            .map(|p| ItemEntry {
                timestamp: 0.0,
                player_id: p.id,
                quad: 0,
                pent: 0,
                flagtk: 0,
                flagcap: 0,
            })
            .chain(self.items.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        let mut roster = Roster::new();
        roster.set_name(1, "Alice");
        roster.set_name(2, "Bob");
        roster.set_name(3, "Spec");
        roster.set_colors(1, 0x44);
        roster.set_colors(2, 0xdd);
        roster
    }

    #[test]
    fn test_suicide_logs_one_less() {
        let mut roster = roster();
        roster.set_frags(1, 5);
        let mut ledger = Ledger::new();
        let alice = roster.get(1).unwrap();
        ledger.log_frags(3.0, alice, false);
        ledger.log_frags(4.0, alice, true);
        let frags: Vec<_> = ledger.frags().iter().map(|e| e.frags).collect();
        assert_eq!(frags, vec![5, 4]);
    }

    #[test]
    fn test_item_snapshot() {
        let mut roster = roster();
        let bob = roster.get_mut(2).unwrap();
        bob.stats.increment(Stat::FlagPickups);
        bob.stats.increment(Stat::QuadPickups);
        let mut ledger = Ledger::new();
        ledger.log_items(10.0, roster.get(2).unwrap());
        assert_eq!(
            ledger.items()[0],
            ItemEntry {
                timestamp: 10.0,
                player_id: 2,
                quad: 1,
                pent: 0,
                flagtk: 1,
                flagcap: 0,
            }
        );
    }

    #[test]
    fn test_export_seeds_scoring_players_only() {
        let roster = roster();
        let mut ledger = Ledger::new();
        ledger.log_frags(7.5, roster.get(2).unwrap(), false);

        let rows = ledger.frag_rows(&roster);
        assert_eq!(rows.len(), 3);
        assert_eq!((rows[0].player_id, rows[0].timestamp, rows[0].frags), (1, 0.0, 0));
        assert_eq!((rows[1].player_id, rows[1].team), (2, Team::Blue));
        assert_eq!((rows[2].player_id, rows[2].timestamp), (2, 7.5));
        assert_eq!(rows[2].name, "Bob");

        let items = ledger.item_rows(&roster);
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|r| r.timestamp == 0.0 && r.flagtk == 0));
    }

    #[test]
    fn test_export_serializes_team_lowercase() {
        let roster = roster();
        let rows = Ledger::new().frag_rows(&roster);
        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(json[0]["team"], "red");
        assert_eq!(json[0]["name"], "Alice");
    }
}
