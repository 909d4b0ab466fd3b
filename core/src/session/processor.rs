use std::sync::Arc;

use fragstats_types::ScoringSettings;
use fragstats_types::formatting::format_game_time;

use super::SessionSignal;
use crate::assembler::{Assembled, LineAssembler};
use crate::catalog::Catalog;
use crate::ledger::Ledger;
use crate::matcher::match_block;
use crate::message::{Message, map_name_from_model};
use crate::roster::{ClientId, Roster};
use crate::scoring::{ScoringEngine, ScoringState};

/// Tallies of how print messages were classified
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrintCounts {
    pub matched: usize,
    pub unmatched: usize,
    pub chat: usize,
    pub server: usize,
}

/// Everything a finished session leaves behind
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub roster: Roster,
    pub ledger: Ledger,
    pub state: ScoringState,
    pub counts: PrintCounts,
}

/// Processes the message stream of exactly one session, in order.
pub struct SessionProcessor {
    catalog: Arc<Catalog>,
    roster: Roster,
    engine: ScoringEngine,
    ledger: Ledger,
    assembler: LineAssembler,
    counts: PrintCounts,
}

impl SessionProcessor {
    pub fn new(catalog: Arc<Catalog>, settings: ScoringSettings) -> Self {
        Self {
            catalog,
            roster: Roster::new(),
            engine: ScoringEngine::new(settings),
            ledger: Ledger::new(),
            assembler: LineAssembler::new(),
            counts: PrintCounts::default(),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn state(&self) -> &ScoringState {
        self.engine.state()
    }

    pub fn counts(&self) -> PrintCounts {
        self.counts
    }

    /// Process a single message, returning a signal for print messages
    pub fn process(&mut self, message: &Message) -> Option<SessionSignal> {
        match message {
            Message::ServerInfo { models, level_name } => {
                if let Some(map) = models.first().and_then(|m| map_name_from_model(m)) {
                    tracing::info!(map, level = %level_name, "Session started");
                    self.engine.set_map_name(map);
                }
                None
            }
            Message::Time { time } => {
                self.engine.set_time(*time);
                None
            }
            Message::Intermission | Message::Finale => {
                self.engine.mark_phase_end();
                None
            }
            Message::UpdateName { client, name } => {
                if !name.is_empty() {
                    self.roster.set_name(*client, name);
                }
                None
            }
            Message::UpdateFrags { client, count } => {
                self.update_frags(*client, *count);
                None
            }
            Message::UpdateColors { client, color } => {
                if self.roster.set_colors(*client, *color).is_none() {
                    tracing::trace!(client, "Colours for unknown client");
                }
                None
            }
            Message::Print { text } => self.print(text),
        }
    }

    /// Process multiple messages, collecting their signals
    pub fn process_all<'a>(&mut self, messages: impl IntoIterator<Item = &'a Message>) -> Vec<SessionSignal> {
        messages.into_iter().filter_map(|m| self.process(m)).collect()
    }

    pub fn finish(mut self) -> SessionReport {
        let dropped = self.assembler.flush();
        if !dropped.is_empty() {
            tracing::debug!(lines = dropped.len(), "Discarding incomplete notification at end of session");
        }
        SessionReport {
            roster: self.roster,
            ledger: self.ledger,
            state: self.engine.into_state(),
            counts: self.counts,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Handlers
    // ─────────────────────────────────────────────────────────────────────────

    /// The roster always takes the server's count; a zero count gets no ledger row.
    fn update_frags(&mut self, client: ClientId, count: i32) {
        let time = self.engine.state().time;
        match self.roster.set_frags(client, count) {
            Some(player) if count != 0 => self.ledger.log_frags(time, player, false),
            Some(_) => {}
            None => tracing::trace!(client, count, "Frags for unknown client"),
        }
    }

    fn print(&mut self, text: &str) -> Option<SessionSignal> {
        let time = self.engine.state().time;
        match self.assembler.push(text) {
            Assembled::Pending => None,
            Assembled::Chat(text) => {
                self.counts.chat += 1;
                tracing::trace!(time = %format_game_time(time), %text, "chat");
                Some(SessionSignal::Chat { time, text })
            }
            Assembled::Server(text) => {
                self.counts.server += 1;
                tracing::trace!(time = %format_game_time(time), %text, "server");
                Some(SessionSignal::Server { time, text })
            }
            Assembled::Block(lines) => match match_block(&self.catalog, &self.roster, &lines) {
                Some(event) => {
                    self.counts.matched += 1;
                    self.engine.apply(&event, &mut self.roster, &mut self.ledger);
                    Some(SessionSignal::Matched { time, event })
                }
                None => {
                    self.counts.unmatched += 1;
                    Some(SessionSignal::Unmatched { time, lines })
                }
            },
        }
    }
}

/// Run a whole message stream through a fresh processor.
pub fn replay<I>(catalog: Arc<Catalog>, settings: ScoringSettings, messages: I) -> SessionReport
where
    I: IntoIterator<Item = Message>,
{
    let mut processor = SessionProcessor::new(catalog, settings);
    for message in messages {
        processor.process(&message);
    }
    processor.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Cause, EventKind};
    use crate::roster::{Stat, Team};

    const CATALOG: &str = r#"
#DEFINE OBITUARY X_FRAGGED_BY_Y RL " rides " "'s rocket"
#DEFINE OBITUARY PLAYER_SUICIDE "fell into the void"
#DEFINE FLAG_ALERT X_TOUCHES_FLAG " got the BLUE flag!"
"#;

    fn processor() -> SessionProcessor {
        let catalog = Arc::new(Catalog::parse(CATALOG).unwrap());
        SessionProcessor::new(catalog, ScoringSettings::default())
    }

    fn name(client: ClientId, name: &str) -> Message {
        Message::UpdateName {
            client,
            name: name.to_string(),
        }
    }

    fn print(text: &str) -> Message {
        Message::Print { text: text.to_string() }
    }

    #[test]
    fn test_server_info_sets_map() {
        let mut p = processor();
        p.process(&Message::ServerInfo {
            models: vec!["maps/ctf5.bsp".to_string(), "progs/player.mdl".to_string()],
            level_name: "Landing Party".to_string(),
        });
        assert_eq!(p.state().map_name.as_deref(), Some("ctf5"));
    }

    #[test]
    fn test_empty_name_ignored() {
        let mut p = processor();
        p.process(&name(1, ""));
        assert!(p.roster().is_empty());
    }

    #[test]
    fn test_unknown_client_updates_skipped() {
        let mut p = processor();
        p.process(&Message::UpdateFrags { client: 9, count: 4 });
        p.process(&Message::UpdateColors { client: 9, color: 0x44 });
        assert!(p.roster().is_empty());
        assert!(p.ledger().frags().is_empty());
    }

    #[test]
    fn test_frag_updates_logged_except_zero() {
        let mut p = processor();
        p.process(&name(1, "Alice"));
        p.process(&Message::Time { time: 4.0 });
        p.process(&Message::UpdateFrags { client: 1, count: 0 });
        p.process(&Message::UpdateFrags { client: 1, count: 3 });
        assert_eq!(p.roster().get(1).unwrap().frags, 3);
        assert_eq!(p.ledger().frags().len(), 1);
        assert_eq!(p.ledger().frags()[0].timestamp, 4.0);
    }

    #[test]
    fn test_zero_frag_update_still_sets_count() {
        let mut p = processor();
        p.process(&name(1, "Alice"));
        p.process(&name(2, "Bob"));
        p.process(&Message::UpdateFrags { client: 1, count: 1 });
        p.process(&print("Alice"));
        p.process(&print("fell into the void\n"));
        p.process(&Message::UpdateFrags { client: 1, count: 0 });
        assert_eq!(p.roster().get(1).unwrap().frags, 0);

        // A later death snapshots the server's zero, not the stale count
        p.process(&print("Alice"));
        p.process(&print(" rides "));
        p.process(&print("Bob"));
        p.process(&print("'s rocket\n"));
        let rows: Vec<_> = p
            .ledger()
            .frags()
            .iter()
            .filter(|e| e.player_id == 1)
            .map(|e| (e.frags, e.deaths))
            .collect();
        assert_eq!(rows, vec![(1, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn test_colors_set_team() {
        let mut p = processor();
        p.process(&name(1, "Alice"));
        p.process(&Message::UpdateColors { client: 1, color: 0xd4 });
        assert_eq!(p.roster().get(1).unwrap().team, Team::Red);
    }

    #[test]
    fn test_print_signals() {
        let mut p = processor();
        p.process(&name(1, "Alice"));
        p.process(&name(2, "Bob"));
        p.process(&Message::Time { time: 2.0 });

        let signals = p.process_all(&[
            print("\u{1}Alice: hi\n"),
            print("Bob"),
            print(" rides "),
            print("Alice"),
            print("'s rocket\n"),
            print("Somebody did something\n"),
        ]);

        assert_eq!(signals.len(), 3);
        assert_eq!(
            signals[0],
            SessionSignal::Chat {
                time: 2.0,
                text: "Alice: hi".to_string()
            }
        );
        match &signals[1] {
            SessionSignal::Matched { event, .. } => {
                assert_eq!(
                    event.kind,
                    EventKind::Fragged {
                        cause: Some(Cause::RocketLauncher),
                        quad: false
                    }
                );
                assert_eq!(event.players, vec![2, 1]);
            }
            other => panic!("expected match, got {:?}", other),
        }
        assert!(matches!(signals[2], SessionSignal::Unmatched { .. }));
        assert_eq!(
            p.counts(),
            PrintCounts {
                matched: 1,
                unmatched: 1,
                chat: 1,
                server: 0
            }
        );
    }

    #[test]
    fn test_suicide_example() {
        let mut p = processor();
        p.process(&name(1, "Bob"));
        p.process(&print("Bob"));
        p.process(&print("fell into the void\n"));
        let bob = p.roster().get(1).unwrap();
        assert_eq!(bob.stat(Stat::Suicides), 1);
        assert_eq!(bob.stat(Stat::Deaths), 1);
    }

    #[test]
    fn test_phase_end_records_duration() {
        let report = replay(
            Arc::new(Catalog::parse(CATALOG).unwrap()),
            ScoringSettings::default(),
            vec![
                Message::Time { time: 600.5 },
                Message::Intermission,
                Message::Time { time: 610.0 },
            ],
        );
        assert_eq!(report.state.duration, 600.5);
        assert_eq!(report.state.time, 610.0);
    }
}
