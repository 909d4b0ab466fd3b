//! Event matcher
//!
//! Resolves a notification block against the catalog. Definitions are tried
//! in load order and the first full match wins.

use crate::catalog::{Catalog, EventDefinition, EventKind, Matcher};
use crate::roster::{ClientId, Roster};
use crate::text;

/// A matched notification: the rule to apply and the players it names,
/// in matcher order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub kind: EventKind,
    pub players: Vec<ClientId>,
}

impl Match {
    pub fn first(&self) -> Option<ClientId> {
        self.players.first().copied()
    }

    pub fn second(&self) -> Option<ClientId> {
        self.players.get(1).copied()
    }
}

/// Find the first definition matching `block`.
pub fn match_block(catalog: &Catalog, roster: &Roster, block: &[String]) -> Option<Match> {
    let found = catalog
        .iter()
        .find_map(|def| match_definition(def, roster, block));

    if found.is_none() {
        tracing::debug!(text = %text::decode_block(block), lines = block.len(), "Unmatched notification");
    }
    found
}

fn match_definition(def: &EventDefinition, roster: &Roster, block: &[String]) -> Option<Match> {
    if def.line_count() != block.len() {
        return None;
    }

    let mut players = Vec::with_capacity(def.kind.player_count());
    for (matcher, line) in def.matchers.iter().zip(block) {
        match matcher {
            Matcher::Literal(expected) => {
                if expected != line {
                    return None;
                }
            }
            Matcher::Player => players.push(roster.resolve(line)?),
        }
    }

    Some(Match {
        kind: def.kind,
        players,
    })
}
