//! Event definition types
//!
//! An event definition is one catalog declaration: the positional matchers a
//! notification block must satisfy and the scoring rule it triggers.

use serde::Serialize;

use super::cause::Cause;

/// Test applied to one line of a notification block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Matcher {
    /// Line must be the raw name of a known player
    Player,
    /// Line must equal this text exactly
    Literal(String),
}

/// Scoring rule selected by a matched definition.
///
/// Each variant carries only what its rule reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum EventKind {
    PlayerDeath { cause: Option<Cause> },
    PlayerSuicide { cause: Option<Cause> },
    /// First resolved player is the victim, second the killer
    Fragged { cause: Option<Cause>, quad: bool },
    FlagTouch,
    FlagDrop,
    FlagCapture,
    FlagReturnAssist,
    FlagFragAssist,
    FlagReturn,
    FlagDefend,
    CarrierDefend,
    CarrierDangerDefend,
}

impl EventKind {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PlayerDeath { .. } => "player_death",
            Self::PlayerSuicide { .. } => "player_suicide",
            Self::Fragged { .. } => "fragged",
            Self::FlagTouch => "flag_touch",
            Self::FlagDrop => "flag_drop",
            Self::FlagCapture => "flag_capture",
            Self::FlagReturnAssist => "flag_return_assist",
            Self::FlagFragAssist => "flag_frag_assist",
            Self::FlagReturn => "flag_return",
            Self::FlagDefend => "flag_defend",
            Self::CarrierDefend => "carrier_defend",
            Self::CarrierDangerDefend => "carrier_danger_defend",
        }
    }

    pub const fn cause(&self) -> Option<Cause> {
        match self {
            Self::PlayerDeath { cause }
            | Self::PlayerSuicide { cause }
            | Self::Fragged { cause, .. } => *cause,
            _ => None,
        }
    }

    pub const fn is_quad_boosted(&self) -> bool {
        matches!(self, Self::Fragged { quad: true, .. })
    }

    /// Number of player matchers this rule needs.
    pub const fn player_count(&self) -> usize {
        match self {
            Self::Fragged { .. } => 2,
            _ => 1,
        }
    }
}

/// One catalog declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDefinition {
    pub kind: EventKind,
    pub matchers: Vec<Matcher>,
}

impl EventDefinition {
    pub fn new(kind: EventKind, matchers: Vec<Matcher>) -> Self {
        Self { kind, matchers }
    }

    /// `[player, literal]`, shared by deaths, suicides and most flag alerts
    pub(crate) fn player_then_text(kind: EventKind, text: &str) -> Self {
        Self::new(kind, vec![Matcher::Player, Matcher::Literal(text.to_string())])
    }

    /// `[player, literal, player]` plus an optional trailing literal
    pub(crate) fn fragged(cause: Option<Cause>, quad: bool, text: &str, suffix: Option<&str>) -> Self {
        let mut matchers = vec![
            Matcher::Player,
            Matcher::Literal(text.to_string()),
            Matcher::Player,
        ];
        if let Some(suffix) = suffix {
            matchers.push(Matcher::Literal(suffix.to_string()));
        }
        Self::new(EventKind::Fragged { cause, quad }, matchers)
    }

    /// `[player]` followed by one literal per non-empty text
    pub(crate) fn player_then_texts<'a>(
        kind: EventKind,
        texts: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut matchers = vec![Matcher::Player];
        matchers.extend(
            texts
                .into_iter()
                .filter(|t| !t.is_empty())
                .map(|t| Matcher::Literal(t.to_string())),
        );
        Self::new(kind, matchers)
    }

    /// Number of block lines this definition spans
    pub fn line_count(&self) -> usize {
        self.matchers.len()
    }

    pub fn cause(&self) -> Option<Cause> {
        self.kind.cause()
    }

    pub fn is_quad_boosted(&self) -> bool {
        self.kind.is_quad_boosted()
    }
}

impl std::fmt::Display for EventDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind.name())?;
        if let Some(cause) = self.cause() {
            write!(f, "[{}{}]", if self.is_quad_boosted() { "quad " } else { "" }, cause)?;
        }
        for matcher in &self.matchers {
            match matcher {
                Matcher::Player => write!(f, " <player>")?,
                Matcher::Literal(text) => write!(f, " {:?}", text)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragged_without_suffix_has_three_matchers() {
        let def = EventDefinition::fragged(Some(Cause::Axe), false, " was ax-murdered by ", None);
        assert_eq!(def.line_count(), 3);
        assert_eq!(def.matchers[2], Matcher::Player);
    }

    #[test]
    fn test_player_then_texts_skips_empty() {
        let def = EventDefinition::player_then_texts(EventKind::CarrierDefend, [" defends ", "", "!"]);
        assert_eq!(
            def.matchers,
            vec![
                Matcher::Player,
                Matcher::Literal(" defends ".to_string()),
                Matcher::Literal("!".to_string()),
            ]
        );
    }

    #[test]
    fn test_display() {
        let def = EventDefinition::fragged(Some(Cause::RocketLauncher), true, " rides ", Some("'s rocket"));
        assert_eq!(
            def.to_string(),
            "fragged[quad rocket-launcher] <player> \" rides \" <player> \"'s rocket\""
        );
    }

    #[test]
    fn test_quad_flag_only_on_frags() {
        assert!(EventKind::Fragged { cause: None, quad: true }.is_quad_boosted());
        assert!(!EventKind::PlayerSuicide { cause: Some(Cause::RocketLauncher) }.is_quad_boosted());
    }
}
