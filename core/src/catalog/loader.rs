//! Catalog file loading
//!
//! A catalog ("fragfile") is line oriented. Only lines starting with
//! `#DEFINE` are declarations:
//!
//! ```text
//! #DEFINE OBITUARY     X_FRAGGED_BY_Y  Q_ROCKET_LAUNCHER " was brutalized by " "'s quad rocket"
//! #DEFINE FLAG_ALERT   X_TOUCHES_FLAG  " got the RED flag!"
//! ```
//!
//! Everything after the last quoted text is ignored, as is every other line.
//! Any declaration we do not understand is fatal.

use std::fs;
use std::path::{Path, PathBuf};

use memchr::memchr;

use super::cause::Cause;
use super::definition::{EventDefinition, EventKind};
use crate::error::CatalogError;

const DECLARATION: &str = "#DEFINE";
const QUAD_PREFIX: &str = "Q_";
const MAX_TEXTS: usize = 3;

/// Fragfile shipped with the crate, used when no catalog is configured.
pub const BUILTIN_CATALOG: &str = include_str!("../../data/ctf_fragfile.dat");

/// Ordered list of event definitions. Order is the match priority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    definitions: Vec<EventDefinition>,
}

impl Catalog {
    /// Parse catalog text.
    pub fn parse(text: &str) -> Result<Self, CatalogError> {
        let mut definitions = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            if let Some(def) = parse_line(idx + 1, line)? {
                definitions.push(def);
            }
        }
        Ok(Self { definitions })
    }

    /// Load a catalog file. Fragfiles are Latin-1, one byte per console glyph.
    pub fn load_file(path: &Path) -> Result<Self, CatalogError> {
        let bytes = fs::read(path).map_err(|e| CatalogError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let text = encoding_rs::mem::decode_latin1(&bytes);
        let catalog = Self::parse(&text)?;
        tracing::info!(path = %path.display(), definitions = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// The bundled CTF catalog.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::parse(BUILTIN_CATALOG)
    }

    pub fn definitions(&self) -> &[EventDefinition] {
        &self.definitions
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Get the default user catalog location
pub fn default_catalog_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("fragstats").join("fragfile.dat"))
}

/// Parse one line. `Ok(None)` for comments, blanks and ignored declarations.
fn parse_line(line_no: usize, line: &str) -> Result<Option<EventDefinition>, CatalogError> {
    let Some(rest) = line.strip_prefix(DECLARATION) else {
        return Ok(None);
    };
    if !rest.starts_with(char::is_whitespace) {
        return Err(CatalogError::malformed(line_no, "expected whitespace after #DEFINE"));
    }

    let quote_pos = memchr(b'"', rest.as_bytes());
    let head = &rest[..quote_pos.unwrap_or(rest.len())];
    let tokens: Vec<&str> = head.split_whitespace().collect();

    if tokens.first() == Some(&"WEAPON_CLASS") {
        return Ok(None);
    }

    let (kind, subtype, cause_token) = match tokens.as_slice() {
        [kind, subtype] => (*kind, *subtype, None),
        [kind, subtype, cause] => (*kind, *subtype, Some(*cause)),
        _ => {
            return Err(CatalogError::malformed(
                line_no,
                format!("expected TYPE SUBTYPE [CAUSE], found {} tokens", tokens.len()),
            ));
        }
    };

    let Some(quote_pos) = quote_pos else {
        return Err(CatalogError::malformed(line_no, "missing quoted text"));
    };
    let texts = parse_quoted(line_no, &rest[quote_pos..])?;
    let first = texts[0];
    if first.is_empty() {
        return Err(CatalogError::malformed(line_no, "first text is empty"));
    }
    let optional = |idx: usize| texts.get(idx).copied().filter(|t| !t.is_empty());

    let def = match kind {
        "OBITUARY" => {
            let (cause, quad) = match cause_token {
                Some(token) => {
                    let (cause, quad) = parse_cause(line_no, token)?;
                    (Some(cause), quad)
                }
                None => (None, false),
            };
            match subtype {
                "PLAYER_DEATH" => {
                    EventDefinition::player_then_text(EventKind::PlayerDeath { cause }, first)
                }
                "PLAYER_SUICIDE" => {
                    EventDefinition::player_then_text(EventKind::PlayerSuicide { cause }, first)
                }
                "X_FRAGGED_BY_Y" => EventDefinition::fragged(cause, quad, first, optional(1)),
                _ => return Err(unknown_declaration(line_no, kind, subtype)),
            }
        }
        "FLAG_ALERT" => {
            let flag_kind = match subtype {
                "X_TOUCHES_FLAG" => EventKind::FlagTouch,
                "X_DROPS_FLAG" => EventKind::FlagDrop,
                "X_CAPTURES_FLAG" => EventKind::FlagCapture,
                "X_FLAG_ASSIST_RETURN" => EventKind::FlagReturnAssist,
                "X_FLAG_ASSIST_FRAG" => EventKind::FlagFragAssist,
                "X_FLAG_RETURN" => EventKind::FlagReturn,
                "X_FLAG_DEFEND" => EventKind::FlagDefend,
                "X_CARRIER_DEFEND" => EventKind::CarrierDefend,
                "X_CARRIER_DANGER_DEFEND" => EventKind::CarrierDangerDefend,
                _ => return Err(unknown_declaration(line_no, kind, subtype)),
            };
            if cause_token.is_some() {
                return Err(CatalogError::UnexpectedCause {
                    line: line_no,
                    subtype: subtype.to_string(),
                });
            }
            match flag_kind {
                EventKind::CarrierDefend | EventKind::CarrierDangerDefend => {
                    EventDefinition::player_then_texts(flag_kind, texts.iter().copied())
                }
                _ => EventDefinition::player_then_text(flag_kind, first),
            }
        }
        _ => return Err(unknown_declaration(line_no, kind, subtype)),
    };

    Ok(Some(def))
}

/// Extract up to three `"..."` segments. Stops at the first non-quoted token.
fn parse_quoted(line_no: usize, input: &str) -> Result<Vec<&str>, CatalogError> {
    let mut texts = Vec::with_capacity(MAX_TEXTS);
    let mut remaining = input;

    while texts.len() < MAX_TEXTS {
        remaining = remaining.trim_start();
        let Some(body) = remaining.strip_prefix('"') else {
            break;
        };
        let Some(end) = memchr(b'"', body.as_bytes()) else {
            return Err(CatalogError::malformed(line_no, "unterminated quoted text"));
        };
        texts.push(&body[..end]);
        remaining = &body[end + 1..];
    }

    if texts.is_empty() {
        return Err(CatalogError::malformed(line_no, "missing quoted text"));
    }
    Ok(texts)
}

/// Resolve a cause token, stripping the quad prefix.
fn parse_cause(line_no: usize, token: &str) -> Result<(Cause, bool), CatalogError> {
    let (name, quad) = match token.strip_prefix(QUAD_PREFIX) {
        Some(stripped) => (stripped, true),
        None => (token, false),
    };
    Cause::from_token(name)
        .map(|cause| (cause, quad))
        .ok_or_else(|| CatalogError::UnknownCause {
            line: line_no,
            cause: token.to_string(),
        })
}

fn unknown_declaration(line_no: usize, kind: &str, subtype: &str) -> CatalogError {
    CatalogError::UnknownDeclaration {
        line: line_no,
        kind: kind.to_string(),
        subtype: subtype.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Matcher;

    fn parse_one(line: &str) -> EventDefinition {
        let catalog = Catalog::parse(line).unwrap();
        assert_eq!(catalog.len(), 1, "expected one definition from {line:?}");
        catalog.definitions()[0].clone()
    }

    #[test]
    fn test_suicide_without_cause() {
        let def = parse_one(r#"#DEFINE OBITUARY PLAYER_SUICIDE "fell into the void""#);
        assert_eq!(def.kind, EventKind::PlayerSuicide { cause: None });
        assert_eq!(
            def.matchers,
            vec![Matcher::Player, Matcher::Literal("fell into the void".to_string())]
        );
        assert_eq!(def.cause(), None);
        assert!(!def.is_quad_boosted());
    }

    #[test]
    fn test_fragged_with_suffix() {
        let def = parse_one(r#"#DEFINE OBITUARY X_FRAGGED_BY_Y ROCKET_LAUNCHER " rides " "'s rocket""#);
        assert_eq!(
            def.kind,
            EventKind::Fragged { cause: Some(Cause::RocketLauncher), quad: false }
        );
        assert_eq!(def.line_count(), 4);
    }

    #[test]
    fn test_fragged_without_suffix() {
        let def = parse_one(r#"#DEFINE OBITUARY X_FRAGGED_BY_Y NG " was nailed by ""#);
        assert_eq!(def.line_count(), 3);
        assert_eq!(def.matchers[2], Matcher::Player);
    }

    #[test]
    fn test_quad_prefix_stripped() {
        let def = parse_one(
            r#"#DEFINE OBITUARY X_FRAGGED_BY_Y Q_ROCKET_LAUNCHER " was brutalized by " "'s quad rocket""#,
        );
        assert_eq!(def.cause(), Some(Cause::RocketLauncher));
        assert!(def.is_quad_boosted());
    }

    #[test]
    fn test_carrier_defend_texts() {
        let def = parse_one(
            r#"#DEFINE FLAG_ALERT X_CARRIER_DEFEND " defends " "the flag carrier" "!""#,
        );
        assert_eq!(def.kind, EventKind::CarrierDefend);
        assert_eq!(def.line_count(), 4);

        let def = parse_one(r#"#DEFINE FLAG_ALERT X_CARRIER_DANGER_DEFEND " saves the carrier!""#);
        assert_eq!(def.kind, EventKind::CarrierDangerDefend);
        assert_eq!(def.line_count(), 2);
    }

    #[test]
    fn test_trailing_comment_ignored() {
        let def = parse_one(r#"#DEFINE FLAG_ALERT X_TOUCHES_FLAG " got the RED flag!"   // red"#);
        assert_eq!(def.kind, EventKind::FlagTouch);
        assert_eq!(def.line_count(), 2);
    }

    #[test]
    fn test_non_declarations_ignored() {
        let text = "\
#FRAGFILE VERSION ezquake-1.00
// comment

#DEFINE WEAPON_CLASS RL \"rl\" \"rocket launcher\"
#DEFINE FLAG_ALERT X_DROPS_FLAG \" lost the RED flag!\"
";
        let catalog = Catalog::parse(text).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.definitions()[0].kind, EventKind::FlagDrop);
    }

    #[test]
    fn test_unknown_subtype_is_fatal() {
        let err = Catalog::parse(r#"#DEFINE OBITUARY X_TEAMKILLS_Y RL " mows down a teammate""#)
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownDeclaration { line: 1, .. }));
    }

    #[test]
    fn test_unknown_type_is_fatal() {
        let text = "// header\n#DEFINE FLAG_RUNE X_RUNE_RES \"You got the resistance rune\"";
        let err = Catalog::parse(text).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownDeclaration { line: 2, .. }));
    }

    #[test]
    fn test_unknown_cause_is_fatal() {
        let err = Catalog::parse(r#"#DEFINE OBITUARY PLAYER_DEATH BFG " was vaporized""#).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCause { ref cause, .. } if cause == "BFG"));

        let err = Catalog::parse(r#"#DEFINE OBITUARY PLAYER_DEATH Q_ " was vaporized""#).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCause { .. }));
    }

    #[test]
    fn test_flag_alert_rejects_cause() {
        let err = Catalog::parse(r#"#DEFINE FLAG_ALERT X_TOUCHES_FLAG RL " got the flag!""#).unwrap_err();
        assert!(matches!(err, CatalogError::UnexpectedCause { .. }));
    }

    #[test]
    fn test_malformed_lines() {
        assert!(matches!(
            Catalog::parse("#DEFINE OBITUARY PLAYER_DEATH").unwrap_err(),
            CatalogError::Malformed { .. }
        ));
        assert!(matches!(
            Catalog::parse(r#"#DEFINE OBITUARY PLAYER_DEATH " unterminated"#).unwrap_err(),
            CatalogError::Malformed { .. }
        ));
        assert!(matches!(
            Catalog::parse(r#"#DEFINE OBITUARY PLAYER_DEATH """#).unwrap_err(),
            CatalogError::Malformed { .. }
        ));
        assert!(matches!(
            Catalog::parse(r#"#DEFINEOBITUARY PLAYER_DEATH " x""#).unwrap_err(),
            CatalogError::Malformed { .. }
        ));
    }

    #[test]
    fn test_order_preserved() {
        let text = r#"
#DEFINE FLAG_ALERT X_TOUCHES_FLAG " got the RED flag!"
#DEFINE FLAG_ALERT X_DROPS_FLAG " lost the RED flag!"
#DEFINE FLAG_ALERT X_CAPTURES_FLAG " captured the RED flag!"
"#;
        let kinds: Vec<_> = Catalog::parse(text).unwrap().iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![EventKind::FlagTouch, EventKind::FlagDrop, EventKind::FlagCapture]);
    }

    #[test]
    fn test_loading_is_deterministic() {
        assert_eq!(Catalog::parse(BUILTIN_CATALOG).unwrap(), Catalog::parse(BUILTIN_CATALOG).unwrap());
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.len() > 20);
        assert!(catalog.iter().any(|d| d.kind == EventKind::FlagCapture));
        assert!(catalog.iter().any(|d| d.is_quad_boosted()));
    }

    #[test]
    fn test_load_file_decodes_latin1() {
        let dir = std::env::temp_dir().join(format!("fragstats-catalog-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("fragfile.dat");
        // 0xE9 is a single Latin-1 byte, not valid UTF-8 on its own
        let mut bytes = b"#DEFINE OBITUARY PLAYER_DEATH DROWN \" caf".to_vec();
        bytes.extend_from_slice(&[0xE9, b'"', b'\n']);
        fs::write(&path, bytes).unwrap();

        let catalog = Catalog::load_file(&path).unwrap();
        assert_eq!(
            catalog.definitions()[0].matchers[1],
            Matcher::Literal(" caf\u{e9}".to_string())
        );
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load_file(Path::new("/nonexistent/fragfile.dat")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
