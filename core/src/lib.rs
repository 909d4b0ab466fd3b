pub mod assembler;
pub mod catalog;
pub mod config;
pub mod error;
pub mod ledger;
pub mod matcher;
pub mod message;
pub mod roster;
pub mod scoring;
pub mod session;
pub mod summary;
pub mod text;

// Re-exports for convenience
pub use catalog::{Catalog, Cause, EventDefinition, EventKind};
pub use error::{CatalogError, ConfigError};
pub use fragstats_types::ScoringSettings;
pub use ledger::{FragRow, ItemEntry, Ledger};
pub use matcher::Match;
pub use message::Message;
pub use roster::{ClientId, Player, Roster, Stat, Team};
pub use session::{SessionProcessor, SessionReport, SessionSignal, replay};
pub use summary::{SessionSummary, SummaryMeta};
