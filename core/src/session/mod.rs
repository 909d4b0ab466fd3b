//! Session processing
//!
//! One `SessionProcessor` per recorded session. It routes each decoded
//! message to the roster, the scoring clock or the line assembler, and
//! emits a `SessionSignal` for every print it classifies.
//!
//! ```text
//! Message ──▶ SessionProcessor ──▶ LineAssembler ──▶ match_block ──▶ ScoringEngine
//!                   │                                    │                 │
//!                   ▼                                    ▼                 ▼
//!                Roster ◀──────────────────────────── Catalog          Ledger
//! ```

mod processor;
mod signal;

pub use processor::{PrintCounts, SessionProcessor, SessionReport, replay};
pub use signal::SessionSignal;
