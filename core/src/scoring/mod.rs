//! CTF scoring engine
//!
//! Turns matched notifications into counter updates, quad ownership changes
//! and ledger entries.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────────────────────────────────┐
//! │    Match     │────▶│               ScoringEngine                  │
//! │ kind+players │     │  settings (bonuses, windows)                 │
//! └──────────────┘     │  state: time, duration, map, quad holder     │
//!                      └──────────────────────────────────────────────┘
//!                               │                        │
//!                               ▼                        ▼
//!                      ┌─────────────────┐      ┌─────────────────┐
//!                      │ Roster counters │      │ Frag/item ledger│
//!                      └─────────────────┘      └─────────────────┘
//! ```
//!
//! Quad expiry is lazy: it is only evaluated when a frag is processed.

mod engine;


pub use engine::{QuadHolder, ScoringEngine, ScoringState};
