//! Event pattern catalog
//!
//! This module provides:
//! - **Causes**: the closed set of weapons and environmental deaths
//! - **Definitions**: positional matchers plus the scoring rule they select
//! - **Loading**: fragfile parsing, bundled default and user catalog location
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Declaration (fragfile)                      │
//! │  #DEFINE OBITUARY X_FRAGGED_BY_Y RL " rides " "'s rocket"       │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                        Catalog::parse
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   EventDefinition (runtime)                     │
//! │  Fragged{rocket-launcher}: <player> " rides " <player> "'s..."  │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                        Event Matcher
//! ```

mod cause;
mod definition;
mod loader;

pub use cause::Cause;
pub use definition::{EventDefinition, EventKind, Matcher};
pub use loader::{BUILTIN_CATALOG, Catalog, default_catalog_path};
