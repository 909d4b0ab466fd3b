//! Shared configuration types for fragstats.

pub mod formatting;
pub mod settings;

pub use settings::ScoringSettings;
