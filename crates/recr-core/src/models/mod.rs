//! Data models for receipt parsing.

pub mod config;
pub mod item;

pub use config::ParserConfig;
pub use item::{ExtractionStrategy, Item, ParseOutcome};
