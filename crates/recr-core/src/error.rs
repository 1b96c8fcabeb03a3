//! Error types for the recr-core library.

use thiserror::Error;

/// Main error type for the recr library.
#[derive(Error, Debug)]
pub enum RecrError {
    /// Receipt parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Vision collaborator error.
    #[error("vision error: {0}")]
    Vision(#[from] VisionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by the receipt parsing engine.
///
/// Per-line and per-token failures are never surfaced here; they are
/// absorbed by the extractors. Only the terminal conditions of a whole
/// parse call appear in this taxonomy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input text was empty or whitespace-only.
    #[error("input text is empty")]
    EmptyInput,

    /// Every strategy ran and produced zero valid items.
    #[error("no items found in receipt")]
    NoItemsFound,

    /// An unexpected fault inside the engine, normalized so callers can
    /// tell "your input had no items" from "the parser itself broke".
    /// Carries no sensitive detail.
    #[error("internal parser failure: {0}")]
    Internal(String),
}

/// Errors raised by the image-to-text collaborator.
#[derive(Error, Debug)]
pub enum VisionError {
    /// The image bytes could not be decoded.
    #[error("failed to decode image: {0}")]
    Decode(String),

    /// The backing model/service failed.
    #[error("vision backend failed: {0}")]
    Backend(String),

    /// The collaborator returned a structurally invalid payload.
    #[error("invalid vision output: {0}")]
    InvalidOutput(String),
}

/// Result type for the recr library.
pub type Result<T> = std::result::Result<T, RecrError>;
