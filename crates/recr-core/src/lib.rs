//! Core library for receipt text parsing.
//!
//! This crate provides:
//! - Line-by-line item/price extraction with ordered structural patterns
//! - Whole-text entity pairing and a bare-amount fallback scan
//! - Locale-aware amount normalization to canonical decimals
//! - A trait seam for opaque image-to-text collaborators
//!
//! Input is expected to be OCR-derived and noisy; the engine is a
//! best-effort heuristic pipeline, not a verified parser.

pub mod error;
pub mod models;
pub mod receipt;
pub mod vision;

pub use error::{ParseError, RecrError, Result, VisionError};
pub use models::{ExtractionStrategy, Item, ParseOutcome, ParserConfig};
pub use receipt::{HeuristicReceiptParser, ReceiptParser};
pub use vision::{VisionOutput, VisionSource};
