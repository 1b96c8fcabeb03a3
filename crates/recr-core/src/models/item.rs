//! Output models for receipt parsing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A confirmed line item extracted from a receipt.
///
/// Invariants: `name` is non-empty and trimmed, `amount > 0`. Both are
/// enforced by the orchestrator before an item is emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Item name as printed on the receipt, trimmed.
    pub name: String,

    /// Monetary amount, normalized to a canonical decimal.
    pub amount: Decimal,
}

impl Item {
    pub fn new(name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// Which strategy tier produced the final item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// Per-line structural patterns (primary path).
    LineRules,
    /// Whole-text product/money span pairing.
    EntityPairing,
    /// Entity pairing supplemented by the bare-amount scan.
    RegexFallback,
    /// Structured items delivered directly by the vision collaborator.
    Vision,
}

/// Result of one receipt parse call.
///
/// The item list is ordered by appearance in the text (or by detection
/// order for entity-paired items) and is never empty: a parse that yields
/// zero items fails with [`ParseError::NoItemsFound`] instead.
///
/// [`ParseError::NoItemsFound`]: crate::error::ParseError::NoItemsFound
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseOutcome {
    /// Extracted items, in order.
    pub items: Vec<Item>,

    /// Strategy tier that produced the items.
    pub strategy: ExtractionStrategy,

    /// Confidence score (0.0 - 1.0): the lowest tier confidence among
    /// the emitted items.
    pub confidence: f32,

    /// Non-fatal issues encountered while parsing (skipped tokens,
    /// unpairable products).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    /// Processing time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<u64>,
}
