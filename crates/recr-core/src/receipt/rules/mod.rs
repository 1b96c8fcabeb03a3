//! Rule-based extractors for receipt text.

pub mod amounts;
pub mod classifier;
pub mod entities;
pub mod fallback;
pub mod lines;
pub mod patterns;

pub use amounts::normalize_amount;
pub use classifier::LineClassifier;
pub use entities::{EntityExtractor, EntityPairing, MoneySpan, ProductSpan};
pub use fallback::fill_gaps;
pub use lines::{extract_line, ReceiptLine};
pub use patterns::PatternSet;

use rust_decimal::Decimal;

/// An unconfirmed (name, amount) pair produced by an extractor.
///
/// Candidates are consumed immediately by the orchestrator, which
/// validates them into [`Item`](crate::models::Item) values.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Extracted item name, cleaned of trailing punctuation.
    pub name: String,
    /// Normalized amount.
    pub amount: Decimal,
    /// Confidence score (0.0 - 1.0), by strategy tier.
    pub confidence: f32,
    /// Byte position in source text, when the extractor tracks it.
    pub position: Option<(usize, usize)>,
}

impl Candidate {
    pub fn new(name: impl Into<String>, amount: Decimal, confidence: f32) -> Self {
        Self {
            name: name.into(),
            amount,
            confidence,
            position: None,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Strip trailing punctuation and surrounding whitespace from a captured
/// name segment. Returns `None` when nothing printable is left.
pub(crate) fn clean_name(raw: &str) -> Option<String> {
    let cleaned = raw
        .trim()
        .trim_end_matches(['.', '-', ':', '*'])
        .trim()
        .to_string();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}
