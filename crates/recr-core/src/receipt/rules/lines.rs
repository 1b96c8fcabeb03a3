//! Line-level extraction: ordered structural patterns over one line.

use tracing::trace;

use super::amounts::normalize_amount;
use super::patterns::PatternSet;
use super::{clean_name, Candidate};
use rust_decimal::Decimal;

/// One line of cleaned input text. Ephemeral: lives only for the
/// duration of a single parse call.
#[derive(Debug, Clone, Copy)]
pub struct ReceiptLine<'a> {
    /// The line as it appeared in the input.
    pub raw: &'a str,
    /// Whitespace-trimmed view of the line.
    pub trimmed: &'a str,
    /// Zero-based position in the input.
    pub index: usize,
}

impl<'a> ReceiptLine<'a> {
    pub fn new(raw: &'a str, index: usize) -> Self {
        Self {
            raw,
            trimmed: raw.trim(),
            index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.trimmed.is_empty()
    }
}

/// Try the ordered patterns against one non-excluded, non-empty line.
///
/// Yields no candidate when no pattern matches, the name is empty after
/// cleanup, or the amount fails to normalize to a positive value. None
/// of these abort the overall parse.
pub fn extract_line(
    line: &ReceiptLine<'_>,
    patterns: &PatternSet,
    currency_symbols: &[String],
) -> Option<Candidate> {
    for pattern in patterns.line_patterns() {
        let Some(caps) = pattern.captures(line.trimmed) else {
            continue;
        };

        let name = match clean_name(&caps["name"]) {
            Some(name) => name,
            None => {
                trace!(line = line.index, "empty name after cleanup, skipping");
                return None;
            }
        };

        let amount = match normalize_amount(&caps["amount"], currency_symbols) {
            Some(amount) if amount > Decimal::ZERO => amount,
            _ => {
                trace!(line = line.index, token = &caps["amount"], "amount did not normalize, skipping");
                return None;
            }
        };

        return Some(Candidate::new(name, amount, 0.9));
    }

    None
}
