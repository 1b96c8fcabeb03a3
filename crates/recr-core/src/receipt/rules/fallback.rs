//! Regex fallback: last-resort bare-amount scan.
//!
//! Invoked only when entity pairing under-delivers relative to the
//! detected product count. Remaining unpaired products are zipped
//! positionally against bare amounts the pairing pass did not consume.
//! Explicitly a best-effort gap-filler, never the primary path.

use rust_decimal::Decimal;
use tracing::debug;

use super::amounts::normalize_amount;
use super::entities::EntityPairing;
use super::patterns::BARE_AMOUNT;
use super::{clean_name, Candidate};

/// Zip unpaired products against leftover bare amounts, in detection
/// order. Amounts whose span overlaps one already consumed by entity
/// pairing are skipped.
pub fn fill_gaps(
    text: &str,
    pairing: &EntityPairing,
    currency_symbols: &[String],
) -> Vec<Candidate> {
    let leftover: Vec<(Decimal, usize, usize)> = BARE_AMOUNT
        .find_iter(text)
        .filter(|m| {
            !pairing
                .consumed
                .iter()
                .any(|&(start, end)| m.start() < end && start < m.end())
        })
        .filter_map(|m| {
            let amount = normalize_amount(m.as_str(), currency_symbols)?;
            (amount > Decimal::ZERO).then_some((amount, m.start(), m.end()))
        })
        .collect();

    debug!(
        unpaired = pairing.unpaired.len(),
        leftover = leftover.len(),
        "filling gaps from bare-amount scan"
    );

    pairing
        .unpaired
        .iter()
        .zip(leftover)
        .filter_map(|(product, (amount, _, _))| {
            let name = clean_name(&product.text)?;
            Some(Candidate::new(name, amount, 0.5).with_position(product.start, product.end))
        })
        .collect()
}
