//! Amount normalization across locale conventions.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Normalize a locale-ambiguous numeric token into a canonical decimal.
///
/// Handles `5.50`, `5,50`, `1,234.56` and `1.234,56` alike: configured
/// currency symbols and spacing are stripped, then the decimal separator
/// is resolved. When both separators appear, the right-most one is taken
/// as decimal and the other as grouping.
///
/// Returns `None` when the token does not parse; callers treat that as
/// "skip this token", never as a fatal error. No rounding is performed
/// and precisions other than two decimals are accepted as-is.
pub fn normalize_amount(token: &str, currency_symbols: &[String]) -> Option<Decimal> {
    let mut stripped = token.to_string();
    for symbol in currency_symbols {
        stripped = stripped.replace(symbol.as_str(), "");
    }

    // Drop spacing (incl. non-breaking) used as a grouping separator.
    let cleaned: String = stripped
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let commas = cleaned.matches(',').count();
    let normalized = match (commas, cleaned.contains('.')) {
        (0, _) => cleaned,
        // Single comma, no period: comma is the decimal separator.
        (1, false) => cleaned.replace(',', "."),
        // Multiple commas, no period: commas are grouping.
        (_, false) => cleaned.replace(',', ""),
        // Both present: the right-most separator is decimal.
        (_, true) => {
            let comma_pos = cleaned.rfind(',');
            let dot_pos = cleaned.rfind('.');
            match (comma_pos, dot_pos) {
                (Some(c), Some(d)) if c > d => cleaned.replace('.', "").replace(',', "."),
                _ => cleaned.replace(',', ""),
            }
        }
    };

    Decimal::from_str(&normalized).ok()
}
