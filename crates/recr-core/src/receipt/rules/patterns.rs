//! Regex patterns for receipt extraction.
//!
//! Patterns with no configuration dependency are compiled once per
//! process via `lazy_static`. Patterns that embed the configured
//! currency symbols live in [`PatternSet`], compiled once per parser
//! and shared read-only across calls.

use lazy_static::lazy_static;
use regex::Regex;

/// Name fragment for anchored line patterns: non-digit-leading text.
/// Excludes `@`/`=` so quantity/unit-price lines are not swallowed by
/// the generic pattern.
const NAME_FRAG: &str = r"(?P<name>[^\d\s][^@=]*?)";

lazy_static! {
    /// Product-like span: sequence of alphabetic tokens on one line.
    pub static ref PRODUCT_SPAN: Regex = Regex::new(
        r"[A-Za-z][A-Za-z'&-]*(?:[ \t][A-Za-z][A-Za-z'&-]*)*"
    ).unwrap();

    /// Bare amount shape for the last-resort scan: digits, separator,
    /// exactly two fractional digits.
    pub static ref BARE_AMOUNT: Regex = Regex::new(
        r"\b\d+(?:[.,]\d{3})*[.,]\d{2}\b"
    ).unwrap();
}

/// Alternation of the configured currency symbols, escaped for regex
/// use. Longer symbols sort first so `S$` wins over `$`.
fn symbol_alternation(currency_symbols: &[String]) -> String {
    let mut parts: Vec<String> = currency_symbols
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| regex::escape(s))
        .collect();
    parts.sort_by_key(|p| std::cmp::Reverse(p.len()));
    parts.join("|")
}

/// Shared amount fragment: optional currency symbol, then digits with
/// optional grouping separators and an optional decimal part. Accepts
/// both `1,234.56` and `1.234,56` conventions; locale resolution
/// happens in the normalizer, not here.
fn amount_frag(symbol: &str) -> String {
    let prefix = if symbol.is_empty() {
        String::new()
    } else {
        format!(r"(?:(?:{symbol})\s?)?")
    };
    format!(r"{prefix}(?:\d{{1,3}}(?:[.,]\d{{3}})+(?:[.,]\d{{1,2}})?|\d+(?:[.,]\d{{1,2}})?)")
}

/// Regexes parameterized by the configured currency symbols.
///
/// Compiled once in the parser constructor; all parse calls borrow the
/// same immutable set.
#[derive(Debug, Clone)]
pub struct PatternSet {
    // Line-level patterns, one candidate per line. Tried in the order
    // returned by `line_patterns` (most specific first).

    /// "<name> N @ <unit-price> [each] = <amount>" - only the trailing
    /// total is captured, the unit price is discarded.
    pub qty_at_line: Regex,
    /// "<name> xN <amount>" - explicit quantity marker.
    pub qty_x_line: Regex,
    /// "<name>...<amount>" - dot leaders (3+ separator characters).
    pub dot_leader_line: Regex,
    /// "<name> - <amount>" - hyphen separated.
    pub hyphen_line: Regex,
    /// "<name> <amount>" - the generic form, amount at line end.
    pub name_amount_line: Regex,

    /// Money-like span for the entity pass: currency-prefixed number,
    /// or a bare number with a two-digit decimal part.
    pub money_span: Regex,
}

impl PatternSet {
    pub fn new(currency_symbols: &[String]) -> Self {
        let symbol = symbol_alternation(currency_symbols);
        let amount = amount_frag(&symbol);

        let money_span = if symbol.is_empty() {
            String::from(r"\b\d{1,3}(?:[.,]\d{3})*[.,]\d{2}\b")
        } else {
            format!(
                r"(?:{symbol})\s?\d+(?:[.,]\d{{3}})*(?:[.,]\d{{1,2}})?|\b\d{{1,3}}(?:[.,]\d{{3}})*[.,]\d{{2}}\b"
            )
        };

        Self {
            qty_at_line: Regex::new(&format!(
                r"(?i)^{NAME_FRAG}\s+(?P<qty>\d+)\s*@\s*(?:{amount})(?:\s+each)?\s*=\s*(?P<amount>{amount})$"
            ))
            .unwrap(),
            qty_x_line: Regex::new(&format!(
                r"(?i)^{NAME_FRAG}\s+x\s?(?P<qty>\d+)\s+(?P<amount>{amount})$"
            ))
            .unwrap(),
            dot_leader_line: Regex::new(&format!(
                r"^(?P<name>[^\d\s].*?)\s*[.\-_]{{3,}}\s*(?P<amount>{amount})$"
            ))
            .unwrap(),
            hyphen_line: Regex::new(&format!(
                r"^(?P<name>[^\d\s].*?)\s+-\s+(?P<amount>{amount})$"
            ))
            .unwrap(),
            name_amount_line: Regex::new(&format!(
                r"^{NAME_FRAG}\s+(?P<amount>{amount})$"
            ))
            .unwrap(),
            money_span: Regex::new(&money_span).unwrap(),
        }
    }

    /// Line patterns in attempt order: most specific first, so the
    /// generic `<name> <amount>` form cannot shadow the quantity/leader
    /// variants. First match wins; one candidate max per line.
    pub fn line_patterns(&self) -> [&Regex; 5] {
        [
            &self.qty_at_line,
            &self.qty_x_line,
            &self.dot_leader_line,
            &self.hyphen_line,
            &self.name_amount_line,
        ]
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::new(&crate::models::ParserConfig::default().currency_symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_amount_line() {
        let patterns = PatternSet::default();
        let caps = patterns.name_amount_line.captures("Chicken Rice 5.50").unwrap();
        assert_eq!(&caps["name"], "Chicken Rice");
        assert_eq!(&caps["amount"], "5.50");

        // European decimal comma
        let caps = patterns.name_amount_line.captures("Fries 3,50").unwrap();
        assert_eq!(&caps["amount"], "3,50");

        // grouping + decimal
        let caps = patterns.name_amount_line.captures("Catering 1.234,56").unwrap();
        assert_eq!(&caps["amount"], "1.234,56");
    }

    #[test]
    fn test_name_must_not_lead_with_digit() {
        let patterns = PatternSet::default();
        assert!(patterns.name_amount_line.captures("12345 5.50").is_none());
    }

    #[test]
    fn test_multi_char_currency_symbols_captured() {
        let patterns = PatternSet::default();
        let caps = patterns.name_amount_line.captures("Nasi Lemak RM5.50").unwrap();
        assert_eq!(&caps["name"], "Nasi Lemak");
        assert_eq!(&caps["amount"], "RM5.50");

        let caps = patterns.name_amount_line.captures("Latte S$6.20").unwrap();
        assert_eq!(&caps["amount"], "S$6.20");
    }

    #[test]
    fn test_custom_symbol_set() {
        let patterns = PatternSet::new(&["kr".to_string()]);
        let caps = patterns.name_amount_line.captures("Waffle kr12.00").unwrap();
        assert_eq!(&caps["amount"], "kr12.00");
        // default symbols are gone from the compiled set
        assert!(patterns.money_span.find("$4").is_none());
    }

    #[test]
    fn test_dot_leader_line() {
        let patterns = PatternSet::default();
        let caps = patterns.dot_leader_line.captures("Coffee....3.00").unwrap();
        assert_eq!(&caps["name"], "Coffee");
        assert_eq!(&caps["amount"], "3.00");
    }

    #[test]
    fn test_qty_at_line_keeps_only_total() {
        let patterns = PatternSet::default();
        let caps = patterns.qty_at_line.captures("Burger 2 @ 3.00 each = 6.00").unwrap();
        assert_eq!(&caps["name"], "Burger");
        assert_eq!(&caps["qty"], "2");
        assert_eq!(&caps["amount"], "6.00");
    }

    #[test]
    fn test_qty_x_line() {
        let patterns = PatternSet::default();
        let caps = patterns.qty_x_line.captures("Coke x2 2.40").unwrap();
        assert_eq!(&caps["name"], "Coke");
        assert_eq!(&caps["amount"], "2.40");
    }

    #[test]
    fn test_money_span_requires_currency_context() {
        let patterns = PatternSet::default();
        let spans: Vec<&str> = patterns
            .money_span
            .find_iter("$4 and 3.50 but not 1234")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(spans, vec!["$4", "3.50"]);
    }

    #[test]
    fn test_money_span_with_configured_symbols() {
        let patterns = PatternSet::default();
        let spans: Vec<&str> = patterns
            .money_span
            .find_iter("Nasi Lemak RM5.50 and Teh RM2")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(spans, vec!["RM5.50", "RM2"]);
    }

    #[test]
    fn test_bare_amount_two_decimals_only() {
        assert!(BARE_AMOUNT.is_match("3.50"));
        assert!(BARE_AMOUNT.is_match("1.234,56"));
        assert!(!BARE_AMOUNT.is_match("3.5"));
        assert!(!BARE_AMOUNT.is_match("1234"));
    }
}
