//! Configuration structures for the parsing pipeline.

use serde::{Deserialize, Serialize};

/// Configuration for the receipt parsing engine.
///
/// The keyword and symbol sets are data, not code: they can be extended
/// without touching extraction logic. Defaults cover common English
/// receipt conventions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Terms that mark a line as non-item content (totals, tax, footers).
    /// Matched case-insensitively as substrings against the whole line.
    pub exclusion_keywords: Vec<String>,

    /// Currency symbols stripped before amount normalization.
    pub currency_symbols: Vec<String>,

    /// Minimum character length for a product-like span in the entity
    /// pass. Shorter spans are usually OCR noise.
    pub min_product_len: usize,

    /// Enable the whole-text entity pairing tier when the line pass
    /// yields nothing.
    pub enable_entity_fallback: bool,

    /// Enable the bare-amount scan when entity pairing under-delivers.
    pub enable_regex_fallback: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            exclusion_keywords: default_exclusion_keywords(),
            currency_symbols: default_currency_symbols(),
            min_product_len: 3,
            enable_entity_fallback: true,
            enable_regex_fallback: true,
        }
    }
}

fn default_exclusion_keywords() -> Vec<String> {
    [
        // totals and summary lines
        "subtotal",
        "sub-total",
        "total",
        "balance",
        "amount due",
        // tax and charges. Bare "fee" would also hit "Coffee", so only
        // the labeled forms are listed.
        "tax",
        "gst",
        "vat",
        "service charge",
        "service fee",
        "svc chg",
        "gratuity",
        // payment lines
        "change",
        "refund",
        "discount",
        "voucher",
        // footer / gratitude phrases
        "thank you",
        "thanks",
        "welcome",
        "come again",
        // metadata labels
        "date",
        "time",
        "invoice",
        "receipt no",
        "cashier",
        "pax",
        "guest",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_currency_symbols() -> Vec<String> {
    ["$", "€", "£", "¥", "S$", "RM", "Rp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl ParserConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_summary_terms() {
        let config = ParserConfig::default();
        for term in ["subtotal", "total", "tax", "change", "thank you"] {
            assert!(
                config.exclusion_keywords.iter().any(|k| k == term),
                "missing default keyword: {term}"
            );
        }
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: ParserConfig = serde_json::from_str(r#"{"min_product_len": 5}"#).unwrap();
        assert_eq!(config.min_product_len, 5);
        assert!(config.enable_entity_fallback);
        assert!(!config.currency_symbols.is_empty());
    }
}
