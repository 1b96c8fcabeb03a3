//! Line classification: item-eligible vs. summary/metadata content.

use crate::models::ParserConfig;

/// Keyword-driven line classifier.
///
/// A line containing any excluded term anywhere is dropped entirely,
/// even when it also carries a valid-looking item+price pattern. False
/// exclusions are preferred over false extractions from summary lines.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    keywords: Vec<String>,
}

impl LineClassifier {
    /// Build a classifier from the configured keyword set.
    pub fn new(config: &ParserConfig) -> Self {
        Self::from_keywords(&config.exclusion_keywords)
    }

    pub fn from_keywords(keywords: &[String]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// Whether the line is excluded from item extraction.
    /// Case-insensitive substring match.
    pub fn is_excluded(&self, line: &str) -> bool {
        let lowered = line.to_lowercase();
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new(&ParserConfig::default())
    }
}
