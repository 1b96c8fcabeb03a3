//! Receipt parsing orchestrator.
//!
//! Drives the strategy tiers in order: line-by-line structural patterns
//! first, then whole-text entity pairing, then the bare-amount scan.
//! The tiers are not alternate products; they are ordered fallbacks of
//! one parse call.

use std::time::Instant;

use rust_decimal::Decimal;
use tracing::{debug, info};

use super::rules::{
    extract_line, fill_gaps, Candidate, EntityExtractor, LineClassifier, PatternSet, ReceiptLine,
};
use super::{ReceiptParser, Result};
use crate::error::{ParseError, RecrError, VisionError};
use crate::models::{ExtractionStrategy, Item, ParseOutcome, ParserConfig};
use crate::vision::{VisionOutput, VisionSource};

/// Heuristic receipt parser.
///
/// Stateless across calls: the only shared state is the configuration
/// and the patterns compiled from it, both immutable after
/// construction, so one instance may serve concurrent callers.
pub struct HeuristicReceiptParser {
    config: ParserConfig,
    classifier: LineClassifier,
    patterns: PatternSet,
}

impl HeuristicReceiptParser {
    /// Create a parser with default configuration.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create a parser with explicit configuration. Compiles the
    /// currency-symbol-dependent patterns once, up front.
    pub fn with_config(config: ParserConfig) -> Self {
        let classifier = LineClassifier::new(&config);
        let patterns = PatternSet::new(&config.currency_symbols);
        Self {
            config,
            classifier,
            patterns,
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Primary tier: classifier filter plus line-level patterns, in
    /// line order.
    fn line_pass(&self, text: &str, warnings: &mut Vec<String>) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = ReceiptLine::new(raw, index);
            if line.is_empty() {
                continue;
            }

            if self.classifier.is_excluded(line.trimmed) {
                debug!(line = index, "excluded by classifier");
                continue;
            }

            match extract_line(&line, &self.patterns, &self.config.currency_symbols) {
                Some(candidate) => candidates.push(candidate),
                None => {
                    debug!(line = index, "no item pattern matched");
                    warnings.push(format!("line {index}: no item extracted"));
                }
            }
        }

        candidates
    }

    /// Fallback tiers: entity pairing over the whole text, then the
    /// bare-amount scan when pairing under-delivers relative to the
    /// detected product count.
    fn fallback_pass(
        &self,
        text: &str,
        warnings: &mut Vec<String>,
    ) -> (Vec<Candidate>, ExtractionStrategy) {
        let extractor = EntityExtractor::new(&self.config, &self.classifier, &self.patterns);
        let pairing = extractor.pair(text);

        let mut strategy = ExtractionStrategy::EntityPairing;
        let mut candidates = pairing.candidates.clone();

        let mut gaps = Vec::new();
        if candidates.len() < pairing.product_count && self.config.enable_regex_fallback {
            gaps = fill_gaps(text, &pairing, &self.config.currency_symbols);
        }

        // Warn only about products the bare-amount scan did not rescue.
        let rescued: Vec<(usize, usize)> = gaps.iter().filter_map(|c| c.position).collect();
        for product in &pairing.unpaired {
            if !rescued.contains(&(product.start, product.end)) {
                warnings.push(format!("unpaired product: {}", product.text.trim()));
            }
        }

        if !gaps.is_empty() {
            strategy = ExtractionStrategy::RegexFallback;
            candidates.extend(gaps);
            // Restore detection order across the two sources.
            candidates.sort_by_key(|c| c.position.map(|(start, _)| start).unwrap_or(0));
        }

        (candidates, strategy)
    }

    /// Validate candidates into items: non-empty name, amount > 0.
    /// Also reports the lowest confidence among the accepted candidates.
    fn finalize(candidates: Vec<Candidate>) -> (Vec<Item>, f32) {
        let mut confidence = 1.0_f32;
        let mut items = Vec::new();

        for candidate in candidates {
            if candidate.name.trim().is_empty() || candidate.amount <= Decimal::ZERO {
                continue;
            }
            confidence = confidence.min(candidate.confidence);
            items.push(Item::new(candidate.name, candidate.amount));
        }

        (items, confidence)
    }

    /// Parse receipt content delivered by an image-to-text collaborator.
    ///
    /// Text output is fed through [`ReceiptParser::parse`]; structured
    /// output is validated item-by-item. Collaborator failures propagate
    /// as errors instead of collapsing into an empty result, keeping the
    /// image path on the same failure taxonomy as the text path.
    pub fn parse_image(
        &self,
        source: &dyn VisionSource,
        image: &[u8],
    ) -> std::result::Result<ParseOutcome, RecrError> {
        if image.is_empty() {
            return Err(VisionError::Decode("empty image payload".to_string()).into());
        }

        match source.extract(image)? {
            VisionOutput::Text(text) => self.parse(&text).map_err(RecrError::Parse),
            VisionOutput::Items(raw_items) => {
                let mut warnings = Vec::new();
                let items: Vec<Item> = raw_items
                    .into_iter()
                    .filter(|item| {
                        let valid = !item.name.trim().is_empty() && item.amount > Decimal::ZERO;
                        if !valid {
                            warnings.push(format!("invalid vision item: {}", item.name));
                        }
                        valid
                    })
                    .collect();

                if items.is_empty() {
                    return Err(RecrError::Parse(ParseError::NoItemsFound));
                }

                Ok(ParseOutcome {
                    items,
                    strategy: ExtractionStrategy::Vision,
                    confidence: 0.95,
                    warnings,
                    processing_time_ms: None,
                })
            }
        }
    }
}

impl Default for HeuristicReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptParser for HeuristicReceiptParser {
    fn parse(&self, text: &str) -> Result<ParseOutcome> {
        let start = Instant::now();

        if text.trim().is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let mut warnings = Vec::new();
        let mut candidates = self.line_pass(text, &mut warnings);
        let mut strategy = ExtractionStrategy::LineRules;

        if candidates.is_empty() && self.config.enable_entity_fallback {
            debug!("line pass empty, trying entity pairing");
            let (fallback, tier) = self.fallback_pass(text, &mut warnings);
            candidates = fallback;
            strategy = tier;
        }

        let (items, confidence) = Self::finalize(candidates);
        if items.is_empty() {
            return Err(ParseError::NoItemsFound);
        }

        info!(
            items = items.len(),
            strategy = ?strategy,
            confidence,
            "receipt parsed"
        );

        Ok(ParseOutcome {
            items,
            strategy,
            confidence,
            warnings,
            processing_time_ms: Some(start.elapsed().as_millis() as u64),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn parse(text: &str) -> Result<ParseOutcome> {
        HeuristicReceiptParser::new().parse(text)
    }

    fn items(text: &str) -> Vec<(String, Decimal)> {
        parse(text)
            .unwrap()
            .items
            .into_iter()
            .map(|i| (i.name, i.amount))
            .collect()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_standard_receipt() {
        assert_eq!(
            items("Chicken Rice 5.50\nFries 3.50\nDrink 2.00"),
            vec![
                ("Chicken Rice".to_string(), dec("5.50")),
                ("Fries".to_string(), dec("3.50")),
                ("Drink".to_string(), dec("2.00")),
            ]
        );
    }

    #[test]
    fn test_parse_european_format() {
        assert_eq!(
            items("Chicken Rice 5,50\nFries 3,50\nDrink 2,00"),
            vec![
                ("Chicken Rice".to_string(), dec("5.50")),
                ("Fries".to_string(), dec("3.50")),
                ("Drink".to_string(), dec("2.00")),
            ]
        );
    }

    #[test]
    fn test_comma_and_period_normalize_identically() {
        assert_eq!(items("Fries 3,50"), items("Fries 3.50"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse("").unwrap_err(), ParseError::EmptyInput);
        assert_eq!(parse("   ").unwrap_err(), ParseError::EmptyInput);
        assert_eq!(parse(" \n\t ").unwrap_err(), ParseError::EmptyInput);
    }

    #[test]
    fn test_summary_only_receipt_has_no_items() {
        assert_eq!(
            parse("Subtotal: 11.00\nTax: 0.99").unwrap_err(),
            ParseError::NoItemsFound
        );
    }

    #[test]
    fn test_excluded_lines_never_contribute() {
        let result = items("Fries 3.50\nSubtotal: 3.50\nTotal 3.50\nChange 6.50");
        assert_eq!(result, vec![("Fries".to_string(), dec("3.50"))]);
    }

    #[test]
    fn test_malformed_amount_skipped_processing_continues() {
        assert_eq!(
            items("Chicken Rice five.fifty\nFries 3.50"),
            vec![("Fries".to_string(), dec("3.50"))]
        );
    }

    #[test]
    fn test_mixed_line_forms() {
        assert_eq!(
            items("Coffee....3.00\nBagel - 2.50\nCoke x2 2.40\nBurger 2 @ 3.00 each = 6.00"),
            vec![
                ("Coffee".to_string(), dec("3.00")),
                ("Bagel".to_string(), dec("2.50")),
                ("Coke".to_string(), dec("2.40")),
                ("Burger".to_string(), dec("6.00")),
            ]
        );
    }

    #[test]
    fn test_entity_fallback_on_split_lines() {
        // Line pass finds nothing: every price sits on its own line.
        let outcome = parse("Chicken Rice\n5.50\nFries\n3.50").unwrap();
        assert_eq!(outcome.strategy, ExtractionStrategy::EntityPairing);
        assert_eq!(
            outcome
                .items
                .into_iter()
                .map(|i| (i.name, i.amount))
                .collect::<Vec<_>>(),
            vec![
                ("Chicken Rice".to_string(), dec("5.50")),
                ("Fries".to_string(), dec("3.50")),
            ]
        );
    }

    #[test]
    fn test_regex_fallback_fills_gap() {
        // "1200.00" is not money-shaped, so pairing leaves Catering
        // unpaired and the bare-amount scan completes it.
        let outcome = parse("Chicken Rice\n$5.50\nCatering\n1200.00").unwrap();
        assert_eq!(outcome.strategy, ExtractionStrategy::RegexFallback);
        assert_eq!(outcome.items.len(), 2);
        assert_eq!(outcome.items[1].name, "Catering");
        assert_eq!(outcome.items[1].amount, dec("1200.00"));
        // Catering was rescued, so it must not be reported as unpaired.
        assert!(!outcome
            .warnings
            .iter()
            .any(|w| w.contains("unpaired product")));
    }

    #[test]
    fn test_unrescued_product_still_warns() {
        // 5.50 is consumed by pairing and nothing is left for Fries.
        let outcome = parse("Chicken Rice\n5.50\nFries").unwrap();
        assert_eq!(outcome.items.len(), 1);
        assert!(outcome
            .warnings
            .iter()
            .any(|w| w.contains("unpaired product: Fries")));
    }

    #[test]
    fn test_multi_char_currency_symbols() {
        assert_eq!(
            items("Nasi Lemak RM5.50\nTeh Tarik RM2.00"),
            vec![
                ("Nasi Lemak".to_string(), dec("5.50")),
                ("Teh Tarik".to_string(), dec("2.00")),
            ]
        );
    }

    #[test]
    fn test_confidence_tracks_winning_tier() {
        let line = parse("Chicken Rice 5.50\nFries 3.50").unwrap();
        assert_eq!(line.strategy, ExtractionStrategy::LineRules);
        assert_eq!(line.confidence, 0.9);

        let paired = parse("Chicken Rice\n5.50\nFries\n3.50").unwrap();
        assert_eq!(paired.strategy, ExtractionStrategy::EntityPairing);
        assert_eq!(paired.confidence, 0.7);

        // A mixed result reports the weakest contributing tier.
        let gap = parse("Chicken Rice\n$5.50\nCatering\n1200.00").unwrap();
        assert_eq!(gap.strategy, ExtractionStrategy::RegexFallback);
        assert_eq!(gap.confidence, 0.5);
    }

    #[test]
    fn test_fallback_tiers_can_be_disabled() {
        let config = ParserConfig {
            enable_entity_fallback: false,
            ..ParserConfig::default()
        };
        let parser = HeuristicReceiptParser::with_config(config);
        assert_eq!(
            parser.parse("Chicken Rice\n5.50").unwrap_err(),
            ParseError::NoItemsFound
        );
    }

    #[test]
    fn test_irregular_whitespace_tolerated() {
        let result = items("  Chicken Rice   5.50  \n\n\tFries\t3.50");
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].0, "Chicken Rice");
    }

    #[test]
    fn test_idempotent() {
        let text = "Chicken Rice 5.50\nFries 3.50";
        assert_eq!(items(text), items(text));
    }

    #[test]
    fn test_order_preserved() {
        let result = items("Zebra Cake 9.00\nApple Pie 1.00");
        assert_eq!(result[0].0, "Zebra Cake");
        assert_eq!(result[1].0, "Apple Pie");
    }

    #[test]
    fn test_warnings_record_skipped_lines() {
        let outcome = parse("Chicken Rice five.fifty\nFries 3.50").unwrap();
        assert!(outcome
            .warnings
            .iter()
            .any(|w| w.contains("no item extracted")));
    }
}
