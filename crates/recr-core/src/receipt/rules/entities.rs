//! Entity-based extraction: whole-text product/money span pairing.
//!
//! Secondary strategy for receipts where OCR line-break noise separates
//! an item from its price. Product-like and money-like spans are
//! detected independently, then paired by document order. Proximity
//! implies pairing here; that is a heuristic, not a guarantee.

use rust_decimal::Decimal;
use tracing::debug;

use super::amounts::normalize_amount;
use super::classifier::LineClassifier;
use super::patterns::{PatternSet, PRODUCT_SPAN};
use super::{clean_name, Candidate};
use crate::models::ParserConfig;

/// A product-like span of text with its byte position.
#[derive(Debug, Clone)]
pub struct ProductSpan {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// A money-like span, already normalized.
#[derive(Debug, Clone)]
pub struct MoneySpan {
    pub amount: Decimal,
    pub start: usize,
    pub end: usize,
}

/// Outcome of the pairing pass, including the leftovers the regex
/// fallback tier needs.
#[derive(Debug, Clone, Default)]
pub struct EntityPairing {
    /// Paired candidates, in product detection order.
    pub candidates: Vec<Candidate>,
    /// Products for which no unconsumed money span was reachable.
    pub unpaired: Vec<ProductSpan>,
    /// Byte ranges of money spans consumed by pairing.
    pub consumed: Vec<(usize, usize)>,
    /// Total number of product spans detected.
    pub product_count: usize,
}

/// Whole-text extractor pairing product spans with money spans.
pub struct EntityExtractor<'a> {
    config: &'a ParserConfig,
    classifier: &'a LineClassifier,
    patterns: &'a PatternSet,
}

impl<'a> EntityExtractor<'a> {
    pub fn new(
        config: &'a ParserConfig,
        classifier: &'a LineClassifier,
        patterns: &'a PatternSet,
    ) -> Self {
        Self {
            config,
            classifier,
            patterns,
        }
    }

    /// Detect product-like spans: alphabetic token sequences long enough
    /// to be a name and not matching any exclusion keyword.
    pub fn detect_products(&self, text: &str) -> Vec<ProductSpan> {
        PRODUCT_SPAN
            .find_iter(text)
            .filter(|m| m.as_str().trim().len() >= self.config.min_product_len)
            .filter(|m| !self.classifier.is_excluded(m.as_str()))
            .map(|m| ProductSpan {
                text: m.as_str().to_string(),
                start: m.start(),
                end: m.end(),
            })
            .collect()
    }

    /// Detect money-like spans and normalize them. Tokens that fail to
    /// normalize to a positive amount are skipped.
    pub fn detect_money(&self, text: &str) -> Vec<MoneySpan> {
        self.patterns
            .money_span
            .find_iter(text)
            .filter_map(|m| {
                let amount = normalize_amount(m.as_str(), &self.config.currency_symbols)?;
                if amount <= Decimal::ZERO {
                    return None;
                }
                Some(MoneySpan {
                    amount,
                    start: m.start(),
                    end: m.end(),
                })
            })
            .collect()
    }

    /// Pair products with money spans by document order: each product
    /// takes the nearest following money span not yet consumed. Products
    /// with no reachable span are dropped into `unpaired`.
    pub fn pair(&self, text: &str) -> EntityPairing {
        let products = self.detect_products(text);
        let money = self.detect_money(text);
        let mut taken = vec![false; money.len()];

        let mut pairing = EntityPairing {
            product_count: products.len(),
            ..EntityPairing::default()
        };

        for product in products {
            let Some(name) = clean_name(&product.text) else {
                continue;
            };

            let next = money
                .iter()
                .enumerate()
                .find(|(i, m)| !taken[*i] && m.start >= product.end);

            match next {
                Some((i, m)) => {
                    taken[i] = true;
                    pairing.consumed.push((m.start, m.end));
                    pairing.candidates.push(
                        Candidate::new(name, m.amount, 0.7)
                            .with_position(product.start, product.end),
                    );
                }
                None => {
                    debug!(product = %name, "no unconsumed money span reachable, dropping");
                    pairing.unpaired.push(product);
                }
            }
        }

        pairing
    }
}
