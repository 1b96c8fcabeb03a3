//! Interface seam for the image-to-text collaborator.
//!
//! The core does no OCR itself. A vision backend is an opaque
//! collaborator that turns image bytes into either raw text (fed back
//! through the normal parse path) or an already-structured item list.
//! Backends signal failure explicitly through [`VisionError`]; they do
//! not return empty results on internal faults.

use crate::error::VisionError;
use crate::models::Item;

/// Output of a vision backend.
#[derive(Debug, Clone)]
pub enum VisionOutput {
    /// Raw text recognized from the image.
    Text(String),
    /// Items extracted directly by the backend. Validated by the
    /// orchestrator before being returned to callers.
    Items(Vec<Item>),
}

/// An image-to-text collaborator.
///
/// Implementations are expected to be initialized once at process
/// startup and shared read-only; `extract` takes `&self` and must not
/// mutate backend state per call.
pub trait VisionSource: Send + Sync {
    /// Extract receipt content from raw image bytes.
    fn extract(&self, image: &[u8]) -> Result<VisionOutput, VisionError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ParseError, RecrError};
    use crate::models::ExtractionStrategy;
    use crate::receipt::HeuristicReceiptParser;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    struct FixedText(&'static str);

    impl VisionSource for FixedText {
        fn extract(&self, _image: &[u8]) -> Result<VisionOutput, VisionError> {
            Ok(VisionOutput::Text(self.0.to_string()))
        }
    }

    struct FixedItems(Vec<Item>);

    impl VisionSource for FixedItems {
        fn extract(&self, _image: &[u8]) -> Result<VisionOutput, VisionError> {
            Ok(VisionOutput::Items(self.0.clone()))
        }
    }

    struct Failing;

    impl VisionSource for Failing {
        fn extract(&self, _image: &[u8]) -> Result<VisionOutput, VisionError> {
            Err(VisionError::Backend("model unavailable".to_string()))
        }
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_text_output_goes_through_parse() {
        let parser = HeuristicReceiptParser::new();
        let source = FixedText("Fries 3.50");
        let outcome = parser.parse_image(&source, b"fake-image").unwrap();
        assert_eq!(outcome.items.len(), 1);
        assert_eq!(outcome.items[0].amount, dec("3.50"));
    }

    #[test]
    fn test_structured_output_is_validated() {
        let parser = HeuristicReceiptParser::new();
        let source = FixedItems(vec![
            Item::new("Fries", dec("3.50")),
            Item::new("", dec("1.00")),
            Item::new("Freebie", Decimal::ZERO),
        ]);
        let outcome = parser.parse_image(&source, b"fake-image").unwrap();
        assert_eq!(outcome.strategy, ExtractionStrategy::Vision);
        assert_eq!(outcome.confidence, 0.95);
        assert_eq!(outcome.items.len(), 1);
        assert_eq!(outcome.warnings.len(), 2);
    }

    #[test]
    fn test_backend_failure_propagates() {
        // Failures surface as errors, never as a silent empty result.
        let parser = HeuristicReceiptParser::new();
        let err = parser.parse_image(&Failing, b"fake-image").unwrap_err();
        assert!(matches!(err, RecrError::Vision(VisionError::Backend(_))));
    }

    #[test]
    fn test_structured_output_with_no_valid_items_fails() {
        let parser = HeuristicReceiptParser::new();
        let source = FixedItems(vec![Item::new("", dec("1.00"))]);
        let err = parser.parse_image(&source, b"fake-image").unwrap_err();
        assert!(matches!(err, RecrError::Parse(ParseError::NoItemsFound)));
    }

    #[test]
    fn test_empty_image_rejected() {
        let parser = HeuristicReceiptParser::new();
        let err = parser.parse_image(&Failing, b"").unwrap_err();
        assert!(matches!(err, RecrError::Vision(VisionError::Decode(_))));
    }
}
