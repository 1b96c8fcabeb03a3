//! Receipt parsing module: orchestrator and rule-based extractors.

mod parser;
pub mod rules;

pub use parser::HeuristicReceiptParser;

use crate::error::ParseError;
use crate::models::ParseOutcome;

/// Result type for parse operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Trait for receipt parsers.
pub trait ReceiptParser {
    /// Parse cleaned receipt text into an ordered list of items.
    ///
    /// Fails with [`ParseError::EmptyInput`] on blank input and
    /// [`ParseError::NoItemsFound`] when every strategy tier comes up
    /// empty. Per-line and per-token failures never abort the parse.
    fn parse(&self, text: &str) -> Result<ParseOutcome>;
}
