//! Ingredient phrase parsing.
//!
//! The cuisine importer never decomposes `"3 l Wasser"` style phrases itself; it
//! delegates to a [`PhraseParser`]. [`BasicPhraseParser`] is the built-in
//! implementation, callers with better language-specific heuristics can inject
//! their own.

mod basic;
mod quantity;

pub use basic::BasicPhraseParser;
pub use quantity::{parse_quantity, split_quantity};

use crate::error::PhraseError;

/// Result of parsing a leading quantity: `"2¼ l extra"` -> `(2.25, "l", "extra")`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedAmount {
    pub amount: f64,
    pub unit: Option<String>,
    pub rest: String,
}

/// Result of parsing a full ingredient phrase
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPhrase {
    pub amount: f64,
    pub unit: Option<String>,
    pub food: String,
    pub note: String,
}

/// Decomposes free-text ingredient phrases.
///
/// Both operations are best-effort; errors are expected on text that does
/// not look like an ingredient and are handled by the caller.
pub trait PhraseParser: Send + Sync {
    /// Parse only the quantity (and the unit directly following it)
    fn parse_amount(&self, text: &str) -> Result<ParsedAmount, PhraseError>;

    /// Parse a whole `amount unit food, note` phrase
    fn parse_phrase(&self, text: &str) -> Result<ParsedPhrase, PhraseError>;
}
