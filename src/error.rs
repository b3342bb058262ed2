use thiserror::Error;

/// Number of characters of the input kept in a [`ImportError::ParseError`] excerpt
const EXCERPT_CHARS: usize = 60;

/// Errors that can occur during recipe import operations
#[derive(Error, Debug)]
pub enum ImportError {
    /// No `\begin{recipe}...\end{recipe}` envelope could be found in the input
    #[error("Failed to parse recipe: no recipe envelope in {input_len} bytes of input (starts with {excerpt:?})")]
    ParseError { input_len: usize, excerpt: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Failed to read an input document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize an imported recipe
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ImportError {
    /// Build a [`ImportError::ParseError`] describing the rejected document
    pub fn no_envelope(input: &str) -> Self {
        ImportError::ParseError {
            input_len: input.len(),
            excerpt: input.chars().take(EXCERPT_CHARS).collect(),
        }
    }
}

/// Errors raised by an ingredient phrase parser.
///
/// The importer never propagates these: every field extraction falls back to
/// its default value instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhraseError {
    /// Nothing left to parse after trimming
    #[error("Empty ingredient text")]
    Empty,

    /// The text does not start with a quantity
    #[error("No amount found in {0:?}")]
    NoAmount(String),

    /// A quantity-looking token could not be turned into a number
    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),

    /// A fraction with a zero denominator
    #[error("Division by zero in fraction")]
    DivisionByZero,
}
