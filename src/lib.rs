pub mod config;
pub mod cuisine;
pub mod error;
pub mod metadata;
pub mod model;
pub mod phrase;

pub use config::{load_config, load_config_from, ImporterConfig};
pub use cuisine::CuisineImporter;
pub use error::{ImportError, PhraseError};
pub use metadata::{BasicMetadataParser, MetadataParser};
pub use model::{IngredientDraft, RecipeDraft, StepDraft};
pub use phrase::{BasicPhraseParser, ParsedAmount, ParsedPhrase, PhraseParser};

/// Parse the first recipe of a cuisine document with the built-in parsers
pub fn parse_single_recipe(text: &str) -> Result<RecipeDraft, ImportError> {
    CuisineImporter::new().parse_single_recipe(text)
}

/// Split a cuisine document into its `\begin{recipe}...\end{recipe}` spans
pub fn split_document_set(text: &str) -> Vec<&str> {
    cuisine::split_envelopes(text)
}

/// Parse every recipe of a cuisine document with the built-in parsers
pub fn import_document_set(text: &str) -> Vec<Result<RecipeDraft, ImportError>> {
    CuisineImporter::new().import_document_set(text)
}
