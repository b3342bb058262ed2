//! Importer for the LaTeX `cuisine` recipe format.

mod envelope;
mod resolver;
mod tags;

pub use envelope::{clean_title, find_envelope, split_envelopes, Envelope};
pub use resolver::resolve_ingredient;
pub use tags::{ingredient_tags, strip_ingredient_tags, IngredientTags, RawIngredientMatch};

use crate::config::ImporterConfig;
use crate::error::ImportError;
use crate::metadata::{BasicMetadataParser, MetadataParser};
use crate::model::{RecipeDraft, StepDraft};
use crate::phrase::{BasicPhraseParser, PhraseParser};
use log::{debug, info, warn};

/// Parses cuisine documents into [`RecipeDraft`]s.
///
/// Holds no mutable state, so one importer can be shared between threads.
pub struct CuisineImporter {
    phrase_parser: Box<dyn PhraseParser>,
    metadata_parser: Box<dyn MetadataParser>,
    /// `metadata_parser` is the built-in one and follows `config`
    builtin_metadata: bool,
    config: ImporterConfig,
}

impl Default for CuisineImporter {
    fn default() -> Self {
        Self::from_config(ImporterConfig::default())
    }
}

impl CuisineImporter {
    /// Importer with the built-in phrase and metadata parsers and default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Importer with the built-in parsers, tuned by `config`
    pub fn from_config(config: ImporterConfig) -> Self {
        Self {
            phrase_parser: Box::new(BasicPhraseParser::new()),
            metadata_parser: Box::new(BasicMetadataParser::new(config.servings_text_max_len)),
            builtin_metadata: true,
            config,
        }
    }

    /// Replace the ingredient phrase parser
    pub fn with_phrase_parser(mut self, parser: impl PhraseParser + 'static) -> Self {
        self.phrase_parser = Box::new(parser);
        self
    }

    /// Replace the servings/time parser
    pub fn with_metadata_parser(mut self, parser: impl MetadataParser + 'static) -> Self {
        self.metadata_parser = Box::new(parser);
        self.builtin_metadata = false;
        self
    }

    /// Replace the settings.
    ///
    /// The built-in metadata parser picks up the new servings label cap; an
    /// injected one is kept as is.
    pub fn with_config(mut self, config: ImporterConfig) -> Self {
        if self.builtin_metadata {
            self.metadata_parser = Box::new(BasicMetadataParser::new(config.servings_text_max_len));
        }
        self.config = config;
        self
    }

    pub fn config(&self) -> &ImporterConfig {
        &self.config
    }

    /// Parse the first recipe envelope of `text`.
    ///
    /// Fails with [`ImportError::ParseError`] when no well-formed envelope exists;
    /// problems inside single ingredient lines never fail the import.
    pub fn parse_single_recipe(&self, text: &str) -> Result<RecipeDraft, ImportError> {
        let Some(envelope) = find_envelope(text) else {
            warn!("No recipe envelope found in {} bytes of input", text.len());
            return Err(ImportError::no_envelope(text));
        };
        debug!(
            "Found recipe envelope {:?} at {:?} (label: {:?})",
            envelope.title, envelope.span, envelope.label
        );

        let servings_count = self
            .metadata_parser
            .parse_servings(envelope.servings)
            .or(self.config.default_servings);

        Ok(RecipeDraft {
            title: clean_title(envelope.title),
            servings_count,
            servings_text: self.metadata_parser.parse_servings_text(envelope.servings),
            working_time_minutes: self.metadata_parser.parse_time(envelope.time),
            steps: vec![self.parse_content(envelope.content)],
        })
    }

    /// Split a document holding several recipes into verbatim envelope spans
    pub fn split_document_set<'a>(&self, text: &'a str) -> Vec<&'a str> {
        split_envelopes(text)
    }

    /// Split `text` and parse every envelope on its own.
    ///
    /// A recipe that fails to parse is reported in place and does not stop the others.
    pub fn import_document_set(&self, text: &str) -> Vec<Result<RecipeDraft, ImportError>> {
        let results: Vec<_> = self
            .split_document_set(text)
            .into_iter()
            .enumerate()
            .map(|(index, span)| {
                self.parse_single_recipe(span).inspect_err(|e| {
                    warn!("Skipping recipe #{} of the document: {}", index + 1, e);
                })
            })
            .collect();

        let imported = results.iter().filter(|r| r.is_ok()).count();
        info!("Imported {} of {} recipes", imported, results.len());
        results
    }

    /// Build the single cooking step of a recipe body
    fn parse_content(&self, content: &str) -> StepDraft {
        let ingredients = ingredient_tags(content)
            .map(|raw| resolve_ingredient(self.phrase_parser.as_ref(), &raw))
            .collect::<Vec<_>>();
        debug!("Found {} ingredients", ingredients.len());

        let instruction = strip_ingredient_tags(content);
        let instruction = if self.config.trim_instructions {
            tidy_instructions(&instruction)
        } else {
            instruction
        };

        StepDraft {
            instruction,
            ingredients,
        }
    }
}

/// Strip trailing spaces, collapse blank-line runs and trim the whole text
fn tidy_instructions(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in text.lines().map(str::trim_end) {
        if line.is_empty() && lines.last().is_some_and(|last| last.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LASAGNA: &str = r"\begin{recipe}[lasagna]{Lasagna\newline}{4 persons}{30 minutes + 1 hour baking time}
Boil \ing[500]{g}{pasta} in \ing{3 l}{water}.
Add \ing{2¼ tbsp olive oil} and \ing{etwas}{Chili}.
\end{recipe}";

    #[test]
    fn test_parse_single_recipe() {
        let recipe = CuisineImporter::new().parse_single_recipe(LASAGNA).unwrap();

        assert_eq!(recipe.title, "Lasagna");
        assert_eq!(recipe.servings_count, Some(4));
        assert_eq!(recipe.servings_text, "persons");
        assert_eq!(recipe.working_time_minutes, Some(90));
        assert_eq!(recipe.steps.len(), 1);

        let foods: Vec<_> = recipe.ingredients().map(|i| i.food.as_str()).collect();
        assert_eq!(foods, vec!["pasta", "water", "olive oil", "Chili"]);
        assert_eq!(
            recipe.instruction_text(),
            "\nBoil  in .\nAdd  and .\n"
        );
    }

    #[test]
    fn test_header_is_not_wrapped_in_nested_braces() {
        // The title field cannot hold braces, so `\vspace{1cm}` breaks the header
        let text = r"\begin{recipe}{Lasagna\vspace{1cm}}{4}{30} x \end{recipe}";
        assert!(CuisineImporter::new().parse_single_recipe(text).is_err());
    }

    #[test]
    fn test_missing_envelope_is_an_error() {
        let err = CuisineImporter::new()
            .parse_single_recipe(r"\ing{3 l}{milk} without envelope")
            .unwrap_err();
        assert!(matches!(err, ImportError::ParseError { input_len: 32, .. }));
    }

    #[test]
    fn test_default_servings_from_config() {
        let importer = CuisineImporter::from_config(ImporterConfig {
            default_servings: Some(2),
            ..Default::default()
        });
        let recipe = importer
            .parse_single_recipe(r"\begin{recipe}{Tea}{a pot}{5 min} Steep. \end{recipe}")
            .unwrap();
        assert_eq!(recipe.servings_count, Some(2));
        assert_eq!(recipe.servings_text, "a pot");
        assert_eq!(recipe.working_time_minutes, Some(5));
    }

    #[test]
    fn test_with_config_applies_servings_cap() {
        let config = ImporterConfig {
            servings_text_max_len: 5,
            default_servings: Some(3),
            ..Default::default()
        };
        let importer = CuisineImporter::new().with_config(config.clone());
        assert_eq!(importer.config(), &config);

        let recipe = importer
            .parse_single_recipe(r"\begin{recipe}{Soup}{Portionen}{10} x \end{recipe}")
            .unwrap();
        assert_eq!(recipe.servings_text, "Porti");
        assert_eq!(recipe.servings_count, Some(3));
    }

    /// Metadata parser that reports fixed values
    struct FixedMetadata;

    impl MetadataParser for FixedMetadata {
        fn parse_servings(&self, _text: &str) -> Option<u32> {
            Some(9)
        }

        fn parse_servings_text(&self, text: &str) -> String {
            text.to_string()
        }

        fn parse_time(&self, _text: &str) -> Option<u32> {
            Some(1)
        }
    }

    #[test]
    fn test_with_config_keeps_injected_metadata_parser() {
        let importer = CuisineImporter::new()
            .with_metadata_parser(FixedMetadata)
            .with_config(ImporterConfig {
                servings_text_max_len: 2,
                ..Default::default()
            });
        let recipe = importer
            .parse_single_recipe(r"\begin{recipe}{Soup}{4 bowls}{10 min} x \end{recipe}")
            .unwrap();
        assert_eq!(recipe.servings_count, Some(9));
        assert_eq!(recipe.servings_text, "4 bowls");
        assert_eq!(recipe.working_time_minutes, Some(1));
    }

    #[test]
    fn test_out_of_range_time_is_unset() {
        let recipe = CuisineImporter::new()
            .parse_single_recipe(r"\begin{recipe}{A}{1}{PT99999999H} x \end{recipe}")
            .unwrap();
        assert_eq!(recipe.title, "A");
        assert_eq!(recipe.working_time_minutes, None);
    }

    #[test]
    fn test_trim_instructions() {
        let importer = CuisineImporter::from_config(ImporterConfig {
            trim_instructions: true,
            ..Default::default()
        });
        let text = "\\begin{recipe}{Tea}{1}{5}\n\n  Boil \\ing{1 l}{water}.   \n\n\n\nSteep.\n\\end{recipe}";
        let recipe = importer.parse_single_recipe(text).unwrap();
        assert_eq!(recipe.instruction_text(), "Boil .\n\nSteep.");
    }

    #[test]
    fn test_import_document_set_reports_failures_in_place() {
        let text = r"\begin{recipe}{A}{1}{2} \ing{1 egg} \end{recipe}
\begin{recipe}{only a title} \end{recipe}
\begin{recipe}{C}{3}{4} \ing{2 l}{milk} \end{recipe}";

        let results = CuisineImporter::new().import_document_set(text);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().title, "A");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().title, "C");
    }

    #[test]
    fn test_tidy_instructions() {
        assert_eq!(tidy_instructions("  a  \n\n\n b\n"), "a\n\n b");
        assert_eq!(tidy_instructions(""), "");
    }
}
