use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Importer configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ImporterConfig {
    /// Tidy the instruction text (trailing spaces, blank-line runs, outer whitespace)
    /// instead of keeping the body verbatim with only the ingredient tags cut out
    #[serde(default)]
    pub trim_instructions: bool,
    /// Maximum number of characters kept in the servings label
    #[serde(default = "default_servings_text_max_len")]
    pub servings_text_max_len: usize,
    /// Servings used when the servings field carries no number
    #[serde(default)]
    pub default_servings: Option<u32>,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            trim_instructions: false,
            servings_text_max_len: default_servings_text_max_len(),
            default_servings: None,
        }
    }
}

fn default_servings_text_max_len() -> usize {
    32
}

impl ImporterConfig {
    /// Load configuration from file and environment variables
    ///
    /// See [`load_config`] for the lookup order.
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with CUISINE__ prefix
/// 2. cuisine.toml file in current directory
/// 3. Default values
///
/// Environment variable format: CUISINE__TRIM_INSTRUCTIONS
pub fn load_config() -> Result<ImporterConfig, ConfigError> {
    build_config(File::with_name("cuisine").required(false))
}

/// Load configuration from an explicit file, still honouring CUISINE__ overrides
pub fn load_config_from(path: &Path) -> Result<ImporterConfig, ConfigError> {
    build_config(File::from(path).required(false))
}

fn build_config<S>(file: S) -> Result<ImporterConfig, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let settings = Config::builder()
        .add_source(file)
        // Use double underscore as separator: CUISINE__SERVINGS_TEXT_MAX_LEN
        .add_source(
            Environment::with_prefix("CUISINE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
