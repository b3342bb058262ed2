use cuisine_import::{CuisineImporter, ImportError, ImporterConfig};
use log::{debug, error, warn};
use std::env;
use std::fs;
use std::process::ExitCode;

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    env_logger::init();

    // Get the file path (and optional --split flag) from command-line arguments
    let args: Vec<String> = env::args().skip(1).collect();
    let split_only = args.iter().any(|a| a == "--split");
    let path = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .ok_or("Usage: cuisine-import <recipes.tex> [--split]")?;

    let text = fs::read_to_string(path).map_err(ImportError::from)?;
    let config = ImporterConfig::load().map_err(ImportError::from)?;
    let importer = CuisineImporter::new().with_config(config);
    debug!("Loaded configuration: {:?}", importer.config());

    if split_only {
        // An empty split is a valid result, not a failure
        let spans = importer.split_document_set(&text);
        if spans.is_empty() {
            warn!("No recipe envelope found in {}", path);
        }
        println!("{}", spans.join("\n\n"));
        return Ok(ExitCode::SUCCESS);
    }

    let mut recipes = Vec::new();
    for result in importer.import_document_set(&text) {
        match result {
            Ok(recipe) => recipes.push(recipe),
            Err(e) => error!("{}", e),
        }
    }

    if recipes.is_empty() {
        error!("No recipe could be imported from {}", path);
        return Ok(ExitCode::FAILURE);
    }

    let json = serde_json::to_string_pretty(&recipes).map_err(ImportError::from)?;
    println!("{}", json);
    Ok(ExitCode::SUCCESS)
}
