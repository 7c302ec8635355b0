//! Subcommand implementations.

pub mod dump;
pub mod encode;
pub mod get;
pub mod keys;

use std::{path::Path, sync::Arc};

use duomodel::{ImportConfig, Importer, Model};

/// Settings shared by every command that loads a document
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    pub sort_hash_keys: bool,
}

/// Read and import a JSON document
pub fn load(path: &Path, options: &LoadOptions) -> Result<Arc<Model>, Box<dyn std::error::Error>> {
    let bytes = std::fs::read(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let tree: serde_json::Value = serde_json::from_slice(&bytes)?;

    let importer = Importer::with_config(ImportConfig {
        sort_hash_keys: options.sort_hash_keys,
        ..ImportConfig::default()
    });
    let model = importer.import(&tree)?;
    tracing::debug!(path = %path.display(), kind = %model.kind(), "Loaded document");
    Ok(model)
}
