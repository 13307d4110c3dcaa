//! CLI subcommands.

pub mod export;
pub mod fill;
pub mod markers;
pub mod schemas;

use std::path::Path;

use anyhow::Context;
use volcar_core::DocumentFields;

/// Load one extracted-data mapping from a JSON file.
pub fn load_document(path: &Path) -> anyhow::Result<DocumentFields> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(DocumentFields::from_json_value(&value))
}
