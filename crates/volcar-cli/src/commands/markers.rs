//! Markers command - list the normalized marker keys of a template grid.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use console::style;

use volcar_core::{scan_markers, Grid};

/// Arguments for the markers command.
#[derive(Args)]
pub struct MarkersArgs {
    /// Template grid (JSON sheet document)
    template: PathBuf,
}

pub fn run(args: MarkersArgs) -> anyhow::Result<()> {
    let content = fs::read_to_string(&args.template)
        .with_context(|| format!("failed to read {}", args.template.display()))?;
    let grid: Grid = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", args.template.display()))?;

    let markers = scan_markers(&grid);
    if markers.is_empty() {
        println!("{} no markers found", style("!").yellow());
        return Ok(());
    }

    for marker in &markers {
        println!("{{{{{marker}}}}}");
    }
    println!(
        "{} {} marker(s) in sheet '{}'",
        style("✓").green(),
        markers.len(),
        grid.name()
    );

    Ok(())
}
