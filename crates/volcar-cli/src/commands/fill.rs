//! Fill command - pour extracted document data into a spreadsheet template.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use console::style;
use tracing::info;

use volcar_core::{Grid, TemplateFiller};

use super::load_document;

/// Arguments for the fill command.
#[derive(Args)]
pub struct FillArgs {
    /// Template grid (JSON sheet document)
    #[arg(short, long)]
    template: PathBuf,

    /// Extracted data files (JSON, one per source document), filled in order
    #[arg(required = true)]
    data: Vec<PathBuf>,

    /// Output file for the filled grid (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: FillArgs) -> anyhow::Result<()> {
    let content = fs::read_to_string(&args.template)
        .with_context(|| format!("failed to read {}", args.template.display()))?;
    let mut grid: Grid = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", args.template.display()))?;

    let mut filler = match TemplateFiller::new(&grid)? {
        Some(filler) => filler,
        None => anyhow::bail!(
            "sheet '{}' has no {{{{MARKER}}}} template row",
            grid.name()
        ),
    };
    info!(
        sheet = grid.name(),
        template_row = filler.template_row(),
        "template located"
    );

    for path in &args.data {
        let fields = load_document(path)?;
        let outcome = filler.fill_document(&mut grid, &fields);

        if outcome.unresolved.is_empty() {
            println!(
                "{} {} -> row {}",
                style("✓").green(),
                path.display(),
                outcome.row
            );
        } else {
            println!(
                "{} {} -> row {} ({} unresolved: {})",
                style("!").yellow(),
                path.display(),
                outcome.row,
                outcome.unresolved.len(),
                outcome.unresolved.join(", ")
            );
        }
    }

    let output = serde_json::to_string_pretty(&grid)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Filled grid written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{output}");
    }

    Ok(())
}
