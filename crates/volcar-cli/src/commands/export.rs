//! Export command - encode extracted document data as a legacy ERP file.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use clap::Args;
use console::style;
use tracing::info;

use volcar_core::{export_entries, map_invoice_fields, ErpSchema, LedgerEntry};

use super::load_document;

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// Embedded ERP schema identifier (see `volcar schemas`)
    #[arg(short, long, conflicts_with = "schema_file")]
    schema: Option<String>,

    /// Custom ERP schema file (JSON)
    #[arg(long)]
    schema_file: Option<PathBuf>,

    /// Extracted data files (JSON, one ledger entry per document)
    #[arg(required = true)]
    data: Vec<PathBuf>,

    /// Output file (default: <erp>_<timestamp>.txt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fiscal year override (default: derived from each entry's date)
    #[arg(long)]
    fiscal_year: Option<i32>,
}

pub fn run(args: ExportArgs) -> anyhow::Result<()> {
    let (erp_id, schema) = match (&args.schema, &args.schema_file) {
        (Some(id), None) => (id.clone(), ErpSchema::embedded(id)?),
        (None, Some(path)) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            ("custom".to_string(), ErpSchema::from_json(&content)?)
        }
        _ => anyhow::bail!("either --schema or --schema-file is required"),
    };
    info!(schema = %schema.name, "exporting for {}", erp_id);

    let mut entries: Vec<LedgerEntry> = Vec::with_capacity(args.data.len());
    for (index, path) in args.data.iter().enumerate() {
        let fields = load_document(path)?;
        entries.push(map_invoice_fields(&fields, index as u32 + 1, args.fiscal_year));
    }

    let output = export_entries(&schema, &entries)?;

    let output_path = args.output.clone().unwrap_or_else(|| {
        PathBuf::from(format!(
            "{}_{}.txt",
            erp_id,
            Local::now().format("%Y%m%d%H%M%S")
        ))
    });
    fs::write(&output_path, &output.bytes)?;

    println!(
        "{} {} lines ({}) written to {}",
        style("✓").green(),
        output.line_count,
        output.charset,
        output_path.display()
    );

    Ok(())
}
