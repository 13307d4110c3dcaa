//! Schemas command - list the embedded ERP schemas.

use clap::Args;
use console::style;

use volcar_core::ErpSchema;

/// Arguments for the schemas command.
#[derive(Args)]
pub struct SchemasArgs {}

pub fn run(_args: SchemasArgs) -> anyhow::Result<()> {
    for id in ErpSchema::embedded_ids() {
        let schema = ErpSchema::embedded(id)?;
        let layout = if schema.fixed_width {
            "fixed-width".to_string()
        } else {
            format!("separator '{}'", schema.separator)
        };
        println!(
            "{} {:<10} {} v{} ({}, {}, {} columns)",
            style("•").blue(),
            id,
            schema.name,
            schema.version,
            schema.encoding.charset_label(),
            layout,
            schema.columns.len()
        );
    }
    Ok(())
}
