//! CLI application for delivering extracted invoice data: spreadsheet
//! template filling and legacy ERP export.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{export, fill, markers, schemas};

/// Deliver extracted invoice data into spreadsheet templates and legacy ERP files
#[derive(Parser)]
#[command(name = "volcar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill a spreadsheet template with extracted document data
    Fill(fill::FillArgs),

    /// Export extracted document data as a legacy ERP import file
    Export(export::ExportArgs),

    /// List the markers a template grid declares
    Markers(markers::MarkersArgs),

    /// List the embedded ERP schemas
    Schemas(schemas::SchemasArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Fill(args) => fill::run(args),
        Commands::Export(args) => export::run(args),
        Commands::Markers(args) => markers::run(args),
        Commands::Schemas(args) => schemas::run(args),
    }
}
