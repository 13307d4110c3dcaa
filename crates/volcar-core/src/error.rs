//! Error types for the volcar-core library.

use thiserror::Error;

/// Main error type for the volcar library.
#[derive(Error, Debug)]
pub enum VolcarError {
    /// Template engine error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Legacy export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to template filling.
///
/// Unresolved markers are deliberately not errors: they are left verbatim in
/// the grid so missing fields stay visible in the output.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The grid has no occupied range to work with.
    #[error("grid '{0}' has no occupied cells")]
    EmptyGrid(String),
}

/// Errors related to legacy ERP export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The schema declares no columns.
    #[error("schema '{0}' has no columns")]
    EmptySchema(String),

    /// Two columns claim the same ordinal position.
    #[error("schema '{schema}' has duplicate column position {position}")]
    DuplicatePosition { schema: String, position: u32 },

    /// No embedded schema exists for the requested ERP identifier.
    #[error("unknown ERP type: {0}")]
    UnknownErp(String),

    /// The schema document could not be parsed.
    #[error("failed to parse schema: {0}")]
    Parse(String),
}

/// Result type for the volcar library.
pub type Result<T> = std::result::Result<T, VolcarError>;
