//! Core library for delivering extracted invoice data.
//!
//! This crate provides:
//! - A sparse grid model for spreadsheet templates
//! - A `{{MARKER}}` template engine with fuzzy field resolution
//! - A schema-driven record encoder for legacy ERP import files
//! - An accounting entry mapper from extracted fields to ledger entries
//!
//! Document text extraction (PDF/OCR/AI) is an external collaborator: this
//! crate consumes a flat field-to-value mapping per source document and a
//! declarative column/marker schema, and produces either a mutated grid or a
//! byte buffer in a legacy single-byte encoding.

pub mod error;
pub mod export;
pub mod models;
pub mod template;

pub use error::{ExportError, Result, TemplateError, VolcarError};
pub use export::encoding::{to_legacy_bytes, LegacyEncoding};
pub use export::mapper::map_invoice_fields;
pub use export::schema::{Align, ColumnType, ErpColumn, ErpSchema, LineEnding, Padding};
pub use export::{export_entries, serialize_records, ErpRecord, ExportOutput};
pub use models::fields::DocumentFields;
pub use models::grid::{Cell, CellValue, Grid, Range};
pub use models::ledger::LedgerEntry;
pub use template::{fill_row, find_template_row, scan_markers, FillOutcome, TemplateFiller};
