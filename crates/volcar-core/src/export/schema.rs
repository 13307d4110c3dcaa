//! Declarative ERP schema model.
//!
//! A schema describes one legacy accounting system's import format: ordered
//! columns with widths and padding rules, the line ending and field
//! separator, and the target single-byte encoding. Schemas are loaded once
//! per export call and treated as immutable configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::ExportError;

use super::encoding::LegacyEncoding;

/// Value type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    String,
    Numeric,
    Date,
}

/// Padding mode applied after formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Padding {
    /// Pad with `'0'`.
    Zero,
    /// Pad with `' '`.
    Space,
    /// Truncate only, never pad.
    #[default]
    None,
}

/// Content alignment. Padding goes on the opposite side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// Line-ending sequence between records. Target systems disagree, so it is
/// part of the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineEnding {
    #[default]
    CrLf,
    Lf,
    Cr,
}

impl LineEnding {
    /// The literal sequence.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::CrLf => "\r\n",
            LineEnding::Lf => "\n",
            LineEnding::Cr => "\r",
        }
    }
}

/// One column of a legacy record layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErpColumn {
    /// Field name, matched case-insensitively against record keys.
    pub name: String,

    /// 1-based ordinal position. Positions are unique per schema and define
    /// serialization order regardless of declaration order.
    pub position: u32,

    /// Fixed character width.
    pub width: usize,

    /// Value type.
    #[serde(rename = "type")]
    pub column_type: ColumnType,

    /// Format token: a date pattern (`YYYYMMDD`, `DDMMYYYY`, `DD/MM/YYYY`)
    /// or `decimal` for implied-decimal numerics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Decimal places for `decimal`-formatted numerics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u32>,

    /// Padding mode.
    #[serde(default)]
    pub padding: Padding,

    /// Content alignment.
    #[serde(default)]
    pub align: Align,

    /// Whether the target system requires the field. Enforcement belongs to
    /// the caller; the encoder emits empty text for missing values either
    /// way so the line count always matches the record count.
    #[serde(default)]
    pub required: bool,
}

/// A legacy accounting system's import format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErpSchema {
    /// Human-readable name.
    pub name: String,

    /// Schema version label.
    pub version: String,

    /// Target single-byte encoding.
    pub encoding: LegacyEncoding,

    /// Line-ending sequence between records.
    #[serde(default)]
    pub line_ending: LineEnding,

    /// Field separator, used only when `fixed_width` is false.
    #[serde(default)]
    pub separator: String,

    /// Fixed-width layout: columns concatenate with no separator.
    #[serde(default)]
    pub fixed_width: bool,

    /// Column set. Declaration order is irrelevant; `position` rules.
    pub columns: Vec<ErpColumn>,
}

/// Embedded schema resources keyed by ERP type identifier.
static EMBEDDED_SCHEMAS: &[(&str, &str)] = &[
    ("contaplus", include_str!("../../schemas/contaplus.json")),
    ("a3", include_str!("../../schemas/a3.json")),
    ("sage", include_str!("../../schemas/sage.json")),
];

impl ErpSchema {
    /// Parse a schema from its JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        let schema: ErpSchema =
            serde_json::from_str(json).map_err(|e| ExportError::Parse(e.to_string()))?;
        schema.validate()?;
        Ok(schema)
    }

    /// Load an embedded schema by ERP type identifier.
    pub fn embedded(erp_type: &str) -> Result<Self, ExportError> {
        let id = erp_type.to_lowercase();
        EMBEDDED_SCHEMAS
            .iter()
            .find(|(key, _)| *key == id)
            .map(|(_, json)| Self::from_json(json))
            .unwrap_or_else(|| Err(ExportError::UnknownErp(erp_type.to_string())))
    }

    /// Identifiers of the embedded schemas.
    pub fn embedded_ids() -> Vec<&'static str> {
        EMBEDDED_SCHEMAS.iter().map(|(id, _)| *id).collect()
    }

    /// Check structural invariants: at least one column, unique positions.
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.columns.is_empty() {
            return Err(ExportError::EmptySchema(self.name.clone()));
        }
        let mut seen = BTreeSet::new();
        for column in &self.columns {
            if !seen.insert(column.position) {
                return Err(ExportError::DuplicatePosition {
                    schema: self.name.clone(),
                    position: column.position,
                });
            }
        }
        Ok(())
    }

    /// Columns sorted by position, ascending. Position is the sole
    /// determinant of output column order.
    pub fn sorted_columns(&self) -> Vec<&ErpColumn> {
        let mut columns: Vec<&ErpColumn> = self.columns.iter().collect();
        columns.sort_by_key(|c| c.position);
        columns
    }
}
