//! Legacy record encoder: schema-driven serialization of ledger entries to
//! flat accounting import files.

pub mod encoding;
pub mod format;
pub mod mapper;
pub mod schema;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::ExportError;
use crate::models::ledger::LedgerEntry;

use encoding::to_legacy_bytes;
use format::format_value;
use schema::ErpSchema;

/// A record handed to the encoder: column-name to raw value, matched
/// case-insensitively against the schema's column names.
pub type ErpRecord = IndexMap<String, String>;

/// The byte output of one export call.
#[derive(Debug, Clone)]
pub struct ExportOutput {
    /// Transcoded file content.
    pub bytes: Vec<u8>,
    /// Charset label for the caller's file writer.
    pub charset: &'static str,
    /// Number of record lines; always equals the input record count.
    pub line_count: usize,
}

/// Serialize a record set to text per the schema: columns ordered by
/// position, fixed-width concatenation or separator-joined fields, lines
/// joined with the schema's line ending. Deterministic for a given schema
/// and record set.
pub fn serialize_records(schema: &ErpSchema, records: &[ErpRecord]) -> Result<String, ExportError> {
    schema.validate()?;
    let columns = schema.sorted_columns();

    let lines: Vec<String> = records
        .iter()
        .map(|record| {
            let fields: Vec<String> = columns
                .iter()
                .map(|column| {
                    let value = lookup_field(record, &column.name);
                    format_value(value, column)
                })
                .collect();
            if schema.fixed_width {
                fields.concat()
            } else {
                fields.join(&schema.separator)
            }
        })
        .collect();

    Ok(lines.join(schema.line_ending.as_str()))
}

fn lookup_field<'a>(record: &'a ErpRecord, column_name: &str) -> Option<&'a str> {
    record
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(column_name))
        .map(|(_, value)| value.as_str())
}

/// Serialize and transcode a set of ledger entries for a target ERP.
pub fn export_entries(
    schema: &ErpSchema,
    entries: &[LedgerEntry],
) -> Result<ExportOutput, ExportError> {
    let records: Vec<ErpRecord> = entries.iter().map(LedgerEntry::to_fields).collect();
    let text = serialize_records(schema, &records)?;
    let bytes = to_legacy_bytes(&text, schema.encoding);

    debug!(
        schema = %schema.name,
        entries = entries.len(),
        bytes = bytes.len(),
        "encoded ledger export"
    );

    Ok(ExportOutput {
        bytes,
        charset: schema.encoding.charset_label(),
        line_count: entries.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use super::schema::{Align, ColumnType, ErpColumn, LineEnding, Padding};
    use std::str::FromStr;

    fn column(name: &str, position: u32, width: usize) -> ErpColumn {
        ErpColumn {
            name: name.to_string(),
            position,
            width,
            column_type: ColumnType::String,
            format: None,
            decimals: None,
            padding: Padding::Space,
            align: Align::Left,
            required: false,
        }
    }

    fn test_schema(fixed_width: bool, line_ending: LineEnding) -> ErpSchema {
        ErpSchema {
            name: "test".to_string(),
            version: "1".to_string(),
            encoding: encoding::LegacyEncoding::Windows1252,
            line_ending,
            separator: ";".to_string(),
            fixed_width,
            columns: vec![column("b", 2, 4), column("a", 1, 4)],
        }
    }

    fn record(pairs: &[(&str, &str)]) -> ErpRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn entry() -> LedgerEntry {
        LedgerEntry {
            fecha: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            cuenta_debe: Some("430000".to_string()),
            cuenta_haber: None,
            concepto: "Factura F-9 - Acme".to_string(),
            debe: Some(Decimal::from_str("150.00").unwrap()),
            haber: None,
            asiento: 1,
            ejercicio: 2024,
            periodo: 1,
            linea: 1,
        }
    }

    #[test]
    fn test_position_rules_output_order() {
        let schema = test_schema(false, LineEnding::Lf);
        let records = vec![record(&[("a", "1"), ("b", "2")])];

        // Column "a" (position 1) comes first despite being declared second.
        let text = serialize_records(&schema, &records).unwrap();
        assert_eq!(text, "1   ;2   ");
    }

    #[test]
    fn test_fixed_width_concatenates() {
        let schema = test_schema(true, LineEnding::Lf);
        let records = vec![record(&[("a", "1"), ("b", "2")])];
        let text = serialize_records(&schema, &records).unwrap();
        assert_eq!(text, "1   2   ");
    }

    #[test]
    fn test_line_endings() {
        let records = vec![record(&[("a", "1")]), record(&[("a", "2")])];

        let crlf = serialize_records(&test_schema(true, LineEnding::CrLf), &records).unwrap();
        assert!(crlf.contains("\r\n"));

        let cr = serialize_records(&test_schema(true, LineEnding::Cr), &records).unwrap();
        assert!(cr.contains('\r') && !cr.contains('\n'));
    }

    #[test]
    fn test_missing_field_encodes_empty() {
        let schema = test_schema(false, LineEnding::Lf);
        let records = vec![record(&[("a", "1")])];
        let text = serialize_records(&schema, &records).unwrap();
        assert_eq!(text, "1   ;");
    }

    #[test]
    fn test_column_names_match_case_insensitively() {
        let schema = test_schema(false, LineEnding::Lf);
        let records = vec![record(&[("A", "1"), ("B", "2")])];
        let text = serialize_records(&schema, &records).unwrap();
        assert_eq!(text, "1   ;2   ");
    }

    #[test]
    fn test_export_is_deterministic() {
        let schema = ErpSchema::embedded("contaplus").unwrap();
        let entries = vec![entry(), entry()];

        let first = export_entries(&schema, &entries).unwrap();
        let second = export_entries(&schema, &entries).unwrap();
        assert_eq!(first.bytes, second.bytes);
        assert_eq!(first.line_count, 2);
        assert_eq!(first.charset, "windows-1252");
    }

    #[test]
    fn test_contaplus_line_shape() {
        let schema = ErpSchema::embedded("contaplus").unwrap();
        let output = export_entries(&schema, &[entry()]).unwrap();
        let text = String::from_utf8(output.bytes).unwrap();

        // asiento(6) + fecha(8) + cuentas(12+12) + concepto(25) + debe(16),
        // haber empty and unpadded.
        assert!(text.starts_with("00000120240110430000      "));
        assert!(text.contains("Factura F-9 - Acme       "));
        assert!(text.ends_with("0000000000015000"));
    }
}
