//! Ledger entry model for legacy accounting exports.

use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The canonical debit/credit record the legacy encoder serializes.
///
/// Field names follow the Spanish accounting vocabulary the target ERP
/// systems use; schema columns reference them case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Entry date.
    pub fecha: NaiveDate,

    /// Debit account reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuenta_debe: Option<String>,

    /// Credit account reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuenta_haber: Option<String>,

    /// Concept text (truncated to 60 characters by the mapper).
    pub concepto: String,

    /// Debit amount, set when the source amount is positive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debe: Option<Decimal>,

    /// Credit amount, set when the source amount is zero or negative.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub haber: Option<Decimal>,

    /// Entry number within the export.
    pub asiento: u32,

    /// Fiscal year.
    pub ejercicio: i32,

    /// Accounting period (month of the entry date unless overridden).
    pub periodo: u32,

    /// Line sequence number within the entry.
    pub linea: u32,
}

impl LedgerEntry {
    /// Produce the column-name to value record the encoder consumes. Keys
    /// are lower-case; absent optional fields are omitted so they encode as
    /// empty text.
    pub fn to_fields(&self) -> IndexMap<String, String> {
        let mut fields = IndexMap::new();
        fields.insert("asiento".to_string(), self.asiento.to_string());
        fields.insert("fecha".to_string(), self.fecha.format("%Y-%m-%d").to_string());
        if let Some(cuenta) = &self.cuenta_debe {
            fields.insert("cuenta_debe".to_string(), cuenta.clone());
        }
        if let Some(cuenta) = &self.cuenta_haber {
            fields.insert("cuenta_haber".to_string(), cuenta.clone());
        }
        fields.insert("concepto".to_string(), self.concepto.clone());
        if let Some(debe) = self.debe {
            fields.insert("debe".to_string(), debe.to_string());
        }
        if let Some(haber) = self.haber {
            fields.insert("haber".to_string(), haber.to_string());
        }
        fields.insert("ejercicio".to_string(), self.ejercicio.to_string());
        fields.insert("periodo".to_string(), self.periodo.to_string());
        fields.insert("linea".to_string(), self.linea.to_string());
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn test_to_fields_omits_absent_amounts() {
        let entry = LedgerEntry {
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
        };

        let fields = entry.to_fields();
        assert_eq!(fields.get("fecha").map(String::as_str), Some("2024-01-10"));
        assert_eq!(fields.get("debe").map(String::as_str), Some("150.00"));
        assert!(!fields.contains_key("haber"));
        assert!(!fields.contains_key("cuenta_haber"));
    }
}
