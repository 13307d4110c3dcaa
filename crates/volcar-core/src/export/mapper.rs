//! Accounting entry mapper: invoice-shaped extracted fields to a ledger
//! entry.

use chrono::{Datelike, Local};
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::fields::DocumentFields;
use crate::models::ledger::LedgerEntry;

use super::format::{parse_flexible_date, parse_flexible_decimal};

/// Accepted field aliases, checked in order.
const DATE_ALIASES: &[&str] = &["fecha", "date", "fecha_emision", "invoice_date", "issue_date"];
const TOTAL_ALIASES: &[&str] = &["total", "total_amount", "importe", "importe_total", "amount"];
const ISSUER_ALIASES: &[&str] = &["empresa", "emisor", "proveedor", "company", "vendor", "supplier"];
const NUMBER_ALIASES: &[&str] = &["numero", "numero_factura", "invoice_number", "factura", "referencia"];

/// Maximum concept length the target systems accept.
const CONCEPT_MAX_CHARS: usize = 60;

/// Map one document's extracted fields into a ledger entry.
///
/// A positive total books as a debit; zero or negative books as a credit
/// with the absolute value. The fiscal year defaults from the resolved date
/// unless an explicit one is supplied; the period is the date's month.
pub fn map_invoice_fields(
    fields: &DocumentFields,
    asiento: u32,
    fiscal_year: Option<i32>,
) -> LedgerEntry {
    let fecha = fields
        .lookup(DATE_ALIASES)
        .and_then(parse_flexible_date)
        .unwrap_or_else(|| {
            debug!(asiento, "no parsable date field, using today");
            Local::now().date_naive()
        });

    let total = fields
        .lookup(TOTAL_ALIASES)
        .and_then(parse_flexible_decimal)
        .unwrap_or(Decimal::ZERO);

    let (debe, haber) = if total > Decimal::ZERO {
        (Some(total), None)
    } else {
        (None, Some(total.abs()))
    };

    let numero = fields.lookup(NUMBER_ALIASES).unwrap_or("S/N");
    let concepto = match fields.lookup(ISSUER_ALIASES) {
        Some(empresa) => format!("Factura {numero} - {empresa}"),
        None => format!("Factura {numero}"),
    };
    let concepto: String = concepto.chars().take(CONCEPT_MAX_CHARS).collect();

    LedgerEntry {
        fecha,
        cuenta_debe: None,
        cuenta_haber: None,
        concepto,
        debe,
        haber,
        asiento,
        ejercicio: fiscal_year.unwrap_or_else(|| fecha.year()),
        periodo: fecha.month(),
        linea: 1,
    }
}
