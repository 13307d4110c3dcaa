//! Per-column value formatting for legacy records.
//!
//! Formatting is best-effort by design: unparsable dates resolve to today
//! and unparsable numbers to zero, so the exported line count always matches
//! the record count even when individual fields are imperfect.

use chrono::{Local, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use tracing::debug;

use super::schema::{Align, ColumnType, ErpColumn, Padding};

/// Format one value for a column: type dispatch, then padding. Empty or
/// absent input yields empty text with no padding applied; enforcing
/// `required` is the caller's job.
pub fn format_value(value: Option<&str>, column: &ErpColumn) -> String {
    let raw = match value {
        Some(v) if !v.trim().is_empty() => v.trim(),
        _ => return String::new(),
    };

    let formatted = match column.column_type {
        ColumnType::Date => format_date(raw, column.format.as_deref()),
        ColumnType::Numeric => format_numeric(raw, column),
        ColumnType::String => raw.to_string(),
    };

    apply_padding(formatted, column)
}

/// Parse a date from the accepted textual shapes, most specific first.
/// Returns `None` only when every shape fails.
pub fn parse_flexible_date(s: &str) -> Option<NaiveDate> {
    const SHAPES: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d", "%d.%m.%Y"];
    let s = s.trim();
    SHAPES
        .iter()
        .find_map(|shape| NaiveDate::parse_from_str(s, shape).ok())
}

fn format_date(raw: &str, format: Option<&str>) -> String {
    let date = parse_flexible_date(raw).unwrap_or_else(|| {
        debug!(value = raw, "unparsable date, falling back to today");
        Local::now().date_naive()
    });

    let pattern = match format {
        Some("DDMMYYYY") => "%d%m%Y",
        Some("DD/MM/YYYY") => "%d/%m/%Y",
        // YYYYMMDD is the default.
        _ => "%Y%m%d",
    };
    date.format(pattern).to_string()
}

/// Parse a locale-flexible decimal: comma or dot as fractional separator,
/// thousands separators tolerated.
pub fn parse_flexible_decimal(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.' || *c == '-')
        .collect();

    let normalized = if cleaned.contains(',') && !cleaned.contains('.') {
        cleaned.replace(',', ".")
    } else if cleaned.contains(',') && cleaned.contains('.') {
        // Both present: the last separator wins as the decimal point.
        let comma_pos = cleaned.rfind(',');
        let dot_pos = cleaned.rfind('.');
        match (comma_pos, dot_pos) {
            (Some(c), Some(d)) if c > d => cleaned.replace('.', "").replace(',', "."),
            (Some(_), Some(_)) => cleaned.replace(',', ""),
            _ => cleaned,
        }
    } else {
        cleaned
    };

    Decimal::from_str(&normalized).ok()
}

fn format_numeric(raw: &str, column: &ErpColumn) -> String {
    let is_decimal = column.format.as_deref() == Some("decimal");

    if is_decimal {
        let decimals = column.decimals.unwrap_or(2);
        let value = parse_flexible_decimal(raw).unwrap_or_else(|| {
            debug!(value = raw, "unparsable amount, falling back to zero");
            Decimal::ZERO
        });
        implied_decimal(value, decimals)
    } else {
        // Plain integer column: floor, non-numeric treated as zero.
        let value = parse_flexible_decimal(raw).unwrap_or(Decimal::ZERO);
        value.floor().to_i64().unwrap_or(0).to_string()
    }
}

/// Render a value with exactly `decimals` fractional digits and the decimal
/// separator stripped: legacy systems encode the decimal point positionally.
fn implied_decimal(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let text = rounded.to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (text, String::new()),
    };
    let mut frac = frac_part;
    while (frac.len() as u32) < decimals {
        frac.push('0');
    }
    frac.truncate(decimals as usize);
    format!("{int_part}{frac}")
}

/// Truncate to the column width, then pad on the side opposite the
/// alignment. `Padding::None` only ever truncates.
fn apply_padding(text: String, column: &ErpColumn) -> String {
    let width = column.width;
    let length = text.chars().count();

    if length > width {
        return text.chars().take(width).collect();
    }
    if length == width || column.padding == Padding::None {
        return text;
    }

    let pad_char = match column.padding {
        Padding::Zero => '0',
        Padding::Space => ' ',
        Padding::None => unreachable!(),
    };
    let fill: String = std::iter::repeat(pad_char).take(width - length).collect();

    match column.align {
        Align::Right => format!("{fill}{text}"),
        Align::Left => format!("{text}{fill}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn column(column_type: ColumnType) -> ErpColumn {
        ErpColumn {
            name: "campo".to_string(),
            position: 1,
            width: 10,
            column_type,
            format: None,
            decimals: None,
            padding: Padding::None,
            align: Align::Left,
            required: false,
        }
    }

    #[test]
    fn test_zero_pad_right_aligned_fills_width() {
        let mut col = column(ColumnType::String);
        col.width = 6;
        col.padding = Padding::Zero;
        col.align = Align::Right;

        assert_eq!(format_value(Some("42"), &col), "000042");
        assert_eq!(format_value(Some("42"), &col).len(), col.width);
    }

    #[test]
    fn test_space_pad_left_aligned() {
        let mut col = column(ColumnType::String);
        col.width = 5;
        col.padding = Padding::Space;
        col.align = Align::Left;

        assert_eq!(format_value(Some("ab"), &col), "ab   ");
    }

    #[test]
    fn test_truncates_over_width() {
        let mut col = column(ColumnType::String);
        col.width = 4;
        assert_eq!(format_value(Some("abcdef"), &col), "abcd");
    }

    #[test]
    fn test_empty_input_is_empty_unpadded() {
        let mut col = column(ColumnType::String);
        col.padding = Padding::Zero;
        col.align = Align::Right;
        assert_eq!(format_value(None, &col), "");
        assert_eq!(format_value(Some("   "), &col), "");
    }

    #[test]
    fn test_decimal_comma_and_dot_normalize_identically() {
        let mut col = column(ColumnType::Numeric);
        col.format = Some("decimal".to_string());
        col.decimals = Some(2);

        assert_eq!(format_value(Some("1.234,56"), &col), "123456");
        assert_eq!(format_value(Some("1234.56"), &col), "123456");
    }

    #[test]
    fn test_decimal_pads_fraction() {
        let mut col = column(ColumnType::Numeric);
        col.format = Some("decimal".to_string());
        col.decimals = Some(2);

        assert_eq!(format_value(Some("150"), &col), "15000");
        assert_eq!(format_value(Some("7,5"), &col), "750");
    }

    #[test]
    fn test_decimal_non_numeric_is_zero_scaled() {
        let mut col = column(ColumnType::Numeric);
        col.format = Some("decimal".to_string());
        col.decimals = Some(2);

        assert_eq!(format_value(Some("n/a"), &col), "000");
    }

    #[test]
    fn test_integer_floors() {
        let col = column(ColumnType::Numeric);
        assert_eq!(format_value(Some("12.9"), &col), "12");
        assert_eq!(format_value(Some("basura"), &col), "0");
    }

    #[test]
    fn test_date_formats() {
        let mut col = column(ColumnType::Date);
        col.format = Some("YYYYMMDD".to_string());
        assert_eq!(format_value(Some("2024-03-05"), &col), "20240305");

        col.format = Some("DD/MM/YYYY".to_string());
        assert_eq!(format_value(Some("05/03/2024"), &col), "05/03/2024");

        col.format = Some("DDMMYYYY".to_string());
        assert_eq!(format_value(Some("05/03/2024"), &col), "05032024");

        // Default format token is YYYYMMDD.
        col.format = None;
        assert_eq!(format_value(Some("05-03-2024"), &col), "20240305");
    }

    #[test]
    fn test_unparsable_date_falls_back_to_today() {
        let mut col = column(ColumnType::Date);
        col.format = Some("YYYYMMDD".to_string());
        let today = Local::now().date_naive().format("%Y%m%d").to_string();
        assert_eq!(format_value(Some("mañana"), &col), today);
    }

    #[test]
    fn test_parse_flexible_decimal() {
        assert_eq!(
            parse_flexible_decimal("1 234,56"),
            Some(Decimal::from_str("1234.56").unwrap())
        );
        assert_eq!(
            parse_flexible_decimal("-12.50"),
            Some(Decimal::from_str("-12.50").unwrap())
        );
        assert_eq!(parse_flexible_decimal("abc"), None);
    }
}
