//! Regex patterns for marker and formula matching.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `{{NAME}}` placeholder, surrounding whitespace inside the braces
    /// tolerated. The capture is the raw marker name.
    pub static ref MARKER: Regex = Regex::new(
        r"\{\{\s*([^{}]+?)\s*\}\}"
    ).unwrap();

    /// A cell reference inside a formula: one or more letters immediately
    /// followed by a row number (e.g. `B12`). Anything else in the formula
    /// is left untouched when rows shift.
    pub static ref CELL_REF: Regex = Regex::new(
        r"([A-Za-z]+)(\d+)"
    ).unwrap();
}

/// Normalize a marker or field name: trim, upper-case, and collapse internal
/// whitespace runs into a single underscore.
pub fn normalize_key(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.trim().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
        } else {
            out.extend(c.to_uppercase());
            in_whitespace = false;
        }
    }
    out
}
