//! Field resolution: matching a normalized marker name against extracted
//! data keys.
//!
//! Matching runs in five ordered passes, first hit wins. The layered
//! fallback exists because upstream field names vary by extraction mode and
//! language; a template author writing `{{FECHA}}` must still hit a data key
//! like `FECHA_EMISION` or `invoice_date`.

use tracing::debug;

use crate::models::fields::DocumentFields;

use super::aliases::concepts_for;
use super::patterns::normalize_key;

/// Resolve a normalized marker name against the document's fields.
///
/// Returns `None` when no pass matches; the caller leaves the marker text in
/// place so the unresolved field stays visibly flagged.
pub fn resolve(fields: &DocumentFields, marker: &str) -> Option<String> {
    // Pass 1: exact match on normalized keys (upper-case, underscores).
    for (name, value) in non_empty(fields) {
        if normalize_key(name) == marker {
            return Some(value.to_string());
        }
    }

    // Pass 2: exact match in lower-case form. Custom extraction fields come
    // back lower-snake-case.
    let marker_lower = marker.to_lowercase();
    for (name, value) in non_empty(fields) {
        if normalize_key(name).to_lowercase() == marker_lower {
            return Some(value.to_string());
        }
    }

    // Pass 3: substring containment either direction, upper-case.
    for (name, value) in non_empty(fields) {
        let key = normalize_key(name);
        if key.contains(marker) || marker.contains(&key) {
            return Some(value.to_string());
        }
    }

    // Pass 4: substring containment either direction, lower-case.
    for (name, value) in non_empty(fields) {
        let key = normalize_key(name).to_lowercase();
        if key.contains(&marker_lower) || marker_lower.contains(&key) {
            return Some(value.to_string());
        }
    }

    // Pass 5: concept aliases. If the marker belongs to a concept family,
    // accept any key in the same family.
    let concepts = concepts_for(marker);
    if !concepts.is_empty() {
        for (name, value) in non_empty(fields) {
            let key_concepts = concepts_for(&normalize_key(name));
            if key_concepts.iter().any(|c| concepts.contains(c)) {
                return Some(value.to_string());
            }
        }
    }

    debug!(marker, "no data key matched");
    None
}

fn non_empty<'a>(fields: &'a DocumentFields) -> impl Iterator<Item = (&'a str, &'a str)> {
    fields.iter().filter_map(|(name, value)| match value {
        Some(v) if !v.trim().is_empty() => Some((name, v)),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fields(pairs: &[(&str, &str)]) -> DocumentFields {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_exact_normalized_match() {
        let data = fields(&[("fecha emision", "2024-01-10")]);
        assert_eq!(
            resolve(&data, "FECHA_EMISION"),
            Some("2024-01-10".to_string())
        );
    }

    #[test]
    fn test_substring_match_resolves_fecha() {
        let data = fields(&[("FECHA_EMISION", "2024-01-10")]);
        assert_eq!(resolve(&data, "FECHA"), Some("2024-01-10".to_string()));
    }

    #[test]
    fn test_alias_match_resolves_numero() {
        // Lower-case custom field, no substring overlap with the marker.
        let data = fields(&[("invoice_number", "F-9")]);
        assert_eq!(resolve(&data, "NUMERO"), Some("F-9".to_string()));
    }

    #[test]
    fn test_first_pass_wins_over_fuzzy() {
        let data = fields(&[("total_amount", "999"), ("total", "150")]);
        assert_eq!(resolve(&data, "TOTAL"), Some("150".to_string()));
    }

    #[test]
    fn test_empty_values_are_unresolvable() {
        let mut data = DocumentFields::new();
        data.insert("total", None);
        data.insert("importe", Some("  ".to_string()));
        assert_eq!(resolve(&data, "TOTAL"), None);
    }

    #[test]
    fn test_unmatched_marker() {
        let data = fields(&[("fecha", "2024-01-10")]);
        assert_eq!(resolve(&data, "CODIGO_POSTAL"), None);
    }
}
