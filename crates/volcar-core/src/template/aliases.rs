//! Concept alias table for fuzzy field resolution.
//!
//! Upstream extraction field names are not contractually fixed: they vary by
//! extraction mode and by document language. This table maps each canonical
//! invoice concept to the synonym tokens seen in practice, so a marker like
//! `{{NUMERO}}` can still find a data key like `invoice_number`.

/// A canonical invoice concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Concept {
    Date,
    Total,
    Tax,
    Subtotal,
    Issuer,
    Customer,
    DocumentNumber,
    Description,
}

/// Synonym tokens per concept, normalized form (upper-case, underscores).
/// Spanish, English, Portuguese and French tokens cover the supported
/// extraction languages.
pub static CONCEPT_ALIASES: &[(Concept, &[&str])] = &[
    (
        Concept::Date,
        &["FECHA", "DATE", "DATA", "EMISION", "ISSUE", "ISSUED", "EMISSAO"],
    ),
    (
        Concept::Total,
        &["TOTAL", "IMPORTE", "AMOUNT", "MONTANT", "BRUTO", "GROSS"],
    ),
    (
        Concept::Tax,
        &["IVA", "VAT", "TAX", "IMPUESTO", "TVA", "IMPOSTO"],
    ),
    (
        Concept::Subtotal,
        &["SUBTOTAL", "BASE", "NETO", "NET", "IMPONIBLE"],
    ),
    (
        Concept::Issuer,
        &[
            "EMISOR", "EMPRESA", "PROVEEDOR", "COMPANY", "VENDOR", "SUPPLIER", "ISSUER",
            "FOURNISSEUR", "FORNECEDOR",
        ],
    ),
    (
        Concept::Customer,
        &["CLIENTE", "CUSTOMER", "CLIENT", "COMPRADOR", "BUYER"],
    ),
    (
        Concept::DocumentNumber,
        &[
            "NUMERO", "NUMBER", "FACTURA", "INVOICE", "REFERENCIA", "REFERENCE", "FOLIO",
        ],
    ),
    (
        Concept::Description,
        &[
            "CONCEPTO", "DESCRIPCION", "DESCRIPTION", "DETALLE", "ITEM", "ARTICULO", "PRODUCTO",
        ],
    ),
];

/// Whether a normalized name intersects an alias list: the name contains one
/// of the tokens, or a token contains the whole name.
fn intersects(normalized: &str, tokens: &[&str]) -> bool {
    tokens
        .iter()
        .any(|t| normalized.contains(t) || t.contains(normalized))
}

/// The concepts a normalized name belongs to.
pub fn concepts_for(normalized: &str) -> Vec<Concept> {
    if normalized.is_empty() {
        return Vec::new();
    }
    CONCEPT_ALIASES
        .iter()
        .filter(|(_, tokens)| intersects(normalized, tokens))
        .map(|(concept, _)| *concept)
        .collect()
}

/// Whether a normalized name belongs to the given concept.
pub fn matches_concept(normalized: &str, concept: Concept) -> bool {
    if normalized.is_empty() {
        return false;
    }
    CONCEPT_ALIASES
        .iter()
        .any(|(c, tokens)| *c == concept && intersects(normalized, tokens))
}
