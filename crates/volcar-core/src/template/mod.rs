//! Marker template engine.
//!
//! Scans a grid for `{{KEY}}` placeholders, resolves each against an
//! extracted-data mapping, duplicates the template row per source document,
//! rewrites formula row references, and patches individual cells for
//! interactive edits.
//!
//! The grid is caller-owned mutable state: every call reads and writes the
//! same address space, so concurrent calls against one grid must be
//! serialized by the caller. Documents are expected to be folded in one at a
//! time.

pub mod aliases;
pub mod patterns;
pub mod resolve;

use std::collections::BTreeSet;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::TemplateError;
use crate::models::fields::DocumentFields;
use crate::models::grid::{Cell, CellValue, Grid};

use patterns::{normalize_key, CELL_REF, MARKER};
use resolve::resolve;

/// Scan every occupied cell in the grid's range and collect the unique
/// normalized marker keys, lexicographically sorted. Side-effect free.
pub fn scan_markers(grid: &Grid) -> Vec<String> {
    let mut keys = BTreeSet::new();
    for (_, _, cell) in grid.iter() {
        let Some(text) = cell.value.as_text() else {
            continue;
        };
        if text.is_empty() {
            continue;
        }
        for caps in MARKER.captures_iter(text) {
            keys.insert(normalize_key(&caps[1]));
        }
    }
    keys.into_iter().collect()
}

/// Find the first row containing at least one marker, scanning row-major
/// (top to bottom, then left to right within a row).
///
/// `None` means the sheet carries no template and should be skipped; it is a
/// per-sheet condition, not an error.
pub fn find_template_row(grid: &Grid) -> Option<u32> {
    for (row, _, cell) in grid.iter() {
        if let Some(text) = cell.value.as_text() {
            if MARKER.is_match(text) {
                return Some(row);
            }
        }
    }
    None
}

/// Shift every row reference in a formula by `delta` rows. Tokens that do
/// not look like a cell reference (letters immediately followed by digits)
/// are left untouched. Zero delta returns the formula verbatim.
pub fn shift_formula(formula: &str, delta: i64) -> String {
    if delta == 0 {
        return formula.to_string();
    }
    CELL_REF
        .replace_all(formula, |caps: &regex::Captures| {
            let row: i64 = caps[2].parse().unwrap_or(0);
            format!("{}{}", &caps[1], row + delta)
        })
        .into_owned()
}

/// Substitute every marker in `text` left to right. Markers with no
/// resolvable value survive verbatim so unresolved fields stay visible.
/// Returns the new text, whether any substitution occurred, and the
/// normalized keys that stayed unresolved.
fn substitute_markers(text: &str, fields: &DocumentFields) -> (String, bool, Vec<String>) {
    let mut out = String::with_capacity(text.len());
    let mut changed = false;
    let mut unresolved = Vec::new();
    let mut last = 0;

    for caps in MARKER.captures_iter(text) {
        let whole = caps.get(0).unwrap();
        out.push_str(&text[last..whole.start()]);

        let key = normalize_key(&caps[1]);
        match resolve(fields, &key) {
            Some(value) => {
                out.push_str(&value);
                changed = true;
            }
            None => {
                out.push_str(whole.as_str());
                unresolved.push(key);
            }
        }
        last = whole.end();
    }
    out.push_str(&text[last..]);

    (out, changed, unresolved)
}

/// Copy a set of source cells into `target_row`, shifting formulas and
/// substituting markers. Returns the unresolved marker keys.
fn fill_cells(
    grid: &mut Grid,
    source_cells: &[(u32, Cell)],
    delta: i64,
    target_row: u32,
    fields: &DocumentFields,
) -> Vec<String> {
    let mut unresolved = Vec::new();

    for (col, source) in source_cells {
        let mut cell = source.clone();

        if let Some(formula) = &cell.formula {
            cell.formula = Some(shift_formula(formula, delta));
        }

        if let Some(text) = cell.value.as_text() {
            if MARKER.is_match(text) {
                let (new_text, changed, mut missing) = substitute_markers(text, fields);
                if changed {
                    cell.value = CellValue::Text(new_text.clone());
                    // The display text is refreshed to the literal new value;
                    // formula cells are not re-evaluated here.
                    cell.display = Some(new_text);
                }
                unresolved.append(&mut missing);
            }
        }

        grid.set(target_row, *col, cell);
    }

    unresolved
}

/// Fill one document's row: copy every cell of `source_row` to `target_row`,
/// shifting formula row references by the row delta and substituting
/// markers from `fields`. Returns the unresolved marker keys.
///
/// The caller owns the target row policy and must re-derive the grid range
/// afterwards when new rows were written.
pub fn fill_row(
    grid: &mut Grid,
    source_row: u32,
    target_row: u32,
    fields: &DocumentFields,
) -> Vec<String> {
    let source_cells: Vec<(u32, Cell)> = grid
        .iter_row(source_row)
        .map(|(col, cell)| (col, cell.clone()))
        .collect();
    let delta = i64::from(target_row) - i64::from(source_row);
    fill_cells(grid, &source_cells, delta, target_row, fields)
}

/// Result of filling one document into the grid.
#[derive(Debug, Clone)]
pub struct FillOutcome {
    /// Index of the document within this filler's sequence.
    pub doc_index: usize,
    /// Row the document was written to.
    pub row: u32,
    /// Normalized marker keys that stayed unresolved.
    pub unresolved: Vec<String>,
}

/// Fills a grid's template row once per source document and tracks which row
/// belongs to which document.
///
/// The first document fills the template row in place; each subsequent
/// document is appended strictly after the grid's current maximum row, from
/// a pristine snapshot of the template row taken at construction. The
/// explicit document-to-row association recorded here is what [`patch`]
/// addresses, instead of rediscovering rows by scanning for markers.
///
/// [`patch`]: TemplateFiller::patch
pub struct TemplateFiller {
    template_row: u32,
    template_cells: Vec<(u32, Cell)>,
    marker_columns: IndexMap<String, Vec<u32>>,
    doc_rows: Vec<u32>,
}

impl TemplateFiller {
    /// Set up a filler for the grid. Returns `Ok(None)` when the grid has no
    /// template row (the sheet is skipped), and an error when the grid has
    /// no occupied cells at all.
    pub fn new(grid: &Grid) -> Result<Option<Self>, TemplateError> {
        if grid.is_empty() {
            return Err(TemplateError::EmptyGrid(grid.name().to_string()));
        }

        let Some(template_row) = find_template_row(grid) else {
            debug!(sheet = grid.name(), "no template row found");
            return Ok(None);
        };

        let template_cells: Vec<(u32, Cell)> = grid
            .iter_row(template_row)
            .map(|(col, cell)| (col, cell.clone()))
            .collect();

        let mut marker_columns: IndexMap<String, Vec<u32>> = IndexMap::new();
        for (col, cell) in &template_cells {
            if let Some(text) = cell.value.as_text() {
                for caps in MARKER.captures_iter(text) {
                    marker_columns
                        .entry(normalize_key(&caps[1]))
                        .or_default()
                        .push(*col);
                }
            }
        }

        Ok(Some(Self {
            template_row,
            template_cells,
            marker_columns,
            doc_rows: Vec::new(),
        }))
    }

    /// The template row located at construction.
    pub fn template_row(&self) -> u32 {
        self.template_row
    }

    /// Number of documents filled so far.
    pub fn documents_filled(&self) -> usize {
        self.doc_rows.len()
    }

    /// The row a document was written to.
    pub fn document_row(&self, doc_index: usize) -> Option<u32> {
        self.doc_rows.get(doc_index).copied()
    }

    /// Fill the next document into the grid and record its row. The grid
    /// range is re-derived before returning.
    pub fn fill_document(&mut self, grid: &mut Grid, fields: &DocumentFields) -> FillOutcome {
        let target_row = if self.doc_rows.is_empty() {
            self.template_row
        } else {
            grid.range().map(|r| r.max_row).unwrap_or(self.template_row) + 1
        };
        let delta = i64::from(target_row) - i64::from(self.template_row);

        let unresolved = fill_cells(grid, &self.template_cells, delta, target_row, fields);
        grid.recompute_range();

        let doc_index = self.doc_rows.len();
        self.doc_rows.push(target_row);
        debug!(
            sheet = grid.name(),
            doc_index,
            row = target_row,
            unresolved = unresolved.len(),
            "filled document row"
        );

        FillOutcome {
            doc_index,
            row: target_row,
            unresolved,
        }
    }

    /// Patch a single field of an already-filled document: write `value`
    /// into the cell(s) of the document's row at the column(s) where the
    /// field's marker sat in the template. Returns `true` when at least one
    /// cell was written; an unknown document index or a field with no marker
    /// column is a no-op.
    pub fn patch(&self, grid: &mut Grid, doc_index: usize, field: &str, value: &str) -> bool {
        let key = normalize_key(field);
        let Some(cols) = self.marker_columns.get(&key) else {
            return false;
        };
        let Some(&row) = self.doc_rows.get(doc_index) else {
            return false;
        };

        for &col in cols {
            match grid.get_mut(row, col) {
                Some(cell) => {
                    cell.value = CellValue::Text(value.to_string());
                    cell.display = Some(value.to_string());
                    cell.formula = None;
                }
                None => grid.set(row, col, Cell::text(value)),
            }
        }
        !cols.is_empty()
    }
}
