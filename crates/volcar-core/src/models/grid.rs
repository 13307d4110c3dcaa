//! Sparse grid model for spreadsheet templates.
//!
//! The grid is the in-memory stand-in for one sheet of the external
//! spreadsheet abstraction. Parsing the binary container (xlsx and friends)
//! is out of scope; callers hand the sheet over as a JSON document and get a
//! mutated one back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A typed cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellValue {
    /// Text content (may contain `{{MARKER}}` placeholders).
    Text(String),
    /// Numeric content.
    Number(f64),
    /// No value (the cell exists only for its style or formula).
    Empty,
}

impl CellValue {
    /// Get the text content, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// A single occupied cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Typed value.
    pub value: CellValue,

    /// Display/format annotation carried through from the source sheet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    /// Rendered display text, refreshed when a marker substitution occurs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    /// Formula expression referencing other addresses (e.g. `B4*C4`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

impl Cell {
    /// Create a plain text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: CellValue::Text(value.into()),
            style: None,
            display: None,
            formula: None,
        }
    }

    /// Create a numeric cell.
    pub fn number(value: f64) -> Self {
        Self {
            value: CellValue::Number(value),
            style: None,
            display: None,
            formula: None,
        }
    }

    /// Create a formula cell. The stored value is the formula's literal text.
    pub fn with_formula(formula: impl Into<String>) -> Self {
        let formula = formula.into();
        Self {
            value: CellValue::Text(formula.clone()),
            style: None,
            display: None,
            formula: Some(formula),
        }
    }
}

/// The declared rectangular range of a grid.
///
/// Invariant: the range always encloses every occupied address. It must be
/// re-derived after any row insertion ([`Grid::recompute_range`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub min_row: u32,
    pub max_row: u32,
    pub min_col: u32,
    pub max_col: u32,
}

impl Range {
    /// Whether the range contains the given address.
    pub fn contains(&self, row: u32, col: u32) -> bool {
        row >= self.min_row && row <= self.max_row && col >= self.min_col && col <= self.max_col
    }
}

/// A sparse 2-D grid addressed by (row, column), both 1-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "GridDoc", into = "GridDoc")]
pub struct Grid {
    name: String,
    cells: BTreeMap<(u32, u32), Cell>,
    range: Option<Range>,
}

impl Grid {
    /// Create an empty grid.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
            range: None,
        }
    }

    /// Sheet name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared range, or `None` if the grid has no occupied cells.
    pub fn range(&self) -> Option<Range> {
        self.range
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no occupied cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get the cell at an address.
    pub fn get(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Write a cell at an address. The declared range is not updated; call
    /// [`Grid::recompute_range`] after inserting rows.
    pub fn set(&mut self, row: u32, col: u32, cell: Cell) {
        self.cells.insert((row, col), cell);
    }

    /// Mutable access to the cell at an address.
    pub fn get_mut(&mut self, row: u32, col: u32) -> Option<&mut Cell> {
        self.cells.get_mut(&(row, col))
    }

    /// Iterate occupied cells in row-major order (top to bottom, then left
    /// to right within a row).
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, &Cell)> {
        self.cells.iter().map(|(&(r, c), cell)| (r, c, cell))
    }

    /// Iterate the occupied cells of one row, left to right.
    pub fn iter_row(&self, row: u32) -> impl Iterator<Item = (u32, &Cell)> {
        self.cells
            .range((row, u32::MIN)..=(row, u32::MAX))
            .map(|(&(_, c), cell)| (c, cell))
    }

    /// Re-derive the declared range from the occupied cells.
    pub fn recompute_range(&mut self) {
        let mut range: Option<Range> = None;
        for &(row, col) in self.cells.keys() {
            range = Some(match range {
                None => Range {
                    min_row: row,
                    max_row: row,
                    min_col: col,
                    max_col: col,
                },
                Some(r) => Range {
                    min_row: r.min_row.min(row),
                    max_row: r.max_row.max(row),
                    min_col: r.min_col.min(col),
                    max_col: r.max_col.max(col),
                },
            });
        }
        self.range = range;
    }
}

/// Column index (1-based) rendered as a spreadsheet column label (A, B, ...,
/// Z, AA, ...). Used for status output only.
pub fn column_label(col: u32) -> String {
    let mut n = col;
    let mut label = String::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        label.insert(0, (b'A' + rem) as char);
        n = (n - 1) / 26;
    }
    label
}

/// Serialized form of a grid: sheet name plus a flat cell list.
#[derive(Serialize, Deserialize)]
struct GridDoc {
    name: String,
    cells: Vec<PositionedCell>,
}

#[derive(Serialize, Deserialize)]
struct PositionedCell {
    row: u32,
    col: u32,
    #[serde(flatten)]
    cell: Cell,
}

impl From<GridDoc> for Grid {
    fn from(doc: GridDoc) -> Self {
        let mut grid = Grid::new(doc.name);
        for pc in doc.cells {
            grid.set(pc.row, pc.col, pc.cell);
        }
        grid.recompute_range();
        grid
    }
}

impl From<Grid> for GridDoc {
    fn from(grid: Grid) -> Self {
        GridDoc {
            name: grid.name,
            cells: grid
                .cells
                .into_iter()
                .map(|((row, col), cell)| PositionedCell { row, col, cell })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_range_recompute() {
        let mut grid = Grid::new("Sheet1");
        grid.set(2, 1, Cell::text("a"));
        grid.set(5, 3, Cell::number(1.0));
        grid.recompute_range();

        let range = grid.range().unwrap();
        assert_eq!(range.min_row, 2);
        assert_eq!(range.max_row, 5);
        assert_eq!(range.min_col, 1);
        assert_eq!(range.max_col, 3);
    }

    #[test]
    fn test_empty_grid_has_no_range() {
        let mut grid = Grid::new("Sheet1");
        grid.recompute_range();
        assert!(grid.range().is_none());
    }

    #[test]
    fn test_row_major_iteration() {
        let mut grid = Grid::new("Sheet1");
        grid.set(2, 1, Cell::text("b"));
        grid.set(1, 2, Cell::text("a2"));
        grid.set(1, 1, Cell::text("a1"));

        let order: Vec<(u32, u32)> = grid.iter().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(order, vec![(1, 1), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_json_round_trip() {
        let mut grid = Grid::new("Plantilla");
        grid.set(1, 1, Cell::text("{{FECHA}}"));
        grid.set(1, 2, Cell::with_formula("A1*2"));
        grid.recompute_range();

        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();

        assert_eq!(back, grid);
        assert_eq!(back.range(), grid.range());
    }

    #[test]
    fn test_column_label() {
        assert_eq!(column_label(1), "A");
        assert_eq!(column_label(26), "Z");
        assert_eq!(column_label(27), "AA");
        assert_eq!(column_label(28), "AB");
    }
}
