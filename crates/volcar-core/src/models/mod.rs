//! Data models: the grid, per-document field mappings, and ledger entries.

pub mod fields;
pub mod grid;
pub mod ledger;
