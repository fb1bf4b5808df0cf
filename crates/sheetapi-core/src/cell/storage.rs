//! Sparse cell storage
//!
//! Only populated cells are stored, using a row-based BTreeMap so iteration
//! comes out in view order (row, then column).

use std::collections::BTreeMap;

use super::{CellAddress, CellData};

/// The occupied extent of a spreadsheet: `[1..=max_row] x [1..=max_col]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Highest populated row
    pub max_row: u32,
    /// Highest populated column
    pub max_col: u32,
}

/// Sparse row-major storage for one spreadsheet's cells
///
/// Structure: `BTreeMap<row, BTreeMap<col, CellData>>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellStorage {
    rows: BTreeMap<u32, BTreeMap<u32, CellData>>,
}

impl CellStorage {
    /// Create a new empty cell storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cell's data
    pub fn get(&self, addr: &CellAddress) -> Option<&CellData> {
        self.rows.get(&addr.row).and_then(|r| r.get(&addr.col))
    }

    /// Set a cell's data, returning what was there before
    pub fn set(&mut self, addr: CellAddress, data: CellData) -> Option<CellData> {
        self.rows.entry(addr.row).or_default().insert(addr.col, data)
    }

    /// Remove a cell
    pub fn remove(&mut self, addr: &CellAddress) -> Option<CellData> {
        let row_map = self.rows.get_mut(&addr.row)?;
        let result = row_map.remove(&addr.col);

        // Clean up empty rows
        if row_map.is_empty() {
            self.rows.remove(&addr.row);
        }

        result
    }

    /// Get the number of populated cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(|r| r.len()).sum()
    }

    /// Check if storage is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the bounding box of populated cells, or None if empty
    pub fn bounds(&self) -> Option<Bounds> {
        let max_row = *self.rows.keys().next_back()?;
        let max_col = self
            .rows
            .values()
            .filter_map(|cols| cols.keys().next_back().copied())
            .max()?;

        Some(Bounds { max_row, max_col })
    }

    /// Iterate over all cells in row order
    pub fn iter(&self) -> impl Iterator<Item = (CellAddress, &CellData)> {
        self.rows.iter().flat_map(|(&row, cols)| {
            cols.iter()
                .map(move |(&col, data)| (CellAddress { row, col }, data))
        })
    }

    /// Iterate over cells in a specific row
    pub fn iter_row(&self, row: u32) -> impl Iterator<Item = (u32, &CellData)> {
        self.rows
            .get(&row)
            .into_iter()
            .flat_map(|cols| cols.iter().map(|(&col, data)| (col, data)))
    }
}

impl FromIterator<(CellAddress, CellData)> for CellStorage {
    fn from_iter<I: IntoIterator<Item = (CellAddress, CellData)>>(iter: I) -> Self {
        let mut storage = CellStorage::new();
        for (addr, data) in iter {
            storage.set(addr, data);
        }
        storage
    }
}
