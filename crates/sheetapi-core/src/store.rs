//! Spreadsheet and cell stores
//!
//! [`Store`] is the handle every operation goes through. It owns the set of
//! spreadsheets and, per spreadsheet, the sparse cell data. Cloning a store
//! is cheap and yields another handle onto the same state.
//!
//! Locking is two-level: the spreadsheet map sits behind one `RwLock`, and
//! each spreadsheet's name and cells sit behind their own. Cell operations
//! hold a read guard on the map for their whole duration, so deleting a
//! spreadsheet (which needs the write guard) either happens before a cell
//! operation starts or after it finishes. A cell can never outlive its
//! spreadsheet.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cell::{CellAddress, CellData, CellStorage};
use crate::error::{Error, Result};

/// A spreadsheet's identity and name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spreadsheet {
    /// Opaque unique identifier (UUID v4, hyphenated)
    pub id: String,
    /// Display name (not required to be unique)
    pub name: String,
}

#[derive(Debug)]
struct SheetEntry {
    /// Creation sequence number, used for stable listing order
    seq: u64,
    name: RwLock<String>,
    cells: RwLock<CellStorage>,
}

impl SheetEntry {
    fn to_spreadsheet(&self, id: &str) -> Spreadsheet {
        Spreadsheet {
            id: id.to_string(),
            name: self.name.read().clone(),
        }
    }
}

#[derive(Debug, Default)]
struct StoreInner {
    sheets: RwLock<AHashMap<String, SheetEntry>>,
    next_seq: AtomicU64,
}

/// In-memory spreadsheet and cell store
#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against one spreadsheet while holding the map's read guard
    fn with_sheet<T>(&self, id: &str, f: impl FnOnce(&SheetEntry) -> T) -> Result<T> {
        let sheets = self.inner.sheets.read();
        let entry = sheets.get(id).ok_or_else(|| Error::not_found(id))?;
        Ok(f(entry))
    }

    // === Spreadsheets ===

    /// Create a spreadsheet with a freshly generated id
    pub fn create_spreadsheet<S: Into<String>>(&self, name: S) -> Spreadsheet {
        let id = Uuid::new_v4().to_string();
        let name = name.into();
        let seq = self.inner.next_seq.fetch_add(1, Ordering::Relaxed);

        self.inner.sheets.write().insert(
            id.clone(),
            SheetEntry {
                seq,
                name: RwLock::new(name.clone()),
                cells: RwLock::new(CellStorage::new()),
            },
        );

        tracing::debug!("Created spreadsheet {id} ({name:?})");
        Spreadsheet { id, name }
    }

    /// Get a spreadsheet by id
    pub fn spreadsheet(&self, id: &str) -> Result<Spreadsheet> {
        self.with_sheet(id, |entry| entry.to_spreadsheet(id))
    }

    /// List all spreadsheets in creation order
    pub fn spreadsheets(&self) -> Vec<Spreadsheet> {
        let sheets = self.inner.sheets.read();
        let mut entries: Vec<(&String, &SheetEntry)> = sheets.iter().collect();
        entries.sort_by_key(|(_, entry)| entry.seq);
        entries
            .into_iter()
            .map(|(id, entry)| entry.to_spreadsheet(id))
            .collect()
    }

    /// Rename a spreadsheet
    pub fn rename_spreadsheet<S: Into<String>>(&self, id: &str, name: S) -> Result<Spreadsheet> {
        let name = name.into();
        self.with_sheet(id, |entry| {
            *entry.name.write() = name.clone();
        })?;
        tracing::debug!("Renamed spreadsheet {id} to {name:?}");
        Ok(Spreadsheet {
            id: id.to_string(),
            name,
        })
    }

    /// Delete a spreadsheet and all of its cells
    ///
    /// Deleting an unknown id is not an error. Returns whether a
    /// spreadsheet was actually removed.
    pub fn delete_spreadsheet(&self, id: &str) -> bool {
        let removed = self.inner.sheets.write().remove(id);
        match removed {
            Some(entry) => {
                tracing::debug!(
                    "Deleted spreadsheet {id} with {} cells",
                    entry.cells.read().cell_count()
                );
                true
            }
            None => {
                tracing::trace!("Delete of unknown spreadsheet {id} ignored");
                false
            }
        }
    }

    // === Cells ===

    /// Get a cell's data; `Ok(None)` means the cell has no value
    pub fn cell(&self, id: &str, addr: &CellAddress) -> Result<Option<CellData>> {
        self.with_sheet(id, |entry| entry.cells.read().get(addr).cloned())
    }

    /// Set a cell's data, overwriting whatever was there
    pub fn set_cell(&self, id: &str, addr: CellAddress, data: CellData) -> Result<()> {
        self.with_sheet(id, |entry| {
            entry.cells.write().set(addr, data);
        })?;
        tracing::debug!("Set cell {addr} in spreadsheet {id}");
        Ok(())
    }

    /// Delete a cell's data
    ///
    /// Deleting a cell that has no value succeeds. Returns whether data was
    /// actually removed.
    pub fn delete_cell(&self, id: &str, addr: &CellAddress) -> Result<bool> {
        let removed = self.with_sheet(id, |entry| entry.cells.write().remove(addr).is_some())?;
        tracing::debug!("Deleted cell {addr} in spreadsheet {id} (had data: {removed})");
        Ok(removed)
    }

    /// Get a cell's data by A1 address string
    ///
    /// The spreadsheet is checked before the address is parsed.
    pub fn cell_a1(&self, id: &str, address: &str) -> Result<Option<CellData>> {
        self.spreadsheet(id)?;
        self.cell(id, &CellAddress::parse(address)?)
    }

    /// Set a cell's data by A1 address string
    ///
    /// The spreadsheet is checked before the address is parsed.
    pub fn set_cell_a1(&self, id: &str, address: &str, data: CellData) -> Result<()> {
        self.spreadsheet(id)?;
        self.set_cell(id, CellAddress::parse(address)?, data)
    }

    /// Delete a cell's data by A1 address string
    ///
    /// The spreadsheet is checked before the address is parsed.
    pub fn delete_cell_a1(&self, id: &str, address: &str) -> Result<bool> {
        self.spreadsheet(id)?;
        self.delete_cell(id, &CellAddress::parse(address)?)
    }

    /// List every populated cell in row-then-column order
    pub fn cells(&self, id: &str) -> Result<Vec<(CellAddress, CellData)>> {
        self.with_sheet(id, |entry| {
            entry
                .cells
                .read()
                .iter()
                .map(|(addr, data)| (addr, data.clone()))
                .collect()
        })
    }

    /// Take a consistent copy of one spreadsheet's cells
    pub fn snapshot(&self, id: &str) -> Result<CellStorage> {
        self.with_sheet(id, |entry| entry.cells.read().clone())
    }
}
