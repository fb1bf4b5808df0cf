//! Cell-related types
//!
//! This module contains:
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellData`] - The tagged value stored in a cell
//! - [`CellStorage`] - Sparse storage for one spreadsheet's cells

mod address;
mod data;
mod storage;

pub use address::{column_to_label, label_to_column, CellAddress};
pub use data::{CellData, CellKind};
pub use storage::{Bounds, CellStorage};
