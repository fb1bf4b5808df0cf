//! # sheetapi-core
//!
//! Storage and rendering core for the sheetapi spreadsheet service.
//!
//! This crate provides:
//! - [`CellAddress`] - A1-notation cell addresses and column-label math
//! - [`CellData`] - The tagged value stored in a cell
//! - [`Store`] - Spreadsheets and their sparse cells behind one shared handle
//! - [`ViewRenderer`] - Dense tab-separated rendering of a spreadsheet
//!
//! ## Example
//!
//! ```rust
//! use sheetapi_core::{CellData, Store, ViewRenderer};
//!
//! let store = Store::new();
//! let sheet = store.create_spreadsheet("example");
//!
//! store.set_cell_a1(&sheet.id, "A1", CellData::literal("a1")).unwrap();
//! store.set_cell_a1(&sheet.id, "B2", CellData::literal("b2")).unwrap();
//!
//! let view = ViewRenderer::new().render(&store.snapshot(&sheet.id).unwrap());
//! assert_eq!(view, "*\tA\tB\n1\ta1\t\n2\t\tb2");
//! ```

pub mod cell;
pub mod error;
pub mod store;
pub mod view;

// Re-exports for convenience
pub use cell::{Bounds, CellAddress, CellData, CellKind, CellStorage};
pub use error::{Error, Result};
pub use store::{Spreadsheet, Store};
pub use view::{ViewLines, ViewOptions, ViewRenderer};

/// Maximum number of rows in a spreadsheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a spreadsheet (Excel limit, column XFD)
pub const MAX_COLS: u32 = 16_384;
