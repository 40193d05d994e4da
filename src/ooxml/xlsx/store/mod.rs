//! Row and cell persistence.
//!
//! Rows are created and read through a [`CellStore`]. Each row persists its
//! own cells as the current-cell protocol moves on (see [`Row`]); the store
//! persists the row's scalar state and relocates or removes rows.
//!
//! All stores share one implementation, [`KeyValueCellStore`], over a
//! [`KvBackend`](backend::KvBackend): process memory, files on disk, or Redis.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tamarind::ooxml::xlsx::sheet::Sheet;
//! use tamarind::ooxml::xlsx::store::{CellStore, CellStoreConfig};
//!
//! # fn main() -> tamarind::ooxml::Result<()> {
//! let sheet = Arc::new(Sheet::new("Sheet1", 3));
//! let mut store = CellStoreConfig::default().open()?;
//!
//! let mut row = store.make_row(&sheet);
//! row.set_num(4)?;
//! row.add_cell()?.set_int(42);
//! store.write_row(&mut row)?;
//!
//! store.move_row(&mut row, 9)?;
//! let mut moved = store.read_row("Sheet1:9", &sheet)?;
//! assert_eq!(moved.get_cell(0)?.value(), "42");
//! store.close()?;
//! # Ok(())
//! # }
//! ```

use std::fmt::Debug;
use std::sync::Arc;

use crate::ooxml::error::Result;
use crate::ooxml::xlsx::sheet::Sheet;

pub mod backend;
pub mod codec;
pub mod config;
pub mod keyspace;
mod kv_store;
mod row;

pub use backend::KvBackend;
pub use config::{BackendConfig, CellStoreConfig, CellStoreConstructor, RedisOptions};
pub use kv_store::KeyValueCellStore;
pub use row::{CellVisitOptions, Row};

/// Persistence for the rows of one sheet.
///
/// No operation retries; backend errors are returned as they occur.
pub trait CellStore: Send + Debug {
    /// A fresh empty row; touches no storage.
    fn make_row(&mut self, sheet: &Arc<Sheet>) -> Row;

    /// A fresh row reporting `len` cells.
    fn make_row_with_len(&mut self, sheet: &Arc<Sheet>, len: usize) -> Row;

    /// Read the row stored under `key` (`"{sheet}:{row}"`).
    ///
    /// Fails with `NotFound` when the key is malformed or nothing is stored.
    fn read_row(&mut self, key: &str, sheet: &Arc<Sheet>) -> Result<Row>;

    /// Persist the row's scalar state and its current cell.
    fn write_row(&mut self, row: &mut Row) -> Result<()>;

    /// Move the row and all of its stored cells to row index `index`.
    ///
    /// Fails with `Conflict`, before changing anything, when a row is
    /// already stored at `index`. The move itself is a sequence of
    /// independent writes: a failure partway leaves some cells moved.
    fn move_row(&mut self, row: &mut Row, index: usize) -> Result<()>;

    /// Delete the row stored under `key` and all of its cells.
    fn remove_row(&mut self, key: &str) -> Result<()>;

    /// Release the backend, purging the sheet's data if the store is ephemeral.
    fn close(&mut self) -> Result<()>;
}
