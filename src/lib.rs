//! Tamarind - spreadsheet style and cell storage engine for Office Open XML
//!
//! This library provides the two stateful subsystems behind reading and writing
//! `.xlsx` workbooks: the style sheet and the cell store.
//!
//! # Features
//!
//! - **Style interning**: fonts, fills, borders, number formats and cell
//!   formats are deduplicated into stable integer ids
//! - **Style resolution**: a cell format index resolves to a denormalized,
//!   cached [`Style`](ooxml::xlsx::styles::Style) with theme, tint and indexed
//!   colors turned into concrete ARGB values
//! - **Number formats**: built-in ECMA-376 formats, custom format registration
//!   from id 164 upward, and memoized classification of format codes
//! - **styles.xml**: streaming reader and minimizing writer
//! - **Cell stores**: rows and cells persisted through a compact binary record
//!   into an in-memory, on-disk or Redis key-value backend
//!
//! # Example - Interning and resolving styles
//!
//! ```
//! use tamarind::ooxml::xlsx::styles::{CellFormat, Font, StyleSheet};
//!
//! let mut styles = StyleSheet::with_defaults();
//! let bold = styles.add_font(Font {
//!     bold: true,
//!     ..Font::with_name_and_size("Arial", 11.0)
//! });
//! let index = styles.add_cell_format(CellFormat {
//!     font_id: bold,
//!     apply_font: true,
//!     ..Default::default()
//! });
//!
//! let style = styles.get_style(index);
//! assert!(style.font.bold);
//! assert_eq!(style.font.name, "Arial");
//! ```
//!
//! # Example - Storing rows
//!
//! ```
//! use std::sync::Arc;
//! use tamarind::ooxml::xlsx::sheet::Sheet;
//! use tamarind::ooxml::xlsx::store::{CellStore, KeyValueCellStore};
//!
//! # fn main() -> tamarind::ooxml::Result<()> {
//! let sheet = Arc::new(Sheet::new("Sheet1", 4));
//! let mut store = KeyValueCellStore::memory();
//!
//! let mut row = store.make_row(&sheet);
//! row.add_cell()?.set_value("hello");
//! store.write_row(&mut row)?;
//!
//! let mut row = store.read_row(&row.key(), &sheet)?;
//! assert_eq!(row.get_cell(0)?.value(), "hello");
//! store.close()?;
//! # Ok(())
//! # }
//! ```

/// Shared binary record primitives
pub mod common;

/// OOXML (Office Open XML) spreadsheet styles and cell storage
pub mod ooxml;

// Re-export commonly used types for convenience
pub use ooxml::xlsx::store::{CellStore, CellStoreConfig, KeyValueCellStore, Row};
pub use ooxml::xlsx::styles::{Style, StyleSheet};
pub use ooxml::{ErrorKind, OoxmlError, Result};
