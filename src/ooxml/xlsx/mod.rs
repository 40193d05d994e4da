//! Excel (.xlsx) spreadsheet support.
//!
//! - [`styles`]: the workbook style sheet, interning and resolution
//! - [`cell`]: a single cell's value and formatting state
//! - [`data_validation`]: validation rules attached to cells
//! - [`sheet`]: the sheet identity rows belong to
//! - [`store`]: persistence of rows and cells behind the [`store::CellStore`] trait

pub mod cell;
pub mod data_validation;
pub mod sheet;
pub mod store;
pub mod styles;

pub use cell::{Cell, CellType, Hyperlink, RichTextRun};
pub use data_validation::DataValidation;
pub use sheet::Sheet;
