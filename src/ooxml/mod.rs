//! Office Open XML (OOXML) spreadsheet support.
//!
//! The module is organized into two layers:
//!
//! 1. **Errors** (`error`): the crate-wide error type and its coarse kinds
//! 2. **Spreadsheets** (`xlsx`):
//!    - `styles`: the style sheet (`xl/styles.xml`) and theme colors
//!    - `cell`, `data_validation`, `sheet`: cell values and their context
//!    - `store`: row and cell persistence
//!
//! # Example: Round-tripping styles.xml
//!
//! ```rust
//! use tamarind::ooxml::xlsx::styles::StyleSheet;
//!
//! let styles = StyleSheet::with_defaults();
//! let xml = styles.to_xml()?;
//! let parsed = StyleSheet::parse(&xml)?;
//! assert_eq!(parsed.font_count(), 1);
//! # Ok::<(), tamarind::ooxml::OoxmlError>(())
//! ```
pub mod error;
pub mod xlsx;

// Re-export error types
pub use error::{ErrorKind, OoxmlError, Result};
