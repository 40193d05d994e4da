//! Common utilities shared across the crate.
//!
//! Currently this holds the little-endian record primitives that the cell
//! store codec is built on.

pub mod binary;

pub use binary::{BinaryError, BinaryResult, RecordReader, RecordWriter};
