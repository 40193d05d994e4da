//! Backend key naming for stored rows and cells.
//!
//! A sheet named `S` occupies three kinds of entries:
//!
//! - `S.rows`: map from row number to the encoded row record
//! - `S.cells.{col}`: one map per column, from row number to the encoded cell
//! - `S.cellmaps`: ordered set of the `S.cells.{col}` names, scored by column
//!
//! Row keys handed to callers have the shape `S:{row}`.

use crate::ooxml::error::{OoxmlError, Result};

/// Name of the map holding a sheet's row records.
#[inline]
pub fn rows_map(sheet: &str) -> String {
    format!("{}.rows", sheet)
}

/// Name of the map holding a sheet's cell records for column `col`.
#[inline]
pub fn cells_map(sheet: &str, col: usize) -> String {
    format!("{}.cells.{}", sheet, col)
}

/// Name of the ordered set indexing which column maps exist for a sheet.
#[inline]
pub fn cell_index(sheet: &str) -> String {
    format!("{}.cellmaps", sheet)
}

/// Field under which row `num` is stored in the row and cell maps.
#[inline]
pub fn row_field(num: usize) -> String {
    num.to_string()
}

/// Caller-facing key of row `num` in `sheet`.
#[inline]
pub fn row_key(sheet: &str, num: usize) -> String {
    format!("{}:{}", sheet, num)
}

/// Split a row key into sheet name and row number.
///
/// Anything other than exactly one `:` followed by a row number is reported
/// as [`OoxmlError::NotFound`]: a key of the wrong shape names no row.
pub fn parse_row_key(key: &str) -> Result<(&str, usize)> {
    let mut parts = key.split(':');
    let (Some(sheet), Some(num), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(OoxmlError::row_not_found(key, "no such row"));
    };
    let num = num
        .parse::<usize>()
        .map_err(|_| OoxmlError::row_not_found(key, "no such row"))?;
    Ok((sheet, num))
}
