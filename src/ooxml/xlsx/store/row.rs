//! Rows and the current-cell protocol.
//!
//! A row keeps exactly one cell in memory, its *current* cell. Asking the
//! row for another cell first writes the current one back (if it changed)
//! and then replaces it. Any cell value obtained earlier is a detached copy:
//! handing it back through [`Row::put_cell`] is rejected, since the row has
//! no way to persist it at the right time.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use super::backend::KvBackend;
use super::codec::{self, RowRecord};
use super::keyspace;
use crate::common::binary::RecordWriter;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::xlsx::cell::Cell;
use crate::ooxml::xlsx::sheet::Sheet;

/// Options for [`Row::for_each_cell`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellVisitOptions {
    /// Visit only columns that have a stored cell, and do not pad the row
    /// out to the sheet's width
    pub skip_empty_cells: bool,
}

impl CellVisitOptions {
    /// Options visiting stored cells only.
    pub const SKIP_EMPTY_CELLS: Self = Self {
        skip_empty_cells: true,
    };
}

/// One sheet row backed by a cell store.
///
/// Only the sheet's current row can be changed. Once the sheet hands out
/// another row, setters and cell access on this one fail with
/// [`OoxmlError::NotCurrentRow`].
pub struct Row {
    sheet: Arc<Sheet>,
    backend: Arc<dyn KvBackend>,
    hidden: bool,
    height: f64,
    outline_level: u8,
    custom_height: bool,
    num: usize,
    max_col: Option<usize>,
    current: Option<Cell>,
    /// Sheet-issued token; the row may be mutated while it is the sheet's current row
    token: u64,
    tickets: u64,
    buf: RecordWriter,
}

impl fmt::Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Row")
            .field("sheet", &self.sheet.name())
            .field("num", &self.num)
            .field("hidden", &self.hidden)
            .field("height", &self.height)
            .field("outline_level", &self.outline_level)
            .field("custom_height", &self.custom_height)
            .field("max_col", &self.max_col)
            .field("current", &self.current.as_ref().map(Cell::col))
            .finish_non_exhaustive()
    }
}

impl Row {
    /// Create an empty row and make it the sheet's current row.
    pub(crate) fn new(sheet: Arc<Sheet>, backend: Arc<dyn KvBackend>) -> Self {
        Self::from_record(sheet, backend, RowRecord::default())
    }

    /// Rebuild a stored row and make it the sheet's current row.
    pub(crate) fn from_record(
        sheet: Arc<Sheet>,
        backend: Arc<dyn KvBackend>,
        record: RowRecord,
    ) -> Self {
        let token = sheet.claim_current_row();
        Self {
            sheet,
            backend,
            hidden: record.hidden,
            height: record.height,
            outline_level: record.outline_level,
            custom_height: record.custom_height,
            num: record.num,
            max_col: record.max_col,
            current: None,
            token,
            tickets: 0,
            buf: RecordWriter::with_capacity(256),
        }
    }

    /// Scalar state as stored.
    pub(crate) fn record(&self) -> RowRecord {
        RowRecord {
            hidden: self.hidden,
            height: self.height,
            outline_level: self.outline_level,
            custom_height: self.custom_height,
            num: self.num,
            max_col: self.max_col,
        }
    }

    #[inline]
    pub fn sheet(&self) -> &Arc<Sheet> {
        &self.sheet
    }

    /// Row index (0-based).
    #[inline]
    pub fn num(&self) -> usize {
        self.num
    }

    /// Key identifying this row in its store.
    pub fn key(&self) -> String {
        keyspace::row_key(self.sheet.name(), self.num)
    }

    #[inline]
    pub fn hidden(&self) -> bool {
        self.hidden
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    pub fn outline_level(&self) -> u8 {
        self.outline_level
    }

    #[inline]
    pub fn custom_height(&self) -> bool {
        self.custom_height
    }

    /// Index of the rightmost cell, if the row has any.
    #[inline]
    pub fn max_col(&self) -> Option<usize> {
        self.max_col
    }

    /// Number of cells, counting gaps: rightmost column + 1.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.max_col.map_or(0, |col| col + 1)
    }

    /// Whether this row is still the one the sheet handed out last.
    #[inline]
    pub fn is_current(&self) -> bool {
        self.sheet.is_current_row(self.token)
    }

    fn updatable(&self) -> Result<()> {
        if self.is_current() {
            Ok(())
        } else {
            Err(OoxmlError::NotCurrentRow { row: self.num })
        }
    }

    /// Set the row index. Cells already written stay under the old index;
    /// use [`CellStore::move_row`](super::CellStore::move_row) to relocate them.
    pub fn set_num(&mut self, num: usize) -> Result<()> {
        self.updatable()?;
        self.num = num;
        Ok(())
    }

    pub fn set_hidden(&mut self, hidden: bool) -> Result<()> {
        self.updatable()?;
        self.hidden = hidden;
        Ok(())
    }

    /// Set the height in points; this also marks the height as custom.
    pub fn set_height(&mut self, height: f64) -> Result<()> {
        self.updatable()?;
        self.height = height;
        self.custom_height = true;
        Ok(())
    }

    pub fn set_outline_level(&mut self, level: u8) -> Result<()> {
        self.updatable()?;
        self.outline_level = level;
        Ok(())
    }

    pub fn set_custom_height(&mut self, custom: bool) -> Result<()> {
        self.updatable()?;
        self.custom_height = custom;
        Ok(())
    }

    pub(crate) fn set_max_col(&mut self, max_col: Option<usize>) {
        self.max_col = max_col;
    }

    /// Relocate to `num` without the current-row check; used by stores.
    pub(crate) fn relocate(&mut self, num: usize) {
        self.num = num;
    }

    /// The cell currently held by this row.
    #[inline]
    pub fn current_cell(&self) -> Option<&Cell> {
        self.current.as_ref()
    }

    /// Append a new cell after the rightmost one and make it current.
    pub fn add_cell(&mut self) -> Result<&mut Cell> {
        self.updatable()?;
        let col = self.max_col.map_or(0, |col| col + 1);
        self.set_current_cell(Cell::new(col))
    }

    /// Make the cell at `col` current and return it.
    ///
    /// A column with no stored cell yields a new empty cell, marked modified
    /// so that it is written back.
    pub fn get_cell(&mut self, col: usize) -> Result<&mut Cell> {
        self.updatable()?;
        if self.current.as_ref().is_some_and(|c| c.col() == col) {
            return self.current_mut(col);
        }
        let cell = match self.read_cell(col)? {
            Some(mut cell) => {
                cell.set_col(col);
                cell
            },
            None => {
                let mut cell = Cell::new(col);
                cell.mark_modified();
                cell
            },
        };
        self.set_current_cell(cell)
    }

    /// Replace the current cell with `cell`, a copy of it taken earlier.
    ///
    /// Fails with [`OoxmlError::NotCurrentCell`] unless `cell` was obtained
    /// from this row's current cell and no other cell became current since.
    pub fn put_cell(&mut self, mut cell: Cell) -> Result<()> {
        self.updatable()?;
        self.check_current(&cell)?;
        cell.mark_modified();
        self.current = Some(cell);
        Ok(())
    }

    /// Check that `cell` is this row's current cell.
    pub fn check_current(&self, cell: &Cell) -> Result<()> {
        match &self.current {
            Some(current) if current.ticket() == cell.ticket() && current.col() == cell.col() => {
                Ok(())
            },
            _ => Err(OoxmlError::NotCurrentCell {
                row: self.num,
                col: cell.col(),
            }),
        }
    }

    /// Visit cells in column order, making each one current in turn.
    ///
    /// Columns `0..=max_col` are read from the store. Without
    /// [`skip_empty_cells`](CellVisitOptions::skip_empty_cells), columns with
    /// no stored cell are visited as new empty cells and the row is padded
    /// out to the sheet's configured width. Each call reads the store again.
    pub fn for_each_cell<F>(&mut self, options: CellVisitOptions, mut visitor: F) -> Result<()>
    where
        F: FnMut(&mut Cell) -> Result<()>,
    {
        self.updatable()?;
        self.flush_current()?;

        let last = self.max_col;
        for col in 0..last.map_or(0, |col| col + 1) {
            let cell = match self.read_cell(col)? {
                Some(mut cell) => {
                    cell.set_col(col);
                    cell
                },
                None if options.skip_empty_cells => continue,
                None => {
                    let mut cell = Cell::new(col);
                    cell.mark_modified();
                    cell
                },
            };
            visitor(self.set_current_cell(cell)?)?;
        }

        if !options.skip_empty_cells {
            let start = last.map_or(0, |col| col + 1);
            for col in start..self.sheet.max_col() {
                visitor(self.get_cell(col)?)?;
            }
        }
        Ok(())
    }

    /// Write the current cell back if it changed.
    pub(crate) fn flush_current(&mut self) -> Result<()> {
        if let Some(cell) = &mut self.current
            && cell.modified()
        {
            write_cell(&*self.backend, &self.sheet, self.num, &mut self.buf, cell)?;
            cell.clear_modified();
        }
        Ok(())
    }

    fn current_mut(&mut self, col: usize) -> Result<&mut Cell> {
        let row = self.num;
        self.current
            .as_mut()
            .ok_or(OoxmlError::NotCurrentCell { row, col })
    }

    fn set_current_cell(&mut self, mut cell: Cell) -> Result<&mut Cell> {
        self.flush_current()?;
        if self.max_col.is_none_or(|max| cell.col() > max) {
            self.max_col = Some(cell.col());
        }
        self.tickets += 1;
        cell.set_ticket(self.tickets);
        Ok(self.current.insert(cell))
    }

    fn read_cell(&self, col: usize) -> Result<Option<Cell>> {
        let map = keyspace::cells_map(self.sheet.name(), col);
        match self.backend.hget(&map, &keyspace::row_field(self.num))? {
            Some(data) => codec::decode_cell(&data),
            None => Ok(None),
        }
    }
}

/// Encode `cell` and store it under its column map, indexing the map.
fn write_cell(
    backend: &dyn KvBackend,
    sheet: &Sheet,
    row: usize,
    buf: &mut RecordWriter,
    cell: &Cell,
) -> Result<()> {
    buf.clear();
    codec::encode_cell(buf, Some(cell))?;
    let map = keyspace::cells_map(sheet.name(), cell.col());
    trace!("Writing cell {} of sheet {}", cell.coordinate(row), sheet.name());
    backend.zadd(&keyspace::cell_index(sheet.name()), cell.col() as i64, &map)?;
    backend.hset(&map, &keyspace::row_field(row), buf.as_slice())
}
