//! Cell store over a key-value backend.

use std::sync::Arc;

use tracing::{debug, warn};

use super::backend::{KvBackend, MemoryBackend};
use super::codec;
use super::keyspace;
use super::{CellStore, Row};
use crate::common::binary::RecordWriter;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::xlsx::sheet::Sheet;

/// [`CellStore`] keeping rows and cells in a [`KvBackend`].
///
/// The store learns the sheet it serves from the first row it handles.
/// Closing purges that sheet's maps when `purge_on_close` is set (the
/// default), which makes the store a scratch area for one pass over a sheet.
/// A store dropped without [`close`](CellStore::close) closes itself.
#[derive(Debug)]
pub struct KeyValueCellStore {
    backend: Arc<dyn KvBackend>,
    sheet_name: Option<String>,
    purge_on_close: bool,
    closed: bool,
    buf: RecordWriter,
}

impl KeyValueCellStore {
    /// Create a store over `backend`.
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self {
            backend,
            sheet_name: None,
            purge_on_close: true,
            closed: false,
            buf: RecordWriter::with_capacity(64),
        }
    }

    /// Store in process memory.
    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Store in files under `path`, or in a scratch directory removed on close.
    #[cfg(feature = "disk")]
    pub fn disk(path: Option<&std::path::Path>) -> Result<Self> {
        let backend = match path {
            Some(path) => super::backend::DiskBackend::open(path)?,
            None => super::backend::DiskBackend::scratch()?,
        };
        Ok(Self::new(Arc::new(backend)))
    }

    /// Store in a Redis server.
    #[cfg(feature = "redis")]
    pub fn redis(options: &super::RedisOptions) -> Result<Self> {
        Ok(Self::new(Arc::new(super::backend::RedisBackend::connect(options)?)))
    }

    /// Whether closing deletes the sheet's stored rows and cells.
    pub fn with_purge_on_close(mut self, purge: bool) -> Self {
        self.purge_on_close = purge;
        self
    }

    pub fn backend(&self) -> &Arc<dyn KvBackend> {
        &self.backend
    }

    fn remember_sheet(&mut self, sheet: &Sheet) {
        if self.sheet_name.is_none() {
            self.sheet_name = Some(sheet.name().to_string());
        }
    }

    fn store_row(&mut self, row: &Row) -> Result<()> {
        self.buf.clear();
        codec::encode_row(&mut self.buf, &row.record())?;
        self.backend.hset(
            &keyspace::rows_map(row.sheet().name()),
            &keyspace::row_field(row.num()),
            self.buf.as_slice(),
        )
    }
}

impl CellStore for KeyValueCellStore {
    fn make_row(&mut self, sheet: &Arc<Sheet>) -> Row {
        self.remember_sheet(sheet);
        Row::new(Arc::clone(sheet), Arc::clone(&self.backend))
    }

    fn make_row_with_len(&mut self, sheet: &Arc<Sheet>, len: usize) -> Row {
        let mut row = self.make_row(sheet);
        row.set_max_col(len.checked_sub(1));
        row
    }

    fn read_row(&mut self, key: &str, sheet: &Arc<Sheet>) -> Result<Row> {
        self.remember_sheet(sheet);
        let (_, num) = keyspace::parse_row_key(key)?;
        let data = self
            .backend
            .hget(&keyspace::rows_map(sheet.name()), &keyspace::row_field(num))?
            .ok_or_else(|| OoxmlError::row_not_found(key, "no such row"))?;
        let record = codec::decode_row(&data)?;
        Ok(Row::from_record(Arc::clone(sheet), Arc::clone(&self.backend), record))
    }

    fn write_row(&mut self, row: &mut Row) -> Result<()> {
        self.remember_sheet(row.sheet());
        row.flush_current()?;
        self.store_row(row)
    }

    fn move_row(&mut self, row: &mut Row, index: usize) -> Result<()> {
        self.remember_sheet(row.sheet());
        let sheet = row.sheet().name().to_string();
        let rows = keyspace::rows_map(&sheet);
        let new_field = keyspace::row_field(index);

        if self.backend.hget(&rows, &new_field)?.is_some() {
            return Err(OoxmlError::Conflict { index });
        }

        row.flush_current()?;
        let old_field = keyspace::row_field(row.num());
        debug!("Moving row {} of sheet {} to {}", row.num(), sheet, index);

        for col in 0..row.cell_count() {
            let map = keyspace::cells_map(&sheet, col);
            if let Some(data) = self.backend.hget(&map, &old_field)? {
                self.backend.hset(&map, &new_field, &data)?;
                self.backend.hdel(&map, &old_field)?;
            }
        }

        self.backend.hdel(&rows, &old_field)?;
        row.relocate(index);
        self.store_row(row)
    }

    fn remove_row(&mut self, key: &str) -> Result<()> {
        let (sheet, num) = keyspace::parse_row_key(key)?;
        let field = keyspace::row_field(num);
        debug!("Removing row {} of sheet {}", num, sheet);

        for map in self.backend.zrange(&keyspace::cell_index(sheet))? {
            self.backend.hdel(&map, &field)?;
        }
        self.backend.hdel(&keyspace::rows_map(sheet), &field)?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        if self.purge_on_close
            && let Some(sheet) = &self.sheet_name
        {
            debug!("Purging stored rows and cells of sheet {}", sheet);
            let index = keyspace::cell_index(sheet);
            let mut keys = self.backend.zrange(&index)?;
            keys.push(keyspace::rows_map(sheet));
            keys.push(index);
            self.backend.del(&keys)?;
        }
        self.backend.close()
    }
}

impl Drop for KeyValueCellStore {
    fn drop(&mut self) {
        if !self.closed
            && let Err(e) = self.close()
        {
            warn!("Failed to close cell store on drop: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::error::ErrorKind;
    use crate::ooxml::xlsx::cell::{CellType, Hyperlink};
    use crate::ooxml::xlsx::data_validation::DataValidation;
    use crate::ooxml::xlsx::styles::{Style, StyleFont};

    fn sheet() -> Arc<Sheet> {
        Arc::new(Sheet::new("Test", 3))
    }

    #[test]
    fn test_read_missing_row() {
        let mut store = KeyValueCellStore::memory();
        let sheet = sheet();
        for key in ["I don't exist", "Test:12"] {
            let err = store.read_row(key, &sheet).unwrap_err();
            assert!(matches!(err, OoxmlError::NotFound { .. }), "{key}");
        }
    }

    #[test]
    fn test_write_and_read_empty_row() {
        let mut store = KeyValueCellStore::memory();
        let sheet = sheet();
        let mut row = store.make_row(&sheet);
        row.set_hidden(true).unwrap();
        row.set_height(40.4).unwrap();
        row.set_outline_level(2).unwrap();
        row.set_num(3).unwrap();
        store.write_row(&mut row).unwrap();

        let row2 = store.read_row(&row.key(), &sheet).unwrap();
        assert_eq!(row2.hidden(), row.hidden());
        assert_eq!(row2.height(), row.height());
        assert_eq!(row2.outline_level(), row.outline_level());
        assert_eq!(row2.custom_height(), row.custom_height());
        assert_eq!(row2.num(), row.num());
        assert_eq!(row2.cell_count(), row.cell_count());
        assert!(row2.is_current());
        assert!(!row.is_current());
    }

    #[test]
    fn test_write_and_read_row_with_cells() {
        let mut store = KeyValueCellStore::memory();
        let sheet = sheet();
        let mut row = store.make_row(&sheet);

        let cell = row.add_cell().unwrap();
        cell.set_value("value");
        cell.set_formula("formula");
        cell.set_style(Some(Style {
            font: StyleFont {
                name: "Font".into(),
                size: 1.0,
                bold: true,
                ..Default::default()
            },
            apply_font: true,
            ..Default::default()
        }));
        cell.set_num_fmt("numFmt");
        cell.set_date1904(true);
        cell.set_hidden(true);
        cell.merge(49, 50);
        cell.set_cell_type(CellType::Numeric);
        cell.set_data_validation(DataValidation::list("A1", &["a", "b"]));
        cell.set_hyperlink(Hyperlink {
            display_string: "displaystring".into(),
            link: "link".into(),
            tooltip: "tooltip".into(),
        });
        let original = cell.clone();
        store.write_row(&mut row).unwrap();

        let mut row2 = store.read_row(&row.key(), &sheet).unwrap();
        assert_eq!(row2.cell_count(), 1);
        let cell2 = row2.get_cell(0).unwrap();
        assert_eq!(*cell2, original);
        assert!(!cell2.modified());
    }

    #[test]
    fn test_make_row_with_len() {
        let mut store = KeyValueCellStore::memory();
        let row = store.make_row_with_len(&sheet(), 4);
        assert_eq!(row.cell_count(), 4);
        assert_eq!(row.max_col(), Some(3));
        assert_eq!(store.make_row_with_len(&sheet(), 0).max_col(), None);
    }

    #[test]
    fn test_move_row() {
        let mut store = KeyValueCellStore::memory();
        let sheet = sheet();
        let mut row = store.make_row(&sheet);
        row.set_num(1).unwrap();
        row.add_cell().unwrap().set_value("a");
        row.add_cell().unwrap().set_value("b");
        store.write_row(&mut row).unwrap();

        store.move_row(&mut row, 5).unwrap();
        assert_eq!(row.key(), "Test:5");
        assert_eq!(
            store.read_row("Test:1", &sheet).unwrap_err().kind(),
            ErrorKind::NotFound
        );

        let mut moved = store.read_row("Test:5", &sheet).unwrap();
        assert_eq!(moved.num(), 5);
        assert_eq!(moved.get_cell(0).unwrap().value(), "a");
        assert_eq!(moved.get_cell(1).unwrap().value(), "b");
        assert!(store.backend().hget("Test.cells.0", "1").unwrap().is_none());
    }

    #[test]
    fn test_move_row_conflict() {
        let mut store = KeyValueCellStore::memory();
        let sheet = sheet();

        let mut other = store.make_row(&sheet);
        other.set_num(2).unwrap();
        store.write_row(&mut other).unwrap();

        let mut row = store.make_row(&sheet);
        row.add_cell().unwrap().set_value("keep");
        store.write_row(&mut row).unwrap();

        let err = store.move_row(&mut row, 2).unwrap_err();
        assert!(matches!(err, OoxmlError::Conflict { index: 2 }));
        assert_eq!(row.num(), 0);

        let mut source = store.read_row("Test:0", &sheet).unwrap();
        assert_eq!(source.get_cell(0).unwrap().value(), "keep");
    }

    #[test]
    fn test_remove_row() {
        let mut store = KeyValueCellStore::memory();
        let sheet = sheet();
        let mut row = store.make_row(&sheet);
        row.add_cell().unwrap().set_value("gone");
        store.write_row(&mut row).unwrap();

        store.remove_row(&row.key()).unwrap();
        let err = store.read_row(&row.key(), &sheet).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(store.backend().hget("Test.cells.0", "0").unwrap().is_none());

        assert_eq!(store.remove_row("nonsense").unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_closed_store_rejects_calls() {
        let mut store = KeyValueCellStore::memory();
        let sheet = sheet();
        let mut row = store.make_row(&sheet);
        store.write_row(&mut row).unwrap();
        store.close().unwrap();
        store.close().unwrap();

        let err = store.read_row("Test:0", &sheet).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Backend);
    }

    /// A disk store under `dir` that outlives the store closing it.
    #[cfg(feature = "disk")]
    fn disk_backend(dir: &tempfile::TempDir) -> Arc<dyn KvBackend> {
        Arc::new(crate::ooxml::xlsx::store::backend::DiskBackend::open(dir.path()).unwrap())
    }

    #[cfg(feature = "disk")]
    #[test]
    fn test_close_purges_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let sheet = sheet();
        let mut store = KeyValueCellStore::new(disk_backend(&dir));
        let mut row = store.make_row(&sheet);
        row.add_cell().unwrap().set_value("x");
        store.write_row(&mut row).unwrap();
        store.close().unwrap();

        let backend = disk_backend(&dir);
        assert!(backend.hget("Test.rows", "0").unwrap().is_none());
        assert!(backend.hget("Test.cells.0", "0").unwrap().is_none());
        assert!(backend.zrange("Test.cellmaps").unwrap().is_empty());
    }

    #[cfg(feature = "disk")]
    #[test]
    fn test_close_without_purge_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let sheet = sheet();
        {
            let mut store = KeyValueCellStore::new(disk_backend(&dir)).with_purge_on_close(false);
            let mut row = store.make_row(&sheet);
            row.add_cell().unwrap().set_value("kept");
            store.write_row(&mut row).unwrap();
        }
        let mut reopened = KeyValueCellStore::new(disk_backend(&dir));
        let mut row = reopened.read_row("Test:0", &sheet).unwrap();
        assert_eq!(row.get_cell(0).unwrap().value(), "kept");
    }

    #[cfg(feature = "disk")]
    #[test]
    fn test_drop_closes() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = KeyValueCellStore::new(disk_backend(&dir));
            let mut row = store.make_row(&sheet());
            store.write_row(&mut row).unwrap();
        }
        assert!(disk_backend(&dir).hget("Test.rows", "0").unwrap().is_none());
    }

    #[cfg(feature = "disk")]
    #[test]
    fn test_disk_store() {
        let dir = tempfile::tempdir().unwrap();
        let sheet = sheet();
        let mut store = KeyValueCellStore::disk(Some(dir.path())).unwrap();
        let mut row = store.make_row(&sheet);
        row.set_num(7).unwrap();
        row.add_cell().unwrap().set_string("on disk");
        store.write_row(&mut row).unwrap();

        let mut read = store.read_row("Test:7", &sheet).unwrap();
        assert_eq!(read.get_cell(0).unwrap().value(), "on disk");
        store.close().unwrap();
        assert!(dir.path().exists());
    }
}
