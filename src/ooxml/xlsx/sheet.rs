//! Sheet identity shared by the rows of one worksheet.

use std::sync::atomic::{AtomicU64, Ordering};

/// The parts of a worksheet that rows and cell stores depend on.
///
/// Besides its name and configured width, a sheet tracks which row was
/// handed out most recently. Only that row may be mutated.
#[derive(Debug)]
pub struct Sheet {
    name: String,
    max_col: usize,
    row_tokens: AtomicU64,
    current_row: AtomicU64,
}

impl Sheet {
    /// Create a sheet named `name` whose rows are `max_col` columns wide.
    pub fn new(name: impl Into<String>, max_col: usize) -> Self {
        Self {
            name: name.into(),
            max_col,
            row_tokens: AtomicU64::new(1),
            current_row: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configured number of columns; iteration pads rows up to this width.
    #[inline]
    pub fn max_col(&self) -> usize {
        self.max_col
    }

    /// Issue a new row token and make it the current row.
    pub(crate) fn claim_current_row(&self) -> u64 {
        let token = self.row_tokens.fetch_add(1, Ordering::Relaxed);
        self.current_row.store(token, Ordering::Release);
        token
    }

    #[inline]
    pub(crate) fn is_current_row(&self, token: u64) -> bool {
        self.current_row.load(Ordering::Acquire) == token
    }
}
