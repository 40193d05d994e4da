//! Process-lifetime lookup tables used by style resolution.

use super::color::LEGACY_INDEXED_COLORS;
use super::number_format::{BUILTIN_NUM_FMT_IDS, BUILTIN_NUM_FMTS};

/// Constant tables a [`StyleSheet`](super::StyleSheet) consults.
///
/// Bundled so that a style sheet receives them by reference instead of
/// reaching for globals; tests and alternative dialects can inject their own.
#[derive(Debug)]
pub struct StyleConstants {
    /// Built-in number format id to code
    pub builtin_num_fmts: &'static phf::Map<u32, &'static str>,
    /// Built-in number format code to id
    pub builtin_num_fmt_ids: &'static phf::Map<&'static str, u32>,
    /// Default palette for `indexed` colors
    pub indexed_colors: &'static [&'static str; 64],
}

/// The tables defined by ECMA-376 and Excel's legacy palette.
pub static EXCEL_CONSTANTS: StyleConstants = StyleConstants {
    builtin_num_fmts: &BUILTIN_NUM_FMTS,
    builtin_num_fmt_ids: &BUILTIN_NUM_FMT_IDS,
    indexed_colors: &LEGACY_INDEXED_COLORS,
};

impl StyleConstants {
    #[inline]
    pub fn builtin_code(&self, id: u32) -> Option<&'static str> {
        self.builtin_num_fmts.get(&id).copied()
    }

    #[inline]
    pub fn builtin_id(&self, code: &str) -> Option<u32> {
        self.builtin_num_fmt_ids.get(code).copied()
    }
}
