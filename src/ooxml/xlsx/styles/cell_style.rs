//! Cell format records (`xf`), named styles and differential formats.

use super::{Alignment, Border, Fill, Font, NumberFormat};

/// A cell format record (`cellXfs/xf`).
///
/// References a font, fill, border and number format by id, optionally a
/// parent [`NamedCellFormat`] by `xf_id`, and carries its own alignment and
/// per-aspect apply flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellFormat {
    /// Number format ID (references built-in or custom number format)
    pub num_fmt_id: u32,
    /// Font ID (index into fonts array)
    pub font_id: usize,
    /// Fill ID (index into fills array)
    pub fill_id: usize,
    /// Border ID (index into borders array)
    pub border_id: usize,
    /// Cell style format ID (references cellStyleXfs)
    pub xf_id: Option<usize>,
    /// Alignment information
    pub alignment: Alignment,
    /// Apply number format flag
    pub apply_number_format: bool,
    /// Apply font flag
    pub apply_font: bool,
    /// Apply fill flag
    pub apply_fill: bool,
    /// Apply border flag
    pub apply_border: bool,
    /// Apply alignment flag
    pub apply_alignment: bool,
    /// Apply protection flag
    pub apply_protection: bool,
    /// Quote prefix flag (for preserving leading apostrophe)
    pub quote_prefix: bool,
}

/// A named cell format record (`cellStyleXfs/xf`).
///
/// Same shape as [`CellFormat`]; cell formats point at one through `xf_id`
/// and inherit its apply flags.
pub type NamedCellFormat = CellFormat;

impl CellFormat {
    /// Create a new empty cell format.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

/// A named style (`cellStyles/cellStyle`), such as "Normal" or "Heading 1".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedStyle {
    pub name: String,
    /// Index into cellStyleXfs
    pub xf_id: usize,
    /// Built-in style id (0 = Normal)
    pub builtin_id: Option<u32>,
    pub hidden: bool,
    pub custom_builtin: bool,
}

impl NamedStyle {
    /// Excel's "Normal" style bound to named format 0.
    pub fn normal() -> Self {
        Self {
            name: "Normal".to_string(),
            xf_id: 0,
            builtin_id: Some(0),
            ..Default::default()
        }
    }
}

/// A differential format (`dxfs/dxf`), used by conditional formatting and
/// table styles. Components are stored inline, not by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DifferentialFormat {
    pub font: Option<Font>,
    pub fill: Option<Fill>,
    pub border: Option<Border>,
    pub num_fmt: Option<NumberFormat>,
}
