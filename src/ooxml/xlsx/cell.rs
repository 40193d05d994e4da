//! Cell implementation for Excel worksheets.
//!
//! A [`Cell`] is a plain value: it does not know which store it lives in.
//! Rows hand out the cell they are currently tracking and persist it when
//! another cell becomes current; see [`Row`](super::store::Row).

use smallvec::SmallVec;

use super::data_validation::DataValidation;
use super::styles::{Style, StyleFont};
use crate::ooxml::error::{OoxmlError, Result};

/// Kind of value a cell holds.
///
/// The discriminants are the tags written into stored cell records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CellType {
    #[default]
    String = 0,
    StringFormula = 1,
    Numeric = 2,
    Bool = 3,
    Inline = 4,
    Error = 5,
    Date = 6,
}

impl CellType {
    /// Integer tag used in stored records.
    #[inline]
    pub fn tag(self) -> i64 {
        self as i64
    }

    /// Decode a stored tag.
    pub fn from_tag(tag: i64) -> Result<Self> {
        Ok(match tag {
            0 => CellType::String,
            1 => CellType::StringFormula,
            2 => CellType::Numeric,
            3 => CellType::Bool,
            4 => CellType::Inline,
            5 => CellType::Error,
            6 => CellType::Date,
            other => return Err(OoxmlError::Malformed(format!("unknown cell type tag {}", other))),
        })
    }
}

/// Hyperlink attached to a cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hyperlink {
    pub display_string: String,
    pub link: String,
    pub tooltip: String,
}

impl Hyperlink {
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            ..Default::default()
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.display_string.is_empty() && self.link.is_empty() && self.tooltip.is_empty()
    }
}

/// One run of rich text. Formatting is stored as given and not interpreted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RichTextRun {
    pub font: Option<StyleFont>,
    pub text: String,
}

impl RichTextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            font: None,
            text: text.into(),
        }
    }
}

/// A single spreadsheet cell.
///
/// Every setter marks the cell as modified; a modified cell is written back
/// when its row moves on to another cell or is written.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    value: String,
    formula: String,
    style: Option<Style>,
    num_fmt: String,
    date1904: bool,
    hidden: bool,
    hmerge: i64,
    vmerge: i64,
    cell_type: CellType,
    hyperlink: Hyperlink,
    data_validation: Option<DataValidation>,
    rich_text: SmallVec<[RichTextRun; 2]>,
    col: usize,
    modified: bool,
    /// Which activation of the owning row's current cell this copy belongs to
    ticket: u64,
}

impl Cell {
    /// Create an empty cell for column `col` (0-based).
    pub fn new(col: usize) -> Self {
        Self {
            col,
            ..Default::default()
        }
    }

    /// Column index (0-based).
    #[inline]
    pub fn col(&self) -> usize {
        self.col
    }

    /// A1-style coordinate of this cell in row `row_num` (0-based).
    pub fn coordinate(&self, row_num: usize) -> String {
        format!("{}{}", column_to_letters(self.col), row_num + 1)
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    pub fn formula(&self) -> &str {
        &self.formula
    }

    #[inline]
    pub fn style(&self) -> Option<&Style> {
        self.style.as_ref()
    }

    /// Effective number format code.
    #[inline]
    pub fn num_fmt(&self) -> &str {
        &self.num_fmt
    }

    /// Whether date serials use the 1904 epoch.
    #[inline]
    pub fn date1904(&self) -> bool {
        self.date1904
    }

    #[inline]
    pub fn hidden(&self) -> bool {
        self.hidden
    }

    /// Number of additional columns this cell spans.
    #[inline]
    pub fn hmerge(&self) -> i64 {
        self.hmerge
    }

    /// Number of additional rows this cell spans.
    #[inline]
    pub fn vmerge(&self) -> i64 {
        self.vmerge
    }

    #[inline]
    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    #[inline]
    pub fn hyperlink(&self) -> &Hyperlink {
        &self.hyperlink
    }

    #[inline]
    pub fn data_validation(&self) -> Option<&DataValidation> {
        self.data_validation.as_ref()
    }

    #[inline]
    pub fn rich_text(&self) -> &[RichTextRun] {
        &self.rich_text
    }

    /// Whether the cell changed since it was created or last persisted.
    #[inline]
    pub fn modified(&self) -> bool {
        self.modified
    }

    /// A cell with no content, formatting or attachments.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
            && self.formula.is_empty()
            && self.style.is_none()
            && self.data_validation.is_none()
            && self.hyperlink.is_empty()
            && self.rich_text.is_empty()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.modified = true;
    }

    /// Set a string value.
    pub fn set_string(&mut self, value: impl Into<String>) {
        self.set_value(value);
        self.cell_type = CellType::String;
    }

    /// Set an integer value.
    pub fn set_int(&mut self, value: i64) {
        self.set_value(value.to_string());
        self.cell_type = CellType::Numeric;
    }

    /// Set a floating point value.
    pub fn set_float(&mut self, value: f64) {
        self.set_value(value.to_string());
        self.cell_type = CellType::Numeric;
    }

    /// Set a boolean value, stored as `1` or `0`.
    pub fn set_bool(&mut self, value: bool) {
        self.set_value(if value { "1" } else { "0" });
        self.cell_type = CellType::Bool;
    }

    pub fn set_formula(&mut self, formula: impl Into<String>) {
        self.formula = formula.into();
        self.modified = true;
    }

    pub fn set_style(&mut self, style: Option<Style>) {
        self.style = style;
        self.modified = true;
    }

    pub fn set_num_fmt(&mut self, code: impl Into<String>) {
        self.num_fmt = code.into();
        self.modified = true;
    }

    pub fn set_date1904(&mut self, date1904: bool) {
        self.date1904 = date1904;
        self.modified = true;
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
        self.modified = true;
    }

    /// Merge this cell with `hcells` columns to the right and `vcells` rows below.
    pub fn merge(&mut self, hcells: i64, vcells: i64) {
        self.hmerge = hcells;
        self.vmerge = vcells;
        self.modified = true;
    }

    pub fn set_cell_type(&mut self, cell_type: CellType) {
        self.cell_type = cell_type;
        self.modified = true;
    }

    pub fn set_hyperlink(&mut self, hyperlink: Hyperlink) {
        self.hyperlink = hyperlink;
        self.modified = true;
    }

    pub fn set_data_validation(&mut self, data_validation: Option<DataValidation>) {
        self.data_validation = data_validation;
        self.modified = true;
    }

    pub fn set_rich_text(&mut self, runs: impl IntoIterator<Item = RichTextRun>) {
        self.rich_text = runs.into_iter().collect();
        self.modified = true;
    }

    #[inline]
    pub(crate) fn ticket(&self) -> u64 {
        self.ticket
    }

    #[inline]
    pub(crate) fn set_ticket(&mut self, ticket: u64) {
        self.ticket = ticket;
    }

    #[inline]
    pub(crate) fn set_col(&mut self, col: usize) {
        self.col = col;
    }

    #[inline]
    pub(crate) fn mark_modified(&mut self) {
        self.modified = true;
    }

    #[inline]
    pub(crate) fn clear_modified(&mut self) {
        self.modified = false;
    }
}

/// Cells compare by content; store bookkeeping (modified flag, ticket) is ignored.
impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && self.formula == other.formula
            && self.style == other.style
            && self.num_fmt == other.num_fmt
            && self.date1904 == other.date1904
            && self.hidden == other.hidden
            && self.hmerge == other.hmerge
            && self.vmerge == other.vmerge
            && self.cell_type == other.cell_type
            && self.hyperlink == other.hyperlink
            && self.data_validation == other.data_validation
            && self.rich_text == other.rich_text
            && self.col == other.col
    }
}

/// Convert a 0-based column index to Excel column letters (0 -> "A", 25 -> "Z", 26 -> "AA").
pub fn column_to_letters(col: usize) -> String {
    let mut letters = Vec::with_capacity(3);
    let mut col = col + 1;

    while col > 0 {
        col -= 1;
        letters.push((col % 26) as u8 + b'A');
        col /= 26;
    }

    letters.iter().rev().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_type_tags() {
        for tag in 0..=6 {
            assert_eq!(CellType::from_tag(tag).unwrap().tag(), tag);
        }
        assert!(matches!(CellType::from_tag(7), Err(OoxmlError::Malformed(_))));
        assert!(CellType::from_tag(-1).is_err());
    }

    #[test]
    fn test_setters_mark_modified() {
        let mut cell = Cell::new(2);
        assert!(!cell.modified());
        assert!(cell.is_empty());

        cell.set_int(42);
        assert!(cell.modified());
        assert_eq!(cell.value(), "42");
        assert_eq!(cell.cell_type(), CellType::Numeric);
        assert!(!cell.is_empty());

        cell.clear_modified();
        cell.set_hyperlink(Hyperlink::new("https://example.com"));
        assert!(cell.modified());
    }

    #[test]
    fn test_float_value() {
        let mut cell = Cell::new(0);
        cell.set_float(2.5);
        assert_eq!(cell.value(), "2.5");
        assert_eq!(cell.cell_type(), CellType::Numeric);
        assert!(cell.modified());
    }

    #[test]
    fn test_bool_value() {
        let mut cell = Cell::new(0);
        cell.set_bool(true);
        assert_eq!(cell.value(), "1");
        assert_eq!(cell.cell_type(), CellType::Bool);
    }

    #[test]
    fn test_equality_ignores_bookkeeping() {
        let mut a = Cell::new(1);
        a.set_string("x");
        let mut b = a.clone();
        b.clear_modified();
        b.set_ticket(9);
        assert_eq!(a, b);
        b.set_hidden(true);
        assert_ne!(a, b);
    }

    #[test]
    fn test_column_letters() {
        assert_eq!(column_to_letters(0), "A");
        assert_eq!(column_to_letters(25), "Z");
        assert_eq!(column_to_letters(26), "AA");
        assert_eq!(column_to_letters(701), "ZZ");
        assert_eq!(column_to_letters(702), "AAA");
        assert_eq!(Cell::new(27).coordinate(4), "AB5");
    }
}
