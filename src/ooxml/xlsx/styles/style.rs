//! Fully resolved cell style.

use super::Alignment;

/// The denormalized result of resolving one cell format index.
///
/// Every color is a concrete ARGB string (or empty); ids are gone.
/// This is also the value a cell carries and round-trips through the cell
/// store, and what [`StyleSheet::add_style`](super::StyleSheet::add_style)
/// interns back into tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub border: StyleBorder,
    pub fill: StyleFill,
    pub font: StyleFont,
    pub alignment: Alignment,
    pub apply_border: bool,
    pub apply_fill: bool,
    pub apply_font: bool,
    pub apply_alignment: bool,
    /// Index of the named cell format this style descends from
    pub named_style_index: Option<usize>,
}

/// Border sides with resolved colors. An empty style means no line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleBorder {
    pub left: String,
    pub left_color: String,
    pub right: String,
    pub right_color: String,
    pub top: String,
    pub top_color: String,
    pub bottom: String,
    pub bottom_color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleFill {
    pub pattern_type: String,
    pub fg_color: String,
    pub bg_color: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleFont {
    pub size: f64,
    pub name: String,
    pub family: u32,
    pub charset: u32,
    pub color: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }
}
