//! Border styles and definitions.

use super::color::Color;

/// Border information for a cell.
///
/// Defines the borders on all four sides of a cell, plus the diagonal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Border {
    /// Left border style
    pub left: Option<BorderStyle>,
    /// Right border style
    pub right: Option<BorderStyle>,
    /// Top border style
    pub top: Option<BorderStyle>,
    /// Bottom border style
    pub bottom: Option<BorderStyle>,
    /// Diagonal border style
    pub diagonal: Option<BorderStyle>,
}

/// Individual border line.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderStyle {
    /// Border style name (e.g., "thin", "medium", "thick", "double")
    pub style: String,
    /// Border color reference
    pub color: Option<Color>,
}

impl Border {
    /// Create a new empty border (no borders on any side).
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl BorderStyle {
    /// Create a new border style.
    #[inline]
    pub fn new(style: impl Into<String>, color: Option<Color>) -> Self {
        Self {
            style: style.into(),
            color,
        }
    }
}
