//! Font information and definitions.

use super::color::Color;

/// Font information.
///
/// Defines the visual appearance of text in cells including
/// typeface, size, color, and text decoration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Font {
    /// Font name/family (e.g., "Calibri", "Arial")
    pub name: Option<String>,
    /// Font size in points
    pub size: Option<f64>,
    /// Bold flag
    pub bold: bool,
    /// Italic flag
    pub italic: bool,
    /// Underline style ("single", "double", ...)
    pub underline: Option<String>,
    /// Strike-through flag
    pub strike: bool,
    /// Font color reference
    pub color: Option<Color>,
    /// Font charset
    pub charset: Option<u32>,
    /// Font family (1=Roman, 2=Swiss, 3=Modern, 4=Script, 5=Decorative)
    pub family: Option<u32>,
    /// Font scheme (major, minor, none)
    pub scheme: Option<String>,
}

impl Font {
    /// Create a new default font.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a font with a typeface and point size.
    #[inline]
    pub fn with_name_and_size(name: impl Into<String>, size: f64) -> Self {
        Self {
            name: Some(name.into()),
            size: Some(size),
            ..Default::default()
        }
    }
}
