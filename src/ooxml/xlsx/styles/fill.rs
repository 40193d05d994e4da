//! Fill patterns and colors.

use super::color::Color;

/// Pattern fill of a cell background.
///
/// A fill with an empty `pattern_type` carries no information and is
/// left out of styles.xml; `"none"` is a real pattern and is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fill {
    /// Pattern type (e.g., "none", "solid", "gray125")
    pub pattern_type: String,
    /// Foreground color
    pub fg_color: Option<Color>,
    /// Background color
    pub bg_color: Option<Color>,
}

impl Fill {
    /// Create a new solid fill with the given color.
    #[inline]
    pub fn solid(color: Color) -> Self {
        Self {
            pattern_type: "solid".to_string(),
            fg_color: Some(color),
            bg_color: None,
        }
    }

    /// Create a new pattern fill.
    #[inline]
    pub fn pattern(
        pattern_type: impl Into<String>,
        fg_color: Option<Color>,
        bg_color: Option<Color>,
    ) -> Self {
        Self {
            pattern_type: pattern_type.into(),
            fg_color,
            bg_color,
        }
    }

    /// True if the fill has no pattern and is not emitted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pattern_type.is_empty()
    }
}
