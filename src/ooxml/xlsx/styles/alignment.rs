//! Cell alignment (`<alignment>` child of an `xf`).

/// Placement of text inside a cell.
///
/// Unset attributes stay `None`/`false`; a rotation or indent of zero is
/// equivalent to leaving it unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alignment {
    /// `left`, `center`, `right`, `fill`, `justify`, ...
    pub horizontal: Option<String>,
    /// `top`, `center`, `bottom`, `justify`, ...
    pub vertical: Option<String>,
    /// Degrees 0-180, or 255 for stacked text
    pub text_rotation: Option<u32>,
    pub wrap_text: bool,
    pub indent: Option<u32>,
    pub shrink_to_fit: bool,
    /// 0 = context, 1 = left-to-right, 2 = right-to-left
    pub reading_order: Option<u32>,
}

impl Alignment {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the horizontal alignment.
    pub fn with_horizontal(mut self, horizontal: impl Into<String>) -> Self {
        self.horizontal = Some(horizontal.into());
        self
    }

    /// Set the vertical alignment.
    pub fn with_vertical(mut self, vertical: impl Into<String>) -> Self {
        self.vertical = Some(vertical.into());
        self
    }

    /// Rotation, if it is not zero.
    #[inline]
    pub fn rotation(&self) -> Option<u32> {
        self.text_rotation.filter(|r| *r != 0)
    }

    /// Indent level, if it is not zero.
    #[inline]
    pub fn indent_level(&self) -> Option<u32> {
        self.indent.filter(|i| *i != 0)
    }

    /// Take the vertical alignment of the named format a cell format
    /// descends from when the cell format leaves it unset.
    pub fn inherit_vertical(&mut self, named: &Alignment) {
        if self.vertical.is_none() {
            self.vertical.clone_from(&named.vertical);
        }
    }

    /// Whether any attribute differs from the default, i.e. whether an
    /// `<alignment>` element is worth writing.
    pub fn has_settings(&self) -> bool {
        self.horizontal.is_some()
            || self.vertical.is_some()
            || self.rotation().is_some()
            || self.indent_level().is_some()
            || self.reading_order.is_some()
            || self.wrap_text
            || self.shrink_to_fit
    }
}
