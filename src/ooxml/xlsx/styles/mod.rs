//! Styles and formatting for Excel files.
//!
//! A [`StyleSheet`] holds the style tables of one workbook (`xl/styles.xml`)
//! and turns a cell's style index into a fully resolved [`Style`].
//!
//! # Architecture
//!
//! - `font`, `fill`, `border`, `alignment`, `cell_style`: the table entries
//! - `number_format`: built-in formats and format-code classification
//! - `color`, `theme`: theme/tint and indexed color resolution
//! - `cache`: the lazily populated memo tables
//! - `parser`, `writer`: styles.xml in and out
//!
//! Tables are interned: adding a value that is structurally equal to an
//! existing entry returns the existing index. The scan is linear in the
//! table size, which stays small for real workbooks.
//!
//! Tables are mutated through `&mut StyleSheet` during construction; once
//! built, a sheet can be shared and read from many threads. Resolution
//! results are cached and never invalidated implicitly: call
//! [`StyleSheet::reset_caches`] after changing tables that were already
//! resolved.
//!
//! # Example
//!
//! ```rust
//! use tamarind::ooxml::xlsx::styles::{CellFormat, Font, StyleSheet};
//!
//! let mut styles = StyleSheet::with_defaults();
//! let font_id = styles.add_font(Font::with_name_and_size("Arial", 14.0));
//! let xf = styles.add_cell_format(CellFormat {
//!     font_id,
//!     apply_font: true,
//!     ..Default::default()
//! });
//!
//! let style = styles.get_style(xf);
//! assert_eq!(style.font.size, 14.0);
//! ```

mod alignment;
mod border;
mod cache;
mod cell_style;
mod color;
mod constants;
mod fill;
mod font;
mod number_format;
mod parser;
mod style;
mod theme;
mod writer;

pub use alignment::Alignment;
pub use border::{Border, BorderStyle};
pub use cache::LazyCache;
pub use cell_style::{CellFormat, DifferentialFormat, NamedCellFormat, NamedStyle};
pub use color::{Color, ColorResolver, LEGACY_INDEXED_COLORS, apply_tint};
pub use constants::{EXCEL_CONSTANTS, StyleConstants};
pub use fill::Fill;
pub use font::Font;
pub use number_format::{
    BUILTIN_NUM_FMTS, FIRST_CUSTOM_NUM_FMT_ID, NumberFormat, NumberFormatKind, classify,
    is_date_format,
};
pub use style::{Style, StyleBorder, StyleFill, StyleFont};
pub use theme::Theme;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::ooxml::error::Result;

/// Style tables of a workbook plus the caches used to resolve them.
#[derive(Debug)]
pub struct StyleSheet {
    fonts: Vec<Font>,
    fills: Vec<Fill>,
    borders: Vec<Border>,
    cell_style_xfs: Vec<NamedCellFormat>,
    cell_xfs: Vec<CellFormat>,
    cell_styles: Vec<NamedStyle>,
    dxfs: Vec<DifferentialFormat>,
    /// Custom number formats in registration order
    number_formats: Vec<NumberFormat>,
    /// Document-supplied `<indexedColors>` palette
    indexed_colors: Option<Vec<String>>,
    theme: Option<Arc<Theme>>,
    constants: &'static StyleConstants,

    style_cache: LazyCache<usize, Arc<Style>>,
    num_fmt_refs: RwLock<HashMap<u32, NumberFormat>>,
    parsed_formats: LazyCache<String, NumberFormatKind>,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleSheet {
    /// Create a style sheet with empty tables.
    pub fn new() -> Self {
        Self::with_constants(&EXCEL_CONSTANTS)
    }

    /// Create a style sheet with empty tables and the given constant tables.
    pub fn with_constants(constants: &'static StyleConstants) -> Self {
        Self {
            fonts: Vec::new(),
            fills: Vec::new(),
            borders: Vec::new(),
            cell_style_xfs: Vec::new(),
            cell_xfs: Vec::new(),
            cell_styles: Vec::new(),
            dxfs: Vec::new(),
            number_formats: Vec::new(),
            indexed_colors: None,
            theme: None,
            constants,
            style_cache: LazyCache::new(),
            num_fmt_refs: RwLock::new(HashMap::new()),
            parsed_formats: LazyCache::new(),
        }
    }

    /// Create a style sheet holding the entries Excel expects in a new workbook.
    pub fn with_defaults() -> Self {
        let mut styles = Self::new();
        styles.reset();
        styles
    }

    /// Parse styles from xl/styles.xml content.
    pub fn parse(content: &str) -> Result<Self> {
        parser::parse_styles(content, &EXCEL_CONSTANTS)
    }

    /// Serialize to xl/styles.xml content.
    pub fn to_xml(&self) -> Result<String> {
        writer::write_styles(self)
    }

    /// Replace every table with Excel's defaults and clear all caches.
    ///
    /// Font 0 is Arial 11 (family 2, theme color 1, minor scheme), fills 0
    /// and 1 are `none` and `gray125`, border 0 has four empty sides, and
    /// there is one empty named cell format, one empty cell format and the
    /// "Normal" named style.
    pub fn reset(&mut self) {
        self.fonts.clear();
        self.fills.clear();
        self.borders.clear();

        self.add_font(Font {
            name: Some("Arial".to_string()),
            size: Some(11.0),
            family: Some(2),
            color: Some(Color::theme(1, 0.0)),
            scheme: Some("minor".to_string()),
            ..Default::default()
        });
        self.add_fill(Fill::pattern("none", None, None));
        self.add_fill(Fill::pattern("gray125", None, None));
        self.add_border(Border::new());

        self.cell_style_xfs = vec![NamedCellFormat::default()];
        self.cell_xfs = vec![CellFormat::default()];
        self.cell_styles = vec![NamedStyle::normal()];
        self.dxfs.clear();

        self.number_formats.clear();
        self.num_fmt_refs.get_mut().clear();
        self.reset_caches();
    }

    /// Drop every cached resolution result.
    pub fn reset_caches(&self) {
        self.style_cache.reset();
        self.parsed_formats.reset();
    }

    /// Intern a font.
    pub fn add_font(&mut self, font: Font) -> usize {
        intern(&mut self.fonts, font)
    }

    /// Intern a fill.
    pub fn add_fill(&mut self, fill: Fill) -> usize {
        intern(&mut self.fills, fill)
    }

    /// Intern a border.
    pub fn add_border(&mut self, border: Border) -> usize {
        intern(&mut self.borders, border)
    }

    /// Intern a cell format (`cellXfs`).
    pub fn add_cell_format(&mut self, xf: CellFormat) -> usize {
        intern(&mut self.cell_xfs, xf)
    }

    /// Intern a named cell format (`cellStyleXfs`).
    pub fn add_named_cell_format(&mut self, xf: NamedCellFormat) -> usize {
        intern(&mut self.cell_style_xfs, xf)
    }

    /// Intern a named style (`cellStyles`).
    pub fn add_named_style(&mut self, style: NamedStyle) -> usize {
        intern(&mut self.cell_styles, style)
    }

    /// Intern a differential format (`dxfs`).
    pub fn add_differential_format(&mut self, dxf: DifferentialFormat) -> usize {
        intern(&mut self.dxfs, dxf)
    }

    /// Get the number format for a format code, registering it if needed.
    ///
    /// "General" in any case maps to id 0 and built-in codes map to their
    /// reserved ids without registration. Any other code gets the id it was
    /// registered with, or the lowest free id from 164 upward.
    pub fn new_number_format(&mut self, code: &str) -> NumberFormat {
        if code.eq_ignore_ascii_case("general") {
            return NumberFormat::new(0, "General");
        }
        if let Some(id) = self.constants.builtin_id(code) {
            return NumberFormat::new(id, code);
        }
        if let Some(existing) = self.number_formats.iter().find(|f| f.code == code) {
            return existing.clone();
        }

        let refs = self.num_fmt_refs.get_mut();
        let mut id = FIRST_CUSTOM_NUM_FMT_ID;
        while refs.contains_key(&id) {
            id += 1;
        }
        let format = NumberFormat::new(id, code);
        self.add_number_format(format.clone());
        format
    }

    /// Register a custom number format under its own id.
    ///
    /// Built-in ids and ids that are already taken are ignored; returns
    /// whether the format was registered.
    pub fn add_number_format(&mut self, format: NumberFormat) -> bool {
        if format.is_builtin() {
            return false;
        }
        let refs = self.num_fmt_refs.get_mut();
        if refs.contains_key(&format.id) {
            return false;
        }
        refs.insert(format.id, format.clone());
        self.number_formats.push(format);
        true
    }

    /// Format code for a number format id, built-in or custom.
    pub fn number_format_code(&self, id: u32) -> Option<String> {
        if let Some(code) = self.constants.builtin_code(id) {
            return Some(code.to_string());
        }
        self.num_fmt_refs.read().get(&id).map(|f| f.code.clone())
    }

    /// Effective number format of a cell format index and its kind.
    ///
    /// An index outside the table yields `General`; an id with no known
    /// code yields an empty code, which classifies as general.
    pub fn number_format_for(&self, index: usize) -> (String, NumberFormatKind) {
        let code = match self.cell_xfs.get(index) {
            Some(xf) => self.number_format_code(xf.num_fmt_id).unwrap_or_default(),
            None => "General".to_string(),
        };
        let kind = self.classify_format(&code);
        (code, kind)
    }

    /// Classify a format code, memoized by the exact string.
    pub fn classify_format(&self, code: &str) -> NumberFormatKind {
        self.parsed_formats
            .get_or_compute(code.to_string(), || classify(code))
    }

    /// Resolve a cell format index into a complete style.
    ///
    /// Indices outside `cellXfs` yield an empty style, which is not cached.
    /// Component ids outside their tables are skipped and leave the
    /// corresponding part of the style empty.
    pub fn get_style(&self, index: usize) -> Arc<Style> {
        if let Some(style) = self.style_cache.get(&index) {
            return style;
        }
        let Some(xf) = self.cell_xfs.get(index) else {
            return Arc::new(Style::default());
        };
        trace!(index, "resolving cell format");
        self.style_cache
            .get_or_compute(index, || Arc::new(self.resolve(xf)))
    }

    fn resolve(&self, xf: &CellFormat) -> Style {
        let colors = self.color_resolver();
        let mut style = Style {
            apply_border: xf.apply_border,
            apply_fill: xf.apply_fill,
            apply_font: xf.apply_font,
            apply_alignment: xf.apply_alignment,
            alignment: xf.alignment.clone(),
            ..Default::default()
        };

        if let Some(border) = self.borders.get(xf.border_id) {
            let side = |line: &Option<BorderStyle>| match line {
                Some(line) => (line.style.clone(), colors.resolve_opt(line.color.as_ref())),
                None => (String::new(), String::new()),
            };
            (style.border.left, style.border.left_color) = side(&border.left);
            (style.border.right, style.border.right_color) = side(&border.right);
            (style.border.top, style.border.top_color) = side(&border.top);
            (style.border.bottom, style.border.bottom_color) = side(&border.bottom);
        }

        if let Some(fill) = self.fills.get(xf.fill_id) {
            style.fill = StyleFill {
                pattern_type: fill.pattern_type.clone(),
                fg_color: colors.resolve_opt(fill.fg_color.as_ref()),
                bg_color: colors.resolve_opt(fill.bg_color.as_ref()),
            };
        }

        if let Some(font) = self.fonts.get(xf.font_id) {
            style.font = StyleFont {
                size: font.size.unwrap_or_default(),
                name: font.name.clone().unwrap_or_default(),
                family: font.family.unwrap_or_default(),
                charset: font.charset.unwrap_or_default(),
                color: colors.resolve_opt(font.color.as_ref()),
                bold: font.bold,
                italic: font.italic,
                underline: font.underline.as_deref().is_some_and(|u| u != "none"),
                strike: font.strike,
            };
        }

        if let Some(named_id) = xf.xf_id
            && let Some(named) = self.cell_style_xfs.get(named_id)
        {
            style.named_style_index = Some(named_id);
            style.apply_border |= named.apply_border;
            style.apply_fill |= named.apply_fill;
            style.apply_font |= named.apply_font;
            style.apply_alignment |= named.apply_alignment;
            style.alignment.inherit_vertical(&named.alignment);
        }

        style
    }

    /// Intern a resolved style and return its cell format index.
    ///
    /// Colors are stored as literal ARGB values. A style without a font
    /// name or fill pattern uses font 0 or fill 0.
    pub fn add_style(&mut self, style: &Style) -> usize {
        let font_id = if style.font.name.is_empty() {
            0
        } else {
            self.add_font(Font {
                name: Some(style.font.name.clone()),
                size: (style.font.size > 0.0).then_some(style.font.size),
                bold: style.font.bold,
                italic: style.font.italic,
                underline: style.font.underline.then(|| "single".to_string()),
                strike: style.font.strike,
                color: literal_color(&style.font.color),
                charset: (style.font.charset != 0).then_some(style.font.charset),
                family: (style.font.family != 0).then_some(style.font.family),
                scheme: None,
            })
        };

        let fill_id = if style.fill.pattern_type.is_empty() {
            0
        } else {
            self.add_fill(Fill::pattern(
                style.fill.pattern_type.clone(),
                literal_color(&style.fill.fg_color),
                literal_color(&style.fill.bg_color),
            ))
        };

        let line = |kind: &str, color: &str| {
            (!kind.is_empty()).then(|| BorderStyle::new(kind, literal_color(color)))
        };
        let b = &style.border;
        let border_id = self.add_border(Border {
            left: line(&b.left, &b.left_color),
            right: line(&b.right, &b.right_color),
            top: line(&b.top, &b.top_color),
            bottom: line(&b.bottom, &b.bottom_color),
            diagonal: None,
        });

        self.add_cell_format(CellFormat {
            font_id,
            fill_id,
            border_id,
            xf_id: style.named_style_index,
            alignment: style.alignment.clone(),
            apply_font: style.apply_font,
            apply_fill: style.apply_fill,
            apply_border: style.apply_border,
            apply_alignment: style.apply_alignment,
            ..Default::default()
        })
    }

    /// A resolver bound to this sheet's theme and palette.
    pub fn color_resolver(&self) -> ColorResolver<'_> {
        ColorResolver::new(
            self.theme.as_deref(),
            self.indexed_colors.as_deref(),
            self.constants.indexed_colors,
        )
    }

    /// Set the workbook theme. Clears the style cache.
    pub fn set_theme(&mut self, theme: Option<Arc<Theme>>) {
        self.theme = theme;
        self.style_cache.reset();
    }

    #[inline]
    pub fn theme(&self) -> Option<&Theme> {
        self.theme.as_deref()
    }

    /// Set the document palette for indexed colors. Clears the style cache.
    pub fn set_indexed_colors(&mut self, colors: Option<Vec<String>>) {
        self.indexed_colors = colors;
        self.style_cache.reset();
    }

    #[inline]
    pub fn indexed_colors(&self) -> Option<&[String]> {
        self.indexed_colors.as_deref()
    }

    #[inline]
    pub fn constants(&self) -> &'static StyleConstants {
        self.constants
    }

    #[inline]
    pub fn font(&self, id: usize) -> Option<&Font> {
        self.fonts.get(id)
    }

    #[inline]
    pub fn fill(&self, id: usize) -> Option<&Fill> {
        self.fills.get(id)
    }

    #[inline]
    pub fn border(&self, id: usize) -> Option<&Border> {
        self.borders.get(id)
    }

    #[inline]
    pub fn cell_format(&self, id: usize) -> Option<&CellFormat> {
        self.cell_xfs.get(id)
    }

    #[inline]
    pub fn named_cell_format(&self, id: usize) -> Option<&NamedCellFormat> {
        self.cell_style_xfs.get(id)
    }

    #[inline]
    pub fn named_styles(&self) -> &[NamedStyle] {
        &self.cell_styles
    }

    #[inline]
    pub fn differential_formats(&self) -> &[DifferentialFormat] {
        &self.dxfs
    }

    /// Custom number formats in registration order.
    #[inline]
    pub fn custom_number_formats(&self) -> &[NumberFormat] {
        &self.number_formats
    }

    #[inline]
    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    #[inline]
    pub fn fill_count(&self) -> usize {
        self.fills.len()
    }

    #[inline]
    pub fn border_count(&self) -> usize {
        self.borders.len()
    }

    #[inline]
    pub fn cell_format_count(&self) -> usize {
        self.cell_xfs.len()
    }

    #[inline]
    pub fn named_cell_format_count(&self) -> usize {
        self.cell_style_xfs.len()
    }

    /// Number of resolved styles currently cached.
    #[inline]
    pub fn cached_style_count(&self) -> usize {
        self.style_cache.len()
    }
}

/// Return the index of an equal entry, appending `value` if there is none.
fn intern<T: PartialEq>(table: &mut Vec<T>, value: T) -> usize {
    if let Some(index) = table.iter().position(|existing| *existing == value) {
        return index;
    }
    table.push(value);
    table.len() - 1
}

fn literal_color(argb: &str) -> Option<Color> {
    (!argb.is_empty()).then(|| Color::rgb(argb))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unparsable_theme_colors_resolve_empty() {
        let mut styles = StyleSheet::with_defaults();
        styles.set_theme(Some(Arc::new(Theme::new(vec![
            "€abc".to_string(),
            "€abc".to_string(),
        ]))));
        let style = styles.get_style(0);
        assert_eq!(style.font.name, "Arial");
        assert_eq!(style.font.color, "");
    }

    #[test]
    fn test_add_font_interning() {
        let mut styles = StyleSheet::new();
        assert_eq!(styles.add_font(Font::with_name_and_size("Arial", 11.0)), 0);
        assert_eq!(styles.add_font(Font::with_name_and_size("Arial", 11.0)), 0);
        assert_eq!(styles.add_font(Font::with_name_and_size("Arial", 12.0)), 1);
        assert_eq!(styles.font_count(), 2);

        // Nested color references take part in equality.
        let mut red = Font::with_name_and_size("Arial", 11.0);
        red.color = Some(Color::rgb("FFFF0000"));
        assert_eq!(styles.add_font(red.clone()), 2);
        assert_eq!(styles.add_font(red), 2);
    }

    #[test]
    fn test_defaults() {
        let styles = StyleSheet::with_defaults();
        assert_eq!(styles.font_count(), 1);
        assert_eq!(styles.fill_count(), 2);
        assert_eq!(styles.border_count(), 1);
        assert_eq!(styles.cell_format_count(), 1);
        assert_eq!(styles.named_cell_format_count(), 1);
        assert_eq!(styles.font(0).and_then(|f| f.name.as_deref()), Some("Arial"));
        assert_eq!(styles.fill(1).map(|f| f.pattern_type.as_str()), Some("gray125"));
        assert_eq!(styles.named_styles()[0].name, "Normal");
    }

    #[test]
    fn test_out_of_range_component_ids_are_skipped() {
        let mut styles = StyleSheet::new();
        for size in [10.0, 11.0, 12.0] {
            styles.add_font(Font::with_name_and_size("Arial", size));
        }
        let index = styles.add_cell_format(CellFormat {
            font_id: 5,
            fill_id: 9,
            border_id: 9,
            apply_font: true,
            ..Default::default()
        });

        let style = styles.get_style(index);
        assert_eq!(style.font, StyleFont::default());
        assert_eq!(style.fill, StyleFill::default());
        assert_eq!(style.border, StyleBorder::default());
        assert!(style.apply_font);
    }

    #[test]
    fn test_out_of_range_index_is_not_cached() {
        let styles = StyleSheet::with_defaults();
        assert_eq!(*styles.get_style(42), Style::default());
        assert_eq!(styles.cached_style_count(), 0);
        styles.get_style(0);
        assert_eq!(styles.cached_style_count(), 1);
    }

    #[test]
    fn test_cache_requires_explicit_reset() {
        let mut styles = StyleSheet::with_defaults();
        let index = styles.add_cell_format(CellFormat {
            font_id: 1,
            ..Default::default()
        });
        let first = styles.get_style(index);
        assert!(first.font.name.is_empty());
        assert_eq!(styles.get_style(index), first);

        styles.add_font(Font::with_name_and_size("Courier New", 9.0));
        assert!(styles.get_style(index).font.name.is_empty());

        styles.reset_caches();
        assert_eq!(styles.get_style(index).font.name, "Courier New");
    }

    #[test]
    fn test_named_format_cascade() {
        let mut styles = StyleSheet::with_defaults();
        let named = styles.add_named_cell_format(NamedCellFormat {
            apply_font: true,
            apply_border: true,
            alignment: Alignment::new().with_vertical("top"),
            ..Default::default()
        });

        let plain = styles.add_cell_format(CellFormat {
            xf_id: Some(named),
            apply_fill: true,
            ..Default::default()
        });
        let style = styles.get_style(plain);
        assert!(style.apply_font && style.apply_border && style.apply_fill);
        assert!(!style.apply_alignment);
        assert_eq!(style.alignment.vertical.as_deref(), Some("top"));
        assert_eq!(style.named_style_index, Some(named));
        assert!(styles.named_cell_format(named).unwrap().apply_font);
        assert!(styles.named_cell_format(named + 1).is_none());

        let own_vertical = styles.add_cell_format(CellFormat {
            xf_id: Some(named),
            alignment: Alignment::new().with_vertical("bottom"),
            ..Default::default()
        });
        assert_eq!(
            styles.get_style(own_vertical).alignment.vertical.as_deref(),
            Some("bottom")
        );

        let dangling = styles.add_cell_format(CellFormat {
            xf_id: Some(99),
            ..Default::default()
        });
        let style = styles.get_style(dangling);
        assert_eq!(style.named_style_index, None);
        assert!(!style.apply_font);
    }

    #[test]
    fn test_new_number_format() {
        let mut styles = StyleSheet::with_defaults();
        assert_eq!(styles.new_number_format("general").id, 0);
        assert_eq!(styles.new_number_format("GENERAL").id, 0);
        assert_eq!(styles.new_number_format("0.00").id, 2);
        assert_eq!(styles.new_number_format("@").id, 49);
        assert!(styles.custom_number_formats().is_empty());

        assert!(styles.add_number_format(NumberFormat::new(165, "0.0")));
        assert!(!styles.add_number_format(NumberFormat::new(165, "0.0;0")));
        assert!(!styles.add_number_format(NumberFormat::new(14, "dd/mm")));

        let custom = styles.new_number_format("0.000");
        assert_eq!(custom.id, 164);
        assert_eq!(styles.new_number_format("0.000").id, 164);
        assert_eq!(styles.new_number_format("0.0").id, 165);
        assert_eq!(styles.new_number_format("0.0000").id, 166);
        assert_eq!(styles.custom_number_formats().len(), 3);
    }

    #[test]
    fn test_number_format_for() {
        let mut styles = StyleSheet::with_defaults();
        let custom = styles.new_number_format("[Red]0.000");
        let custom_xf = styles.add_cell_format(CellFormat {
            num_fmt_id: custom.id,
            ..Default::default()
        });
        let builtin_xf = styles.add_cell_format(CellFormat {
            num_fmt_id: 10,
            ..Default::default()
        });
        let unknown_xf = styles.add_cell_format(CellFormat {
            num_fmt_id: 200,
            ..Default::default()
        });

        assert_eq!(
            styles.number_format_for(custom_xf),
            ("[Red]0.000".to_string(), NumberFormatKind::Float)
        );
        assert_eq!(
            styles.number_format_for(builtin_xf),
            ("0.00%".to_string(), NumberFormatKind::Percentage)
        );
        assert_eq!(
            styles.number_format_for(unknown_xf),
            (String::new(), NumberFormatKind::General)
        );
        assert_eq!(
            styles.number_format_for(1000),
            ("General".to_string(), NumberFormatKind::General)
        );
    }

    #[test]
    fn test_colors_resolved_in_style() {
        let mut styles = StyleSheet::with_defaults();
        styles.set_theme(Some(Arc::new(Theme::new(vec![
            "FFFFFF".to_string(),
            "000000".to_string(),
        ]))));
        let fill_id = styles.add_fill(Fill::pattern(
            "solid",
            Some(Color::indexed(2)),
            Some(Color::rgb("FF00FF00")),
        ));
        let border_id = styles.add_border(Border {
            left: Some(BorderStyle::new("thin", Some(Color::indexed(3)))),
            ..Default::default()
        });
        let index = styles.add_cell_format(CellFormat {
            fill_id,
            border_id,
            ..Default::default()
        });

        let style = styles.get_style(index);
        // Default font uses theme color 1.
        assert_eq!(style.font.color, "FF000000");
        assert_eq!(style.fill.fg_color, "FFFFFFFF");
        assert_eq!(style.fill.bg_color, "FF00FF00");
        assert_eq!(style.border.left, "thin");
        assert_eq!(style.border.left_color, "FFFF0000");
        assert_eq!(style.border.right, "");

        // A document palette replaces the legacy one and drops cached styles.
        styles.set_indexed_colors(Some(vec![
            "FF010101".to_string(),
            "FF020202".to_string(),
            "FF030303".to_string(),
        ]));
        let style = styles.get_style(index);
        assert_eq!(style.fill.fg_color, "FF020202");
        assert_eq!(style.border.left_color, "FF030303");
    }

    #[test]
    fn test_add_style_roundtrip() {
        let mut styles = StyleSheet::with_defaults();
        let style = Style {
            font: StyleFont {
                name: "Arial".to_string(),
                size: 12.0,
                bold: true,
                color: "FF0000FF".to_string(),
                ..Default::default()
            },
            fill: StyleFill {
                pattern_type: "solid".to_string(),
                fg_color: "FFFF0000".to_string(),
                ..Default::default()
            },
            border: StyleBorder {
                left: "thin".to_string(),
                left_color: "FF000000".to_string(),
                ..Default::default()
            },
            apply_font: true,
            apply_fill: true,
            ..Default::default()
        };

        let index = styles.add_style(&style);
        assert_eq!(index, 1);
        let resolved = styles.get_style(index);
        assert_eq!(*resolved, style);
        assert_eq!(styles.add_style(&resolved), index);
    }

    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        fn font_strategy() -> impl Strategy<Value = Font> {
            (
                prop_oneof![Just("Arial"), Just("Calibri"), Just("Consolas")],
                8u8..14,
                any::<bool>(),
                proptest::option::of(prop_oneof![Just("FF000000"), Just("FFFF0000")]),
            )
                .prop_map(|(name, size, bold, color)| Font {
                    bold,
                    color: color.map(Color::rgb),
                    ..Font::with_name_and_size(name, f64::from(size))
                })
        }

        proptest! {
            #[test]
            fn prop_interning_is_idempotent(fonts in proptest::collection::vec(font_strategy(), 0..40)) {
                let mut styles = StyleSheet::new();
                let first: Vec<usize> = fonts.iter().cloned().map(|f| styles.add_font(f)).collect();
                let count = styles.font_count();
                let second: Vec<usize> = fonts.iter().cloned().map(|f| styles.add_font(f)).collect();

                prop_assert_eq!(&first, &second);
                prop_assert_eq!(styles.font_count(), count);
                for (font, index) in fonts.iter().zip(&first) {
                    prop_assert_eq!(styles.font(*index), Some(font));
                }
            }
        }
    }
}
