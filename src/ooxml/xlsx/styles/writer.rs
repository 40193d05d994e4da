//! Styles.xml generator.
//!
//! Only entries that carry information are written, and every container's
//! `count` attribute equals the number of children actually written.
//! Dropping an entry shifts the positions of the ones after it, so cell
//! formats are written with their component ids remapped to the emitted
//! positions.

use std::collections::HashMap;
use std::fmt::{self, Write as FmtWrite};

use quick_xml::escape::escape;

use super::{
    Alignment, Border, BorderStyle, CellFormat, Color, DifferentialFormat, Fill, Font,
    NamedStyle, NumberFormat, StyleSheet,
};
use crate::ooxml::error::{OoxmlError, Result};

const SPREADSHEETML_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";

/// Source index to emitted position for one table.
#[derive(Debug, Default)]
struct IndexMap {
    positions: HashMap<usize, usize>,
}

impl IndexMap {
    /// Emitted position of `index`; ids that were not written map to 0.
    fn get(&self, index: usize) -> usize {
        self.positions.get(&index).copied().unwrap_or(0)
    }
}

/// Generate the complete styles.xml content.
pub(super) fn write_styles(styles: &StyleSheet) -> Result<String> {
    let mut xml = String::with_capacity(4096);
    write_style_sheet(&mut xml, styles)
        .map_err(|e| OoxmlError::Xml(format!("XML write error: {}", e)))?;
    Ok(xml)
}

fn write_style_sheet(xml: &mut String, styles: &StyleSheet) -> fmt::Result {
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    write!(xml, r#"<styleSheet xmlns="{}">"#, SPREADSHEETML_NS)?;

    write_number_formats(xml, &styles.number_formats)?;

    let fonts = write_table(xml, "fonts", &styles.fonts, |_| true, write_font)?;
    let fills = write_table(xml, "fills", &styles.fills, |f| !f.is_empty(), write_fill)?;
    let borders = write_table(xml, "borders", &styles.borders, |_| true, write_border)?;
    let ids = XfIds {
        fonts: &fonts,
        fills: &fills,
        borders: &borders,
    };

    write_table(xml, "cellStyleXfs", &styles.cell_style_xfs, |_| true, |xml, xf| {
        write_xf(xml, xf, &ids)
    })?;
    write_table(xml, "cellXfs", &styles.cell_xfs, |_| true, |xml, xf| {
        write_xf(xml, xf, &ids)
    })?;
    write_table(xml, "cellStyles", &styles.cell_styles, |_| true, write_cell_style)?;

    // Consuming applications expect <dxfs> even when there are none.
    if styles.dxfs.is_empty() {
        xml.push_str(r#"<dxfs count="0"/>"#);
    } else {
        write_table(xml, "dxfs", &styles.dxfs, |_| true, write_dxf)?;
    }

    if let Some(colors) = &styles.indexed_colors {
        xml.push_str("<colors><indexedColors>");
        for rgb in colors {
            write!(xml, r#"<rgbColor rgb="{}"/>"#, escape(rgb.as_str()))?;
        }
        xml.push_str("</indexedColors></colors>");
    }

    xml.push_str("</styleSheet>");
    Ok(())
}

/// Write the entries of one table that pass `keep`, returning where each
/// written entry landed. Nothing is written when no entry is kept.
fn write_table<T>(
    xml: &mut String,
    tag: &str,
    entries: &[T],
    keep: impl Fn(&T) -> bool,
    mut write_entry: impl FnMut(&mut String, &T) -> fmt::Result,
) -> std::result::Result<IndexMap, fmt::Error> {
    let mut map = IndexMap::default();
    let mut body = String::new();
    for (index, entry) in entries.iter().enumerate() {
        if keep(entry) {
            map.positions.insert(index, map.positions.len());
            write_entry(&mut body, entry)?;
        }
    }
    if !map.positions.is_empty() {
        write!(xml, r#"<{} count="{}">"#, tag, map.positions.len())?;
        xml.push_str(&body);
        write!(xml, "</{}>", tag)?;
    }
    Ok(map)
}

fn write_number_formats(xml: &mut String, formats: &[NumberFormat]) -> fmt::Result {
    if formats.is_empty() {
        return Ok(());
    }
    write!(xml, r#"<numFmts count="{}">"#, formats.len())?;
    for format in formats {
        write_number_format(xml, format)?;
    }
    xml.push_str("</numFmts>");
    Ok(())
}

fn write_number_format(xml: &mut String, format: &NumberFormat) -> fmt::Result {
    write!(
        xml,
        r#"<numFmt numFmtId="{}" formatCode="{}"/>"#,
        format.id,
        escape(format.code.as_str())
    )
}

/// Write a font element, children in schema order.
fn write_font(xml: &mut String, font: &Font) -> fmt::Result {
    xml.push_str("<font>");

    if font.bold {
        xml.push_str("<b/>");
    }
    if font.italic {
        xml.push_str("<i/>");
    }
    if font.strike {
        xml.push_str("<strike/>");
    }
    match font.underline.as_deref() {
        Some("single") => xml.push_str("<u/>"),
        Some(kind) => write!(xml, r#"<u val="{}"/>"#, escape(kind))?,
        None => {},
    }
    if let Some(size) = font.size {
        write!(xml, r#"<sz val="{}"/>"#, size)?;
    }
    if let Some(color) = &font.color {
        write_color(xml, "color", color)?;
    }
    if let Some(name) = &font.name {
        write!(xml, r#"<name val="{}"/>"#, escape(name.as_str()))?;
    }
    if let Some(family) = font.family {
        write!(xml, r#"<family val="{}"/>"#, family)?;
    }
    if let Some(charset) = font.charset {
        write!(xml, r#"<charset val="{}"/>"#, charset)?;
    }
    if let Some(scheme) = &font.scheme {
        write!(xml, r#"<scheme val="{}"/>"#, escape(scheme.as_str()))?;
    }

    xml.push_str("</font>");
    Ok(())
}

/// Write a fill element to XML.
fn write_fill(xml: &mut String, fill: &Fill) -> fmt::Result {
    write!(
        xml,
        r#"<fill><patternFill patternType="{}""#,
        escape(fill.pattern_type.as_str())
    )?;

    if fill.fg_color.is_none() && fill.bg_color.is_none() {
        xml.push_str("/></fill>");
        return Ok(());
    }

    xml.push('>');
    if let Some(fg) = &fill.fg_color {
        write_color(xml, "fgColor", fg)?;
    }
    if let Some(bg) = &fill.bg_color {
        write_color(xml, "bgColor", bg)?;
    }
    xml.push_str("</patternFill></fill>");
    Ok(())
}

/// Write a border element to XML.
///
/// The four sides are always written, empty or not; Excel misrenders
/// borders that omit them.
fn write_border(xml: &mut String, border: &Border) -> fmt::Result {
    xml.push_str("<border>");
    write_border_side(xml, "left", border.left.as_ref())?;
    write_border_side(xml, "right", border.right.as_ref())?;
    write_border_side(xml, "top", border.top.as_ref())?;
    write_border_side(xml, "bottom", border.bottom.as_ref())?;
    if border.diagonal.is_some() {
        write_border_side(xml, "diagonal", border.diagonal.as_ref())?;
    }
    xml.push_str("</border>");
    Ok(())
}

/// Write a single border side to XML.
fn write_border_side(xml: &mut String, side: &str, line: Option<&BorderStyle>) -> fmt::Result {
    let Some(line) = line else {
        return write!(xml, "<{}/>", side);
    };
    write!(xml, r#"<{} style="{}""#, side, escape(line.style.as_str()))?;
    match &line.color {
        Some(color) => {
            xml.push('>');
            write_color(xml, "color", color)?;
            write!(xml, "</{}>", side)
        },
        None => {
            xml.push_str("/>");
            Ok(())
        },
    }
}

fn write_color(xml: &mut String, tag: &str, color: &Color) -> fmt::Result {
    write!(xml, "<{}", tag)?;
    if color.auto {
        xml.push_str(r#" auto="1""#);
    }
    if let Some(indexed) = color.indexed {
        write!(xml, r#" indexed="{}""#, indexed)?;
    }
    if let Some(rgb) = &color.rgb {
        write!(xml, r#" rgb="{}""#, escape(rgb.as_str()))?;
    }
    if let Some(theme) = color.theme {
        write!(xml, r#" theme="{}""#, theme)?;
    }
    if color.tint != 0.0 {
        write!(xml, r#" tint="{}""#, color.tint)?;
    }
    xml.push_str("/>");
    Ok(())
}

struct XfIds<'a> {
    fonts: &'a IndexMap,
    fills: &'a IndexMap,
    borders: &'a IndexMap,
}

/// Write an xf record with remapped component ids.
fn write_xf(xml: &mut String, xf: &CellFormat, ids: &XfIds<'_>) -> fmt::Result {
    write!(
        xml,
        r#"<xf numFmtId="{}" fontId="{}" fillId="{}" borderId="{}""#,
        xf.num_fmt_id,
        ids.fonts.get(xf.font_id),
        ids.fills.get(xf.fill_id),
        ids.borders.get(xf.border_id)
    )?;
    if let Some(xf_id) = xf.xf_id {
        write!(xml, r#" xfId="{}""#, xf_id)?;
    }

    let flags = [
        ("applyNumberFormat", xf.apply_number_format),
        ("applyFont", xf.apply_font),
        ("applyFill", xf.apply_fill),
        ("applyBorder", xf.apply_border),
        ("applyAlignment", xf.apply_alignment),
        ("applyProtection", xf.apply_protection),
        ("quotePrefix", xf.quote_prefix),
    ];
    for (name, _) in flags.iter().filter(|(_, set)| *set) {
        write!(xml, r#" {}="1""#, name)?;
    }

    if xf.alignment.has_settings() {
        xml.push('>');
        write_alignment(xml, &xf.alignment)?;
        xml.push_str("</xf>");
    } else {
        xml.push_str("/>");
    }
    Ok(())
}

fn write_alignment(xml: &mut String, alignment: &Alignment) -> fmt::Result {
    xml.push_str("<alignment");
    if let Some(horizontal) = &alignment.horizontal {
        write!(xml, r#" horizontal="{}""#, escape(horizontal.as_str()))?;
    }
    if let Some(vertical) = &alignment.vertical {
        write!(xml, r#" vertical="{}""#, escape(vertical.as_str()))?;
    }
    if let Some(rotation) = alignment.rotation() {
        write!(xml, r#" textRotation="{}""#, rotation)?;
    }
    if alignment.wrap_text {
        xml.push_str(r#" wrapText="1""#);
    }
    if let Some(indent) = alignment.indent_level() {
        write!(xml, r#" indent="{}""#, indent)?;
    }
    if alignment.shrink_to_fit {
        xml.push_str(r#" shrinkToFit="1""#);
    }
    if let Some(order) = alignment.reading_order {
        write!(xml, r#" readingOrder="{}""#, order)?;
    }
    xml.push_str("/>");
    Ok(())
}

fn write_cell_style(xml: &mut String, style: &NamedStyle) -> fmt::Result {
    write!(
        xml,
        r#"<cellStyle name="{}" xfId="{}""#,
        escape(style.name.as_str()),
        style.xf_id
    )?;
    if let Some(builtin_id) = style.builtin_id {
        write!(xml, r#" builtinId="{}""#, builtin_id)?;
    }
    if style.hidden {
        xml.push_str(r#" hidden="1""#);
    }
    if style.custom_builtin {
        xml.push_str(r#" customBuiltin="1""#);
    }
    xml.push_str("/>");
    Ok(())
}

fn write_dxf(xml: &mut String, dxf: &DifferentialFormat) -> fmt::Result {
    xml.push_str("<dxf>");
    if let Some(font) = &dxf.font {
        write_font(xml, font)?;
    }
    if let Some(format) = &dxf.num_fmt {
        write_number_format(xml, format)?;
    }
    if let Some(fill) = &dxf.fill {
        write_fill(xml, fill)?;
    }
    if let Some(border) = &dxf.border {
        write_border(xml, border)?;
    }
    xml.push_str("</dxf>");
    Ok(())
}
