//! XML parser for styles.xml file.
//!
//! Uses quick-xml for streaming parsing. Tables are filled in document
//! order without interning, so the indices cells refer to stay valid.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{
    Alignment, Border, BorderStyle, CellFormat, Color, DifferentialFormat, Fill, Font,
    NamedStyle, NumberFormat, StyleConstants, StyleSheet,
};
use crate::ooxml::error::{OoxmlError, Result};

/// Parse styles from xl/styles.xml XML content.
pub(super) fn parse_styles(
    content: &str,
    constants: &'static StyleConstants,
) -> Result<StyleSheet> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut styles = StyleSheet::with_constants(constants);
    let mut buf = Vec::with_capacity(1024);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"numFmts" => {
                    for format in parse_number_formats(&mut reader)? {
                        styles.add_number_format(format);
                    }
                },
                b"fonts" => {
                    parse_list(&mut reader, b"fonts", b"font", &mut styles.fonts, font_item)?;
                },
                b"fills" => {
                    parse_list(&mut reader, b"fills", b"fill", &mut styles.fills, fill_item)?;
                },
                b"borders" => {
                    parse_list(
                        &mut reader,
                        b"borders",
                        b"border",
                        &mut styles.borders,
                        border_item,
                    )?;
                },
                b"cellStyleXfs" => {
                    parse_list(
                        &mut reader,
                        b"cellStyleXfs",
                        b"xf",
                        &mut styles.cell_style_xfs,
                        parse_xf,
                    )?;
                },
                b"cellXfs" => {
                    parse_list(&mut reader, b"cellXfs", b"xf", &mut styles.cell_xfs, parse_xf)?;
                },
                b"cellStyles" => {
                    parse_list(
                        &mut reader,
                        b"cellStyles",
                        b"cellStyle",
                        &mut styles.cell_styles,
                        parse_cell_style,
                    )?;
                },
                b"dxfs" => {
                    parse_list(&mut reader, b"dxfs", b"dxf", &mut styles.dxfs, dxf_item)?;
                },
                b"indexedColors" => {
                    styles.indexed_colors = Some(parse_indexed_colors(&mut reader)?);
                },
                _ => {},
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(OoxmlError::Xml(format!("XML parsing error: {}", e)));
            },
            _ => {},
        }
    }

    Ok(styles)
}

/// Parse the children named `item` of a container element named `container`.
///
/// `parse_item` receives the item's start tag and whether it was
/// self-closing; a non-empty item must be consumed through its end tag.
fn parse_list<T>(
    reader: &mut Reader<&[u8]>,
    container: &[u8],
    item: &[u8],
    items: &mut Vec<T>,
    parse_item: impl Fn(&mut Reader<&[u8]>, &BytesStart, bool) -> Result<T>,
) -> Result<()> {
    let mut buf = Vec::with_capacity(512);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == item => {
                items.push(parse_item(reader, &e, false)?);
            },
            Ok(Event::Empty(e)) if e.local_name().as_ref() == item => {
                items.push(parse_item(reader, &e, true)?);
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == container => break,
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(OoxmlError::Xml(format!(
                    "XML error in {}: {}",
                    String::from_utf8_lossy(container),
                    e
                )));
            },
            _ => {},
        }
    }

    Ok(())
}

fn font_item(reader: &mut Reader<&[u8]>, start: &BytesStart, empty: bool) -> Result<Font> {
    if empty { Ok(Font::new()) } else { parse_font(reader, start) }
}

fn fill_item(reader: &mut Reader<&[u8]>, _start: &BytesStart, empty: bool) -> Result<Fill> {
    if empty { Ok(Fill::default()) } else { parse_fill(reader) }
}

fn border_item(reader: &mut Reader<&[u8]>, start: &BytesStart, empty: bool) -> Result<Border> {
    if empty { Ok(Border::new()) } else { parse_border(reader, start) }
}

fn dxf_item(
    reader: &mut Reader<&[u8]>,
    _start: &BytesStart,
    empty: bool,
) -> Result<DifferentialFormat> {
    if empty { Ok(DifferentialFormat::default()) } else { parse_dxf(reader) }
}

/// Value of the attribute with local name `name`.
fn attr(reader: &Reader<&[u8]>, start: &BytesStart, name: &[u8]) -> Option<String> {
    start
        .attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == name)
        .and_then(|a| a.decode_and_unescape_value(reader.decoder()).ok())
        .map(|v| v.into_owned())
}

#[inline]
fn parse_bool(value: &str) -> bool {
    value == "1" || value == "true"
}

/// Parse number formats section.
fn parse_number_formats(reader: &mut Reader<&[u8]>) -> Result<Vec<NumberFormat>> {
    let mut formats = Vec::new();
    parse_list(reader, b"numFmts", b"numFmt", &mut formats, |r, e, empty| {
        let format = parse_number_format(r, e);
        if !empty {
            skip_to_end(r, b"numFmt")?;
        }
        Ok(format)
    })?;
    Ok(formats.into_iter().flatten().collect())
}

fn parse_number_format(reader: &Reader<&[u8]>, start: &BytesStart) -> Option<NumberFormat> {
    let id = attr(reader, start, b"numFmtId")?.parse::<u32>().ok()?;
    let code = attr(reader, start, b"formatCode")?;
    Some(NumberFormat::new(id, code))
}

/// Parse a single font element.
fn parse_font(reader: &mut Reader<&[u8]>, _start: &BytesStart) -> Result<Font> {
    let mut font = Font::new();
    let mut buf = Vec::with_capacity(256);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let val = attr(reader, &e, b"val");
                // <b/> means true; <b val="0"/> means false
                let flag = val.as_deref().is_none_or(parse_bool);
                match e.local_name().as_ref() {
                    b"name" => font.name = val,
                    b"sz" => font.size = val.and_then(|v| v.parse::<f64>().ok()),
                    b"b" => font.bold = flag,
                    b"i" => font.italic = flag,
                    b"strike" => font.strike = flag,
                    b"u" => {
                        // Underline can have a val attribute, default is "single"
                        font.underline = Some(val.unwrap_or_else(|| "single".to_string()));
                    },
                    b"color" => font.color = parse_color(reader, &e),
                    b"charset" => font.charset = val.and_then(|v| v.parse::<u32>().ok()),
                    b"family" => font.family = val.and_then(|v| v.parse::<u32>().ok()),
                    b"scheme" => font.scheme = val,
                    _ => {},
                }
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"font" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(format!("XML error in font: {}", e))),
            _ => {},
        }
    }

    Ok(font)
}

/// Parse a single fill element.
///
/// Gradient fills are kept as empty fills so later fill ids stay aligned.
fn parse_fill(reader: &mut Reader<&[u8]>) -> Result<Fill> {
    let mut fill = Fill::default();
    let mut buf = Vec::with_capacity(256);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"patternFill" => {
                fill.pattern_type = pattern_type(reader, &e);
                parse_pattern_colors(reader, &mut fill)?;
            },
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"patternFill" => {
                fill.pattern_type = pattern_type(reader, &e);
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"fill" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(format!("XML error in fill: {}", e))),
            _ => {},
        }
    }

    Ok(fill)
}

fn pattern_type(reader: &Reader<&[u8]>, start: &BytesStart) -> String {
    attr(reader, start, b"patternType").unwrap_or_else(|| "none".to_string())
}

/// Parse the fgColor/bgColor children of a pattern fill.
fn parse_pattern_colors(reader: &mut Reader<&[u8]>, fill: &mut Fill) -> Result<()> {
    let mut buf = Vec::with_capacity(128);
    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"fgColor" => fill.fg_color = parse_color(reader, &e),
                b"bgColor" => fill.bg_color = parse_color(reader, &e),
                _ => {},
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"patternFill" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(format!("XML error in patternFill: {}", e))),
            _ => {},
        }
    }
    Ok(())
}

/// Parse a single border element.
fn parse_border(reader: &mut Reader<&[u8]>, _start: &BytesStart) -> Result<Border> {
    let mut border = Border::new();
    let mut buf = Vec::with_capacity(256);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if let Some(side) = border_side(&mut border, e.local_name().as_ref()) {
                    *side = parse_border_side(reader, &e)?;
                }
            },
            Ok(Event::Empty(e)) => {
                if let Some(side) = border_side(&mut border, e.local_name().as_ref()) {
                    *side = attr(reader, &e, b"style")
                        .filter(|style| style != "none")
                        .map(|style| BorderStyle::new(style, None));
                }
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"border" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(format!("XML error in border: {}", e))),
            _ => {},
        }
    }

    Ok(border)
}

fn border_side<'a>(border: &'a mut Border, name: &[u8]) -> Option<&'a mut Option<BorderStyle>> {
    match name {
        b"left" | b"start" => Some(&mut border.left),
        b"right" | b"end" => Some(&mut border.right),
        b"top" => Some(&mut border.top),
        b"bottom" => Some(&mut border.bottom),
        b"diagonal" => Some(&mut border.diagonal),
        _ => None,
    }
}

/// Parse a single border side (left, right, top, bottom, diagonal).
fn parse_border_side(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart,
) -> Result<Option<BorderStyle>> {
    let style = attr(reader, start, b"style").unwrap_or_else(|| "none".to_string());
    let mut color = None;

    let mut buf = Vec::with_capacity(128);
    let side_name = start.local_name().as_ref().to_vec();
    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"color" => {
                color = parse_color(reader, &e);
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == side_name.as_slice() => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(format!("XML error in border side: {}", e))),
            _ => {},
        }
    }

    if style == "none" {
        Ok(None)
    } else {
        Ok(Some(BorderStyle::new(style, color)))
    }
}

/// Parse a single xf (format) element.
fn parse_xf(reader: &mut Reader<&[u8]>, start: &BytesStart, empty: bool) -> Result<CellFormat> {
    let mut xf = CellFormat::new();

    for a in start.attributes().flatten() {
        let Ok(value) = a.decode_and_unescape_value(reader.decoder()) else {
            continue;
        };
        match a.key.local_name().as_ref() {
            b"numFmtId" => xf.num_fmt_id = value.parse().unwrap_or_default(),
            b"fontId" => xf.font_id = value.parse().unwrap_or_default(),
            b"fillId" => xf.fill_id = value.parse().unwrap_or_default(),
            b"borderId" => xf.border_id = value.parse().unwrap_or_default(),
            b"xfId" => xf.xf_id = value.parse().ok(),
            b"applyNumberFormat" => xf.apply_number_format = parse_bool(&value),
            b"applyFont" => xf.apply_font = parse_bool(&value),
            b"applyFill" => xf.apply_fill = parse_bool(&value),
            b"applyBorder" => xf.apply_border = parse_bool(&value),
            b"applyAlignment" => xf.apply_alignment = parse_bool(&value),
            b"applyProtection" => xf.apply_protection = parse_bool(&value),
            b"quotePrefix" => xf.quote_prefix = parse_bool(&value),
            _ => {},
        }
    }

    if empty {
        return Ok(xf);
    }

    let mut buf = Vec::with_capacity(256);
    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e))
                if e.local_name().as_ref() == b"alignment" =>
            {
                xf.alignment = parse_alignment(reader, &e);
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"xf" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(format!("XML error in xf: {}", e))),
            _ => {},
        }
    }

    Ok(xf)
}

/// Parse alignment element.
fn parse_alignment(reader: &Reader<&[u8]>, start: &BytesStart) -> Alignment {
    let mut alignment = Alignment::new();

    for a in start.attributes().flatten() {
        let Ok(value) = a.decode_and_unescape_value(reader.decoder()) else {
            continue;
        };
        match a.key.local_name().as_ref() {
            b"horizontal" => alignment.horizontal = Some(value.into_owned()),
            b"vertical" => alignment.vertical = Some(value.into_owned()),
            b"textRotation" => alignment.text_rotation = value.parse().ok(),
            b"wrapText" => alignment.wrap_text = parse_bool(&value),
            b"indent" => alignment.indent = value.parse().ok(),
            b"shrinkToFit" => alignment.shrink_to_fit = parse_bool(&value),
            b"readingOrder" => alignment.reading_order = value.parse().ok(),
            _ => {},
        }
    }

    alignment
}

/// Parse a cellStyle element.
fn parse_cell_style(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart,
    empty: bool,
) -> Result<NamedStyle> {
    let style = NamedStyle {
        name: attr(reader, start, b"name").unwrap_or_default(),
        xf_id: attr(reader, start, b"xfId")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default(),
        builtin_id: attr(reader, start, b"builtinId").and_then(|v| v.parse().ok()),
        hidden: attr(reader, start, b"hidden").is_some_and(|v| parse_bool(&v)),
        custom_builtin: attr(reader, start, b"customBuiltin").is_some_and(|v| parse_bool(&v)),
    };
    if !empty {
        skip_to_end(reader, b"cellStyle")?;
    }
    Ok(style)
}

/// Parse a dxf element.
fn parse_dxf(reader: &mut Reader<&[u8]>) -> Result<DifferentialFormat> {
    let mut dxf = DifferentialFormat::default();
    let mut buf = Vec::with_capacity(256);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"font" => dxf.font = Some(parse_font(reader, &e)?),
                b"fill" => dxf.fill = Some(parse_fill(reader)?),
                b"border" => dxf.border = Some(parse_border(reader, &e)?),
                b"numFmt" => {
                    dxf.num_fmt = parse_number_format(reader, &e);
                    skip_to_end(reader, b"numFmt")?;
                },
                _ => {},
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"font" => dxf.font = Some(Font::new()),
                b"fill" => dxf.fill = Some(Fill::default()),
                b"border" => dxf.border = Some(Border::new()),
                b"numFmt" => dxf.num_fmt = parse_number_format(reader, &e),
                _ => {},
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"dxf" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(format!("XML error in dxf: {}", e))),
            _ => {},
        }
    }

    Ok(dxf)
}

/// Parse the rgbColor entries of an indexedColors element.
fn parse_indexed_colors(reader: &mut Reader<&[u8]>) -> Result<Vec<String>> {
    let mut colors = Vec::with_capacity(64);
    parse_list(reader, b"indexedColors", b"rgbColor", &mut colors, |r, e, empty| {
        let rgb = attr(r, e, b"rgb").unwrap_or_default();
        if !empty {
            skip_to_end(r, b"rgbColor")?;
        }
        Ok(rgb)
    })?;
    Ok(colors)
}

/// Parse a color reference from a color element's attributes.
///
/// Colors can be specified as:
/// - RGB hex value (rgb attribute)
/// - Theme color (theme attribute with optional tint)
/// - Indexed color (indexed attribute)
/// - Auto color
fn parse_color(reader: &Reader<&[u8]>, start: &BytesStart) -> Option<Color> {
    let mut color = Color::default();

    for a in start.attributes().flatten() {
        let Ok(value) = a.decode_and_unescape_value(reader.decoder()) else {
            continue;
        };
        match a.key.local_name().as_ref() {
            b"rgb" => color.rgb = Some(value.into_owned()),
            b"theme" => color.theme = value.parse().ok(),
            b"tint" => color.tint = value.parse().unwrap_or_default(),
            b"indexed" => color.indexed = value.parse().ok(),
            b"auto" => color.auto = parse_bool(&value),
            _ => {},
        }
    }

    (!color.is_empty()).then_some(color)
}

/// Consume events up to and including the end tag `name`.
fn skip_to_end(reader: &mut Reader<&[u8]>, name: &[u8]) -> Result<()> {
    let mut buf = Vec::with_capacity(64);
    let mut depth = 0usize;
    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == name => depth += 1,
            Ok(Event::End(e)) if e.local_name().as_ref() == name => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(format!("XML error: {}", e))),
            _ => {},
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::xlsx::styles::NumberFormatKind;

    const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <numFmts count="2">
    <numFmt numFmtId="164" formatCode="0.000"/>
    <numFmt numFmtId="165" formatCode="&quot;$&quot;#,##0"/>
  </numFmts>
  <fonts count="2">
    <font><sz val="11"/><color theme="1"/><name val="Calibri"/><family val="2"/><scheme val="minor"/></font>
    <font><b/><i val="0"/><u/><sz val="14"/><color rgb="FFFF0000"/><name val="Arial"/></font>
  </fonts>
  <fills count="3">
    <fill><patternFill patternType="none"/></fill>
    <fill><patternFill patternType="gray125"/></fill>
    <fill><patternFill patternType="solid"><fgColor theme="4" tint="0.39997558519241921"/><bgColor indexed="64"/></patternFill></fill>
  </fills>
  <borders count="2">
    <border><left/><right/><top/><bottom/><diagonal/></border>
    <border><left style="thin"><color indexed="8"/></left><right/><top/><bottom style="double"/><diagonal/></border>
  </borders>
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0" applyAlignment="1"><alignment vertical="center"/></xf>
  </cellStyleXfs>
  <cellXfs count="3">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>
    <xf numFmtId="164" fontId="1" fillId="2" borderId="1" xfId="0" applyFont="1" applyNumberFormat="1">
      <alignment horizontal="center" wrapText="1"/>
    </xf>
    <xf numFmtId="14" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/>
  </cellXfs>
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>
  <dxfs count="1">
    <dxf><font><b/><color rgb="FF9C0006"/></font><fill><patternFill><bgColor rgb="FFFFC7CE"/></patternFill></fill></dxf>
  </dxfs>
  <colors>
    <indexedColors>
      <rgbColor rgb="00000000"/>
      <rgbColor rgb="00FFFFFF"/>
    </indexedColors>
  </colors>
</styleSheet>"#;

    #[test]
    fn test_parse_tables() {
        let styles = StyleSheet::parse(STYLES_XML).unwrap();
        assert_eq!(styles.font_count(), 2);
        assert_eq!(styles.fill_count(), 3);
        assert_eq!(styles.border_count(), 2);
        assert_eq!(styles.named_cell_format_count(), 1);
        assert_eq!(styles.cell_format_count(), 3);
        assert_eq!(styles.named_styles().len(), 1);
        assert_eq!(styles.differential_formats().len(), 1);
        assert_eq!(styles.custom_number_formats().len(), 2);
        assert_eq!(styles.number_format_code(165).as_deref(), Some("\"$\"#,##0"));
        assert_eq!(styles.indexed_colors().map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_parse_entries() {
        let styles = StyleSheet::parse(STYLES_XML).unwrap();

        let font = styles.font(1).unwrap();
        assert!(font.bold);
        assert!(!font.italic);
        assert_eq!(font.underline.as_deref(), Some("single"));
        assert_eq!(font.size, Some(14.0));
        assert_eq!(font.color, Some(Color::rgb("FFFF0000")));
        assert_eq!(styles.font(0).unwrap().color, Some(Color::theme(1, 0.0)));

        let fill = styles.fill(2).unwrap();
        assert_eq!(fill.pattern_type, "solid");
        let fg = fill.fg_color.as_ref().unwrap();
        assert_eq!(fg.theme, Some(4));
        assert!((fg.tint - 0.39997558519241921).abs() < 1e-12);
        assert_eq!(fill.bg_color, Some(Color::indexed(64)));

        let border = styles.border(1).unwrap();
        assert_eq!(border.left, Some(BorderStyle::new("thin", Some(Color::indexed(8)))));
        assert_eq!(border.bottom, Some(BorderStyle::new("double", None)));
        assert_eq!(border.right, None);

        let xf = styles.cell_format(1).unwrap();
        assert_eq!((xf.num_fmt_id, xf.font_id, xf.fill_id, xf.border_id), (164, 1, 2, 1));
        assert_eq!(xf.xf_id, Some(0));
        assert!(xf.apply_font && xf.apply_number_format && !xf.apply_fill);
        assert_eq!(xf.alignment.horizontal.as_deref(), Some("center"));
        assert!(xf.alignment.wrap_text);

        let dxf = &styles.differential_formats()[0];
        assert!(dxf.font.as_ref().is_some_and(|f| f.bold));
        assert_eq!(dxf.fill.as_ref().map(|f| f.pattern_type.as_str()), Some("none"));
    }

    #[test]
    fn test_resolve_parsed_styles() {
        let styles = StyleSheet::parse(STYLES_XML).unwrap();
        let style = styles.get_style(1);
        assert_eq!(style.font.name, "Arial");
        assert_eq!(style.font.color, "FFFF0000");
        // No theme is configured, so the theme-only fill color stays empty.
        assert_eq!(style.fill.fg_color, "");
        // Indexed 8 falls outside the two-entry document palette.
        assert_eq!(style.border.left_color, "");
        assert!(style.apply_alignment);
        assert_eq!(style.alignment.vertical.as_deref(), Some("center"));

        assert_eq!(
            styles.number_format_for(2),
            ("mm-dd-yy".to_string(), NumberFormatKind::DateTime)
        );
    }

    #[test]
    fn test_parse_malformed() {
        assert!(StyleSheet::parse("<styleSheet><fonts><font></fonts>").is_err());
    }
}
