//! Workbook theme color palette (`xl/theme/theme1.xml`).

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::color::apply_tint;
use crate::ooxml::error::{OoxmlError, Result};

/// Theme color palette, addressed by the `theme` attribute of `<color>`.
///
/// Entries are kept in document order of the `clrScheme` children
/// (dk1, lt1, dk2, lt2, accent1..6, hlink, folHlink for a standard theme).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Theme {
    colors: Vec<String>,
}

impl Theme {
    /// Create a theme from base colors (`RRGGBB` or `AARRGGBB`).
    pub fn new(colors: Vec<String>) -> Self {
        Self { colors }
    }

    /// Parse the color scheme from theme XML.
    ///
    /// `srgbClr@val` is used directly; `sysClr@lastClr` supplies the value
    /// for system colors. Entries with neither contribute an empty slot so
    /// that later indices keep their position.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut colors = Vec::with_capacity(12);
        let mut in_scheme = false;
        let mut depth = 0usize;
        let mut captured = false;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    if in_scheme {
                        depth += 1;
                        if depth == 1 {
                            colors.push(String::new());
                            captured = false;
                        } else if !captured && let Some(value) = scheme_color(&reader, e)? {
                            capture(&mut colors, value);
                            captured = true;
                        }
                    } else if e.local_name().as_ref() == b"clrScheme" {
                        in_scheme = true;
                        depth = 0;
                    }
                },
                Ok(Event::Empty(ref e)) if in_scheme => {
                    if depth == 0 {
                        colors.push(String::new());
                    } else if !captured && let Some(value) = scheme_color(&reader, e)? {
                        capture(&mut colors, value);
                        captured = true;
                    }
                },
                Ok(Event::End(ref e)) if in_scheme => {
                    if depth == 0 && e.local_name().as_ref() == b"clrScheme" {
                        break;
                    }
                    depth = depth.saturating_sub(1);
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(Self { colors })
    }

    /// Number of palette entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Base color at `index`, as stored.
    #[inline]
    pub fn base_color(&self, index: usize) -> Option<&str> {
        self.colors.get(index).map(String::as_str)
    }

    /// Color at `index` with `tint` applied, as `FFRRGGBB`.
    ///
    /// Returns `None` for an index outside the palette or an unparsable
    /// base color.
    pub fn color(&self, index: usize, tint: f64) -> Option<String> {
        apply_tint(self.base_color(index)?, tint)
    }
}

fn scheme_color(reader: &Reader<&[u8]>, e: &BytesStart) -> Result<Option<String>> {
    let wanted: &[u8] = match e.local_name().as_ref() {
        b"srgbClr" => b"val",
        b"sysClr" => b"lastClr",
        _ => return Ok(None),
    };
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == wanted {
            let value = attr
                .decode_and_unescape_value(reader.decoder())
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn capture(colors: &mut [String], value: String) {
    if let Some(slot) = colors.last_mut() {
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THEME_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme">
  <a:themeElements>
    <a:clrScheme name="Office">
      <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
      <a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>
      <a:dk2><a:srgbClr val="1F497D"/></a:dk2>
      <a:lt2><a:srgbClr val="EEECE1"/></a:lt2>
      <a:accent1><a:srgbClr val="4F81BD"><a:lumMod val="75000"/></a:srgbClr></a:accent1>
      <a:accent2><a:srgbClr val="C0504D"/></a:accent2>
    </a:clrScheme>
    <a:fontScheme name="Office"><a:majorFont><a:latin typeface="Cambria"/></a:majorFont></a:fontScheme>
  </a:themeElements>
</a:theme>"#;

    #[test]
    fn test_parse_theme() {
        let theme = Theme::parse(THEME_XML).unwrap();
        assert_eq!(theme.len(), 6);
        assert_eq!(theme.base_color(0), Some("000000"));
        assert_eq!(theme.base_color(1), Some("FFFFFF"));
        assert_eq!(theme.base_color(4), Some("4F81BD"));
        assert_eq!(theme.base_color(6), None);
    }

    #[test]
    fn test_theme_color_with_tint() {
        let theme = Theme::parse(THEME_XML).unwrap();
        assert_eq!(theme.color(3, 0.0).as_deref(), Some("FFEEECE1"));
        assert_eq!(theme.color(4, 1.0).as_deref(), Some("FFFFFFFF"));
        assert_eq!(theme.color(4, -1.0).as_deref(), Some("FF000000"));
        assert_eq!(theme.color(42, 0.0), None);
    }

    #[test]
    fn test_missing_scheme_yields_empty_theme() {
        let theme = Theme::parse("<a:theme/>").unwrap();
        assert!(theme.is_empty());
    }
}
