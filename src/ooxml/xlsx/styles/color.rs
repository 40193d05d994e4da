//! Color references and their resolution to concrete ARGB values.
//!
//! SpreadsheetML colors are indirect: a `<color>` element may carry a literal
//! `rgb`, a `theme` index plus `tint`, or a legacy `indexed` palette slot.
//! [`ColorResolver`] turns any of these into an `AARRGGBB` string.

use super::theme::Theme;

/// Excel's historical 64-entry default palette, addressed 1-based by `indexed`.
///
/// See <https://github.com/ClosedXML/ClosedXML/wiki/Excel-Indexed-Colors>.
pub static LEGACY_INDEXED_COLORS: [&str; 64] = [
    "FF000000", "FFFFFFFF", "FFFF0000", "FF00FF00", "FF0000FF", "FFFFFF00", "FFFF00FF", "FF00FFFF",
    "FF000000", "FFFFFFFF", "FFFF0000", "FF00FF00", "FF0000FF", "FFFFFF00", "FFFF00FF", "FF00FFFF",
    "FF800000", "FF008000", "FF000080", "FF808000", "FF800080", "FF008080", "FFC0C0C0", "FF808080",
    "FF9999FF", "FF993366", "FFFFFFCC", "FFCCFFFF", "FF660066", "FFFF8080", "FF0066CC", "FFCCCCFF",
    "FF000080", "FFFF00FF", "FFFFFF00", "FF00FFFF", "FF800080", "FF800000", "FF008080", "FF0000FF",
    "FF00CCFF", "FFCCFFFF", "FFCCFFCC", "FFFFFF99", "FF99CCFF", "FFFF99CC", "FFCC99FF", "FFFFCC99",
    "FF3366FF", "FF33CCCC", "FF99CC00", "FFFFCC00", "FFFF9900", "FFFF6600", "FF666699", "FF969696",
    "FF003366", "FF339966", "FF003300", "FF333300", "FF993300", "FF993366", "FF333399", "FF333333",
];

/// A color reference as stored in styles.xml.
///
/// Equality is structural over every field, so two references that resolve
/// to the same RGB but are spelled differently (theme vs. literal) intern as
/// different entries, exactly as Excel keeps them apart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Color {
    /// Literal ARGB hex value (e.g., "FFFF0000")
    pub rgb: Option<String>,
    /// Theme palette index
    pub theme: Option<u32>,
    /// Tint applied to a theme color, -1.0..=1.0
    pub tint: f64,
    /// 1-based legacy palette index
    pub indexed: Option<u32>,
    /// Automatic (system) color
    pub auto: bool,
}

impl Color {
    /// A literal ARGB color.
    #[inline]
    pub fn rgb(argb: impl Into<String>) -> Self {
        Self {
            rgb: Some(argb.into()),
            ..Default::default()
        }
    }

    /// A theme color with a tint.
    #[inline]
    pub fn theme(index: u32, tint: f64) -> Self {
        Self {
            theme: Some(index),
            tint,
            ..Default::default()
        }
    }

    /// A legacy indexed color.
    #[inline]
    pub fn indexed(index: u32) -> Self {
        Self {
            indexed: Some(index),
            ..Default::default()
        }
    }

    /// True if no color information is present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rgb.is_none() && self.theme.is_none() && self.indexed.is_none() && !self.auto
    }
}

/// Resolves [`Color`] references against a document's theme and palette.
#[derive(Debug, Clone, Copy)]
pub struct ColorResolver<'a> {
    theme: Option<&'a Theme>,
    indexed: Option<&'a [String]>,
    legacy: &'a [&'static str; 64],
}

impl<'a> ColorResolver<'a> {
    /// Create a resolver.
    ///
    /// `indexed` is the document-supplied `<indexedColors>` palette, if any;
    /// otherwise `legacy` is used.
    pub fn new(
        theme: Option<&'a Theme>,
        indexed: Option<&'a [String]>,
        legacy: &'a [&'static str; 64],
    ) -> Self {
        Self {
            theme,
            indexed,
            legacy,
        }
    }

    /// Resolve a color reference to an ARGB hex string.
    ///
    /// Theme references win over indexed ones, which win over the literal
    /// `rgb`. A reference that cannot be resolved at its own level (theme
    /// index outside the palette, palette slot out of range) falls through
    /// to the next level. Returns an empty string when nothing applies.
    pub fn resolve(&self, color: &Color) -> String {
        if let (Some(index), Some(theme)) = (color.theme, self.theme)
            && let Some(argb) = theme.color(index as usize, color.tint)
        {
            return argb;
        }
        if let Some(index) = color.indexed
            && let Some(argb) = self.indexed_color(index)
        {
            return argb;
        }
        color.rgb.clone().unwrap_or_default()
    }

    /// Resolve an optional color reference; `None` resolves to "".
    #[inline]
    pub fn resolve_opt(&self, color: Option<&Color>) -> String {
        color.map(|c| self.resolve(c)).unwrap_or_default()
    }

    /// Look up a 1-based palette slot.
    pub fn indexed_color(&self, index: u32) -> Option<String> {
        let slot = (index as usize).checked_sub(1)?;
        match self.indexed {
            Some(palette) => palette.get(slot).cloned(),
            None => self.legacy.get(slot).map(|s| (*s).to_string()),
        }
    }
}

/// Apply an Excel tint to an `RRGGBB` (or `AARRGGBB`) color.
///
/// Excel converts to HSL and adjusts luminance only:
/// - `tint < 0`: `L' = L * (1 + tint)`
/// - `tint > 0`: `L' = L * (1 - tint) + tint`
///
/// Returns `FFRRGGBB`, or `None` if `hex` is not a valid color.
pub fn apply_tint(hex: &str, tint: f64) -> Option<String> {
    let (r, g, b) = parse_rgb(hex)?;
    if tint == 0.0 {
        return Some(format!("FF{:02X}{:02X}{:02X}", r, g, b));
    }
    let tint = tint.clamp(-1.0, 1.0);
    let (h, s, l) = rgb_to_hsl(r, g, b);
    let l = if tint < 0.0 {
        l * (1.0 + tint)
    } else {
        l * (1.0 - tint) + tint
    };
    let (r, g, b) = hsl_to_rgb(h, s, l.clamp(0.0, 1.0));
    Some(format!("FF{:02X}{:02X}{:02X}", r, g, b))
}

/// Parse `RRGGBB` or `AARRGGBB`, ignoring the alpha channel.
pub(crate) fn parse_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    let rgb = match hex.len() {
        6 => hex,
        8 => hex.get(2..)?,
        _ => return None,
    };
    let channel = |at: usize| u8::from_str_radix(rgb.get(at..at + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Convert RGB to HSL with every component in `0.0..=1.0`.
pub(crate) fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    (h / 6.0, s, l)
}

/// Convert HSL (components in `0.0..=1.0`) to RGB.
pub(crate) fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    if s == 0.0 {
        let v = to_channel(l);
        return (v, v, v);
    }
    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;
    (
        to_channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_channel(hue_to_rgb(p, q, h)),
        to_channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    )
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[inline]
fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}
