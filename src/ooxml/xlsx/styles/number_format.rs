//! Number format definitions, the built-in format table and classification.

use phf::phf_map;

/// First id available to custom number formats.
pub const FIRST_CUSTOM_NUM_FMT_ID: u32 = 164;

/// Built-in number formats defined by ECMA-376 Part 1, §18.8.30.
///
/// Ids 0..=163 are reserved; only these are populated.
pub static BUILTIN_NUM_FMTS: phf::Map<u32, &'static str> = phf_map! {
    0u32 => "General",
    1u32 => "0",
    2u32 => "0.00",
    3u32 => "#,##0",
    4u32 => "#,##0.00",
    9u32 => "0%",
    10u32 => "0.00%",
    11u32 => "0.00E+00",
    12u32 => "# ?/?",
    13u32 => "# ??/??",
    14u32 => "mm-dd-yy",
    15u32 => "d-mmm-yy",
    16u32 => "d-mmm",
    17u32 => "mmm-yy",
    18u32 => "h:mm AM/PM",
    19u32 => "h:mm:ss AM/PM",
    20u32 => "h:mm",
    21u32 => "h:mm:ss",
    22u32 => "m/d/yy h:mm",
    37u32 => "#,##0 ;(#,##0)",
    38u32 => "#,##0 ;[Red](#,##0)",
    39u32 => "#,##0.00;(#,##0.00)",
    40u32 => "#,##0.00;[Red](#,##0.00)",
    41u32 => r#"_(* #,##0_);_(* \(#,##0\);_(* "-"_);_(@_)"#,
    42u32 => r#"_("$"* #,##0_);_("$"* \(#,##0\);_("$"* "-"_);_(@_)"#,
    43u32 => r#"_(* #,##0.00_);_(* \(#,##0.00\);_(* "-"??_);_(@_)"#,
    44u32 => r#"_("$"* #,##0.00_);_("$"* \(#,##0.00\);_("$"* "-"??_);_(@_)"#,
    45u32 => "mm:ss",
    46u32 => "[h]:mm:ss",
    47u32 => "mmss.0",
    48u32 => "##0.0E+0",
    49u32 => "@",
};

/// Inverse of [`BUILTIN_NUM_FMTS`].
pub static BUILTIN_NUM_FMT_IDS: phf::Map<&'static str, u32> = phf_map! {
    "General" => 0u32,
    "0" => 1u32,
    "0.00" => 2u32,
    "#,##0" => 3u32,
    "#,##0.00" => 4u32,
    "0%" => 9u32,
    "0.00%" => 10u32,
    "0.00E+00" => 11u32,
    "# ?/?" => 12u32,
    "# ??/??" => 13u32,
    "mm-dd-yy" => 14u32,
    "d-mmm-yy" => 15u32,
    "d-mmm" => 16u32,
    "mmm-yy" => 17u32,
    "h:mm AM/PM" => 18u32,
    "h:mm:ss AM/PM" => 19u32,
    "h:mm" => 20u32,
    "h:mm:ss" => 21u32,
    "m/d/yy h:mm" => 22u32,
    "#,##0 ;(#,##0)" => 37u32,
    "#,##0 ;[Red](#,##0)" => 38u32,
    "#,##0.00;(#,##0.00)" => 39u32,
    "#,##0.00;[Red](#,##0.00)" => 40u32,
    r#"_(* #,##0_);_(* \(#,##0\);_(* "-"_);_(@_)"# => 41u32,
    r#"_("$"* #,##0_);_("$"* \(#,##0\);_("$"* "-"_);_(@_)"# => 42u32,
    r#"_(* #,##0.00_);_(* \(#,##0.00\);_(* "-"??_);_(@_)"# => 43u32,
    r#"_("$"* #,##0.00_);_("$"* \(#,##0.00\);_("$"* "-"??_);_(@_)"# => 44u32,
    "mm:ss" => 45u32,
    "[h]:mm:ss" => 46u32,
    "mmss.0" => 47u32,
    "##0.0E+0" => 48u32,
    "@" => 49u32,
};

/// Bracketed color annotations that may prefix a format section.
/// `[ColorN]` (1..=56) is handled separately.
const COLOR_TOKENS: [&str; 8] = [
    "[red]", "[black]", "[green]", "[white]", "[blue]", "[magenta]", "[yellow]", "[cyan]",
];

/// Number format information.
///
/// Excel number formats control how cell values are displayed.
/// This includes both built-in formats (IDs 0-163) and custom formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    /// Format ID
    pub id: u32,
    /// Format code (e.g., "General", "0.00", "mm/dd/yyyy")
    pub code: String,
}

impl NumberFormat {
    /// Create a new number format.
    #[inline]
    pub fn new(id: u32, code: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
        }
    }

    /// Check if this is a built-in format (ID < 164).
    #[inline]
    pub fn is_builtin(&self) -> bool {
        self.id < FIRST_CUSTOM_NUM_FMT_ID
    }

    /// Classify the format code.
    #[inline]
    pub fn kind(&self) -> NumberFormatKind {
        classify(&self.code)
    }
}

/// Semantic category of a number format code.
///
/// Enough for a renderer to decide how to interpret a raw cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberFormatKind {
    General,
    Integer,
    Float,
    Percentage,
    /// Dates, times and elapsed durations
    DateTime,
    Text,
    Scientific,
    Custom,
}

/// Get the format code for a built-in number format ID.
#[inline]
pub fn builtin_format_code(id: u32) -> Option<&'static str> {
    BUILTIN_NUM_FMTS.get(&id).copied()
}

/// Get the built-in id for an exact format code.
#[inline]
pub fn builtin_format_id(code: &str) -> Option<u32> {
    BUILTIN_NUM_FMT_IDS.get(code).copied()
}

/// Classify a format code.
///
/// Only the first (positive) section decides the kind. Color annotations
/// such as `[Red]` or `[Color12]` are ignored.
pub fn classify(code: &str) -> NumberFormatKind {
    let stripped = strip_color_tokens(code);
    let section = first_section(&stripped).trim();

    if section.is_empty() || section.eq_ignore_ascii_case("general") {
        return NumberFormatKind::General;
    }
    if section == "@" {
        return NumberFormatKind::Text;
    }
    if is_date_format(section) || is_elapsed_format(section) {
        return NumberFormatKind::DateTime;
    }

    let literal_free = strip_literals(section);
    if ["E+", "E-", "e+", "e-"]
        .iter()
        .any(|exp| literal_free.contains(exp))
    {
        return NumberFormatKind::Scientific;
    }
    if literal_free.contains('%') {
        return NumberFormatKind::Percentage;
    }
    if literal_free.contains(['0', '#', '?']) {
        return if literal_free.contains('.') {
            NumberFormatKind::Float
        } else {
            NumberFormatKind::Integer
        };
    }
    if literal_free.contains('@') {
        return NumberFormatKind::Text;
    }
    NumberFormatKind::Custom
}

/// Remove bracketed color annotations, case-insensitively.
fn strip_color_tokens(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    let mut rest = code;
    while let Some(start) = rest.find('[') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let Some(end) = tail.find(']') else {
            out.push_str(tail);
            return out;
        };
        let token = &tail[..=end];
        if !is_color_token(token) {
            out.push_str(token);
        }
        rest = &tail[end + 1..];
    }
    out.push_str(rest);
    out
}

fn is_color_token(token: &str) -> bool {
    let lower = token.to_ascii_lowercase();
    if COLOR_TOKENS.contains(&lower.as_str()) {
        return true;
    }
    lower
        .strip_prefix("[color")
        .and_then(|s| s.strip_suffix(']'))
        .and_then(|n| n.parse::<u8>().ok())
        .is_some_and(|n| (1..=56).contains(&n))
}

/// The text before the first unquoted, unescaped `;`.
fn first_section(code: &str) -> &str {
    let mut quoted = false;
    let mut escaped = false;
    for (i, c) in code.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => quoted = !quoted,
            ';' if !quoted => return &code[..i],
            _ => {},
        }
    }
    code
}

/// Drop quoted literals, escaped characters, padding and fill directives.
fn strip_literals(section: &str) -> String {
    let mut out = String::with_capacity(section.len());
    let mut chars = section.chars();
    let mut quoted = false;
    while let Some(c) = chars.next() {
        match c {
            '"' => quoted = !quoted,
            _ if quoted => {},
            '\\' | '_' | '*' => {
                chars.next();
            },
            _ => out.push(c),
        }
    }
    out
}

/// Elapsed-time formats such as `[h]:mm:ss` or `[ss]`.
fn is_elapsed_format(section: &str) -> bool {
    let lower = section.to_ascii_lowercase();
    ["[h", "[m", "[s"].iter().any(|prefix| {
        lower.match_indices(prefix).any(|(i, _)| {
            let body = &lower[i + 1..];
            body.find(']').is_some_and(|end| {
                let unit = &body[..end];
                !unit.is_empty() && unit.chars().all(|c| c == unit.as_bytes()[0] as char)
            })
        })
    })
}

/// Check if a format code represents a date/time format.
///
/// This function uses the same logic as calamine's `detect_custom_number_format`.
pub fn is_date_format(format: &str) -> bool {
    let mut escaped = false;
    let mut is_quote = false;
    let mut brackets = 0usize;
    let mut prev = ' ';
    let mut hms = false;
    let mut ap = false;

    for s in format.chars() {
        match (s, escaped, is_quote, ap, brackets) {
            (_, true, ..) => escaped = false, // if escaped, ignore
            ('_' | '\\', ..) => escaped = true,
            ('"', _, true, _, _) => is_quote = false,
            (_, _, true, _, _) => (), // inside quotes, skip
            ('"', _, _, _, _) => is_quote = true,
            (';', ..) => return false, // first format only
            ('[', ..) => brackets += 1,
            (']', .., 1) if hms => return false, // TimeDelta, not DateTime
            (']', ..) => brackets = brackets.saturating_sub(1),
            ('a' | 'A', _, _, false, 0) => ap = true,
            ('p' | 'm' | '/' | 'P' | 'M', _, _, true, 0) => return true,
            ('d' | 'm' | 'h' | 'y' | 's' | 'D' | 'M' | 'H' | 'Y' | 'S', _, _, false, 0) => {
                return true;
            },
            _ => {
                if hms && s.eq_ignore_ascii_case(&prev) {
                    // ok ...
                } else {
                    hms = prev == '[' && matches!(s, 'm' | 'h' | 's' | 'M' | 'H' | 'S');
                }
            },
        }
        prev = s;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_agree() {
        assert_eq!(BUILTIN_NUM_FMTS.len(), BUILTIN_NUM_FMT_IDS.len());
        for (id, code) in BUILTIN_NUM_FMTS.entries() {
            assert!(*id < FIRST_CUSTOM_NUM_FMT_ID);
            assert_eq!(builtin_format_id(code), Some(*id));
        }
        assert_eq!(builtin_format_code(14), Some("mm-dd-yy"));
        assert_eq!(builtin_format_code(999), None);
    }

    #[test]
    fn test_deeply_bracketed_codes() {
        let open = "[".repeat(300);
        assert!(!is_date_format(&open));
        assert_eq!(classify(&open), NumberFormatKind::Custom);
        assert!(is_date_format(&format!("{}{}yyyy", open, "]".repeat(300))));
    }

    #[test]
    fn test_classify_builtins() {
        assert_eq!(classify("general"), NumberFormatKind::General);
        assert_eq!(classify("General"), NumberFormatKind::General);
        assert_eq!(classify(""), NumberFormatKind::General);
        assert_eq!(classify("0"), NumberFormatKind::Integer);
        assert_eq!(classify("#,##0"), NumberFormatKind::Integer);
        assert_eq!(classify("0.00"), NumberFormatKind::Float);
        assert_eq!(classify("#,##0.00"), NumberFormatKind::Float);
        assert_eq!(classify("0%"), NumberFormatKind::Percentage);
        assert_eq!(classify("0.00%"), NumberFormatKind::Percentage);
        assert_eq!(classify("0.00E+00"), NumberFormatKind::Scientific);
        assert_eq!(classify("##0.0E+0"), NumberFormatKind::Scientific);
        assert_eq!(classify("mm-dd-yy"), NumberFormatKind::DateTime);
        assert_eq!(classify("h:mm AM/PM"), NumberFormatKind::DateTime);
        assert_eq!(classify("[h]:mm:ss"), NumberFormatKind::DateTime);
        assert_eq!(classify("@"), NumberFormatKind::Text);
    }

    #[test]
    fn test_classify_ignores_color_tokens() {
        assert_eq!(classify("[Red]0.00"), NumberFormatKind::Float);
        assert_eq!(classify("[red]0.00"), NumberFormatKind::Float);
        assert_eq!(classify("[Color12]0%"), NumberFormatKind::Percentage);
        assert_eq!(classify("#,##0 ;[Red](#,##0)"), NumberFormatKind::Integer);
        assert_eq!(classify("[Blue]General"), NumberFormatKind::General);
        // Locale tags are not colors.
        assert_eq!(classify("[$-409]d/m/yyyy"), NumberFormatKind::DateTime);
    }

    #[test]
    fn test_classify_accounting_and_literals() {
        assert_eq!(
            classify(builtin_format_code(41).unwrap()),
            NumberFormatKind::Integer
        );
        assert_eq!(
            classify(builtin_format_code(44).unwrap()),
            NumberFormatKind::Float
        );
        assert_eq!(classify("\"Total: \"0"), NumberFormatKind::Integer);
        assert_eq!(classify("\"n/a\""), NumberFormatKind::Custom);
    }

    #[test]
    fn test_is_date_format() {
        assert!(is_date_format("DD/MM/YY"));
        assert!(is_date_format("H:MM:SS;@"));
        assert!(is_date_format("m\"M\"d\"D\";@"));
        assert!(is_date_format("ha/p\\\\m"));

        assert!(!is_date_format("\"$\"#,##0_);[Red](\"$\"#,##0)"));
        assert!(!is_date_format("0_ ;[Red]\\-0\\ "));
        assert!(!is_date_format("\\Y000000"));
        assert!(!is_date_format("#,##0.0####\" YMD\""));
        assert!(!is_date_format("[h]:mm:ss"));
        assert!(!is_date_format("[ss]"));
    }
}
