//! Binary records for stored rows and cells.
//!
//! Records are positional: fields carry no tags, so the reader must consume
//! them in exactly the order the writer produced them. Each record ends with
//! an end-of-record marker, which is the only integrity check.
//!
//! Row record:
//!
//! | Field          | Encoding |
//! |----------------|----------|
//! | hidden         | bool     |
//! | height         | float    |
//! | outline level  | int      |
//! | custom height  | bool     |
//! | row number     | int      |
//! | max column     | int (-1 when the row has no cells) |
//!
//! Cell record: a nil flag, then (unless nil) value, formula, has-style,
//! number format, 1904 flag, hidden, horizontal merge, vertical merge, type
//! tag, has-validation, hyperlink display/link/tooltip, column, rich text
//! runs, end marker; then the style sub-record and the validation sub-record
//! when their flags were set.

use crate::common::binary::{RecordReader, RecordWriter};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::xlsx::cell::{Cell, CellType, Hyperlink, RichTextRun};
use crate::ooxml::xlsx::data_validation::DataValidation;
use crate::ooxml::xlsx::styles::{Alignment, Style, StyleBorder, StyleFill, StyleFont};

/// Scalar state of a row as stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowRecord {
    pub hidden: bool,
    pub height: f64,
    pub outline_level: u8,
    pub custom_height: bool,
    pub num: usize,
    pub max_col: Option<usize>,
}

pub fn encode_row(w: &mut RecordWriter, row: &RowRecord) -> Result<()> {
    w.write_bool(row.hidden);
    w.write_float(row.height);
    w.write_int(i64::from(row.outline_level));
    w.write_bool(row.custom_height);
    w.write_int(to_int(row.num)?);
    w.write_int(match row.max_col {
        Some(col) => to_int(col)?,
        None => -1,
    });
    w.write_end_of_record();
    Ok(())
}

pub fn decode_row(data: &[u8]) -> Result<RowRecord> {
    let mut r = RecordReader::new(data);
    let hidden = r.read_bool()?;
    let height = r.read_float()?;
    let outline_level = r.read_int()?;
    let outline_level = u8::try_from(outline_level).map_err(|_| {
        OoxmlError::Malformed(format!("outline level {} out of range", outline_level))
    })?;
    let custom_height = r.read_bool()?;
    let num = to_index(r.read_int()?, "row number")?;
    let max_col = match r.read_int()? {
        -1 => None,
        col => Some(to_index(col, "max column")?),
    };
    r.read_end_of_record()?;

    Ok(RowRecord {
        hidden,
        height,
        outline_level,
        custom_height,
        num,
        max_col,
    })
}

/// Encode a cell; `None` produces a nil record.
pub fn encode_cell(w: &mut RecordWriter, cell: Option<&Cell>) -> Result<()> {
    let Some(cell) = cell else {
        w.write_bool(true);
        w.write_end_of_record();
        return Ok(());
    };

    w.write_bool(false);
    w.write_string(cell.value())?;
    w.write_string(cell.formula())?;
    w.write_bool(cell.style().is_some());
    w.write_string(cell.num_fmt())?;
    w.write_bool(cell.date1904());
    w.write_bool(cell.hidden());
    w.write_int(cell.hmerge());
    w.write_int(cell.vmerge());
    w.write_int(cell.cell_type().tag());
    w.write_bool(cell.data_validation().is_some());
    let link = cell.hyperlink();
    w.write_string(&link.display_string)?;
    w.write_string(&link.link)?;
    w.write_string(&link.tooltip)?;
    w.write_int(to_int(cell.col())?);
    encode_rich_text(w, cell.rich_text())?;
    w.write_end_of_record();

    if let Some(style) = cell.style() {
        encode_style(w, style)?;
    }
    if let Some(dv) = cell.data_validation() {
        encode_data_validation(w, dv)?;
    }
    Ok(())
}

/// Decode a cell record. A nil record decodes to `None`.
///
/// The returned cell is not marked modified.
pub fn decode_cell(data: &[u8]) -> Result<Option<Cell>> {
    let mut r = RecordReader::new(data);
    if r.read_bool()? {
        r.read_end_of_record()?;
        return Ok(None);
    }

    let value = r.read_string()?;
    let formula = r.read_string()?;
    let has_style = r.read_bool()?;
    let num_fmt = r.read_string()?;
    let date1904 = r.read_bool()?;
    let hidden = r.read_bool()?;
    let hmerge = r.read_int()?;
    let vmerge = r.read_int()?;
    let cell_type = CellType::from_tag(r.read_int()?)?;
    let has_data_validation = r.read_bool()?;
    let hyperlink = Hyperlink {
        display_string: r.read_string()?,
        link: r.read_string()?,
        tooltip: r.read_string()?,
    };
    let col = to_index(r.read_int()?, "column")?;
    let rich_text = decode_rich_text(&mut r)?;
    r.read_end_of_record()?;

    let style = if has_style { Some(decode_style(&mut r)?) } else { None };
    let data_validation = if has_data_validation {
        Some(decode_data_validation(&mut r)?)
    } else {
        None
    };

    let mut cell = Cell::new(col);
    cell.set_value(value);
    cell.set_formula(formula);
    cell.set_style(style);
    cell.set_num_fmt(num_fmt);
    cell.set_date1904(date1904);
    cell.set_hidden(hidden);
    cell.merge(hmerge, vmerge);
    cell.set_cell_type(cell_type);
    cell.set_hyperlink(hyperlink);
    cell.set_data_validation(data_validation);
    cell.set_rich_text(rich_text);
    cell.clear_modified();
    Ok(Some(cell))
}

fn encode_rich_text(w: &mut RecordWriter, runs: &[RichTextRun]) -> Result<()> {
    w.write_int(to_int(runs.len())?);
    for run in runs {
        w.write_bool(run.font.is_some());
        if let Some(font) = &run.font {
            encode_font(w, font)?;
        }
        w.write_string(&run.text)?;
    }
    Ok(())
}

fn decode_rich_text(r: &mut RecordReader<'_>) -> Result<Vec<RichTextRun>> {
    let count = to_index(r.read_int()?, "rich text run count")?;
    // Each run takes at least five bytes; cap the preallocation by what is left.
    let mut runs = Vec::with_capacity(count.min(r.remaining() / 5));
    for _ in 0..count {
        let font = if r.read_bool()? { Some(decode_font(r)?) } else { None };
        let text = r.read_string()?;
        runs.push(RichTextRun { font, text });
    }
    Ok(runs)
}

fn encode_font(w: &mut RecordWriter, font: &StyleFont) -> Result<()> {
    w.write_float(font.size);
    w.write_string(&font.name)?;
    w.write_int(i64::from(font.family));
    w.write_int(i64::from(font.charset));
    w.write_string(&font.color)?;
    w.write_bool(font.bold);
    w.write_bool(font.italic);
    w.write_bool(font.underline);
    w.write_bool(font.strike);
    Ok(())
}

fn decode_font(r: &mut RecordReader<'_>) -> Result<StyleFont> {
    Ok(StyleFont {
        size: r.read_float()?,
        name: r.read_string()?,
        family: to_u32(r.read_int()?, "font family")?,
        charset: to_u32(r.read_int()?, "font charset")?,
        color: r.read_string()?,
        bold: r.read_bool()?,
        italic: r.read_bool()?,
        underline: r.read_bool()?,
        strike: r.read_bool()?,
    })
}

fn encode_style(w: &mut RecordWriter, style: &Style) -> Result<()> {
    let b = &style.border;
    for side in [
        &b.left,
        &b.left_color,
        &b.right,
        &b.right_color,
        &b.top,
        &b.top_color,
        &b.bottom,
        &b.bottom_color,
    ] {
        w.write_string(side)?;
    }

    w.write_string(&style.fill.pattern_type)?;
    w.write_string(&style.fill.fg_color)?;
    w.write_string(&style.fill.bg_color)?;

    encode_font(w, &style.font)?;

    let a = &style.alignment;
    w.write_opt_string(a.horizontal.as_deref())?;
    w.write_opt_string(a.vertical.as_deref())?;
    write_opt_u32(w, a.text_rotation);
    w.write_bool(a.wrap_text);
    write_opt_u32(w, a.indent);
    w.write_bool(a.shrink_to_fit);
    write_opt_u32(w, a.reading_order);

    w.write_bool(style.apply_border);
    w.write_bool(style.apply_fill);
    w.write_bool(style.apply_font);
    w.write_bool(style.apply_alignment);
    w.write_bool(style.named_style_index.is_some());
    if let Some(index) = style.named_style_index {
        w.write_int(to_int(index)?);
    }
    w.write_end_of_record();
    Ok(())
}

fn decode_style(r: &mut RecordReader<'_>) -> Result<Style> {
    let border = StyleBorder {
        left: r.read_string()?,
        left_color: r.read_string()?,
        right: r.read_string()?,
        right_color: r.read_string()?,
        top: r.read_string()?,
        top_color: r.read_string()?,
        bottom: r.read_string()?,
        bottom_color: r.read_string()?,
    };
    let fill = StyleFill {
        pattern_type: r.read_string()?,
        fg_color: r.read_string()?,
        bg_color: r.read_string()?,
    };
    let font = decode_font(r)?;
    let alignment = Alignment {
        horizontal: r.read_opt_string()?,
        vertical: r.read_opt_string()?,
        text_rotation: read_opt_u32(r, "text rotation")?,
        wrap_text: r.read_bool()?,
        indent: read_opt_u32(r, "indent")?,
        shrink_to_fit: r.read_bool()?,
        reading_order: read_opt_u32(r, "reading order")?,
    };
    let apply_border = r.read_bool()?;
    let apply_fill = r.read_bool()?;
    let apply_font = r.read_bool()?;
    let apply_alignment = r.read_bool()?;
    let named_style_index = if r.read_bool()? {
        Some(to_index(r.read_int()?, "named style index")?)
    } else {
        None
    };
    r.read_end_of_record()?;

    Ok(Style {
        border,
        fill,
        font,
        alignment,
        apply_border,
        apply_fill,
        apply_font,
        apply_alignment,
        named_style_index,
    })
}

fn encode_data_validation(w: &mut RecordWriter, dv: &DataValidation) -> Result<()> {
    w.write_bool(dv.allow_blank);
    w.write_bool(dv.show_dropdown);
    w.write_bool(dv.show_input_message);
    w.write_bool(dv.show_error_message);
    w.write_string(&dv.validation_type)?;
    w.write_string(&dv.operator)?;
    w.write_string(&dv.sqref)?;
    w.write_string(&dv.formula1)?;
    w.write_string(&dv.formula2)?;
    w.write_opt_string(dv.error_style.as_deref())?;
    w.write_opt_string(dv.error_title.as_deref())?;
    w.write_opt_string(dv.error.as_deref())?;
    w.write_opt_string(dv.prompt_title.as_deref())?;
    w.write_opt_string(dv.prompt.as_deref())?;
    w.write_end_of_record();
    Ok(())
}

fn decode_data_validation(r: &mut RecordReader<'_>) -> Result<DataValidation> {
    let dv = DataValidation {
        allow_blank: r.read_bool()?,
        show_dropdown: r.read_bool()?,
        show_input_message: r.read_bool()?,
        show_error_message: r.read_bool()?,
        validation_type: r.read_string()?,
        operator: r.read_string()?,
        sqref: r.read_string()?,
        formula1: r.read_string()?,
        formula2: r.read_string()?,
        error_style: r.read_opt_string()?,
        error_title: r.read_opt_string()?,
        error: r.read_opt_string()?,
        prompt_title: r.read_opt_string()?,
        prompt: r.read_opt_string()?,
    };
    r.read_end_of_record()?;
    Ok(dv)
}

fn write_opt_u32(w: &mut RecordWriter, value: Option<u32>) {
    w.write_bool(value.is_some());
    if let Some(v) = value {
        w.write_int(i64::from(v));
    }
}

fn read_opt_u32(r: &mut RecordReader<'_>, what: &str) -> Result<Option<u32>> {
    if r.read_bool()? {
        Ok(Some(to_u32(r.read_int()?, what)?))
    } else {
        Ok(None)
    }
}

#[inline]
fn to_int(value: usize) -> Result<i64> {
    i64::try_from(value)
        .map_err(|_| OoxmlError::Malformed(format!("{} does not fit a record int", value)))
}

#[inline]
fn to_index(value: i64, what: &str) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| OoxmlError::Malformed(format!("negative {}: {}", what, value)))
}

#[inline]
fn to_u32(value: i64, what: &str) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| OoxmlError::Malformed(format!("{} out of range: {}", what, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::error::ErrorKind;

    fn styled_cell() -> Cell {
        let style = Style {
            border: StyleBorder {
                left: "left".into(),
                left_color: "leftColor".into(),
                right: "right".into(),
                right_color: "rightColor".into(),
                top: "top".into(),
                top_color: "topColor".into(),
                bottom: "bottom".into(),
                bottom_color: "bottomColor".into(),
            },
            fill: StyleFill {
                pattern_type: "PatternType".into(),
                fg_color: "FgColor".into(),
                bg_color: "BgColor".into(),
            },
            font: StyleFont {
                size: 1.0,
                name: "Font".into(),
                family: 2,
                charset: 3,
                color: "Red".into(),
                bold: true,
                italic: true,
                underline: true,
                strike: false,
            },
            alignment: Alignment {
                horizontal: Some("left".into()),
                vertical: Some("top".into()),
                text_rotation: Some(90),
                wrap_text: true,
                indent: Some(1),
                shrink_to_fit: true,
                reading_order: None,
            },
            apply_border: true,
            apply_fill: true,
            apply_font: true,
            apply_alignment: true,
            named_style_index: Some(0),
        };

        let mut dv = DataValidation::new("type", "sqref");
        dv.show_input_message = true;
        dv.formula1 = "formula1".into();
        dv.formula2 = "formula1".into();
        dv.operator = "operator".into();
        dv.error_style = Some("errorstyle".into());
        dv.error_title = Some("errortitle".into());
        dv.error = Some("error".into());
        dv.prompt_title = Some("prompttitle".into());
        dv.prompt = Some("prompt".into());

        let mut cell = Cell::new(0);
        cell.set_value("value");
        cell.set_formula("formula");
        cell.set_style(Some(style));
        cell.set_num_fmt("numFmt");
        cell.set_date1904(true);
        cell.set_hidden(true);
        cell.merge(49, 50);
        cell.set_cell_type(CellType::Numeric);
        cell.set_data_validation(Some(dv));
        cell.set_hyperlink(Hyperlink {
            display_string: "displaystring".into(),
            link: "link".into(),
            tooltip: "tooltip".into(),
        });
        cell
    }

    fn encoded(cell: Option<&Cell>) -> Vec<u8> {
        let mut w = RecordWriter::new();
        encode_cell(&mut w, cell).unwrap();
        w.as_slice().to_vec()
    }

    #[test]
    fn test_row_record() {
        let row = RowRecord {
            hidden: true,
            height: 40.4,
            outline_level: 2,
            custom_height: true,
            num: 3,
            max_col: Some(5),
        };
        let mut w = RecordWriter::new();
        encode_row(&mut w, &row).unwrap();
        assert_eq!(w.len(), 1 + 8 + 8 + 1 + 8 + 8 + 1);
        assert_eq!(decode_row(w.as_slice()).unwrap(), row);
    }

    #[test]
    fn test_empty_row_has_no_max_col() {
        let mut w = RecordWriter::new();
        encode_row(&mut w, &RowRecord::default()).unwrap();
        assert_eq!(decode_row(w.as_slice()).unwrap().max_col, None);
    }

    #[test]
    fn test_nil_cell() {
        let data = encoded(None);
        assert_eq!(data, vec![1, crate::common::binary::END_OF_RECORD]);
        assert!(decode_cell(&data).unwrap().is_none());
    }

    #[test]
    fn test_styled_cell_with_validation() {
        let cell = styled_cell();
        let decoded = decode_cell(&encoded(Some(&cell))).unwrap().unwrap();
        assert_eq!(decoded, cell);
        assert!(!decoded.modified());
        assert_eq!(decoded.style(), cell.style());
        assert_eq!(decoded.data_validation(), cell.data_validation());
    }

    #[test]
    fn test_rich_text_runs() {
        let mut cell = Cell::new(4);
        cell.set_rich_text([
            RichTextRun::plain("plain "),
            RichTextRun {
                font: Some(StyleFont {
                    bold: true,
                    ..Default::default()
                }),
                text: "bold".into(),
            },
        ]);
        let decoded = decode_cell(&encoded(Some(&cell))).unwrap().unwrap();
        assert_eq!(decoded.rich_text(), cell.rich_text());
        assert_eq!(decoded.col(), 4);
    }

    #[test]
    fn test_truncated_record_is_malformed() {
        let data = encoded(Some(&styled_cell()));
        for len in [1, 10, data.len() / 2, data.len() - 1] {
            let err = decode_cell(&data[..len]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Malformed, "truncated at {len}");
        }
    }

    #[test]
    fn test_misplaced_end_marker_is_malformed() {
        let mut data = encoded(None);
        data[1] = 0;
        assert_eq!(decode_cell(&data).unwrap_err().kind(), ErrorKind::Malformed);
    }

    #[test]
    fn test_unknown_cell_type_is_malformed() {
        let mut cell = Cell::new(0);
        cell.set_value("x");
        let mut data = encoded(Some(&cell));
        // nil flag, value, formula, has-style, num fmt, date1904, hidden, two merges
        let tag_offset = 1 + (4 + 1) + 4 + 1 + 4 + 1 + 1 + 8 + 8;
        data[tag_offset] = 42;
        assert_eq!(decode_cell(&data).unwrap_err().kind(), ErrorKind::Malformed);
    }

    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_cell(col: usize) -> impl Strategy<Value = Option<Cell>> {
            prop_oneof![
                1 => Just(None),
                4 => (".{0,12}", ".{0,8}", any::<bool>(), -3i64..3, 0i64..7).prop_map(
                    move |(value, formula, hidden, merge, tag)| {
                        let mut cell = Cell::new(col);
                        cell.set_value(value);
                        cell.set_formula(formula);
                        cell.set_hidden(hidden);
                        cell.merge(merge, -merge);
                        cell.set_cell_type(CellType::from_tag(tag).unwrap());
                        Some(cell)
                    }
                ),
            ]
        }

        fn arb_row() -> impl Strategy<Value = Vec<Option<Cell>>> {
            (0usize..=50).prop_flat_map(|n| (0..n).map(arb_cell).collect::<Vec<_>>())
        }

        proptest! {
            #[test]
            fn row_of_cells_roundtrips(mut cells in arb_row()) {
                // Always include a nil cell and a fully populated one.
                cells.push(None);
                let mut full = styled_cell();
                full.set_rich_text([RichTextRun::plain("run")]);
                cells.push(Some(full));

                let row = RowRecord {
                    hidden: false,
                    height: 15.0,
                    outline_level: 1,
                    custom_height: false,
                    num: 12,
                    max_col: cells.len().checked_sub(1),
                };
                let mut w = RecordWriter::new();
                encode_row(&mut w, &row).unwrap();
                prop_assert_eq!(decode_row(w.as_slice()).unwrap(), row);

                for cell in &cells {
                    let decoded = decode_cell(&encoded(cell.as_ref())).unwrap();
                    prop_assert_eq!(decoded.as_ref(), cell.as_ref());
                }
            }
        }
    }
}
