//! Template document loading.
//!
//! Parses the pristine XLSX template (the first worksheet's cell
//! values and style indices, the style table, shared strings, and
//! merged ranges) into a [`Grid`] ready for composition. Only the
//! attributes the compositor reproduces (font bold/color, solid fill,
//! box border, horizontal centering, number format) are carried; the
//! template contract does not use anything richer.

use crate::addressing::{address_to_index, range_to_indices};
use crate::container::{ContainerError, OpcContainer};
use crate::grid::{CellValue, Grid, GridError, MergeRect};
use crate::style::Style;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::io::{Read, Seek};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TemplateError {
    #[error("template not found: {path}")]
    NotFound { path: String },
    #[error("container error: {0}")]
    Container(#[from] ContainerError),
    #[error("XML parse error: {0}")]
    Xml(String),
    #[error("invalid cell address: {0}")]
    InvalidAddress(String),
    #[error("shared string index {0} out of bounds")]
    SharedStringOutOfBounds(usize),
    #[error("workbook.xml missing or unreadable")]
    WorkbookXmlMissing,
    #[error("template has no worksheet")]
    WorksheetMissing,
    #[error("inconsistent template merges: {0}")]
    Merge(#[from] GridError),
}

/// Load the template grid from a file on disk.
pub fn load_template(path: impl AsRef<Path>) -> Result<Grid, TemplateError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            TemplateError::NotFound {
                path: path.display().to_string(),
            }
        } else {
            TemplateError::Container(ContainerError::Io(e))
        }
    })?;
    load_template_from_reader(file)
}

/// Load the template grid from any seekable reader (in-memory bytes in
/// tests, a file in production).
pub fn load_template_from_reader<R: Read + Seek + 'static>(
    reader: R,
) -> Result<Grid, TemplateError> {
    let mut container = OpcContainer::open_from_reader(reader)?;

    let shared_strings = match container.read_part_optional("xl/sharedStrings.xml")? {
        Some(bytes) => parse_shared_strings(&bytes)?,
        None => Vec::new(),
    };

    let styles = match container.read_part_optional("xl/styles.xml")? {
        Some(bytes) => parse_styles(&bytes)?,
        None => Vec::new(),
    };

    let workbook_bytes = container
        .read_part("xl/workbook.xml")
        .map_err(|_| TemplateError::WorkbookXmlMissing)?;
    let first_sheet = parse_first_sheet_descriptor(&workbook_bytes)?;

    let relationships = match container.read_part_optional("xl/_rels/workbook.xml.rels")? {
        Some(bytes) => parse_relationships(&bytes)?,
        None => HashMap::new(),
    };

    let target = resolve_sheet_target(&first_sheet, &relationships);
    let sheet_bytes = container
        .read_part(&target)
        .map_err(|_| TemplateError::WorksheetMissing)?;

    parse_sheet_xml(&sheet_bytes, &shared_strings, &styles)
}

struct SheetDescriptor {
    rel_id: Option<String>,
    sheet_id: Option<u32>,
}

fn parse_first_sheet_descriptor(xml: &[u8]) -> Result<SheetDescriptor, TemplateError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"sheet" => {
                let rel_id = get_attr_value(&e, b"r:id")?;
                let sheet_id = get_attr_value(&e, b"sheetId")?.and_then(|v| v.parse().ok());
                return Ok(SheetDescriptor { rel_id, sheet_id });
            }
            Ok(Event::Eof) => return Err(TemplateError::WorksheetMissing),
            Err(e) => return Err(TemplateError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }
}

fn parse_relationships(xml: &[u8]) -> Result<HashMap<String, String>, TemplateError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut map = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"Relationship" => {
                let id = get_attr_value(&e, b"Id")?;
                let target = get_attr_value(&e, b"Target")?;
                let rel_type = get_attr_value(&e, b"Type")?;
                if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type)
                    && rel_type.contains("worksheet")
                {
                    map.insert(id, target);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(TemplateError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(map)
}

fn resolve_sheet_target(sheet: &SheetDescriptor, relationships: &HashMap<String, String>) -> String {
    if let Some(rel_id) = &sheet.rel_id
        && let Some(target) = relationships.get(rel_id)
    {
        return normalize_target(target);
    }

    let guessed = sheet
        .sheet_id
        .map(|id| format!("xl/worksheets/sheet{id}.xml"))
        .unwrap_or_else(|| "xl/worksheets/sheet1.xml".to_string());
    normalize_target(&guessed)
}

fn normalize_target(target: &str) -> String {
    let trimmed = target.trim_start_matches('/');
    if trimmed.starts_with("xl/") {
        trimmed.to_string()
    } else {
        format!("xl/{trimmed}")
    }
}

fn parse_shared_strings(xml: &[u8]) -> Result<Vec<String>, TemplateError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();
    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_si = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"si" => {
                current.clear();
                in_si = true;
            }
            Ok(Event::Start(e)) if e.name().as_ref() == b"t" && in_si => {
                let text = reader
                    .read_text(e.name())
                    .map_err(|e| TemplateError::Xml(e.to_string()))?
                    .into_owned();
                current.push_str(&text);
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"si" => {
                strings.push(current.clone());
                in_si = false;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(TemplateError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(strings)
}

/// Parse `styles.xml` into the cell-format table (`cellXfs` order).
fn parse_styles(xml: &[u8]) -> Result<Vec<Style>, TemplateError> {
    #[derive(Default, Clone)]
    struct Font {
        bold: bool,
        color: Option<u32>,
    }

    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    let mut fonts: Vec<Font> = Vec::new();
    let mut fills: Vec<Option<u32>> = Vec::new();
    let mut borders: Vec<bool> = Vec::new();
    let mut num_formats: HashMap<u32, String> = HashMap::new();
    let mut xfs: Vec<Style> = Vec::new();

    #[derive(PartialEq)]
    enum Section {
        None,
        Fonts,
        Fills,
        Borders,
        CellXfs,
    }
    let mut section = Section::None;
    let mut in_cell_xfs = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                match e.name().as_ref() {
                    b"fonts" => section = Section::Fonts,
                    b"fills" => section = Section::Fills,
                    b"borders" => section = Section::Borders,
                    b"cellXfs" => {
                        section = Section::CellXfs;
                        in_cell_xfs = true;
                    }
                    b"font" if section == Section::Fonts => fonts.push(Font::default()),
                    b"b" if section == Section::Fonts => {
                        if let Some(font) = fonts.last_mut() {
                            font.bold = true;
                        }
                    }
                    b"color" if section == Section::Fonts => {
                        if let Some(rgb) = get_attr_value(&e, b"rgb")?.and_then(parse_rgb) {
                            if let Some(font) = fonts.last_mut() {
                                font.color = Some(rgb);
                            }
                        }
                    }
                    b"fill" if section == Section::Fills => fills.push(None),
                    b"fgColor" if section == Section::Fills => {
                        if let Some(rgb) = get_attr_value(&e, b"rgb")?.and_then(parse_rgb) {
                            if let Some(fill) = fills.last_mut() {
                                *fill = Some(rgb);
                            }
                        }
                    }
                    b"border" if section == Section::Borders => borders.push(false),
                    b"left" | b"right" | b"top" | b"bottom" if section == Section::Borders => {
                        if get_attr_value(&e, b"style")?.is_some() {
                            if let Some(border) = borders.last_mut() {
                                *border = true;
                            }
                        }
                    }
                    b"numFmt" => {
                        let id = get_attr_value(&e, b"numFmtId")?.and_then(|v| v.parse().ok());
                        let code = get_attr_value(&e, b"formatCode")?;
                        if let (Some(id), Some(code)) = (id, code) {
                            num_formats.insert(id, code);
                        }
                    }
                    b"xf" if in_cell_xfs => {
                        let font_id: Option<usize> =
                            get_attr_value(&e, b"fontId")?.and_then(|v| v.parse().ok());
                        let fill_id: Option<usize> =
                            get_attr_value(&e, b"fillId")?.and_then(|v| v.parse().ok());
                        let border_id: Option<usize> =
                            get_attr_value(&e, b"borderId")?.and_then(|v| v.parse().ok());
                        let num_fmt_id: Option<u32> =
                            get_attr_value(&e, b"numFmtId")?.and_then(|v| v.parse().ok());

                        let font = font_id.and_then(|id| fonts.get(id).cloned());
                        xfs.push(Style {
                            bold: font.as_ref().is_some_and(|f| f.bold),
                            font_color: font.as_ref().and_then(|f| f.color),
                            fill_color: fill_id.and_then(|id| fills.get(id).copied().flatten()),
                            boxed: border_id
                                .and_then(|id| borders.get(id).copied())
                                .unwrap_or(false),
                            centered: false,
                            num_format: num_fmt_id.and_then(|id| num_formats.get(&id).cloned()),
                        });
                    }
                    b"alignment" if in_cell_xfs => {
                        if get_attr_value(&e, b"horizontal")?.as_deref() == Some("center")
                            && let Some(style) = xfs.last_mut()
                        {
                            style.centered = true;
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"fonts" | b"fills" | b"borders" => section = Section::None,
                b"cellXfs" => {
                    section = Section::None;
                    in_cell_xfs = false;
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(TemplateError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(xfs)
}

fn parse_rgb(raw: String) -> Option<u32> {
    u32::from_str_radix(raw.trim(), 16).ok().map(|v| v & 0xFF_FFFF)
}

fn parse_sheet_xml(
    xml: &[u8],
    shared_strings: &[String],
    styles: &[Style],
) -> Result<Grid, TemplateError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();

    let mut dimension_hint: Option<(u32, u32)> = None;
    let mut cells: Vec<ParsedCell> = Vec::new();
    let mut merges: Vec<MergeRect> = Vec::new();
    let mut max_row: u32 = 0;
    let mut max_col: u32 = 0;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"dimension" => {
                if let Some(r) = get_attr_value(&e, b"ref")? {
                    dimension_hint = dimension_from_ref(&r);
                }
            }
            Ok(Event::Start(e)) if e.name().as_ref() == b"c" => {
                let cell = parse_cell(&mut reader, e, shared_strings)?;
                max_row = max_row.max(cell.row);
                max_col = max_col.max(cell.col);
                cells.push(cell);
            }
            Ok(Event::Empty(e)) if e.name().as_ref() == b"c" => {
                let cell = parse_empty_cell(&e)?;
                max_row = max_row.max(cell.row);
                max_col = max_col.max(cell.col);
                cells.push(cell);
            }
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"mergeCell" => {
                let reference = get_attr_value(&e, b"ref")?
                    .ok_or_else(|| TemplateError::Xml("mergeCell missing ref".into()))?;
                let (row0, col0, row1, col1) = range_to_indices(&reference)
                    .ok_or_else(|| TemplateError::InvalidAddress(reference.clone()))?;
                merges.push(MergeRect::new(row0, col0, row1, col1));
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(TemplateError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    let mut nrows = dimension_hint.map(|(r, _)| r).unwrap_or(0);
    let mut ncols = dimension_hint.map(|(_, c)| c).unwrap_or(0);
    if !cells.is_empty() {
        nrows = nrows.max(max_row + 1);
        ncols = ncols.max(max_col + 1);
    }

    let mut grid = Grid::new(nrows, ncols);
    for cell in cells {
        if let Some(value) = cell.value {
            grid.set_value(cell.row, cell.col, value);
        }
        if let Some(style_idx) = cell.style
            && let Some(style) = styles.get(style_idx)
        {
            grid.set_style(cell.row, cell.col, style.clone());
        }
    }
    for merge in merges {
        grid.merge_range(merge)?;
    }

    Ok(grid)
}

struct ParsedCell {
    row: u32,
    col: u32,
    value: Option<CellValue>,
    style: Option<usize>,
}

fn cell_coords(start: &BytesStart<'_>) -> Result<(u32, u32), TemplateError> {
    let address_raw = get_attr_value(start, b"r")?
        .ok_or_else(|| TemplateError::Xml("cell missing address".into()))?;
    address_to_index(&address_raw).ok_or(TemplateError::InvalidAddress(address_raw))
}

fn parse_empty_cell(start: &BytesStart<'_>) -> Result<ParsedCell, TemplateError> {
    let (row, col) = cell_coords(start)?;
    let style = get_attr_value(start, b"s")?.and_then(|v| v.parse().ok());
    Ok(ParsedCell {
        row,
        col,
        value: None,
        style,
    })
}

fn parse_cell(
    reader: &mut Reader<&[u8]>,
    start: BytesStart,
    shared_strings: &[String],
) -> Result<ParsedCell, TemplateError> {
    let (row, col) = cell_coords(&start)?;
    let cell_type = get_attr_value(&start, b"t")?;
    let style = get_attr_value(&start, b"s")?.and_then(|v| v.parse().ok());

    let mut value_text: Option<String> = None;
    let mut inline_text: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"v" => {
                let text = reader
                    .read_text(e.name())
                    .map_err(|e| TemplateError::Xml(e.to_string()))?
                    .into_owned();
                value_text = Some(text);
            }
            Ok(Event::Start(e)) if e.name().as_ref() == b"is" => {
                inline_text = Some(read_inline_string(reader)?);
            }
            Ok(Event::End(e)) if e.name().as_ref() == start.name().as_ref() => break,
            Ok(Event::Eof) => {
                return Err(TemplateError::Xml("unexpected EOF inside cell".into()));
            }
            Err(e) => return Err(TemplateError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    let value = match inline_text {
        Some(text) => Some(CellValue::Text(text)),
        None => convert_value(value_text.as_deref(), cell_type.as_deref(), shared_strings)?,
    };

    Ok(ParsedCell {
        row,
        col,
        value,
        style,
    })
}

fn read_inline_string(reader: &mut Reader<&[u8]>) -> Result<String, TemplateError> {
    let mut buf = Vec::new();
    let mut value = String::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"t" => {
                let text = reader
                    .read_text(e.name())
                    .map_err(|e| TemplateError::Xml(e.to_string()))?
                    .into_owned();
                value.push_str(&text);
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"is" => break,
            Ok(Event::Eof) => {
                return Err(TemplateError::Xml(
                    "unexpected EOF inside inline string".into(),
                ));
            }
            Err(e) => return Err(TemplateError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }
    Ok(value)
}

fn convert_value(
    value_text: Option<&str>,
    cell_type: Option<&str>,
    shared_strings: &[String],
) -> Result<Option<CellValue>, TemplateError> {
    let raw = match value_text {
        Some(t) => t,
        None => return Ok(None),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match cell_type {
        Some("s") => {
            let idx = trimmed
                .parse::<usize>()
                .map_err(|e| TemplateError::Xml(e.to_string()))?;
            let text = shared_strings
                .get(idx)
                .ok_or(TemplateError::SharedStringOutOfBounds(idx))?;
            Ok(Some(CellValue::Text(text.clone())))
        }
        Some("b") => Ok(match trimmed {
            "1" => Some(CellValue::Bool(true)),
            "0" => Some(CellValue::Bool(false)),
            _ => None,
        }),
        Some("str") | Some("inlineStr") => Ok(Some(CellValue::Text(raw.to_string()))),
        _ => {
            if let Ok(n) = trimmed.parse::<f64>() {
                Ok(Some(CellValue::Number(n)))
            } else {
                Ok(Some(CellValue::Text(trimmed.to_string())))
            }
        }
    }
}

fn dimension_from_ref(reference: &str) -> Option<(u32, u32)> {
    let (_, _, end_row, end_col) = range_to_indices(reference)?;
    Some((end_row + 1, end_col + 1))
}

fn get_attr_value(element: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, TemplateError> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| TemplateError::Xml(e.to_string()))?;
        if attr.key.as_ref() == key {
            return Ok(Some(
                attr.unescape_value()
                    .map_err(|e| TemplateError::Xml(e.to_string()))?
                    .into_owned(),
            ));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_value_variants() {
        let shared = vec!["姓名".to_string()];
        assert_eq!(
            convert_value(Some("0"), Some("s"), &shared).unwrap(),
            Some(CellValue::Text("姓名".to_string()))
        );
        assert_eq!(
            convert_value(Some("1"), Some("b"), &shared).unwrap(),
            Some(CellValue::Bool(true))
        );
        assert_eq!(
            convert_value(Some("42.5"), None, &shared).unwrap(),
            Some(CellValue::Number(42.5))
        );
        assert!(matches!(
            convert_value(Some("7"), Some("s"), &shared),
            Err(TemplateError::SharedStringOutOfBounds(7))
        ));
    }

    #[test]
    fn styles_parse_fonts_fills_borders_alignment() {
        let xml = br#"<?xml version="1.0"?>
<styleSheet>
  <numFmts count="1"><numFmt numFmtId="164" formatCode="yyyy-mm-dd"/></numFmts>
  <fonts count="2">
    <font><sz val="11"/></font>
    <font><b/><color rgb="FFFF0000"/></font>
  </fonts>
  <fills count="3">
    <fill><patternFill patternType="none"/></fill>
    <fill><patternFill patternType="gray125"/></fill>
    <fill><patternFill patternType="solid"><fgColor rgb="FFFFFF00"/></patternFill></fill>
  </fills>
  <borders count="2">
    <border><left/><right/><top/><bottom/></border>
    <border><left style="thin"/><right style="thin"/><top style="thin"/><bottom style="thin"/></border>
  </borders>
  <cellXfs count="3">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
    <xf numFmtId="164" fontId="1" fillId="2" borderId="1" applyAlignment="1">
      <alignment horizontal="center" vertical="center"/>
    </xf>
    <xf numFmtId="0" fontId="0" fillId="0" borderId="1"/>
  </cellXfs>
</styleSheet>"#;

        let styles = parse_styles(xml).unwrap();
        assert_eq!(styles.len(), 3);
        assert_eq!(styles[0], Style::default());

        let rich = &styles[1];
        assert!(rich.bold);
        assert_eq!(rich.font_color, Some(0xFF0000));
        assert_eq!(rich.fill_color, Some(0xFFFF00));
        assert!(rich.boxed);
        assert!(rich.centered);
        assert_eq!(rich.num_format.as_deref(), Some("yyyy-mm-dd"));

        assert!(styles[2].boxed);
        assert!(!styles[2].centered);
    }

    #[test]
    fn sheet_parse_reads_values_styles_and_merges() {
        let styles = vec![Style::default(), Style {
            bold: true,
            ..Style::default()
        }];
        let shared = vec!["工作经历".to_string()];
        let xml = br#"<?xml version="1.0"?>
<worksheet>
  <dimension ref="A1:F44"/>
  <sheetData>
    <row r="31"><c r="A31" s="1" t="s"><v>0</v></c><c r="B31" s="0"/></row>
    <row r="33"><c r="A33"><v>2020</v></c></row>
  </sheetData>
  <mergeCells count="2"><mergeCell ref="A31:F31"/><mergeCell ref="E32:F32"/></mergeCells>
</worksheet>"#;

        let grid = parse_sheet_xml(xml, &shared, &styles).unwrap();
        assert_eq!((grid.nrows(), grid.ncols()), (44, 6));
        assert_eq!(
            grid.value(30, 0),
            Some(&CellValue::Text("工作经历".to_string()))
        );
        assert!(grid.style(30, 0).unwrap().bold);
        assert!(grid.style(30, 1).is_some());
        assert_eq!(grid.value(32, 0), Some(&CellValue::Number(2020.0)));
        assert_eq!(grid.merges().len(), 2);
        assert!(grid.merges().contains(&MergeRect::new(30, 0, 30, 5)));
    }
}
