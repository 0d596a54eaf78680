//! Writing a composed grid back out as an XLSX document.
//!
//! Rendering goes through `rust_xlsxwriter`: merges first (the writer
//! owns blanking the covered cells), then every remaining cell with its
//! mapped format. Saving to a path buffers the whole document in memory
//! and writes it in one call, so a failed save never leaves a partial
//! file behind.

use crate::grid::{CellValue, Grid};
use crate::style::Style;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, XlsxError};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SaveError {
    #[error("XLSX write error: {0}")]
    Xlsx(#[from] XlsxError),
    #[error("I/O error writing '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Render `grid` to XLSX bytes.
pub fn save_to_buffer(grid: &Grid) -> Result<Vec<u8>, SaveError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let mut covered: HashSet<(u32, u32)> = HashSet::new();

    for merge in grid.merges() {
        // A degenerate rectangle is just a cell.
        if merge.row0 == merge.row1 && merge.col0 == merge.col1 {
            continue;
        }
        let format = format_for(grid.style(merge.row0, merge.col0));
        let value = grid.value(merge.row0, merge.col0);
        let text = value.and_then(CellValue::as_text).unwrap_or("");
        worksheet.merge_range(
            merge.row0,
            merge.col0 as u16,
            merge.row1,
            merge.col1 as u16,
            text,
            &format,
        )?;
        // Non-text top-left values overwrite the empty merge string.
        match value {
            Some(CellValue::Text(_)) | None => {}
            Some(value) => write_value(worksheet, merge.row0, merge.col0 as u16, value, &format)?,
        }
        for row in merge.row0..=merge.row1 {
            for col in merge.col0..=merge.col1 {
                covered.insert((row, col));
            }
        }
    }

    for row in 0..grid.nrows() {
        for col in 0..grid.ncols() {
            if covered.contains(&(row, col)) {
                continue;
            }
            let style = grid.style(row, col);
            let value = grid.value(row, col);
            match (value, style) {
                (Some(value), style) => {
                    let format = format_for(style);
                    write_value(worksheet, row, col as u16, value, &format)?;
                }
                (None, Some(style)) => {
                    // Styled blank. Keeps borders and fills visible on
                    // rows whose values were cleared.
                    worksheet.write_blank(row, col as u16, &format_for(Some(style)))?;
                }
                (None, None) => {}
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Render `grid` and write it to `path`.
pub fn save_grid(grid: &Grid, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let path = path.as_ref();
    let bytes = save_to_buffer(grid)?;
    std::fs::write(path, bytes).map_err(|source| SaveError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn write_value(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    format: &Format,
) -> Result<(), XlsxError> {
    match value {
        CellValue::Text(s) => worksheet.write_string_with_format(row, col, s, format)?,
        CellValue::Number(n) => worksheet.write_number_with_format(row, col, *n, format)?,
        CellValue::Bool(b) => worksheet.write_boolean_with_format(row, col, *b, format)?,
    };
    Ok(())
}

fn format_for(style: Option<&Style>) -> Format {
    let Some(style) = style else {
        return Format::new();
    };
    let mut format = Format::new();
    if style.bold {
        format = format.set_bold();
    }
    if let Some(rgb) = style.font_color {
        format = format.set_font_color(Color::RGB(rgb));
    }
    if let Some(rgb) = style.fill_color {
        format = format.set_background_color(Color::RGB(rgb));
    }
    if style.boxed {
        format = format.set_border(FormatBorder::Thin);
    }
    if style.centered {
        format = format.set_align(FormatAlign::Center);
    }
    if let Some(num_format) = &style.num_format {
        format = format.set_num_format(num_format);
    }
    format
}
