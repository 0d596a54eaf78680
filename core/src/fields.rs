//! Single-cell field writers and the placeholder/highlight policy.
//!
//! Absent or empty values are never written as blanks: the cell gets a
//! literal placeholder token plus the needs-attention highlight so a
//! reviewer can find every incomplete field without cross-checking the
//! source document. Each writer touches exactly one cell and returns
//! whether it flagged the cell.

use crate::dates;
use crate::grid::{CellValue, Grid};
use crate::style::Style;

/// Literal marker written into any cell whose source value is missing.
pub const PLACEHOLDER: &str = "【待补充】";
/// Delimiter used when rendering list fields into one cell.
pub const LIST_DELIMITER: &str = "、";
/// Localized boolean tokens.
pub const YES: &str = "是";
pub const NO: &str = "否";

/// Write an optional scalar. Returns `true` if the placeholder was used.
pub fn write_text(grid: &mut Grid, row: u32, col: u32, value: Option<&str>) -> bool {
    match value {
        Some(text) if !text.trim().is_empty() => {
            grid.set_value(row, col, CellValue::Text(text.to_string()));
            false
        }
        _ => {
            write_placeholder(grid, row, col);
            true
        }
    }
}

/// Write an optional date field, canonicalizing recognized forms first.
pub fn write_date(grid: &mut Grid, row: u32, col: u32, value: Option<&str>) -> bool {
    let normalized = dates::normalize_opt(value);
    write_text(grid, row, col, normalized.as_deref())
}

/// Write a list field joined with the fixed delimiter; an empty list is
/// treated like an absent value.
pub fn write_list(grid: &mut Grid, row: u32, col: u32, items: &[String]) -> bool {
    if items.is_empty() {
        write_placeholder(grid, row, col);
        return true;
    }
    grid.set_value(row, col, CellValue::Text(items.join(LIST_DELIMITER)));
    false
}

/// Write an optional boolean as a localized yes/no token.
pub fn write_bool(grid: &mut Grid, row: u32, col: u32, value: Option<bool>) -> bool {
    match value {
        Some(flag) => {
            let token = if flag { YES } else { NO };
            grid.set_value(row, col, CellValue::Text(token.to_string()));
            false
        }
        None => {
            write_placeholder(grid, row, col);
            true
        }
    }
}

fn write_placeholder(grid: &mut Grid, row: u32, col: u32) {
    grid.set_value(row, col, CellValue::Text(PLACEHOLDER.to_string()));
    let mut style = grid.style(row, col).cloned().unwrap_or_else(Style::default);
    style.apply_highlight();
    grid.set_style(row, col, style);
}
