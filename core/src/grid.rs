//! The in-memory grid model for one template document.
//!
//! A [`Grid`] holds a sparse 2D map of cells (value + optional style),
//! a set of non-overlapping merged rectangles, and its bounding row and
//! column counts. All structural mutation flows through this module so
//! the merge invariants hold after any insert:
//!
//! - a merge rectangle entirely above an insertion point is unchanged,
//! - a merge rectangle starting at or below it shifts by exactly the
//!   inserted row count,
//! - a merge rectangle straddling the insertion point is rejected
//!   before any mutation takes place.

use crate::addressing::indices_to_range;
use crate::style::Style;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GridError {
    #[error("merge rectangle {merge} straddles row insertion at row index {row}")]
    MergeStraddlesInsert { row: u32, merge: String },
    #[error("merge rectangle {merge} overlaps an existing merge")]
    MergeOverlap { merge: String },
}

/// A rectangular merged range, zero-based, corners inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRect {
    pub row0: u32,
    pub col0: u32,
    pub row1: u32,
    pub col1: u32,
}

impl MergeRect {
    pub fn new(row0: u32, col0: u32, row1: u32, col1: u32) -> MergeRect {
        debug_assert!(row0 <= row1 && col0 <= col1, "corners must be ordered");
        MergeRect {
            row0,
            col0,
            row1,
            col1,
        }
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        row >= self.row0 && row <= self.row1 && col >= self.col0 && col <= self.col1
    }

    pub fn intersects(&self, other: &MergeRect) -> bool {
        self.row0 <= other.row1
            && other.row0 <= self.row1
            && self.col0 <= other.col1
            && other.col0 <= self.col1
    }

    pub fn intersects_rows(&self, first: u32, last: u32) -> bool {
        self.row0 <= last && first <= self.row1
    }

    pub fn to_a1(&self) -> String {
        indices_to_range(self.row0, self.col0, self.row1, self.col1)
    }
}

impl std::fmt::Display for MergeRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_a1())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        if let CellValue::Text(s) = self {
            Some(s)
        } else {
            None
        }
    }
}

/// A single cell: value plus optional explicit style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    pub value: Option<CellValue>,
    pub style: Option<Style>,
}

/// Mutable document state for one composition run.
///
/// # Invariants
///
/// All cells satisfy `row < nrows` and `col < ncols`; no two merge
/// rectangles overlap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    nrows: u32,
    ncols: u32,
    cells: HashMap<(u32, u32), Cell>,
    merges: Vec<MergeRect>,
}

impl Grid {
    pub fn new(nrows: u32, ncols: u32) -> Grid {
        Grid {
            nrows,
            ncols,
            cells: HashMap::new(),
            merges: Vec::new(),
        }
    }

    pub fn nrows(&self) -> u32 {
        self.nrows
    }

    pub fn ncols(&self) -> u32 {
        self.ncols
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    pub fn value(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.cells.get(&(row, col)).and_then(|c| c.value.as_ref())
    }

    pub fn style(&self, row: u32, col: u32) -> Option<&Style> {
        self.cells.get(&(row, col)).and_then(|c| c.style.as_ref())
    }

    pub fn set_value(&mut self, row: u32, col: u32, value: CellValue) {
        self.grow_to(row, col);
        self.cells.entry((row, col)).or_default().value = Some(value);
    }

    /// Clear a cell's value, leaving its style in place.
    pub fn clear_value(&mut self, row: u32, col: u32) {
        if let Some(cell) = self.cells.get_mut(&(row, col)) {
            cell.value = None;
        }
    }

    pub fn set_style(&mut self, row: u32, col: u32, style: Style) {
        self.grow_to(row, col);
        self.cells.entry((row, col)).or_default().style = Some(style);
    }

    /// Copy the source cell's style (if any) onto the destination cell.
    /// The copy is by value; later edits to either are independent.
    pub fn copy_style(&mut self, src_row: u32, src_col: u32, dst_row: u32, dst_col: u32) {
        let style = self
            .cells
            .get(&(src_row, src_col))
            .and_then(|c| c.style.clone());
        if let Some(style) = style {
            self.set_style(dst_row, dst_col, style);
        }
    }

    /// Copy the styles of one whole row onto another across `ncols` columns.
    pub fn copy_row_style(&mut self, src_row: u32, dst_row: u32, ncols: u32) {
        for col in 0..ncols {
            self.copy_style(src_row, col, dst_row, col);
        }
    }

    pub fn merges(&self) -> &[MergeRect] {
        &self.merges
    }

    /// Register a merged rectangle. Overlapping an existing rectangle
    /// is an error; the merge set is left unchanged on failure.
    pub fn merge_range(&mut self, rect: MergeRect) -> Result<(), GridError> {
        if self.merges.iter().any(|m| m.intersects(&rect)) {
            return Err(GridError::MergeOverlap {
                merge: rect.to_a1(),
            });
        }
        self.grow_to(rect.row1, rect.col1);
        self.merges.push(rect);
        Ok(())
    }

    /// Remove every merge rectangle intersecting the inclusive row span
    /// `[first, last]`. Returns how many were removed.
    pub fn unmerge_rows(&mut self, first: u32, last: u32) -> usize {
        let before = self.merges.len();
        self.merges.retain(|m| !m.intersects_rows(first, last));
        before - self.merges.len()
    }

    /// Remove any merge rectangle containing the given row.
    pub fn unmerge_containing_row(&mut self, row: u32) -> usize {
        self.unmerge_rows(row, row)
    }

    /// Remove merge rectangles starting on `row` for which `pred`
    /// holds. Used by header repair after a structural insertion.
    pub fn unmerge_on_row_where(
        &mut self,
        row: u32,
        pred: impl Fn(&MergeRect) -> bool,
    ) -> usize {
        let before = self.merges.len();
        self.merges.retain(|m| !(m.row0 == row && pred(m)));
        before - self.merges.len()
    }

    /// Insert `count` blank rows at row index `at`.
    ///
    /// Every cell at `row >= at` moves down by `count`, as does every
    /// merge rectangle with `row0 >= at`. Rectangles fully above `at`
    /// are untouched. A rectangle straddling `at` cannot be repaired
    /// mechanically; the insert is rejected with the grid unchanged.
    pub fn insert_rows(&mut self, at: u32, count: u32) -> Result<(), GridError> {
        if count == 0 {
            return Ok(());
        }

        if let Some(straddler) = self
            .merges
            .iter()
            .find(|m| m.row0 < at && at <= m.row1)
        {
            return Err(GridError::MergeStraddlesInsert {
                row: at,
                merge: straddler.to_a1(),
            });
        }

        let mut shifted = HashMap::with_capacity(self.cells.len());
        for ((row, col), cell) in self.cells.drain() {
            let row = if row >= at { row + count } else { row };
            shifted.insert((row, col), cell);
        }
        self.cells = shifted;

        for merge in &mut self.merges {
            if merge.row0 >= at {
                merge.row0 += count;
                merge.row1 += count;
            }
        }

        self.nrows = self.nrows.max(at) + count;
        Ok(())
    }

    fn grow_to(&mut self, row: u32, col: u32) {
        self.nrows = self.nrows.max(row + 1);
        self.ncols = self.ncols.max(col + 1);
    }
}
