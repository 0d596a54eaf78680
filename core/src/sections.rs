//! Repeating-section expansion.
//!
//! A repeating section is a template region pre-authored with a fixed
//! number of example rows (`example_rows`, K) whose data must match a
//! record list of length N. Growth inserts rows and advances the shared
//! offset immediately; shrinkage blanks the unused trailing rows in
//! place so later anchors stay valid without further offset churn.

use crate::grid::{Grid, GridError};
use crate::layout::{Anchor, LayoutContext};

/// Geometry of one repeating section in the pristine template.
#[derive(Debug, Clone, Copy)]
pub struct SectionLayout {
    /// First data row of the section.
    pub data_anchor: Anchor,
    /// Example rows the template pre-authors (K).
    pub example_rows: u32,
    /// Width of the section's data region in columns.
    pub columns: u32,
}

/// Reconcile the section's row count with `n` record items.
///
/// - `n > K`: inserts `n - K` rows after the last example row, copying
///   its style into each inserted row, and advances `ctx` before
///   returning so every later anchor resolution sees the new layout.
/// - `n < K` (including `n = 0`): blanks the unused trailing template
///   rows (values cleared, no highlight) without deleting them.
///
/// Any merge rectangle the template authored across the data region is
/// removed, because each row now holds independent values. Returns the
/// resolved first data row.
pub fn expand(
    grid: &mut Grid,
    ctx: &mut LayoutContext,
    layout: &SectionLayout,
    n: u32,
) -> Result<u32, GridError> {
    let start = ctx.resolve(layout.data_anchor);
    let k = layout.example_rows;

    if n > k {
        let inserted = n - k;
        grid.insert_rows(start + k, inserted)?;
        let template_row = start + k - 1;
        for i in 0..inserted {
            grid.copy_row_style(template_row, start + k + i, layout.columns);
        }
        ctx.advance(inserted);
    }

    let region_rows = n.max(k);
    if region_rows > 0 {
        grid.unmerge_rows(start, start + region_rows - 1);
    }

    for row in start + n..start + k {
        for col in 0..layout.columns {
            grid.clear_value(row, col);
        }
    }

    Ok(start)
}
