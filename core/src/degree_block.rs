//! Conditional doctorate block insertion.
//!
//! The template reserves one advanced-degree block. When a record
//! carries both a Master and a Doctorate, the doctorate needs a block
//! the template never authored: a 9-row clone of the advanced block's
//! shape, inserted immediately before the work-history section.
//!
//! Every structural insertion has the same failure mode: merge
//! rectangles belonging to the region that shifted can be left
//! spanning columns they no longer logically span. Repairing the
//! work-history label row (drop the bad merge, re-create the correct
//! one, rewrite the labels) is a mandatory step here, not a special
//! case.

use crate::fields;
use crate::grid::{Grid, GridError, MergeRect};
use crate::layout::{LayoutContext, anchors, columns};
use crate::record::EducationEntry;

/// Authored height of a degree block (title row through trailing
/// spacer), matching the advanced block at template rows 22-30.
pub const DEGREE_BLOCK_ROWS: u32 = 9;

pub const DOCTORATE_TITLE: &str = "博士学历";

/// Field labels within a degree block, by row offset from the title.
const FIELD_LABELS: &[(u32, u32, &str)] = &[
    (1, columns::LABEL, "入学时间"),
    (1, columns::SECOND_LABEL, "毕业院校"),
    (2, columns::LABEL, "毕业时间"),
    (2, columns::SECOND_LABEL, "专业"),
    (3, columns::LABEL, "毕业证编号"),
    (4, columns::LABEL, "毕业证学信网在线验证码"),
    (6, columns::LABEL, "学位证编号"),
    (7, columns::LABEL, "学位证学信网在线验证码"),
];

/// Column labels of the work-history table, restored during repair.
const WORK_LABELS: &[(u32, &str)] = &[
    (0, "工作开始日期（年月日）"),
    (1, "工作结束日期（年月日）"),
    (2, "单位名称"),
    (3, "岗位/职务"),
    (4, "是否自主研发工作经验"),
];

/// Insert and populate the doctorate block. Returns the number of
/// placeholder-flagged cells.
///
/// Must run before the work-history and project sections are laid out
/// so they resolve their anchors against the post-insertion offset.
pub fn insert_doctorate_block(
    grid: &mut Grid,
    ctx: &mut LayoutContext,
    entry: &EducationEntry,
) -> Result<u32, GridError> {
    // The style source sits above the insertion point: resolve both
    // rows before the insert moves the offset.
    let style_source = ctx.resolve(anchors::ADVANCED_BLOCK);
    let at = ctx.resolve(anchors::WORK_HEADER);

    grid.insert_rows(at, DEGREE_BLOCK_ROWS)?;
    ctx.advance(DEGREE_BLOCK_ROWS);

    for i in 0..DEGREE_BLOCK_ROWS {
        grid.copy_row_style(style_source + i, at + i, columns::TEMPLATE_WIDTH);
    }

    repair_work_label_row(grid, ctx)?;

    // Title row spans the authored width, like the block it clones.
    grid.merge_range(MergeRect::new(at, 0, at, columns::TEMPLATE_WIDTH - 1))?;
    fields::write_text(grid, at, 0, Some(DOCTORATE_TITLE));
    for &(row_offset, col, label) in FIELD_LABELS {
        fields::write_text(grid, at + row_offset, col, Some(label));
    }

    let mut flagged = 0u32;
    let mut flag = |hit: bool| {
        if hit {
            flagged += 1;
        }
    };
    flag(fields::write_date(
        grid,
        at + 1,
        columns::VALUE,
        entry.enrollment_date.as_deref(),
    ));
    flag(fields::write_text(
        grid,
        at + 1,
        columns::SECOND_VALUE,
        entry.university.as_deref(),
    ));
    flag(fields::write_date(
        grid,
        at + 2,
        columns::VALUE,
        entry.graduation_date.as_deref(),
    ));
    flag(fields::write_text(
        grid,
        at + 2,
        columns::SECOND_VALUE,
        entry.major.as_deref(),
    ));
    flag(fields::write_text(
        grid,
        at + 3,
        columns::VALUE,
        entry.diploma_number.as_deref(),
    ));
    flag(fields::write_text(
        grid,
        at + 4,
        columns::VALUE,
        entry.diploma_code.as_deref(),
    ));
    flag(fields::write_text(
        grid,
        at + 6,
        columns::VALUE,
        entry.degree_number.as_deref(),
    ));
    flag(fields::write_text(
        grid,
        at + 7,
        columns::VALUE,
        entry.degree_code.as_deref(),
    ));

    Ok(flagged)
}

/// Repair the work-history column-label row after the block shifted it:
/// drop any merge that now spans the label columns, restore the
/// authored E:F merge, and rewrite the label text.
fn repair_work_label_row(grid: &mut Grid, ctx: &LayoutContext) -> Result<(), GridError> {
    let label_row = ctx.resolve(anchors::WORK_LABELS);

    grid.unmerge_on_row_where(label_row, |m| m.col0 == 0 && m.col1 >= 2);
    // The flagged-program label legitimately spans columns E:F.
    grid.unmerge_on_row_where(label_row, |m| m.col0 == 4);
    grid.merge_range(MergeRect::new(label_row, 4, label_row, 5))?;

    for &(col, label) in WORK_LABELS {
        grid.set_value(
            label_row,
            col,
            crate::grid::CellValue::Text(label.to_string()),
        );
    }
    Ok(())
}
