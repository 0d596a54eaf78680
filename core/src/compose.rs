//! The compositor: maps one record onto the template grid.
//!
//! Stages run in a fixed order (identity, personal info, education
//! with its bachelor slot, advanced slot, and conditional doctorate
//! block, then work history, projects, skills) because each stage's
//! insertions shift the anchors of everything below it. Reordering
//! stages silently corrupts row addressing, so the order lives in one
//! function and nowhere else.

use crate::degree_block;
use crate::fields;
use crate::grid::{CellValue, Grid, GridError};
use crate::layout::{LayoutContext, SECTION_EXAMPLE_ROWS, anchors, columns};
use crate::record::{DegreeTier, EducationEntry, ResumeRecord};
use crate::sections::{self, SectionLayout};

/// What one composition run did to the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComposeReport {
    /// Total rows inserted (the final offset).
    pub rows_inserted: u32,
    /// Cells written as placeholder + highlight for a reviewer to fill.
    pub flagged_cells: u32,
}

const WORK_SECTION: SectionLayout = SectionLayout {
    data_anchor: anchors::WORK_DATA,
    example_rows: SECTION_EXAMPLE_ROWS,
    columns: 5,
};

const PROJECT_SECTION: SectionLayout = SectionLayout {
    data_anchor: anchors::PROJECT_DATA,
    example_rows: SECTION_EXAMPLE_ROWS,
    columns: 6,
};

/// Fill `grid` from `record`, in place.
///
/// The grid must hold the pristine template layout. On error the grid
/// must be discarded; per-record isolation is the caller's one-grid-
/// per-record ownership, not rollback.
pub fn compose(grid: &mut Grid, record: &ResumeRecord) -> Result<ComposeReport, GridError> {
    let mut ctx = LayoutContext::new();
    let mut flagged = 0u32;

    flagged += fill_identity(grid, &ctx, record);
    flagged += fill_personal_info(grid, &ctx, record);
    flagged += fill_education(grid, &mut ctx, record)?;
    flagged += fill_work_history(grid, &mut ctx, record)?;
    flagged += fill_projects(grid, &mut ctx, record)?;
    flagged += fill_skills(grid, &ctx, record);

    Ok(ComposeReport {
        rows_inserted: ctx.offset(),
        flagged_cells: flagged,
    })
}

fn fill_identity(grid: &mut Grid, ctx: &LayoutContext, record: &ResumeRecord) -> u32 {
    let row = ctx.resolve(anchors::IDENTITY);
    let mut flagged = 0;
    flagged += u32::from(fields::write_text(
        grid,
        row,
        columns::VALUE,
        record.basic_info.name.as_deref(),
    ));
    flagged += u32::from(fields::write_text(
        grid,
        row,
        columns::SECOND_VALUE,
        record.basic_info.supplier.as_deref(),
    ));
    flagged
}

fn fill_personal_info(grid: &mut Grid, ctx: &LayoutContext, record: &ResumeRecord) -> u32 {
    let info = &record.personal_info;
    let mut flagged = 0;
    let mut text = |grid: &mut Grid, anchor, value: &Option<String>| {
        flagged += u32::from(fields::write_text(
            grid,
            ctx.resolve(anchor),
            columns::VALUE,
            value.as_deref(),
        ));
    };
    text(grid, anchors::ID_NUMBER, &info.id_number);
    text(grid, anchors::PHONE, &info.phone);
    text(grid, anchors::HIGHEST_EDUCATION, &info.highest_education);
    text(grid, anchors::CONTRACT_LEVEL, &info.contract_level);

    let mut date = |grid: &mut Grid, anchor, value: &Option<String>| {
        flagged += u32::from(fields::write_date(
            grid,
            ctx.resolve(anchor),
            columns::VALUE,
            value.as_deref(),
        ));
    };
    date(grid, anchors::BIRTH_DATE, &info.birth_date);
    date(grid, anchors::FIRST_WORK_DATE, &info.first_work_date);
    date(grid, anchors::FIRST_IT_WORK_DATE, &info.first_it_work_date);
    flagged
}

fn fill_education(
    grid: &mut Grid,
    ctx: &mut LayoutContext,
    record: &ResumeRecord,
) -> Result<u32, GridError> {
    // Tier labels were resolved at ingestion; Unrecognized entries are
    // excluded from structural placement here, deterministically.
    let first_of = |tier: DegreeTier| record.education.iter().find(|e| e.tier == tier);
    let bachelor = first_of(DegreeTier::Bachelor);
    let master = first_of(DegreeTier::Master);
    let doctorate = first_of(DegreeTier::Doctorate);

    // The bachelor slot is always written: an absent degree shows as a
    // fully flagged block rather than leftover template text.
    let empty = EducationEntry::default();
    let mut flagged = fill_degree_slot(
        grid,
        ctx.resolve(anchors::BACHELOR_BLOCK),
        bachelor.unwrap_or(&empty),
    );

    // The advanced slot takes the Master, or a lone Doctorate (with the
    // block retitled). With neither, the authored slot is left as-is: a
    // bachelor-only record legitimately has no advanced degree and must
    // not be flagged for review.
    let advanced_title = ctx.resolve(anchors::ADVANCED_BLOCK);
    match (master, doctorate) {
        (Some(master), _) => {
            flagged += fill_degree_slot(grid, advanced_title + 1, master);
        }
        (None, Some(doctorate)) => {
            grid.set_value(
                advanced_title,
                0,
                CellValue::Text(degree_block::DOCTORATE_TITLE.to_string()),
            );
            flagged += fill_degree_slot(grid, advanced_title + 1, doctorate);
        }
        (None, None) => {}
    }

    // Both advanced tiers present: the doctorate gets its own block,
    // inserted before the sections below resolve their anchors.
    if let (Some(_), Some(doctorate)) = (master, doctorate) {
        flagged += degree_block::insert_doctorate_block(grid, ctx, doctorate)?;
    }

    Ok(flagged)
}

/// Write one degree entry into a pre-authored slot. `first_data_row` is
/// the enrollment/university row (the row after a title row, if any).
fn fill_degree_slot(grid: &mut Grid, first_data_row: u32, entry: &EducationEntry) -> u32 {
    let row = first_data_row;
    let mut flagged = 0;
    flagged += u32::from(fields::write_date(
        grid,
        row,
        columns::VALUE,
        entry.enrollment_date.as_deref(),
    ));
    flagged += u32::from(fields::write_text(
        grid,
        row,
        columns::SECOND_VALUE,
        entry.university.as_deref(),
    ));
    flagged += u32::from(fields::write_date(
        grid,
        row + 1,
        columns::VALUE,
        entry.graduation_date.as_deref(),
    ));
    flagged += u32::from(fields::write_text(
        grid,
        row + 1,
        columns::SECOND_VALUE,
        entry.major.as_deref(),
    ));
    flagged += u32::from(fields::write_text(
        grid,
        row + 2,
        columns::VALUE,
        entry.diploma_number.as_deref(),
    ));
    flagged += u32::from(fields::write_text(
        grid,
        row + 3,
        columns::VALUE,
        entry.diploma_code.as_deref(),
    ));
    flagged += u32::from(fields::write_text(
        grid,
        row + 5,
        columns::VALUE,
        entry.degree_number.as_deref(),
    ));
    flagged += u32::from(fields::write_text(
        grid,
        row + 6,
        columns::VALUE,
        entry.degree_code.as_deref(),
    ));
    flagged
}

fn fill_work_history(
    grid: &mut Grid,
    ctx: &mut LayoutContext,
    record: &ResumeRecord,
) -> Result<u32, GridError> {
    let entries = &record.work_experience;
    let start = sections::expand(grid, ctx, &WORK_SECTION, entries.len() as u32)?;

    let mut flagged = 0;
    for (i, entry) in entries.iter().enumerate() {
        let row = start + i as u32;
        flagged += u32::from(fields::write_date(grid, row, 0, entry.start_date.as_deref()));
        flagged += u32::from(fields::write_date(grid, row, 1, entry.end_date.as_deref()));
        flagged += u32::from(fields::write_text(grid, row, 2, entry.company.as_deref()));
        flagged += u32::from(fields::write_text(grid, row, 3, entry.position.as_deref()));
        flagged += u32::from(fields::write_bool(grid, row, 4, entry.is_flagged_program));
    }
    Ok(flagged)
}

fn fill_projects(
    grid: &mut Grid,
    ctx: &mut LayoutContext,
    record: &ResumeRecord,
) -> Result<u32, GridError> {
    let entries = &record.project_experience;
    let start = sections::expand(grid, ctx, &PROJECT_SECTION, entries.len() as u32)?;

    let mut flagged = 0;
    for (i, entry) in entries.iter().enumerate() {
        let row = start + i as u32;
        flagged += u32::from(fields::write_date(grid, row, 0, entry.start_date.as_deref()));
        flagged += u32::from(fields::write_date(grid, row, 1, entry.end_date.as_deref()));
        flagged += u32::from(fields::write_text(grid, row, 2, entry.name.as_deref()));
        flagged += u32::from(fields::write_text(
            grid,
            row,
            3,
            entry.description.as_deref(),
        ));
        flagged += u32::from(fields::write_text(grid, row, 4, entry.role.as_deref()));
        flagged += u32::from(fields::write_bool(grid, row, 5, entry.is_flagged_program));
    }
    Ok(flagged)
}

fn fill_skills(grid: &mut Grid, ctx: &LayoutContext, record: &ResumeRecord) -> u32 {
    let skills = &record.technical_skills;
    let mut flagged = 0;
    flagged += u32::from(fields::write_list(
        grid,
        ctx.resolve(anchors::LANGUAGES),
        columns::VALUE,
        &skills.languages,
    ));
    flagged += u32::from(fields::write_list(
        grid,
        ctx.resolve(anchors::SKILLS),
        columns::VALUE,
        &skills.skills,
    ));
    flagged += u32::from(fields::write_list(
        grid,
        ctx.resolve(anchors::CERTIFICATIONS),
        columns::VALUE,
        &skills.certifications,
    ));
    flagged
}
