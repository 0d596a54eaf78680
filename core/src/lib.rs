//! Resume Fill: a library for filling a fixed-layout XLSX resume
//! template from a structured record.
//!
//! This crate provides functionality for:
//! - Loading the pristine template (`.xlsx`) into an in-memory grid
//! - Mapping a parsed resume record onto the template's anchored layout
//! - Expanding repeating sections and inserting conditional blocks
//! - Flagging absent fields with a placeholder and visual highlight
//! - Writing the composed grid back out as a new `.xlsx` document
//!
//! # Quick Start
//!
//! ```ignore
//! use resume_fill::{ResumeRecord, fill_resume};
//!
//! let json = std::fs::read_to_string("candidate_parsed.json")?;
//! let record = ResumeRecord::from_json(&json)?;
//! let report = fill_resume("template.xlsx", &record, "candidate_filled.xlsx")?;
//!
//! println!("{} rows inserted, {} cells flagged",
//!     report.rows_inserted, report.flagged_cells);
//! ```

mod addressing;
mod collaborators;
mod compose;
mod container;
mod dates;
mod degree_block;
mod fields;
mod grid;
mod layout;
mod record;
mod save;
mod sections;
mod style;
mod template;

pub use addressing::{address_to_index, index_to_address, indices_to_range, range_to_indices};
pub use collaborators::{ExtractError, RecordInferrer, TextExtractor};
pub use compose::{ComposeReport, compose};
pub use container::{ContainerError, ContainerLimits, OpcContainer};
pub use dates::{normalize as normalize_date, normalize_opt as normalize_date_opt};
pub use fields::{LIST_DELIMITER, PLACEHOLDER};
pub use grid::{Cell, CellValue, Grid, GridError, MergeRect};
pub use record::{
    BasicInfo, DegreeTier, EducationEntry, PersonalInfo, ProjectEntry, RecordError, ResumeRecord,
    Skills, WorkEntry,
};
pub use save::{SaveError, save_grid, save_to_buffer};
pub use style::{HIGHLIGHT_FILL, HIGHLIGHT_FONT, Style};
pub use template::{TemplateError, load_template, load_template_from_reader};

use std::path::Path;
use thiserror::Error;

/// Any failure of the end-to-end fill pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FillError {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Compose(#[from] GridError),
    #[error(transparent)]
    Save(#[from] SaveError),
}

/// Load the template at `template_path`, compose `record` onto it, and
/// write the result to `output_path`.
///
/// Each call loads a fresh grid from the template, so one failed or
/// heavily expanded record cannot leak layout changes into the next.
pub fn fill_resume(
    template_path: impl AsRef<Path>,
    record: &ResumeRecord,
    output_path: impl AsRef<Path>,
) -> Result<ComposeReport, FillError> {
    let mut grid = load_template(template_path)?;
    let report = compose(&mut grid, record)?;
    save_grid(&grid, output_path)?;
    Ok(report)
}
