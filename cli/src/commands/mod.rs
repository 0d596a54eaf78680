pub mod fill;
pub mod inspect;

use anyhow::{Context, Result};
use resume_fill::ResumeRecord;
use std::path::Path;

pub fn load_record(path: &str) -> Result<ResumeRecord> {
    let payload = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read record file: {}", path))?;
    ResumeRecord::from_json(&payload)
        .with_context(|| format!("Failed to parse record file: {}", path))
}

/// Derive the output path from the record path: `X_parsed.json` becomes
/// `X_filled.xlsx`; anything else gets a `_filled.xlsx` suffix.
pub fn default_output_path(record_path: &str) -> String {
    if let Some(base) = record_path.strip_suffix("_parsed.json") {
        return format!("{base}_filled.xlsx");
    }
    let path = Path::new(record_path);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume".to_string());
    path.with_file_name(format!("{stem}_filled.xlsx"))
        .to_string_lossy()
        .into_owned()
}
