use anyhow::Result;
use resume_fill::DegreeTier;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

pub fn run(record_path: &str) -> Result<ExitCode> {
    let record = super::load_record(record_path)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let filename = Path::new(record_path)
        .file_name()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| record_path.into());

    writeln!(handle, "Record: {}", filename)?;
    writeln!(
        handle,
        "Name: {}",
        record.basic_info.name.as_deref().unwrap_or("(missing)")
    )?;

    write!(handle, "Education: {} entries", record.education.len())?;
    if !record.education.is_empty() {
        let tiers: Vec<&str> = record
            .education
            .iter()
            .map(|e| match e.tier {
                DegreeTier::Bachelor => "bachelor",
                DegreeTier::Master => "master",
                DegreeTier::Doctorate => "doctorate",
                DegreeTier::Unrecognized => "unrecognized",
            })
            .collect();
        write!(handle, " ({})", tiers.join(", "))?;
    }
    writeln!(handle)?;

    writeln!(
        handle,
        "Work experience: {} entries",
        record.work_experience.len()
    )?;
    writeln!(
        handle,
        "Project experience: {} entries",
        record.project_experience.len()
    )?;
    writeln!(
        handle,
        "Skills: {} languages, {} skills, {} certifications",
        record.technical_skills.languages.len(),
        record.technical_skills.skills.len(),
        record.technical_skills.certifications.len()
    )?;

    let has_master = record
        .education
        .iter()
        .any(|e| e.tier == DegreeTier::Master);
    let has_doctorate = record
        .education
        .iter()
        .any(|e| e.tier == DegreeTier::Doctorate);
    if has_master && has_doctorate {
        writeln!(handle, "Note: doctorate block will be inserted on fill")?;
    }

    Ok(ExitCode::SUCCESS)
}
