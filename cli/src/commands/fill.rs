use anyhow::{Context, Result};
use resume_fill::{compose, load_template, save_grid};
use std::process::ExitCode;

pub fn run(template_path: &str, record_path: &str, output: Option<&str>) -> Result<ExitCode> {
    let record = super::load_record(record_path)?;

    let mut grid = load_template(template_path)
        .with_context(|| format!("Failed to load template: {}", template_path))?;

    let report = compose(&mut grid, &record).context("Failed to compose record onto template")?;

    let output_path = output
        .map(str::to_string)
        .unwrap_or_else(|| super::default_output_path(record_path));
    save_grid(&grid, &output_path)
        .with_context(|| format!("Failed to write output: {}", output_path))?;

    println!("Wrote {}", output_path);
    if report.rows_inserted > 0 {
        println!("Rows inserted: {}", report.rows_inserted);
    }
    if report.flagged_cells > 0 {
        println!(
            "Cells needing review: {} (highlighted in the output)",
            report.flagged_cells
        );
    }

    Ok(ExitCode::SUCCESS)
}
