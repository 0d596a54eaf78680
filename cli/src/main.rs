mod commands;

use clap::{Parser, Subcommand};
use resume_fill::{ContainerError, GridError, SaveError, TemplateError};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "resume-fill")]
#[command(about = "Fill an XLSX resume template from a parsed record")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Compose a record onto the template and write the filled document")]
    Fill {
        #[arg(help = "Path to the pristine template (.xlsx)")]
        template: String,
        #[arg(help = "Path to the parsed record JSON")]
        record: String,
        #[arg(
            long,
            short,
            help = "Output path (defaults to the record path with a _filled.xlsx suffix)"
        )]
        output: Option<String>,
    },
    #[command(about = "Show a summary of a parsed record without composing")]
    Inspect {
        #[arg(help = "Path to the parsed record JSON")]
        record: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fill {
            template,
            record,
            output,
        } => commands::fill::run(&template, &record, output.as_deref()),
        Commands::Inspect { record } => commands::inspect::run(&record),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for_error(&e)
        }
    }
}

// Exit code 2 is a problem with the inputs; 3 is a fault inside the
// composition or writing machinery.
fn exit_code_for_error(err: &anyhow::Error) -> ExitCode {
    if is_internal_error(err) {
        ExitCode::from(3)
    } else {
        ExitCode::from(2)
    }
}

fn is_internal_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        if let Some(template_err) = cause.downcast_ref::<TemplateError>() {
            return !matches!(template_err, TemplateError::NotFound { .. });
        }
        cause.is::<GridError>() || cause.is::<SaveError>() || cause.is::<ContainerError>()
    })
}
