use std::io::{self, Write};
use std::process::ExitCode;

use apify::SpecSummary;
use serde_json::json;

use crate::commands::CommandResult;
use crate::error::CliError;
use crate::pages::human_size;

pub enum OutputFormat {
    Text,
    Json,
}

/// Renders a `CommandResult` as human-readable text or newline-delimited JSON
/// and reports success once written.
pub fn emit_result(result: CommandResult, format: OutputFormat) -> Result<ExitCode, CliError> {
    match format {
        OutputFormat::Text => print_text(&result)?,
        OutputFormat::Json => print_json(&result),
    };
    Ok(ExitCode::SUCCESS)
}

fn print_text(result: &CommandResult) -> Result<(), CliError> {
    match result {
        CommandResult::SpecList { specs } => {
            println!("API specs ({}):", specs.len());
            for spec in specs {
                println!("  - {}", spec_line(spec));
                println!("    id: {}", spec.id);
            }
        }
        CommandResult::SpecDetail { summary, source } => {
            println!("{}", summary.display_title());
            println!("  File: {}", summary.filename);
            println!("  Format: {}", summary.format);
            println!("  Location: {}", summary.location);
            println!("  Source: {source}");
            println!("  Size: {}", human_size(summary.size_bytes));
            println!("  Id: {}", summary.id);
            if let Some(description) = &summary.description {
                println!("  Description: {description}");
            }
        }
        CommandResult::SpecContent { raw, .. } => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(raw)?;
            stdout.flush()?;
        }
        CommandResult::ServerStopped { address } => {
            println!("Server on {address} stopped");
        }
    }
    Ok(())
}

fn spec_line(spec: &SpecSummary) -> String {
    format!(
        "{} [{}] {} ({})",
        spec.display_title(),
        spec.format,
        spec.location,
        human_size(spec.size_bytes)
    )
}

fn print_json(result: &CommandResult) {
    let payload = json!(result);
    println!("{payload}");
}
