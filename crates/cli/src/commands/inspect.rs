//! `ctxpack inspect`: Show which files land in which region, and why.

use super::input::InputArgs;
use ctxpack_assembler::{AssemblyInput, AssemblyMetadata, ContextAssembler};
use ctxpack_config::{AppConfig, OutputFormat};
use ctxpack_core::SessionState;

pub fn run(
    input: &InputArgs,
    format: Option<OutputFormat>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let (files, state) = input.resolve(&config)?;

    let assembled = ContextAssembler::new().assemble(&AssemblyInput {
        files: &files,
        state: &state,
    });

    match report_format(format, &config) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&assembled.metadata)?),
        OutputFormat::Text => print!("{}", format_report(&assembled.metadata, &state)),
    }

    Ok(())
}

/// The command-line format if given, otherwise the configured default.
fn report_format(flag: Option<OutputFormat>, config: &AppConfig) -> OutputFormat {
    flag.unwrap_or(config.output.default_format)
}

/// Human-readable assembly report.
fn format_report(meta: &AssemblyMetadata, state: &SessionState) -> String {
    let mut out = String::new();

    out.push_str("📦 ctxpack Inspect\n");
    out.push_str("=================\n");
    out.push_str(&format!(
        "  Mode:     {:?} (has_frontend = {}, epics = {})\n",
        meta.mode, state.has_frontend, state.epic_count
    ));
    out.push_str(&format!("  Files:    {}\n", meta.files_total));

    for region in &meta.regions {
        out.push_str(&format!(
            "\n  {}: {} of {} candidates, {} lines\n",
            region.region.name(),
            region.files_included,
            region.candidates,
            region.lines
        ));
        for path in &region.paths {
            out.push_str(&format!("    ✅ {path}\n"));
        }
    }

    if !meta.omitted.is_empty() {
        out.push_str("\n  Omitted:\n");
        for file in &meta.omitted {
            out.push_str(&format!("    ⚠️  {} ({})\n", file.path, file.reason.describe()));
        }
    }

    out
}
