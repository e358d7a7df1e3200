//! `ctxpack render`: Render relevant files into a framed context document.

use super::input::InputArgs;
use ctxpack_assembler::ContextAssembler;
use ctxpack_config::AppConfig;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub fn run(input: &InputArgs, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    render_with(input, &config, output)
}

fn render_with(
    input: &InputArgs,
    config: &AppConfig,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (files, state) = input.resolve(config)?;
    let text = ContextAssembler::new().render(&files, &state);

    match output {
        Some(path) => {
            std::fs::write(path, &text)?;
            info!(path = %path.display(), bytes = text.len(), "Context written");
        }
        None => emit(&mut std::io::stdout().lock(), &text)?,
    }

    Ok(())
}

fn emit(out: &mut impl Write, text: &str) -> std::io::Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()
}
