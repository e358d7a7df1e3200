//! `ctxpack status`: Show effective configuration.

use ctxpack_config::AppConfig;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("📦 ctxpack Status");
    println!("================");
    println!("  Config dir:      {}", AppConfig::config_dir().display());
    println!("  Max file bytes:  {}", config.source.max_file_bytes);
    println!(
        "  Unreadable:      {}",
        if config.source.skip_unreadable { "skip" } else { "fail" }
    );
    println!("  Output format:   {:?}", config.output.default_format);

    if AppConfig::config_path().exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file, run `ctxpack onboard` first");
    }

    Ok(())
}
