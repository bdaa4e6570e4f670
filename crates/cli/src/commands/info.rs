//! `info` command implementation.

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::InfoArgs;
use crate::commands::summarize_components;

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Reading configuration");

    let module = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    let summaries = summarize_components(&module)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!("Module configuration: {}", args.config.display());
    println!("Components: {}", summaries.len());
    for summary in &summaries {
        println!("\n  {} ({})", summary.name, summary.model);
        println!("    schedule: {} [{}]", summary.window, summary.schedule_mode);
        if let Some(ref inner) = summary.inner_camera {
            println!("    inner camera: {}", inner);
        }
    }

    Ok(())
}
