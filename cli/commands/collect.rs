use crate::cli_args::CollectArgs;
use anyhow::{Context, Result};
use codegather_core::{AppError, CollectOptions, collect};
use colored::Colorize;
use log;

pub fn handle_collect_command(args: CollectArgs, quiet: bool) -> Result<()> {
    // Validate before touching the output path: a bad root must not leave a
    // partially written artifact behind.
    if !args.directory.is_dir() {
        return Err(AppError::InvalidArgument(format!(
            "Directory '{}' does not exist",
            args.directory.display()
        ))
        .into());
    }
    log::info!("Collecting from: {}", args.directory.display());

    let mut options = CollectOptions {
        suffix: normalize_suffix(&args.suffix),
        ..CollectOptions::default()
    };
    options.exclude_dirs.extend(args.exclude.iter().cloned());
    log::debug!(
        "Effective options: suffix '{}', {} excluded directory names",
        options.suffix,
        options.exclude_dirs.len()
    );

    let count = collect(&args.directory, &args.output, &options, quiet)
        .with_context(|| format!("Failed to collect files under {}", args.directory.display()))?;

    if !quiet {
        println!();
        println!(
            "{} Collected {} files.",
            "✅".green(),
            count.to_string().cyan()
        );
        println!(
            "Output saved to: {}",
            args.output.display().to_string().blue()
        );
    }
    Ok(())
}

fn normalize_suffix(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('.') {
        trimmed.to_string()
    } else {
        format!(".{}", trimmed)
    }
}
