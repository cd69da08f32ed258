use crate::cli_args::TreeArgs;
use anyhow::{Context, Result};
use codegather_core::{
    AppError, build_structure, default_ignore_patterns, parse_pattern_list, render_structure,
};
use colored::Colorize;
use log;
use std::collections::BTreeSet;
use std::io::{self, Write};

pub fn handle_tree_command(args: TreeArgs, quiet: bool) -> Result<()> {
    if !args.path.exists() {
        return Err(AppError::InvalidArgument(format!(
            "Path '{}' does not exist",
            args.path.display()
        ))
        .into());
    }
    if !args.path.is_dir() {
        return Err(AppError::InvalidArgument(format!(
            "'{}' is not a directory",
            args.path.display()
        ))
        .into());
    }

    let mut patterns = if args.no_builtin_ignore {
        BTreeSet::new()
    } else {
        default_ignore_patterns()
    };
    if let Some(extra) = args.ignore.as_deref() {
        let extra = parse_pattern_list(extra);
        log::debug!("Merging {} extra ignore patterns", extra.len());
        patterns.extend(extra);
    }

    if !quiet {
        println!(
            "Directory structure: {}",
            args.path.display().to_string().blue()
        );
        // BTreeSet iteration keeps the printed pattern list sorted.
        println!(
            "Ignored patterns: [{}]",
            patterns.iter().cloned().collect::<Vec<_>>().join(", ")
        );
        println!("{}", "-".repeat(50));
    }

    log::info!("Building structure for: {}", args.path.display());
    let structure = build_structure(&args.path, &patterns, args.max_items, !args.show_hidden);
    let rendered = render_structure(&args.path, &structure);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(rendered.as_bytes())
        .context("Failed to write to stdout")?;
    handle.flush().context("Failed to flush stdout")?;
    Ok(())
}
