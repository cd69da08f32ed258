use crate::error::{AppError, Result};
use crate::patterns::default_exclude_dirs;
use colored::Colorize;
use log;
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const SEPARATOR_WIDTH: usize = 80;

#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// File suffix to collect, including the leading dot.
    pub suffix: String,
    /// Directory names pruned from the walk at every depth.
    pub exclude_dirs: BTreeSet<String>,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            suffix: ".py".to_string(),
            exclude_dirs: default_exclude_dirs(),
        }
    }
}

/// Concatenates all matching files under `root` into `output_path`, one
/// header-plus-content record per file, separated by an 80-column rule.
///
/// The caller is responsible for checking that `root` exists. Files that
/// cannot be read as UTF-8 text get a placeholder record instead of content;
/// they still count toward the returned total and never abort the run.
pub fn collect(
    root: &Path,
    output_path: &Path,
    options: &CollectOptions,
    quiet: bool,
) -> Result<usize> {
    log::debug!(
        "Collecting '{}' files under {}",
        options.suffix,
        root.display()
    );
    let files = find_matching_files(root, options);
    log::info!(
        "Found {} '{}' files under {}",
        files.len(),
        options.suffix,
        root.display()
    );

    let wrap_write = |source: std::io::Error| AppError::FileWrite {
        path: output_path.to_path_buf(),
        source,
    };

    let file = File::create(output_path).map_err(wrap_write)?;
    let mut out = BufWriter::new(file);

    let mut processed = 0usize;
    for path in &files {
        let relative = pathdiff::diff_paths(path, root).unwrap_or_else(|| path.clone());
        writeln!(out, "# {}", relative.display()).map_err(wrap_write)?;

        match fs::read_to_string(path) {
            Ok(content) => {
                out.write_all(content.as_bytes()).map_err(wrap_write)?;
                write!(out, "\n\n{}\n\n", "=".repeat(SEPARATOR_WIDTH)).map_err(wrap_write)?;
                log::debug!("Processed {}", relative.display());
                if !quiet {
                    println!("{} {}", "Processed:".green(), relative.display());
                }
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                writeln!(out, "# Error reading file: {}\n", e).map_err(wrap_write)?;
                if !quiet {
                    eprintln!(
                        "{} Failed to read {}: {}",
                        "⚠️".yellow(),
                        path.display(),
                        e
                    );
                }
            }
        }
        processed += 1;
    }

    out.flush().map_err(wrap_write)?;
    log::info!(
        "Collection complete: {} files written to {}",
        processed,
        output_path.display()
    );
    Ok(processed)
}

fn find_matching_files(root: &Path, options: &CollectOptions) -> Vec<PathBuf> {
    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        if options.exclude_dirs.contains(name.as_ref()) {
            log::trace!("Pruning excluded directory: {}", entry.path().display());
            return false;
        }
        true
    });

    let mut files = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) if entry.file_type().is_file() => {
                if entry
                    .file_name()
                    .to_string_lossy()
                    .ends_with(&options.suffix)
                {
                    files.push(entry.into_path());
                }
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!("Error walking directory: {}", e);
            }
        }
    }

    // Full-path byte order, so reruns over an unchanged tree produce
    // byte-identical artifacts.
    files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn options_with_excludes(excludes: &[&str]) -> CollectOptions {
        CollectOptions {
            suffix: ".py".to_string(),
            exclude_dirs: excludes.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn collects_single_file_with_exact_record_format() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("project");
        fs::create_dir_all(root.join("venv")).unwrap();
        fs::write(root.join("a.py"), "x=1").unwrap();
        fs::write(root.join("venv").join("b.py"), "y=2").unwrap();

        let output = tmp.path().join("bundle.txt");
        let options = options_with_excludes(&["venv"]);
        let count = collect(&root, &output, &options, true).unwrap();

        assert_eq!(count, 1);
        let artifact = fs::read_to_string(&output).unwrap();
        let expected = format!("# a.py\nx=1\n\n{}\n\n", "=".repeat(80));
        assert_eq!(artifact, expected);
        assert!(!artifact.contains("b.py"));
    }

    #[test]
    fn records_are_sorted_by_relative_path() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("project");
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("zz.py"), "z").unwrap();
        fs::write(root.join("src").join("m.py"), "m").unwrap();
        fs::write(root.join("aa.py"), "a").unwrap();

        let output = tmp.path().join("bundle.txt");
        let count = collect(&root, &output, &options_with_excludes(&[]), true).unwrap();

        assert_eq!(count, 3);
        let artifact = fs::read_to_string(&output).unwrap();
        let aa = artifact.find("# aa.py").unwrap();
        let src = artifact.find("# src/m.py").unwrap();
        let zz = artifact.find("# zz.py").unwrap();
        assert!(aa < src && src < zz);
    }

    #[test]
    fn exclusion_applies_at_every_depth() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("project");
        fs::create_dir_all(root.join("src").join("__pycache__")).unwrap();
        fs::write(root.join("src").join("ok.py"), "ok").unwrap();
        fs::write(
            root.join("src").join("__pycache__").join("skipped.py"),
            "no",
        )
        .unwrap();

        let output = tmp.path().join("bundle.txt");
        let count = collect(&root, &output, &options_with_excludes(&["__pycache__"]), true).unwrap();

        assert_eq!(count, 1);
        let artifact = fs::read_to_string(&output).unwrap();
        assert!(artifact.contains("# src/ok.py"));
        assert!(!artifact.contains("skipped.py"));
    }

    #[test]
    fn unreadable_file_gets_placeholder_and_run_continues() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("project");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("bad.py"), [0x66u8, 0xfe, 0xff]).unwrap();
        fs::write(root.join("good.py"), "ok").unwrap();

        let output = tmp.path().join("bundle.txt");
        let count = collect(&root, &output, &options_with_excludes(&[]), true).unwrap();

        // Both the failed and the successful file count.
        assert_eq!(count, 2);
        let artifact = fs::read_to_string(&output).unwrap();
        assert!(artifact.contains("# bad.py\n# Error reading file: "));
        assert!(artifact.contains("# good.py\nok"));
    }

    #[test]
    fn suffix_filter_skips_other_extensions() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("project");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("keep.py"), "k").unwrap();
        fs::write(root.join("notes.txt"), "n").unwrap();

        let output = tmp.path().join("bundle.txt");
        let count = collect(&root, &output, &options_with_excludes(&[]), true).unwrap();

        assert_eq!(count, 1);
        let artifact = fs::read_to_string(&output).unwrap();
        assert!(!artifact.contains("notes.txt"));
    }

    #[test]
    fn reruns_on_unchanged_tree_are_byte_identical() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("project");
        fs::create_dir_all(root.join("pkg")).unwrap();
        fs::write(root.join("a.py"), "a = 1\n").unwrap();
        fs::write(root.join("pkg").join("b.py"), "b = 2\n").unwrap();

        let first = tmp.path().join("first.txt");
        let second = tmp.path().join("second.txt");
        let options = options_with_excludes(&[]);
        collect(&root, &first, &options, true).unwrap();
        collect(&root, &second, &options, true).unwrap();

        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }
}
