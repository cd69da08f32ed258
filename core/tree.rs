use crate::patterns::is_ignored;
use log;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MAX_ITEMS: usize = 25;

const EMPTY_FOLDER_MARKER: &str = "[пустая папка]";

/// Maps each directory with at least one visible entry to its ordered entry
/// names. Directories whose contents are entirely filtered out get no key,
/// which keeps "filtered to empty" distinct from "not recorded".
pub type DirectoryMap = BTreeMap<PathBuf, Vec<String>>;

fn elision_marker(skipped: usize) -> String {
    format!("... (пропущено {} элементов)", skipped)
}

/// Recursively builds the visible structure beneath `root`.
///
/// Entries are sorted directories-first, then case-insensitive by name, and
/// at most `max_items` are listed per directory; the remainder collapses into
/// a single elision marker. Unlistable directories contribute nothing.
pub fn build_structure(
    root: &Path,
    ignore_patterns: &BTreeSet<String>,
    max_items: usize,
    ignore_hidden: bool,
) -> DirectoryMap {
    let mut structure = DirectoryMap::new();

    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("Skipping unreadable directory {}: {}", root.display(), e);
            return structure;
        }
    };

    let mut visible: Vec<(PathBuf, String, bool)> = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Error reading entry in {}: {}", root.display(), e);
                continue;
            }
        };
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_ignored(&path, &name, ignore_patterns, ignore_hidden) {
            log::trace!("Ignoring entry: {}", path.display());
            continue;
        }
        let is_dir = entry.file_type().map_or(false, |ft| ft.is_dir());
        visible.push((path, name, is_dir));
    }

    visible.sort_by_key(|(_, name, is_dir)| (!*is_dir, name.to_lowercase()));

    let total = visible.len();
    for (path, name, is_dir) in visible.into_iter().take(max_items) {
        if is_dir {
            let substructure = build_structure(&path, ignore_patterns, max_items, ignore_hidden);
            structure.extend(substructure);
        }
        // The entry name lands in the parent's own list either way, so a
        // directory always names its immediate children.
        structure.entry(root.to_path_buf()).or_default().push(name);
    }

    if total > max_items {
        structure
            .entry(root.to_path_buf())
            .or_default()
            .push(elision_marker(total - max_items));
    }

    structure
}

/// Renders the map as one `<dir>/: [entries]` line per directory, in path
/// order. The root directory is shown by its basename, everything else by
/// its path relative to `root`.
pub fn render_structure(root: &Path, structure: &DirectoryMap) -> String {
    let mut rendered = String::new();
    for (dir, entries) in structure {
        let display = display_name(root, dir);
        if entries.is_empty() {
            // Unreachable given how the map is built, but kept as a guard.
            rendered.push_str(&format!("{}/: {}\n", display, EMPTY_FOLDER_MARKER));
        } else {
            rendered.push_str(&format!("{}/: [{}]\n", display, entries.join(", ")));
        }
    }
    rendered
}

fn display_name(root: &Path, dir: &Path) -> String {
    if dir == root {
        return root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());
    }
    match pathdiff::diff_paths(dir, root) {
        Some(relative) => relative.display().to_string(),
        None => dir.display().to_string(),
    }
}
