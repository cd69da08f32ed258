use once_cell::sync::Lazy;
use std::collections::BTreeSet;
use std::path::Path;

/// Directory names the collector prunes when the caller supplies no overrides.
static DEFAULT_EXCLUDE_DIRS: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    ["__pycache__", ".git", "venv", "env", "node_modules"]
        .into_iter()
        .collect()
});

// Glob-looking members ("*.pyc") are matched literally, like every other
// pattern. Substring matching against the full path is intentionally broad.
static DEFAULT_IGNORE_PATTERNS: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    [
        "__pycache__",
        ".git",
        ".vscode",
        ".idea",
        "node_modules",
        ".DS_Store",
        "Thumbs.db",
        ".pytest_cache",
        ".mypy_cache",
        "build",
        "dist",
        "*.egg-info",
        "venv",
        "env",
        ".env",
        "*.pyc",
        "*.pyo",
        "*.pyd",
        "*.so",
        "*.dll",
        "*.log",
        "tmp",
        "temp",
        "cache",
        "*.class",
        "*.jar",
        "*.war",
        "*.ear",
        "*.zip",
        "*.tar.gz",
    ]
    .into_iter()
    .collect()
});

pub fn default_exclude_dirs() -> BTreeSet<String> {
    DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect()
}

pub fn default_ignore_patterns() -> BTreeSet<String> {
    DEFAULT_IGNORE_PATTERNS.iter().map(|s| s.to_string()).collect()
}

/// Decides whether a directory entry is hidden from the tree view.
///
/// A pattern excludes an entry when it equals the entry name exactly or when
/// it occurs as a substring of the full path string. The two checks are
/// independent and either one suffices.
pub fn is_ignored(
    path: &Path,
    name: &str,
    patterns: &BTreeSet<String>,
    ignore_hidden: bool,
) -> bool {
    if ignore_hidden && name.starts_with('.') {
        return true;
    }

    let path_str = path.to_string_lossy();
    patterns
        .iter()
        .any(|pattern| pattern == name || path_str.contains(pattern.as_str()))
}

/// Splits a comma-separated pattern list, trimming whitespace and dropping
/// empty fragments.
pub fn parse_pattern_list(input: &str) -> BTreeSet<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|pattern| !pattern.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn hidden_names_are_ignored_when_flag_set() {
        let set = patterns(&[]);
        assert!(is_ignored(Path::new("project/.cache"), ".cache", &set, true));
        assert!(!is_ignored(Path::new("project/.cache"), ".cache", &set, false));
    }

    #[test]
    fn exact_name_match_excludes() {
        let set = patterns(&["node_modules"]);
        assert!(is_ignored(
            Path::new("project/node_modules"),
            "node_modules",
            &set,
            true
        ));
        assert!(!is_ignored(Path::new("project/src"), "src", &set, true));
    }

    #[test]
    fn path_substring_match_excludes_descendants() {
        let set = patterns(&["node_modules"]);
        assert!(is_ignored(
            Path::new("project/node_modules/lodash/index.js"),
            "index.js",
            &set,
            true
        ));
    }

    #[test]
    fn glob_looking_patterns_match_literally() {
        let set = patterns(&["*.pyc"]);
        // No glob expansion: "module.pyc" does not contain the literal "*.pyc".
        assert!(!is_ignored(Path::new("project/module.pyc"), "module.pyc", &set, true));
        assert!(is_ignored(Path::new("project/*.pyc"), "*.pyc", &set, true));
    }

    #[test]
    fn pattern_list_is_split_and_trimmed() {
        let parsed = parse_pattern_list(" *.tmp, backup ,  , test*");
        let expected = patterns(&["*.tmp", "backup", "test*"]);
        assert_eq!(parsed, expected);
    }

    #[test]
    fn default_sets_contain_expected_members() {
        assert!(default_exclude_dirs().contains("__pycache__"));
        assert!(default_ignore_patterns().contains("node_modules"));
        assert!(default_ignore_patterns().contains("*.tar.gz"));
    }
}
