pub mod collect;
pub mod error;
pub mod patterns;
pub mod tree;

pub use collect::{CollectOptions, SEPARATOR_WIDTH, collect};
pub use error::{AppError, Result};
pub use patterns::{
    default_exclude_dirs, default_ignore_patterns, is_ignored, parse_pattern_list,
};
pub use tree::{DEFAULT_MAX_ITEMS, DirectoryMap, build_structure, render_structure};
