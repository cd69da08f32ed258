use clap::{Args, Parser, Subcommand};
use codegather_core::DEFAULT_MAX_ITEMS;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Bundle source files and inspect directory structure.",
    long_about = "codegather walks a directory tree to either concatenate matching source \nfiles into a single annotated text file, or print a filtered, depth-limited \nview of the tree's contents.",
    help_template = "{about-section}\nUsage: {usage}\n\n{all-args}{after-help}",
    after_help = "EXAMPLES:\n  codegather collect ./project -o bundle.txt\n  codegather collect -e target -e dist\n  codegather tree ./project --max-items 10\n  codegather tree ./project -i '*.tmp, backup'",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase message verbosity (-v, -vv).")]
    pub verbose: u8,

    #[arg(
        short,
        long,
        global = true,
        help = "Silence informational messages and warnings."
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    #[command(
        visible_alias = "c",
        about = "Concatenate matching source files into one text file."
    )]
    Collect(CollectArgs),

    #[command(
        visible_alias = "t",
        about = "Print a filtered view of a directory tree."
    )]
    Tree(TreeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CollectArgs {
    #[arg(
        default_value = ".",
        value_name = "DIRECTORY",
        help = "Root directory to scan (default: current directory)."
    )]
    pub directory: PathBuf,

    #[arg(
        short,
        long,
        default_value = "all_code.txt",
        value_name = "FILE",
        help = "Name of the output file.",
        help_heading = "Output Control"
    )]
    pub output: PathBuf,

    #[arg(
        short = 'e',
        long = "exclude",
        value_name = "DIR",
        action = clap::ArgAction::Append,
        help = "Additional directory name to exclude (repeatable).",
        help_heading = "Content Filtering"
    )]
    pub exclude: Vec<String>,

    #[arg(
        short = 's',
        long,
        default_value = "py",
        value_name = "SUFFIX",
        help = "File suffix to collect (leading dot optional).",
        help_heading = "Content Filtering"
    )]
    pub suffix: String,
}

#[derive(Args, Debug, Clone)]
pub struct TreeArgs {
    #[arg(value_name = "PATH", help = "Directory whose structure to print.")]
    pub path: PathBuf,

    #[arg(
        short = 'i',
        long = "ignore",
        value_name = "PATTERNS",
        help = "Extra comma-separated ignore patterns (e.g. '*.tmp, backup').",
        help_heading = "Content Filtering"
    )]
    pub ignore: Option<String>,

    #[arg(
        long,
        help = "Disable the built-in ignore pattern set.",
        help_heading = "Content Filtering"
    )]
    pub no_builtin_ignore: bool,

    #[arg(
        long,
        help = "Include hidden entries (names starting with '.').",
        help_heading = "Content Filtering"
    )]
    pub show_hidden: bool,

    #[arg(
        long,
        default_value_t = DEFAULT_MAX_ITEMS,
        value_name = "N",
        help = "Maximum entries listed per directory."
    )]
    pub max_items: usize,
}
