use std::path::PathBuf;
use clap::Parser;
use tagvault::{FileSizeUnit, FilterMode};

#[derive(Parser, Debug)]
#[command(name = "tagvault", author, version, about = "Tag files and folders, then find them by tag", long_about = None)]
pub struct Cli {
    /// Directory holding the store artifacts (falls back to TAGVAULT_HOME, then the platform data dir)
    #[arg(long = "store", value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Decipher the configuration with this identity instead of the current machine's
    #[arg(long = "recovery-seed", value_name = "SEED")]
    pub recovery_seed: Option<String>,

    /// Run a single command and exit; without one an interactive session starts
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

// --- 交互式与单次执行共用的命令定义 ---
#[derive(Parser, Debug)]
#[command(no_binary_name = true, about = "tagvault commands")]
pub enum ReplCommand {
    /// Add tags to a file or directory
    Tag {
        #[arg(required = true)]
        path: PathBuf,
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Remove tags from a file or directory
    Untag {
        #[arg(required = true)]
        path: PathBuf,
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Find paths by tag: 'any' (0) matches one tag, 'all' (1) needs every tag
    #[command(visible_alias = "search")]
    Filter {
        mode: FilterMode,
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// List tagged files, in one directory or everywhere
    #[command(visible_alias = "ls")]
    List {
        dir: Option<PathBuf>,
    },
    /// Show the record of a tracked file or directory
    Info {
        #[arg(required = true)]
        path: PathBuf,
        /// Unit for the cached size: 0-4 or byte/kilobyte/megabyte/gigabyte/terabyte
        #[arg(short = 'u', long = "unit", default_value = "kilobyte")]
        unit: FileSizeUnit,
    },
    /// Write every artifact of the store to disk
    Save,
    /// Set or change the store password
    Passwd {
        /// Current password (prompted for when a password is set and this is omitted)
        #[arg(long)]
        current: Option<String>,
        /// New password (prompted for when omitted)
        #[arg(long)]
        new: Option<String>,
    },
    /// Print the hardware identity, for recovery after a hardware change
    Hwid,
    /// Save and leave the session
    #[command(visible_alias = "quit")]
    Exit,
}
