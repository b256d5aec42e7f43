use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tagvault::StoreError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("No record is tracked for: {0}")]
    NotTracked(PathBuf),

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Could not determine a data directory; pass --store or set TAGVAULT_HOME")]
    NoDataDir,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("REPL Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("{0}")]
    Store(#[from] StoreError),
}
