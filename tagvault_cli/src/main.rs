mod cli;
pub mod errors;
mod handlers;
mod identity;
mod repl;
mod ui;

use crate::cli::{Cli, ReplCommand};
use crate::errors::CliError;
use crate::identity::MachineIdentity;
use crate::repl::dispatcher::handle_repl_command;
use crate::repl::run_repl;
use crate::repl::state::AppState;
use clap::Parser;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tagvault::{Store, StoreLayout};
use tracing_subscriber::EnvFilter;

/// Overrides the default store location.
const STORE_ENV: &str = "TAGVAULT_HOME";
/// Log filter directives, e.g. `tagvault=debug`.
const LOG_ENV: &str = "TAGVAULT_LOG";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    // 先解析单次命令，参数错误时无需打开存储
    let one_shot = if cli.command.is_empty() {
        None
    } else {
        Some(ReplCommand::try_parse_from(&cli.command).unwrap_or_else(|e| e.exit()))
    };

    let root = resolve_store_root(cli.store)?;
    let store = Store::open(StoreLayout::new(root), MachineIdentity, cli.recovery_seed.as_deref())?;
    let mut app_state = AppState::new(store);

    match one_shot {
        Some(command) => {
            handle_repl_command(command, &mut app_state)?;
            if app_state.unsaved {
                handlers::store::handle_save(&mut app_state)?;
            }
        }
        None => {
            println!(
                "Store at '{}' is open. Type 'help' for commands or 'exit' to quit.",
                app_state.store.layout().root().display()
            );
            run_repl(&mut app_state)?;
        }
    }
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// `--store`, then `TAGVAULT_HOME`, then the platform data directory.
fn resolve_store_root(flag: Option<PathBuf>) -> Result<PathBuf, CliError> {
    if let Some(root) = flag {
        return Ok(root);
    }
    if let Some(root) = env::var_os(STORE_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(root));
    }
    directories::ProjectDirs::from("", "", "tagvault")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(CliError::NoDataDir)
}
