pub mod dispatcher;
pub mod state;

use crate::cli::ReplCommand;
use crate::errors::CliError;
use crate::handlers;
use crate::repl::dispatcher::handle_repl_command;
use crate::repl::state::AppState;
use clap::Parser;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

pub fn run_repl(app_state: &mut AppState) -> Result<(), CliError> {
    let mut rl = DefaultEditor::new()?;

    while app_state.running {
        let prompt = format!("tagvault[{}]> ", app_state.store.index().len());

        match rl.readline(&prompt) {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                let args = shlex::split(line.as_str()).unwrap_or_default();
                if args.is_empty() {
                    continue;
                }

                match ReplCommand::try_parse_from(args) {
                    Ok(command) => {
                        if let Err(e) = handle_repl_command(command, app_state) {
                            eprintln!("Error: {}", e);
                        }
                    }
                    Err(e) => {
                        e.print()?;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Type 'exit' to save and quit.");
            }
            Err(ReadlineError::Eof) => {
                // 输入结束时与 exit 行为一致：保存后退出
                if let Err(e) = handlers::store::handle_save(app_state) {
                    eprintln!("Error: {}", e);
                }
                app_state.running = false;
                println!("Goodbye!");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
