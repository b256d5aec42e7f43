use crate::cli::ReplCommand;
use crate::errors::CliError;
use crate::handlers;
use crate::repl::state::AppState;
use crate::ui::printer;
use tagvault::TagMode;

/// Runs one parsed command against the open store.
pub fn handle_repl_command(command: ReplCommand, app_state: &mut AppState) -> Result<(), CliError> {
    match command {
        ReplCommand::Tag { path, tags } => {
            app_state.unsaved = true;
            handlers::tag::handle_tag(&mut app_state.store, &path, TagMode::Add, &tags)?;
        }
        ReplCommand::Untag { path, tags } => {
            app_state.unsaved = true;
            handlers::tag::handle_tag(&mut app_state.store, &path, TagMode::Remove, &tags)?;
        }
        ReplCommand::Filter { mode, tags } => {
            let found = handlers::filter::handle_filter(&app_state.store, mode, &tags);
            printer::print_paths(&found, &format!("No paths match {} of [{}].", mode, tags.join(", ")));
        }
        ReplCommand::List { dir } => {
            let listed = handlers::list::handle_list(&app_state.store, dir.as_deref());
            printer::print_paths(&listed, "No tagged files.");
        }
        ReplCommand::Info { path, unit } => {
            let record = handlers::info::handle_info(&app_state.store, &path)?;
            printer::print_record_details(record, unit);
        }
        ReplCommand::Save => {
            handlers::store::handle_save(app_state)?;
        }
        ReplCommand::Passwd { current, new } => {
            handlers::passwd::handle_passwd(&mut app_state.store, current, new)?;
            app_state.unsaved = true;
        }
        ReplCommand::Hwid => {
            let id = handlers::store::handle_hwid(&app_state.store)?;
            println!("{}", id);
        }
        ReplCommand::Exit => {
            handlers::store::handle_save(app_state)?;
            app_state.running = false;
            println!("Goodbye!");
        }
    }
    Ok(())
}
