use tagvault::Store;
use crate::errors::CliError;
use crate::repl::state::AppState;

/// Saves the store. On a partial save the written artifacts stay written and the error is returned.
pub fn handle_save(app_state: &mut AppState) -> Result<(), CliError> {
    app_state.store.save()?;
    app_state.unsaved = false;
    println!("Store saved to '{}'.", app_state.store.layout().root().display());
    Ok(())
}

pub fn handle_hwid(store: &Store) -> Result<String, CliError> {
    Ok(store.hardware_identity()?)
}
