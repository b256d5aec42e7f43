use std::path::{Path, PathBuf};
use tagvault::Store;

/// Tagged files under `dir`, or every tagged file.
pub fn handle_list(store: &Store, dir: Option<&Path>) -> Vec<PathBuf> {
    let mut listed = store.list(dir);
    listed.sort();
    listed
}
