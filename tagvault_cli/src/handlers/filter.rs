use std::path::PathBuf;
use tagvault::{FilterMode, Store};

pub fn handle_filter(store: &Store, mode: FilterMode, tags: &[String]) -> Vec<PathBuf> {
    store.filter(mode, tags)
}
