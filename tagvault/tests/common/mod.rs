#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tagvault::{StaticIdentity, Store, StoreLayout};

/// The identity every test store runs under unless a test says otherwise.
pub const MACHINE_ID: &str = "4C4C4544-0042-3510-8052-B2C04F564433";

/// Helper: a store root inside `dir`.
pub fn layout_in(dir: &TempDir) -> StoreLayout {
    StoreLayout::new(dir.path().join("store"))
}

/// Helper: opens (or reopens) the store in `dir` under [`MACHINE_ID`].
pub fn open_store(dir: &TempDir) -> Store {
    Store::open(layout_in(dir), StaticIdentity::new(MACHINE_ID), None).unwrap()
}

/// Helper: opens the store in `dir` under an arbitrary identity and optional recovery seed.
pub fn open_store_as(dir: &TempDir, identity: &str, recovery_seed: Option<&str>) -> Store {
    Store::open(layout_in(dir), StaticIdentity::new(identity), recovery_seed).unwrap()
}

/// Helper: creates a user file below `root`, creating parent directories.
pub fn create_user_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

pub fn sorted(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths.sort();
    paths
}
