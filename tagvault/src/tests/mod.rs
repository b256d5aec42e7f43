mod password_test;

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use crate::identity::StaticIdentity;
use crate::store::{Store, StoreLayout};

/// A store rooted in its own temp directory plus a separate "user" directory to tag.
pub(crate) struct Fixture {
    pub store_dir: TempDir,
    pub user_dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            store_dir: tempfile::tempdir().unwrap(),
            user_dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn layout(&self) -> StoreLayout {
        StoreLayout::new(self.store_dir.path().join("fm"))
    }

    pub fn open(&self) -> Store {
        Store::open(self.layout(), StaticIdentity::new("test-machine"), None).unwrap()
    }

    pub fn user_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.user_dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn user_subdir(&self, relative: &str) -> PathBuf {
        let path = self.user_dir.path().join(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }
}

pub(crate) fn sorted(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths.sort();
    paths
}

pub(crate) fn p(path: &Path) -> PathBuf {
    path.to_path_buf()
}
