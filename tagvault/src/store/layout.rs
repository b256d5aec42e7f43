use std::path::{Path, PathBuf};
use crate::common::constants::{CONFIG_FILE, DESCRIPTOR_FILE, DIR_RECORDS_SUBDIR};

/// Locations of the store's own artifacts, all derived from one root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLayout {
    root: PathBuf,
}

impl StoreLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Plaintext JSON list of directory descriptors.
    pub fn descriptor_file(&self) -> PathBuf {
        self.root.join(DESCRIPTOR_FILE)
    }

    /// Enciphered configuration object.
    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Folder holding one record per tracked directory, named by descriptor identifier.
    pub fn dir_records(&self) -> PathBuf {
        self.root.join(DIR_RECORDS_SUBDIR)
    }
}
