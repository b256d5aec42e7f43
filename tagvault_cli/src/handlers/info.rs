use std::path::Path;
use tagvault::{MetadataRecord, Store};
use crate::errors::CliError;

pub fn handle_info<'a>(store: &'a Store, path: &Path) -> Result<&'a MetadataRecord, CliError> {
    store
        .record(path)
        .ok_or_else(|| CliError::NotTracked(path.to_path_buf()))
}
