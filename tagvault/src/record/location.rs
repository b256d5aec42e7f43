//! Pure functions mapping a logical path to the file its record is stored in.
//!
//! A file `/d/a.txt` keeps its record in `/d/d.mdata/a.txt.mdata`. A directory keeps its
//! record in the store's `dir_mdata/<uuid>.mdata`. Nothing here touches the filesystem.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use uuid::Uuid;
use crate::common::constants::{RECORD_EXTENSION, ROOT_FOLDER_NAME};

/// Folder inside `dir` that holds the records of the files directly in `dir`.
pub fn record_folder(dir: &Path) -> PathBuf {
    let folder_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| ROOT_FOLDER_NAME.to_string());
    dir.join(format!("{}.{}", folder_name, RECORD_EXTENSION))
}

/// Record file for a file-level path, or `None` when the path has no parent or file name.
pub fn file_record_path(file: &Path) -> Option<PathBuf> {
    let parent = file.parent()?;
    let name = file.file_name()?;
    Some(record_folder(parent).join(record_file_name(name)))
}

/// Record file for a directory-level record stored under `dir_records`.
pub fn dir_record_path(dir_records: &Path, id: &Uuid) -> PathBuf {
    dir_records.join(format!("{}.{}", id, RECORD_EXTENSION))
}

/// Inverse of [`file_record_path`]: the file a record in `dir`'s record folder describes.
///
/// Returns `None` for anything that is not a `.mdata` file.
pub fn file_for_record(dir: &Path, record_file: &Path) -> Option<PathBuf> {
    if record_file.extension() != Some(OsStr::new(RECORD_EXTENSION)) {
        return None;
    }
    let stem = record_file.file_stem()?;
    Some(dir.join(stem))
}

/// True when `entry` is the record folder of `dir`.
pub fn is_record_folder(dir: &Path, entry: &Path) -> bool {
    entry == record_folder(dir)
}

fn record_file_name(name: &OsStr) -> String {
    format!("{}.{}", name.to_string_lossy(), RECORD_EXTENSION)
}
