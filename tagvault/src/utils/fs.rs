use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use crate::common::constants::UNDECODABLE_EXTENSION;

/// Writes `contents` to `path` through a temporary file in the same directory.
///
/// The temporary file is renamed over the target only after every byte is written, so a
/// failed write never leaves a truncated artifact behind. Missing parent directories are
/// created.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(contents)?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Returns `<path>.undecodable`.
pub fn undecodable_sibling(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_os_string();
    name.push(".");
    name.push(UNDECODABLE_EXTENSION);
    PathBuf::from(name)
}

/// Candidate names for the `n`th preserved copy: `<path>.undecodable`, then `<path>.undecodable.1`, ...
fn undecodable_candidate(path: &Path, n: u32) -> PathBuf {
    let first = undecodable_sibling(path);
    if n == 0 {
        return first;
    }
    let mut name: OsString = first.into_os_string();
    name.push(format!(".{}", n));
    PathBuf::from(name)
}

/// Copies bytes that failed to decode next to their source.
///
/// An existing copy is never replaced: the bytes go to the first free
/// `<path>.undecodable[.N]` name, unless one of the existing copies already holds exactly
/// these bytes. Returns the path of the copy holding `contents`.
pub fn preserve_undecodable(path: &Path, contents: &[u8]) -> io::Result<PathBuf> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(contents)?;
    temp_file.as_file().sync_all()?;

    for n in 0u32.. {
        let candidate = undecodable_candidate(path, n);
        match fs::read(&candidate) {
            Ok(existing) if existing == contents => return Ok(candidate),
            Ok(_) => continue,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        match temp_file.persist_noclobber(&candidate) {
            Ok(_) => return Ok(candidate),
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => temp_file = e.file,
            Err(e) => return Err(e.error),
        }
    }
    Err(io::Error::other(format!("no free name to preserve '{}'", path.display())))
}
