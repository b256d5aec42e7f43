use std::io;
use std::path::{Component, Path, PathBuf};

/// Makes `path` absolute and resolves `.` and `..` lexically.
///
/// Symlinks are not followed, so the result names the same entry as long as no component
/// before a `..` is a symlink. `..` at the root stays at the root.
pub fn normalize(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(name) => normalized.push(name),
        }
    }
    Ok(normalized)
}
