use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// Filesystem attributes captured once when a record is constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileAttributes {
    pub modified: Option<SystemTime>,
    pub created: Option<SystemTime>,
    pub size: Option<u64>,
}

impl FileAttributes {
    /// Reads the attributes of `path`. Everything stays unset when the path does not exist.
    pub fn capture(path: &Path) -> Self {
        match fs::metadata(path) {
            Ok(meta) => Self {
                modified: meta.modified().ok(),
                // Not every platform/filesystem records a birth time.
                created: meta.created().ok(),
                size: Some(meta.len()),
            },
            Err(_) => Self::default(),
        }
    }

    pub fn is_unset(&self) -> bool {
        self.modified.is_none() && self.created.is_none() && self.size.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_capture_existing_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, b"12345").unwrap();

        let attrs = FileAttributes::capture(&file);
        assert_eq!(attrs.size, Some(5));
        assert!(attrs.modified.is_some());
        assert!(!attrs.is_unset());
    }

    #[test]
    fn test_capture_missing_path() {
        let dir = tempdir().unwrap();
        let attrs = FileAttributes::capture(&dir.path().join("missing"));
        assert!(attrs.is_unset());
    }
}
