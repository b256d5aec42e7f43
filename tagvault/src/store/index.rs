use std::collections::BTreeMap;
use std::collections::btree_map;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;
use crate::crypto::Keystream;
use crate::record::{location, MetadataRecord};
use super::descriptor::DirDescriptor;

/// Everything the store knows about one tracked directory.
#[derive(Debug, Clone)]
pub struct FolderEntry {
    pub descriptor: DirDescriptor,
    /// File-level records, in insertion order.
    pub records: Vec<MetadataRecord>,
    /// Tags applied to the directory itself.
    pub dir_record: MetadataRecord,
}

impl FolderEntry {
    pub fn new(descriptor: DirDescriptor, dir_record: MetadataRecord) -> Self {
        Self {
            descriptor,
            records: Vec::new(),
            dir_record,
        }
    }

    /// Position of the record describing the file called `file_name` in this directory.
    ///
    /// Record file names are unique within a record folder, so at most one record matches.
    pub fn position(&self, file_name: &OsStr) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.path().file_name() == Some(file_name))
    }

    pub fn record(&self, file_name: &OsStr) -> Option<&MetadataRecord> {
        self.position(file_name).map(|i| &self.records[i])
    }

    pub fn tracked_paths(&self) -> impl Iterator<Item = &Path> {
        self.records.iter().map(MetadataRecord::path)
    }

    /// Everything currently present in the directory apart from its record folder.
    pub fn present_paths(&self) -> io::Result<Vec<PathBuf>> {
        let dir = &self.descriptor.dirpath;
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !location::is_record_folder(dir, &path) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

/// Tracked directories keyed by absolute path.
#[derive(Debug, Clone, Default)]
pub struct FolderIndex {
    entries: BTreeMap<PathBuf, FolderEntry>,
}

impl FolderIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, dir: &Path) -> Option<&FolderEntry> {
        self.entries.get(dir)
    }

    pub fn get_mut(&mut self, dir: &Path) -> Option<&mut FolderEntry> {
        self.entries.get_mut(dir)
    }

    pub fn contains(&self, dir: &Path) -> bool {
        self.entries.contains_key(dir)
    }

    /// Inserts an entry keyed by its descriptor path, replacing any previous one.
    pub fn insert(&mut self, entry: FolderEntry) {
        self.entries.insert(entry.descriptor.dirpath.clone(), entry);
    }

    pub fn iter(&self) -> btree_map::Iter<'_, PathBuf, FolderEntry> {
        self.entries.iter()
    }

    pub fn values(&self) -> btree_map::Values<'_, PathBuf, FolderEntry> {
        self.entries.values()
    }

    pub fn descriptors(&self) -> Vec<&DirDescriptor> {
        self.entries.values().map(|e| &e.descriptor).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Loads every record stored in the record folder of `dir`.
///
/// Only the record folder is read, never `dir` itself. Records are returned in file-name
/// order; anything that is not a `.mdata` file is ignored. A record whose file cannot be
/// read is logged and skipped.
pub fn scan_record_folder(dir: &Path, key: &Keystream) -> Vec<MetadataRecord> {
    let folder = location::record_folder(dir);
    let read_dir = match fs::read_dir(&folder) {
        Ok(rd) => rd,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            warn!("Unable to scan record folder '{}': {}", folder.display(), e);
            return Vec::new();
        }
    };

    let mut record_files: Vec<PathBuf> = read_dir
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .collect();
    record_files.sort();

    let mut records = Vec::with_capacity(record_files.len());
    for record_file in record_files {
        let Some(file) = location::file_for_record(dir, &record_file) else {
            continue;
        };
        let mut record = MetadataRecord::with_location(&file, record_file);
        match record.load(key) {
            Ok(_) => records.push(record),
            Err(e) => warn!("Skipping record: {}", e),
        }
    }
    records
}
