pub mod attributes;
pub mod location;

pub use attributes::FileAttributes;

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use crate::common::mode::{FileSizeUnit, FilterMode, TagMode};
use crate::crypto::{transform, Keystream};
use crate::utils::fs::{preserve_undecodable, write_atomic};
use crate::utils::time::format_system_time;

/// Defines errors that can occur while persisting or loading a record.
//
// // 定义在持久化或加载记录时可能发生的错误。
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Reading or writing the record file failed.
    //
    // // 读取或写入记录文件失败。
    #[error("I/O error on record '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The tag payload could not be serialized.
    //
    // // 无法序列化标签数据。
    #[error("Failed to serialize record payload: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The stored payload is not valid JSON under the current key.
    //
    // // 在当前密钥下，存储的数据不是有效的 JSON。
    #[error("Record '{path}' could not be decoded (wrong key or corrupt data): {source}")]
    Deserialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A file-level record was requested for a path without a parent or file name.
    //
    // // 为没有父目录或文件名的路径请求了文件级记录。
    #[error("Path '{0}' has no record location")]
    NoLocation(PathBuf),
}

/// What [`MetadataRecord::load`] found at the record location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A payload was decoded and replaced the in-memory tags.
    Loaded,
    /// Nothing is stored yet; the tag set is empty.
    Absent,
    /// The stored bytes did not decode. They were copied to `preserved` (when that copy
    /// succeeded) and the tag set is empty.
    Undecodable { preserved: Option<PathBuf> },
}

/// On-disk JSON shape of a record. Cached attributes are never persisted.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RecordPayload {
    #[serde(default)]
    tags: Vec<String>,
}

/// Tags and cached attributes for one tracked file or directory.
#[derive(Debug, Clone)]
pub struct MetadataRecord {
    path: PathBuf,
    location: PathBuf,
    attributes: FileAttributes,
    tags: BTreeSet<String>,
    /// The last load could not read or decode the stored payload.
    load_failed: bool,
}

impl MetadataRecord {
    /// Creates the record for a file, stored in the sibling record folder of its parent.
    ///
    /// Attributes are captured if the file exists; the record is constructible either way.
    pub fn for_file(path: &Path) -> Result<Self, RecordError> {
        let location = location::file_record_path(path)
            .ok_or_else(|| RecordError::NoLocation(path.to_path_buf()))?;
        Ok(Self::with_location(path, location))
    }

    /// Creates a record for `path` whose payload lives at an explicit `location`.
    pub fn with_location(path: &Path, location: PathBuf) -> Self {
        Self {
            path: path.to_path_buf(),
            location,
            attributes: FileAttributes::capture(path),
            tags: BTreeSet::new(),
            load_failed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File the payload is read from and written to.
    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn attributes(&self) -> &FileAttributes {
        &self.attributes
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Unions `tags` into the tag set. Returns true if the set changed.
    pub fn add_tags<I, S>(&mut self, tags: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let before = self.tags.len();
        self.tags.extend(tags.into_iter().map(|t| t.as_ref().to_string()));
        self.tags.len() != before
    }

    /// Removes `tags` from the tag set; absent tags are ignored. Returns true if the set changed.
    pub fn remove_tags<I, S>(&mut self, tags: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let before = self.tags.len();
        for tag in tags {
            self.tags.remove(tag.as_ref());
        }
        self.tags.len() != before
    }

    /// Adds or removes `tags` according to `mode`.
    ///
    /// The in-memory tag set becomes authoritative again, even after a failed load.
    pub fn apply<I, S>(&mut self, mode: TagMode, tags: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.load_failed = false;
        match mode {
            TagMode::Add => self.add_tags(tags),
            TagMode::Remove => self.remove_tags(tags),
        }
    }

    /// Tests the tag set against a query.
    ///
    /// An empty query never matches under [`FilterMode::Any`] and always matches under
    /// [`FilterMode::All`]. Duplicate query tags count once.
    pub fn matches<S: AsRef<str>>(&self, mode: FilterMode, query: &[S]) -> bool {
        if query.is_empty() {
            return match mode {
                FilterMode::Any => false,
                FilterMode::All => true,
            };
        }
        match mode {
            FilterMode::Any => query.iter().any(|t| self.tags.contains(t.as_ref())),
            FilterMode::All => query.iter().all(|t| self.tags.contains(t.as_ref())),
        }
    }

    /// True when the last [`MetadataRecord::load`] found a payload it could not read or
    /// decode. The stored file then holds data the in-memory tags do not reflect.
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// True iff the described path still exists.
    pub fn is_valid(&self) -> bool {
        self.path.exists()
    }

    /// Writes the tag payload, enciphered with `key`, to the record location.
    pub fn save(&self, key: &Keystream) -> Result<(), RecordError> {
        let payload = RecordPayload {
            tags: self.tags.iter().cloned().collect(),
        };
        let json = serde_json::to_vec_pretty(&payload)?;
        write_atomic(&self.location, &transform(&json, key)).map_err(|source| RecordError::Io {
            path: self.location.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), location = %self.location.display(), "record saved");
        Ok(())
    }

    /// Replaces the in-memory tags with the payload stored at the record location.
    ///
    /// A missing file is not an error. Bytes that fail to decode with `key` are preserved
    /// next to the record and the tag set is left empty.
    pub fn load(&mut self, key: &Keystream) -> Result<LoadOutcome, RecordError> {
        let raw = match fs::read(&self.location) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.tags.clear();
                self.load_failed = false;
                return Ok(LoadOutcome::Absent);
            }
            Err(source) => {
                self.tags.clear();
                self.load_failed = true;
                return Err(RecordError::Io {
                    path: self.location.clone(),
                    source,
                });
            }
        };

        match serde_json::from_slice::<RecordPayload>(&transform(&raw, key)) {
            Ok(payload) => {
                self.tags = payload.tags.into_iter().collect();
                self.load_failed = false;
                Ok(LoadOutcome::Loaded)
            }
            Err(source) => {
                self.tags.clear();
                self.load_failed = true;
                let err = RecordError::Deserialize {
                    path: self.location.clone(),
                    source,
                };
                let preserved = match preserve_undecodable(&self.location, &raw) {
                    Ok(copy) => {
                        warn!("{}; original bytes kept at '{}'", err, copy.display());
                        Some(copy)
                    }
                    Err(io_err) => {
                        warn!("{}; could not preserve original bytes: {}", err, io_err);
                        None
                    }
                };
                Ok(LoadOutcome::Undecodable { preserved })
            }
        }
    }

    /// Human-readable creation time, or `None` when it was not captured.
    pub fn creation_time(&self) -> Option<String> {
        let formatted = self.attributes.created.map(format_system_time);
        if formatted.is_none() {
            debug!("no creation time available for '{}'", self.path.display());
        }
        formatted
    }

    /// Human-readable last modification time, or `None` when it was not captured.
    pub fn last_edit_time(&self) -> Option<String> {
        let formatted = self.attributes.modified.map(format_system_time);
        if formatted.is_none() {
            debug!("no modification time available for '{}'", self.path.display());
        }
        formatted
    }

    /// Cached size formatted in `unit`, e.g. `"1.50 Kilobyte(s)"`.
    pub fn file_size(&self, unit: FileSizeUnit) -> Option<String> {
        self.attributes
            .size
            .map(|bytes| format!("{:.2} {}(s)", unit.scale(bytes), unit))
    }
}

impl fmt::Display for MetadataRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<&str> = self.tags.iter().map(String::as_str).collect();
        write!(
            f,
            "Record for <{}>{} tags: [{}]",
            self.path.display(),
            if self.is_valid() { "" } else { " - INVALID" },
            tags.join(", ")
        )
    }
}
