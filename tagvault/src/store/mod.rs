//! The tag-indexed metadata store.
//!
//! A [`Store`] owns the folder index and the configuration for its lifetime. Nothing is
//! global: every store carries its own layout, identity provider and keys, so several
//! independent stores can coexist in one process.
//!
//! Concurrent access from several processes is not coordinated. Two processes saving the
//! same store can overwrite each other's descriptor list or configuration.

pub mod descriptor;
pub mod index;
pub mod layout;
pub mod settings;

pub use descriptor::DirDescriptor;
pub use index::{FolderEntry, FolderIndex};
pub use layout::StoreLayout;
pub use settings::Settings;

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use crate::common::constants::KEYSTREAM_LEN;
use crate::common::mode::{FilterMode, TagMode};
use crate::crypto::{derive, transform, CipherError, KeyRing};
use crate::identity::{IdentityError, IdentityProvider};
use crate::record::{location, MetadataRecord, RecordError};
use crate::utils::fs::{preserve_undecodable, write_atomic};
use crate::utils::path::normalize;

/// Lifecycle of a [`Store`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Uninitialized,
    Loading,
    Ready,
    Saving,
}

impl fmt::Display for StoreState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreState::Uninitialized => "uninitialized",
            StoreState::Loading => "loading",
            StoreState::Ready => "ready",
            StoreState::Saving => "saving",
        };
        f.write_str(name)
    }
}

/// Defines errors reported by store operations.
//
// // 定义存储操作报告的错误。
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The path does not name an existing file or directory.
    //
    // // 路径不是现有的文件或目录。
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// An argument was rejected before any state changed.
    //
    // // 参数在任何状态改变之前被拒绝。
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading or writing a store artifact failed.
    //
    // // 读取或写入存储文件失败。
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The supplied current password does not match the configured one.
    //
    // // 提供的当前密码与已配置的密码不匹配。
    #[error("Wrong password")]
    AuthFailure,

    /// A stored artifact is malformed or cannot be deciphered with the assumed key.
    //
    // // 存储的文件格式错误，或无法用假定的密钥解密。
    #[error("Failed to decode '{path}': {message}")]
    Deserialization { path: PathBuf, message: String },

    /// The operation needs a store in the `Ready` state.
    //
    // // 该操作需要处于 `Ready` 状态的存储。
    #[error("Store is not ready (state: {0})")]
    NotReady(StoreState),

    /// At least one artifact failed to save; the others were written.
    //
    // // 至少一个文件保存失败；其他文件已写入。
    #[error("Save incomplete, failed artifacts: {}", .0.join("; "))]
    PartialSave(Vec<String>),

    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    #[error("Cipher error: {0}")]
    Cipher(#[from] CipherError),
}

/// The tag-indexed metadata store.
pub struct Store {
    layout: StoreLayout,
    identity: Box<dyn IdentityProvider>,
    state: StoreState,
    index: FolderIndex,
    settings: Settings,
    keys: Option<KeyRing>,
    rekey_pending: bool,
    /// The configuration on disk did not decode; saves leave it alone until a password is set.
    config_undecodable: bool,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("layout", &self.layout)
            .field("state", &self.state)
            .field("folders", &self.index.len())
            .field("has_password", &self.settings.has_password())
            .field("rekey_pending", &self.rekey_pending)
            .finish()
    }
}

impl Store {
    /// Creates an uninitialized store. Call [`Store::init`] before using it.
    pub fn new(layout: StoreLayout, identity: impl IdentityProvider + 'static) -> Self {
        Self {
            layout,
            identity: Box::new(identity),
            state: StoreState::Uninitialized,
            index: FolderIndex::new(),
            settings: Settings::default(),
            keys: None,
            rekey_pending: false,
            config_undecodable: false,
        }
    }

    /// Creates and initializes a store in one step.
    pub fn open(
        layout: StoreLayout,
        identity: impl IdentityProvider + 'static,
        recovery_seed: Option<&str>,
    ) -> Result<Self, StoreError> {
        let mut store = Self::new(layout, identity);
        store.init(recovery_seed)?;
        Ok(store)
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    pub fn index(&self) -> &FolderIndex {
        &self.index
    }

    pub fn has_password(&self) -> bool {
        self.settings.has_password()
    }

    /// True between a successful password change and the next complete save.
    pub fn rekey_pending(&self) -> bool {
        self.rekey_pending
    }

    /// Current value of the identity provider, for manual key recovery.
    pub fn hardware_identity(&self) -> Result<String, StoreError> {
        Ok(self.identity.hardware_id()?)
    }

    /// Loads the configuration and the folder index from disk.
    ///
    /// Missing artifacts yield an empty store. `recovery_seed` replaces the identity when
    /// deciphering the configuration, e.g. after a hardware change; the next save writes the
    /// configuration back under the current identity.
    pub fn init(&mut self, recovery_seed: Option<&str>) -> Result<(), StoreError> {
        if matches!(self.state, StoreState::Loading | StoreState::Saving) {
            return Err(StoreError::NotReady(self.state));
        }
        self.state = StoreState::Loading;
        match self.load(recovery_seed) {
            Ok(()) => {
                self.state = StoreState::Ready;
                info!(
                    root = %self.layout.root().display(),
                    folders = self.index.len(),
                    "store initialized"
                );
                Ok(())
            }
            Err(e) => {
                self.state = StoreState::Uninitialized;
                error!("Store initialization failed: {}", e);
                Err(e)
            }
        }
    }

    fn load(&mut self, recovery_seed: Option<&str>) -> Result<(), StoreError> {
        let root = self.layout.root().to_path_buf();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io { path: root, source })?;

        self.index.clear();
        self.settings = Settings::default();
        self.rekey_pending = false;
        self.config_undecodable = false;

        let mut keys = KeyRing::from_identity(&self.identity.hardware_id()?)?;

        let config_key = match recovery_seed {
            Some(seed) => derive(seed, KEYSTREAM_LEN)?,
            None => keys.identity_key().clone(),
        };
        let config_path = self.layout.config_file();
        if let Some(raw) = read_optional(&config_path)? {
            match serde_json::from_slice::<Settings>(&transform(&raw, &config_key)) {
                Ok(settings) => self.settings = settings,
                Err(e) => {
                    report_undecodable(&config_path, &raw, &e);
                    self.config_undecodable = true;
                }
            }
        }
        keys.set_password(self.settings.pw.as_deref())?;

        let descriptor_path = self.layout.descriptor_file();
        if let Some(raw) = read_optional(&descriptor_path)? {
            match descriptor::parse_descriptor_list(&raw) {
                Ok(descriptors) => {
                    for descriptor in descriptors {
                        let entry = self.load_entry(descriptor, &keys);
                        self.index.insert(entry);
                    }
                }
                Err(e) => report_undecodable(&descriptor_path, &raw, &e),
            }
        }

        self.keys = Some(keys);
        Ok(())
    }

    /// Rebuilds one folder entry from its descriptor: the directory-level record from the
    /// store, the file-level records from the directory's record folder.
    ///
    /// A directory record that cannot be read is logged and left empty; its file stays as it
    /// is on disk.
    fn load_entry(&self, descriptor: DirDescriptor, keys: &KeyRing) -> FolderEntry {
        let location = location::dir_record_path(&self.layout.dir_records(), &descriptor.dir_uuid);
        let mut dir_record = MetadataRecord::with_location(&descriptor.dirpath, location);
        if let Err(e) = dir_record.load(keys.record_key()) {
            warn!(
                "Tags of directory '{}' could not be loaded, continuing without them: {}",
                descriptor.dirpath.display(),
                e
            );
        }

        let mut entry = FolderEntry::new(descriptor, dir_record);
        entry.records = index::scan_record_folder(&entry.descriptor.dirpath, keys.record_key());
        debug!(
            dir = %entry.descriptor.dirpath.display(),
            records = entry.records.len(),
            "folder entry loaded"
        );
        entry
    }

    fn ready_keys(&self) -> Result<&KeyRing, StoreError> {
        match (&self.keys, self.state) {
            (Some(keys), StoreState::Ready) => Ok(keys),
            _ => Err(StoreError::NotReady(self.state)),
        }
    }

    /// Returns the entry for `dir`, creating it with a fresh identifier on first sight.
    fn ensure_entry(&mut self, dir: &Path) -> Result<&mut FolderEntry, StoreError> {
        if !self.index.contains(dir) {
            let keys = self.ready_keys()?;
            let descriptor = DirDescriptor::generate(dir.to_path_buf());
            info!(dir = %dir.display(), id = %descriptor.dir_uuid, "tracking new directory");
            let entry = self.load_entry(descriptor, keys);
            self.index.insert(entry);
        }
        self.index
            .get_mut(dir)
            .ok_or_else(|| StoreError::NotFound(dir.to_path_buf()))
    }

    /// Adds or removes `tags` on a file or directory and persists that record immediately.
    ///
    /// Files are tracked under their parent directory; directories get their own
    /// directory-level record. A path that is neither changes nothing.
    pub fn tag<S: AsRef<str>>(&mut self, path: &Path, mode: TagMode, tags: &[S]) -> Result<(), StoreError> {
        self.ready_keys()?;
        if tags.is_empty() {
            return Err(StoreError::InvalidArgument("at least one tag is required".to_string()));
        }
        let path = normalize(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if path.is_file() {
            let (dir, file_name) = match (path.parent(), path.file_name()) {
                (Some(dir), Some(name)) => (dir.to_path_buf(), name.to_os_string()),
                _ => return Err(StoreError::NotFound(path.clone())),
            };
            let key = self.ready_keys()?.record_key().clone();
            let entry = self.ensure_entry(&dir)?;
            let position = match entry.position(&file_name) {
                Some(i) => i,
                None => {
                    let mut record = MetadataRecord::for_file(&path)?;
                    record.load(&key)?;
                    entry.records.push(record);
                    entry.records.len() - 1
                }
            };
            let record = &mut entry.records[position];
            record.apply(mode, tags);
            save_record(record, &key)?;
        } else if path.is_dir() {
            let key = self.ready_keys()?.record_key().clone();
            let entry = self.ensure_entry(&path)?;
            entry.dir_record.apply(mode, tags);
            save_record(&entry.dir_record, &key)?;
        } else {
            error!("Can't modify tags for a non-existing path '{}'", path.display());
            return Err(StoreError::NotFound(path));
        }

        debug!(path = %path.display(), %mode, "tags updated");
        Ok(())
    }

    /// Paths matching the tag query.
    ///
    /// A directory whose own record matches contributes every path currently present in it
    /// (its record folder excepted), whether or not those paths were ever tagged. Otherwise
    /// each file-level record of the directory is tested on its own.
    pub fn filter<S: AsRef<str>>(&self, mode: FilterMode, tags: &[S]) -> Vec<PathBuf> {
        if self.state != StoreState::Ready {
            warn!("filter called on a store that is {}", self.state);
            return Vec::new();
        }

        let mut matches = Vec::new();
        for (dir, entry) in self.index.iter() {
            if entry.dir_record.matches(mode, tags) {
                match entry.present_paths() {
                    Ok(paths) => {
                        matches.extend(paths);
                        continue;
                    }
                    Err(e) => warn!("Unable to list tagged directory '{}': {}", dir.display(), e),
                }
            }
            matches.extend(
                entry
                    .records
                    .iter()
                    .filter(|r| r.matches(mode, tags))
                    .map(|r| r.path().to_path_buf()),
            );
        }
        matches
    }

    /// Tracked file paths under `folder`, or across every tracked directory when `None`.
    ///
    /// A folder that is not a directory or not tracked yields an empty list.
    pub fn list(&self, folder: Option<&Path>) -> Vec<PathBuf> {
        if self.state != StoreState::Ready {
            warn!("list called on a store that is {}", self.state);
            return Vec::new();
        }

        let Some(folder) = folder else {
            return self
                .index
                .values()
                .flat_map(|e| e.tracked_paths().map(Path::to_path_buf))
                .collect();
        };

        if !folder.is_dir() {
            warn!(
                "'{}' is not a folder; provide a valid folder, or none to list all tagged files",
                folder.display()
            );
            return Vec::new();
        }
        let folder = normalize(folder).unwrap_or_else(|_| folder.to_path_buf());
        match self.index.get(&folder) {
            Some(entry) => entry.tracked_paths().map(Path::to_path_buf).collect(),
            None => {
                warn!("'{}' is not a tracked folder", folder.display());
                Vec::new()
            }
        }
    }

    /// The record for a tracked file, or the directory-level record for a tracked directory.
    pub fn record(&self, path: &Path) -> Option<&MetadataRecord> {
        let path = normalize(path).ok()?;
        if let Some(entry) = self.index.get(&path) {
            return Some(&entry.dir_record);
        }
        let entry = self.index.get(path.parent()?)?;
        entry.record(path.file_name()?)
    }

    /// Sets or changes the password.
    ///
    /// The first password can be set with any `current`. Once one is configured, `current`
    /// must equal it exactly or nothing changes. Only the in-memory configuration changes:
    /// records already on disk stay under the old key until the next [`Store::save`].
    pub fn set_password(&mut self, current: Option<&str>, new: &str) -> Result<(), StoreError> {
        self.ready_keys()?;
        if new.is_empty() {
            return Err(StoreError::InvalidArgument("password must not be empty".to_string()));
        }
        if let Some(configured) = self.settings.pw.as_deref() {
            if current != Some(configured) {
                error!("Wrong password entered");
                return Err(StoreError::AuthFailure);
            }
        }

        if let Some(keys) = self.keys.as_mut() {
            keys.set_password(Some(new))?;
        }
        self.settings.pw = Some(new.to_string());
        self.rekey_pending = true;
        self.config_undecodable = false;
        warn!("Password changed; records on disk use the previous key until the store is saved");
        Ok(())
    }

    /// Writes the descriptor list, every loaded record and the configuration.
    ///
    /// Records are written with the current record key, so a save after a password change
    /// moves every loaded record to the new key. The configuration is always enciphered
    /// with the identity key. A failing artifact does not stop the others; the failures are
    /// reported together.
    ///
    /// Nothing is written over data this store could not load: records whose last load
    /// failed and an undecodable configuration are left as they are on disk. File-level
    /// records of a directory that no longer exists are skipped so the directory is not
    /// recreated.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let keys = self.ready_keys()?.clone();
        self.state = StoreState::Saving;
        let mut failures = Vec::new();

        let descriptor_path = self.layout.descriptor_file();
        let descriptor_result = descriptor::encode_descriptor_list(&self.index.descriptors())
            .map_err(|e| e.to_string())
            .and_then(|json| write_atomic(&descriptor_path, &json).map_err(|e| e.to_string()));
        if let Err(e) = descriptor_result {
            error!("Couldn't write descriptor list at '{}': {}", descriptor_path.display(), e);
            failures.push(format!("{}: {}", descriptor_path.display(), e));
        }

        let mut records_ok = true;
        for (dir, entry) in self.index.iter() {
            let dir_present = dir.is_dir();
            if !dir_present && !entry.records.is_empty() {
                warn!(
                    "Directory '{}' no longer exists; its file records are not written",
                    dir.display()
                );
            }
            let file_records = entry.records.iter().filter(|_| dir_present);
            for record in std::iter::once(&entry.dir_record).chain(file_records) {
                if record.load_failed() {
                    warn!(
                        "Record '{}' was not loaded; leaving its file untouched",
                        record.location().display()
                    );
                    continue;
                }
                if let Err(e) = record.save(keys.record_key()) {
                    error!("Couldn't write record: {}", e);
                    failures.push(e.to_string());
                    records_ok = false;
                }
            }
        }

        let config_path = self.layout.config_file();
        if self.config_undecodable {
            warn!(
                "Configuration at '{}' was not decodable; leaving it untouched",
                config_path.display()
            );
        } else {
            let config_result = serde_json::to_vec_pretty(&self.settings)
                .map_err(|e| e.to_string())
                .and_then(|json| {
                    write_atomic(&config_path, &transform(&json, keys.identity_key())).map_err(|e| e.to_string())
                });
            if let Err(e) = config_result {
                error!("Couldn't write config at '{}': {}", config_path.display(), e);
                failures.push(format!("{}: {}", config_path.display(), e));
            }
        }

        self.state = StoreState::Ready;
        if records_ok {
            self.rekey_pending = false;
        }
        if failures.is_empty() {
            info!(root = %self.layout.root().display(), folders = self.index.len(), "store saved");
            Ok(())
        } else {
            Err(StoreError::PartialSave(failures))
        }
    }
}

fn save_record(record: &MetadataRecord, key: &crate::crypto::Keystream) -> Result<(), StoreError> {
    record.save(key).map_err(|e| {
        error!("Couldn't write record for '{}': {}", record.path().display(), e);
        StoreError::from(e)
    })
}

/// Reads a store artifact, mapping "absent" to `None`.
fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, StoreError> {
    match fs::read(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Logs a decode failure and keeps a copy of the bytes; loading continues with empty state.
fn report_undecodable(path: &Path, raw: &[u8], cause: &serde_json::Error) {
    let err = StoreError::Deserialization {
        path: path.to_path_buf(),
        message: cause.to_string(),
    };
    match preserve_undecodable(path, raw) {
        Ok(copy) => warn!("{}; starting empty, original kept at '{}'", err, copy.display()),
        Err(e) => warn!("{}; starting empty, could not preserve original: {}", err, e),
    }
}
