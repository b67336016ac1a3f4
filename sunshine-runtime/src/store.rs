//! File-backed key-value store
//!
//! All keys live in one small postcard snapshot. Every `set` rewrites the
//! snapshot through a temporary file and a rename, so a crash leaves either
//! the old or the new file, never a torn one.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use sunshine_core::traits::{KeyValueStore, StorageKey, StoreError, StoredValue};

/// Snapshot format version
const SNAPSHOT_VERSION: u8 = 1;

/// Errors opening the store file
#[derive(Debug, Error)]
pub enum StoreOpenError {
    #[error("failed to read store file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum SnapshotValue {
    Text(String),
    Flag(bool),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Snapshot {
    version: u8,
    values: [Option<SnapshotValue>; StorageKey::COUNT],
}

impl Snapshot {
    fn empty() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            ..Default::default()
        }
    }
}

/// Persistent store over a single snapshot file
///
/// Without a path the store is volatile and behaves like a memory store.
pub struct FileStore {
    path: Option<PathBuf>,
    snapshot: Mutex<CriticalSectionRawMutex, RefCell<Snapshot>>,
}

impl FileStore {
    /// Open the store at `path`, starting empty if the file is absent
    ///
    /// A file that cannot be decoded is treated as empty and overwritten on
    /// the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreOpenError> {
        let path = path.into();
        let snapshot = match fs::read(&path) {
            Ok(bytes) => match postcard::from_bytes::<Snapshot>(&bytes) {
                Ok(snapshot) if snapshot.version == SNAPSHOT_VERSION => {
                    debug!("Loaded store snapshot from {}", path.display());
                    snapshot
                }
                Ok(snapshot) => {
                    warn!(
                        "Store snapshot version mismatch: found {}, expected {}",
                        snapshot.version, SNAPSHOT_VERSION
                    );
                    Snapshot::empty()
                }
                Err(e) => {
                    warn!("Store snapshot unreadable, starting empty: {}", e);
                    Snapshot::empty()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No store file at {}, starting empty", path.display());
                Snapshot::empty()
            }
            Err(source) => return Err(StoreOpenError::Read { path, source }),
        };

        Ok(Self {
            path: Some(path),
            snapshot: Mutex::new(RefCell::new(snapshot)),
        })
    }

    /// A store that keeps nothing across restarts
    pub fn in_memory() -> Self {
        Self {
            path: None,
            snapshot: Mutex::new(RefCell::new(Snapshot::empty())),
        }
    }

    /// Backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn persist(path: &Path, snapshot: &Snapshot) -> Result<(), StoreError> {
        let bytes = postcard::to_allocvec(snapshot).map_err(|_| StoreError::Corrupted)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, &bytes)
            .and_then(|()| fs::rename(&tmp, path))
            .map_err(|e| {
                warn!("Failed to write store file {}: {}", path.display(), e);
                StoreError::Io
            })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: StorageKey) -> Result<Option<StoredValue>, StoreError> {
        self.snapshot.lock(|snapshot| {
            match &snapshot.borrow().values[key.as_u8() as usize] {
                None => Ok(None),
                Some(SnapshotValue::Flag(flag)) => Ok(Some(StoredValue::Flag(*flag))),
                Some(SnapshotValue::Text(text)) => StoredValue::text(text)
                    .map(Some)
                    .map_err(|_| StoreError::Corrupted),
            }
        })
    }

    fn set(&self, key: StorageKey, value: StoredValue) -> Result<(), StoreError> {
        let value = match value {
            StoredValue::Text(text) => SnapshotValue::Text(text.as_str().to_owned()),
            StoredValue::Flag(flag) => SnapshotValue::Flag(flag),
        };

        self.snapshot.lock(|cell| {
            let mut next = cell.borrow().clone();
            next.values[key.as_u8() as usize] = Some(value);
            if let Some(path) = &self.path {
                Self::persist(path, &next)?;
            }
            *cell.borrow_mut() = next;
            Ok(())
        })
    }
}
