//! Snapshot storage backends.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use super::snapshot::RoundSnapshot;
use crate::core::{PairsError, Result};

/// Key under which the round snapshot is kept.
pub const ROUND_KEY: &str = "round";

/// Where a round snapshot lives between sessions.
///
/// At most one record is stored. A missing record means "no saved round".
pub trait SnapshotStore {
    /// Write the snapshot, replacing any previous one.
    fn save(&mut self, snapshot: &RoundSnapshot) -> Result<()>;

    /// Read the snapshot, `None` if nothing is stored.
    fn load(&self) -> Result<Option<RoundSnapshot>>;

    /// Delete the stored snapshot, if any.
    fn clear(&mut self) -> Result<()>;
}

/// Key-value store of encoded records, kept in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, Vec<u8>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Is a record stored under `key`?
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Raw encoded bytes under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Overwrite the raw bytes under `key`.
    pub fn set_raw(&mut self, key: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(key.into(), bytes);
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, snapshot: &RoundSnapshot) -> Result<()> {
        let bytes = snapshot.to_bytes()?;
        self.entries.insert(ROUND_KEY.to_string(), bytes);
        Ok(())
    }

    fn load(&self) -> Result<Option<RoundSnapshot>> {
        self.entries
            .get(ROUND_KEY)
            .map(|bytes| RoundSnapshot::from_bytes(bytes))
            .transpose()
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.remove(ROUND_KEY);
        Ok(())
    }
}

/// Single JSON file on disk.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous save intact.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotStore for FileStore {
    fn save(&mut self, snapshot: &RoundSnapshot) -> Result<()> {
        let json = snapshot.to_json()?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| PairsError::persistence("create snapshot directory", e))?;
        }
        let temp = self.temp_path();
        std::fs::write(&temp, json).map_err(|e| PairsError::persistence("write snapshot", e))?;
        std::fs::rename(&temp, &self.path).map_err(|e| PairsError::persistence("replace snapshot", e))?;
        tracing::debug!(path = %self.path.display(), "round snapshot saved");
        Ok(())
    }

    fn load(&self) -> Result<Option<RoundSnapshot>> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PairsError::persistence("read snapshot", e)),
        };
        RoundSnapshot::from_json(&json).map(Some)
    }

    fn clear(&mut self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PairsError::persistence("remove snapshot", e)),
        }
    }
}
