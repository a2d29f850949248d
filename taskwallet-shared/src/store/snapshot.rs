//! Snapshot persistence
//!
//! The store writes its whole [`State`] after every successful mutation. A
//! snapshot backend only needs to hand back the last state it was given.
//!
//! # Backends
//!
//! - [`FileSnapshotStore`]: pretty-printed JSON on disk, replaced atomically
//!   by writing a temporary sibling and renaming it over the target
//! - [`MemorySnapshotStore`]: keeps the serialized bytes in process
//!
//! # Example
//!
//! ```
//! use taskwallet_shared::store::snapshot::{MemorySnapshotStore, SnapshotStore};
//! use taskwallet_shared::store::State;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let snapshots = MemorySnapshotStore::new();
//! assert!(snapshots.load().await?.is_none());
//!
//! snapshots.save(&State::default()).await?;
//! assert!(snapshots.load().await?.is_some());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::state::State;

/// Snapshot error types
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Reading or writing the backing storage failed
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stored snapshot is not a valid state document
    #[error("Snapshot is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Snapshot result type alias
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Persistent home for the store's state
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// The last saved state, or `None` if nothing was ever saved
    async fn load(&self) -> SnapshotResult<Option<State>>;

    async fn save(&self, state: &State) -> SnapshotResult<()>;

    /// Short label for logs
    fn describe(&self) -> String;
}

/// JSON file snapshot
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn load(&self) -> SnapshotResult<Option<State>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let state = serde_json::from_slice(&bytes)?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "Snapshot loaded");
        Ok(Some(state))
    }

    async fn save(&self, state: &State) -> SnapshotResult<()> {
        let bytes = serde_json::to_vec_pretty(state)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, &bytes).await?;
        tokio::fs::rename(&temp, &self.path).await?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "Snapshot saved");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// In-process snapshot
///
/// Holds the serialized JSON so that loading goes through the same
/// deserialization path as the file backend.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    bytes: Mutex<Option<Vec<u8>>>,
    saves: AtomicUsize,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with raw bytes already stored, as if a previous run saved them
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Mutex::new(Some(bytes.into())),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self) -> SnapshotResult<Option<State>> {
        let bytes = self.bytes.lock().await;
        match bytes.as_deref() {
            Some(bytes) => Ok(Some(serde_json::from_slice(bytes)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, state: &State) -> SnapshotResult<()> {
        let serialized = serde_json::to_vec(state)?;
        *self.bytes.lock().await = Some(serialized);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_round_trip_counts_saves() {
        let snapshots = MemorySnapshotStore::new();
        let mut state = State::default();
        state.settings.ref_bonus = 75;

        snapshots.save(&state).await.unwrap();
        snapshots.save(&state).await.unwrap();

        let loaded = snapshots.load().await.unwrap().unwrap();
        assert_eq!(loaded.settings.ref_bonus, 75);
        assert_eq!(snapshots.save_count(), 2);
    }

    #[tokio::test]
    async fn test_memory_corrupt_bytes() {
        let snapshots = MemorySnapshotStore::with_bytes("not json");

        assert!(matches!(
            snapshots.load().await,
            Err(SnapshotError::Serialization(_))
        ));
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let store = FileSnapshotStore::new("data/taskwallet.json");
        assert_eq!(store.temp_path(), PathBuf::from("data/taskwallet.json.tmp"));
        assert_eq!(store.describe(), "file:data/taskwallet.json");
    }
}
