use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Error type for cart persistence
#[derive(Debug, thiserror::Error)]
pub enum CartStorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Key-value persistence behind the cart.
///
/// The cart is device-local state, so the backend is whatever the host
/// platform offers; these implementations cover tests and a simple on-disk
/// deployment.
pub trait CartStorage: Send + Sync {
    /// Load the raw bytes stored under a key, if any
    fn load(&self, key: &str) -> Option<Vec<u8>>;

    /// Persist raw bytes under a key
    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), CartStorageError>;

    /// Remove a key and its bytes
    fn remove(&self, key: &str) -> Result<(), CartStorageError>;
}

/// In-memory storage, used in tests
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self, key: &str) -> Option<Vec<u8>> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), CartStorageError> {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), bytes.to_vec());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CartStorageError> {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
        Ok(())
    }
}

/// File-backed storage keeping one file per key under a directory
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl CartStorage for FileStorage {
    fn load(&self, key: &str) -> Option<Vec<u8>> {
        std::fs::read(self.path_for(key)).ok()
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), CartStorageError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), bytes)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CartStorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
