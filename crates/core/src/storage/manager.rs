use crate::errors::CoreError;
use crate::models::store::Store;

use super::format;

/// High-level storage operations: save/load the store to/from snapshot
/// bytes or files.
pub struct StorageManager;

impl StorageManager {
    /// Serialize the store to raw snapshot bytes (portable,
    /// platform-independent).
    ///
    /// Flow: Store → bincode → IVTK container bytes
    pub fn save_to_bytes(store: &Store) -> Result<Vec<u8>, CoreError> {
        let payload = bincode::serialize(store)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize store: {e}")))?;
        Ok(format::write_file(format::CURRENT_VERSION, &payload))
    }

    /// Deserialize a store from raw snapshot bytes.
    ///
    /// Flow: IVTK bytes → parse header → bincode → Store
    pub fn load_from_bytes(data: &[u8]) -> Result<Store, CoreError> {
        let (_header, payload) = format::read_file(data)?;
        let store: Store = bincode::deserialize(payload)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize store: {e}")))?;
        Ok(store)
    }

    /// Save the store to a snapshot file on disk.
    pub fn save_to_file(store: &Store, path: &str) -> Result<(), CoreError> {
        let bytes = Self::save_to_bytes(store)?;
        std::fs::write(path, bytes)?;
        log::debug!("saved snapshot to {path}");
        Ok(())
    }

    /// Load the store from a snapshot file on disk.
    pub fn load_from_file(path: &str) -> Result<Store, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::load_from_bytes(&bytes)
    }
}
