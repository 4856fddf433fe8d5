use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Key-value storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backing store could not be read or written.
    #[error("storage io failed: {0}")]
    Io(String),

    /// A stored value is not valid for its key.
    #[error("storage data corrupt for key '{key}': {message}")]
    Corrupt { key: String, message: String },

    /// A value could not be encoded for storage.
    #[error("storage encode failed for key '{key}': {message}")]
    Encode { key: String, message: String },
}

/// Flat key-value storage for small client state.
///
/// Operations are synchronous: a write has reached the store when the call
/// returns.
pub trait KeyValueStorePort: Send + Sync {
    /// Get a value by key. Missing keys are `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Set a value by key, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Delete a value by key. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// JSON helpers over any [`KeyValueStorePort`].
pub trait KeyValueStoreExt: KeyValueStorePort {
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.get(key)? {
            None => Ok(None),
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| StorageError::Corrupt {
                    key: key.to_string(),
                    message: e.to_string(),
                }),
        }
    }

    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(value).map_err(|e| StorageError::Encode {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.set(key, &bytes)
    }

    /// Boolean flags default to `false` when absent.
    fn get_flag(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.get_json::<bool>(key)?.unwrap_or(false))
    }
}

impl<S: KeyValueStorePort + ?Sized> KeyValueStoreExt for S {}

#[cfg(any(test, feature = "mocks"))]
mockall::mock! {
    pub KeyValueStore {}

    impl KeyValueStorePort for KeyValueStore {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
        fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;
        fn delete(&self, key: &str) -> Result<(), StorageError>;
    }
}
