use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use vv_core::ports::{KeyValueStorePort, StorageError};

const APP_DIR_NAME: &str = "violetvibes";

/// File-backed key-value store: one file per key under a base directory.
///
/// Writes go to a temp file first and are renamed into place, so a reader
/// sees either the old or the new value.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    base_dir: PathBuf,
}

impl FileKeyValueStore {
    /// Create the store rooted at `<data_root>/violetvibes/store`.
    pub fn new_in_data_root(data_root: &Path) -> Result<Self, StorageError> {
        Self::open(data_root.join(APP_DIR_NAME).join("store"))
    }

    /// Create the store under the platform data directory.
    pub fn new_in_platform_data_dir() -> Result<Self, StorageError> {
        let root = dirs::data_local_dir()
            .ok_or_else(|| StorageError::Io("no platform data directory".into()))?;
        Self::new_in_data_root(&root)
    }

    /// Create the store in `base_dir`, creating it if needed.
    pub fn open(base_dir: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_dir).map_err(|err| {
            Self::map_io_error(&format!("failed to create {}", base_dir.display()), err)
        })?;
        Ok(Self { base_dir })
    }

    /// Construct without touching the file system.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }

    fn map_io_error(context: &str, err: io::Error) -> StorageError {
        StorageError::Io(format!("{context}: {err}"))
    }
}

impl KeyValueStorePort for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.file_path(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Self::map_io_error("failed to read store file", err)),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let path = self.file_path(key);
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, value)
            .map_err(|err| Self::map_io_error("failed to write store temp file", err))?;
        fs::rename(&temp_path, &path)
            .map_err(|err| Self::map_io_error("failed to rename store file", err))?;
        tracing::trace!(key, bytes = value.len(), "store value written");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.file_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Self::map_io_error("failed to delete store file", err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vv_core::ports::KeyValueStoreExt;

    #[test]
    fn roundtrip_stores_and_loads() {
        let temp_dir = tempfile::TempDir::new().expect("temp dir");
        let store = FileKeyValueStore::with_base_dir(temp_dir.path().to_path_buf());
        store.set("homeAddress", br#""70 Washington Sq S""#).expect("set");
        let loaded = store.get("homeAddress").expect("get");
        assert_eq!(loaded, Some(br#""70 Washington Sq S""#.to_vec()));
    }

    #[test]
    fn missing_key_returns_none_and_delete_is_ok() {
        let temp_dir = tempfile::TempDir::new().expect("temp dir");
        let store = FileKeyValueStore::with_base_dir(temp_dir.path().to_path_buf());
        assert!(store.get("vv_user_session").expect("get").is_none());
        store.delete("vv_user_session").expect("delete missing");
    }

    #[test]
    fn overwrite_leaves_no_temp_file() {
        let temp_dir = tempfile::TempDir::new().expect("temp dir");
        let store = FileKeyValueStore::with_base_dir(temp_dir.path().to_path_buf());
        store.set_json("hasLoggedIn", &false).expect("set");
        store.set_json("hasLoggedIn", &true).expect("overwrite");

        assert!(store.get_flag("hasLoggedIn").expect("flag"));
        let leftovers: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.path().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn new_in_data_root_creates_directory() {
        let temp_dir = tempfile::TempDir::new().expect("temp dir");
        let store = FileKeyValueStore::new_in_data_root(temp_dir.path()).expect("open");
        assert!(store.base_dir().ends_with("violetvibes/store"));
        assert!(store.base_dir().is_dir());
    }
}
