use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use linkedtrust_utils::files::{read_file_if_exists, write_file_atomic};

pub const USER_DID_KEY: &str = "userDid";
pub const USER_ID_TYPE_KEY: &str = "userIdType";
pub const ETH_ADDRESS_KEY: &str = "ethAddress";
pub const USE_RAW_ETH_ADDRESS_KEY: &str = "useRawEthAddress";

#[derive(thiserror::Error, Debug)]
pub enum SessionStoreError {
    #[error("io error")]
    IoError(#[from] std::io::Error),

    #[error("json error")]
    JsonError(#[from] serde_json::Error),
}

/// Persistent key-value session state
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionStoreError>;

    fn remove(&mut self, key: &str) -> Result<(), SessionStoreError>;
}

#[derive(Default)]
pub struct MemorySessionStore {
    values: HashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionStoreError> {
        self.values.remove(key);
        Ok(())
    }
}

type SessionData = BTreeMap<String, String>;

/// Session state stored in JSON file, readable only by the owner.
/// File is re-read on every access.
pub struct FileSessionStore {
    file_path: PathBuf,
}

impl FileSessionStore {
    pub fn new(file_path: &Path) -> Self {
        Self { file_path: file_path.to_path_buf() }
    }

    fn load(&self) -> Result<SessionData, SessionStoreError> {
        let data = match read_file_if_exists(&self.file_path)? {
            Some(data_str) => serde_json::from_str(&data_str)?,
            None => SessionData::new(),
        };
        Ok(data)
    }

    fn save(&self, data: &SessionData) -> Result<(), SessionStoreError> {
        let data_str = serde_json::to_string_pretty(data)?;
        write_file_atomic(data_str.as_bytes(), &self.file_path, 0o600)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        let mut data = self.load()?;
        Ok(data.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        let mut data = self.load()?;
        data.insert(key.to_string(), value.to_string());
        self.save(&data)
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionStoreError> {
        let mut data = self.load()?;
        if data.remove(key).is_some() {
            self.save(&data)?;
        };
        Ok(())
    }
}
