//! Save/load persistence for page state
//!
//! State is stored as JSON strings under fixed keys. The browser backend is
//! LocalStorage (`platform::storage`); `MemoryStore` backs native builds and
//! tests.

mod memory;

pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend is missing (e.g. LocalStorage disabled)
    #[error("Storage unavailable")]
    Unavailable,

    /// Backend refused the operation (quota, privacy mode)
    #[error("Storage write failed: {0}")]
    WriteFailed(String),

    /// Value could not be serialized
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Synchronous string key/value store
pub trait KeyValueStore {
    /// Read a raw value; `None` if the key is absent or unreadable
    fn get(&self, key: &str) -> Option<String>;

    /// Overwrite a raw value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Load a JSON value, treating absent or malformed data as `None`
pub fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str::<Option<T>>(&raw) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Ignoring unreadable '{key}': {e}");
            None
        }
    }
}

/// Serialize and write a JSON value
pub fn save_json<T: Serialize + ?Sized>(
    store: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_key() {
        let store = MemoryStore::new();
        assert_eq!(load_json::<Vec<String>>(&store, "k"), None);
    }

    #[test]
    fn test_load_malformed_is_none() {
        let mut store = MemoryStore::new();
        store.set("k", "[\"unterminated").unwrap();
        assert_eq!(load_json::<Vec<String>>(&store, "k"), None);

        store.set("k", "{\"a\":1}").unwrap();
        assert_eq!(load_json::<Vec<String>>(&store, "k"), None);
    }

    #[test]
    fn test_load_null_is_none() {
        let mut store = MemoryStore::new();
        store.set("k", "null").unwrap();
        assert_eq!(load_json::<Vec<String>>(&store, "k"), None);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let value = vec!["a".to_string(), "b".to_string()];
        save_json(&mut store, "k", &value).unwrap();
        assert_eq!(store.get("k").as_deref(), Some(r#"["a","b"]"#));
        assert_eq!(load_json::<Vec<String>>(&store, "k"), Some(value));
    }
}
