use std::collections::HashMap;

use super::{KeyValueStore, StoreError};

/// In-process store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self { entries }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("elapseTime").unwrap(), None);
    }

    #[test]
    fn set_overwrites() {
        let mut store = MemoryStore::new();
        store.set("k", "1").unwrap();
        store.set("k", "2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn boxed_store_forwards() {
        let mut store: Box<dyn KeyValueStore> = Box::new(MemoryStore::with_entry("k", "7"));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("7"));
        store.set("k", "8").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("8"));
    }
}
