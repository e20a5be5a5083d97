//! Key-value persistence used by the clock.
//!
//! The clock only ever touches one key, but the store is modelled as a small
//! string map so that backends stay interchangeable:
//! - `MemoryStore` for tests and throwaway sessions
//! - `FileStore` for a JSON file on disk

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Minimal string key-value store.
///
/// `get` distinguishes "absent" (`Ok(None)`) from a backend failure (`Err`).
/// `set` overwrites any previous value.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}
