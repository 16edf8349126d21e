use super::Store;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

#[derive(Error, Debug)]
#[error("memory store error")]
pub struct Error;

/// A [`Store`] kept in process memory.
///
/// Clones share the same contents, so one store can back several wrappers.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    store: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, Error> {
        self.store.lock().map_err(|_| Error)
    }
    pub fn del(&self, key: &str) -> Result<(), Error> {
        self.lock()?.remove(key);
        Ok(())
    }
    pub fn clear(&self) -> Result<(), Error> {
        self.lock()?.clear();
        Ok(())
    }
    pub fn len(&self) -> Result<usize, Error> {
        Ok(self.lock()?.len())
    }
    pub fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.lock()?.is_empty())
    }
}

impl Store for MemoryStore {
    type Error = Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.lock()?.get(key).cloned())
    }
    fn set(&self, key: String, value: String) -> Result<(), Self::Error> {
        self.lock()?.insert(key, value);
        Ok(())
    }
}
