use super::AsyncStore;
use moka::future::Cache;
use std::convert::Infallible;

/// An [`AsyncStore`] backed by an unbounded [`moka`] cache.
///
/// Entries are never evicted or expired.
#[derive(Clone)]
pub struct MokaStore {
    inner: Cache<String, String>,
}

impl MokaStore {
    pub fn new() -> Self {
        Self { inner: Cache::builder().build() }
    }
    pub async fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }
}

impl Default for MokaStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AsyncStore for MokaStore {
    type Error = Infallible;

    async fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.inner.get(key).await)
    }
    async fn set(&self, key: String, value: String) -> Result<(), Self::Error> {
        self.inner.insert(key, value).await;
        Ok(())
    }
}
