//! Key-value stores holding serialized cache entries.
//!
//! The wrapper only ever reads and writes strings: keys produced by
//! [`cache_key`](crate::key::cache_key) and entries of the form `{"value": ...}`.
pub mod file;
pub mod memory;
#[cfg(not(target_arch = "wasm32"))]
pub mod moka;

use std::error::Error;
use std::future::Future;

/// A synchronous store, used by the blocking call paths.
pub trait Store {
    type Error: Error + Send + Sync + 'static;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;
    fn set(&self, key: String, value: String) -> Result<(), Self::Error>;
}

/// A store whose operations may suspend, used by the `async` call paths.
///
/// Every [`Store`] that is `Send + Sync` is also an `AsyncStore`.
#[cfg_attr(not(target_arch = "wasm32"), trait_variant::make(Send))]
pub trait AsyncStore {
    type Error: Error + Send + Sync + 'static;

    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, Self::Error>>;
    fn set(&self, key: String, value: String) -> impl Future<Output = Result<(), Self::Error>>;
}

impl<T> AsyncStore for T
where
    T: Store + Send + Sync,
{
    type Error = T::Error;

    async fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Store::get(self, key)
    }
    async fn set(&self, key: String, value: String) -> Result<(), Self::Error> {
        Store::set(self, key, value)
    }
}
