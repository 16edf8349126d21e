use super::Memoized;
use crate::error::Result;
use crate::store::{AsyncStore, Store};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;

/// A method of a [`Memoized`] service bound to its receiver.
///
/// Created by [`Memoized::method`]. Whether calls are cached is decided by the
/// wrapper's config for [`name`](Self::name), just as for direct calls.
pub struct CachedMethod<S, St, F> {
    memoized: Memoized<S, St>,
    name: String,
    f: F,
}

impl<S, St, F> CachedMethod<S, St, F> {
    pub(super) fn new(memoized: Memoized<S, St>, name: String, f: F) -> Self {
        Self { memoized, name, f }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<S, St, F> CachedMethod<S, St, F>
where
    St: Store,
{
    pub fn call<A, R>(&self, args: A) -> Result<R>
    where
        A: Serialize,
        R: Serialize + DeserializeOwned,
        F: Fn(&S, A) -> R,
    {
        self.memoized.call(&self.name, args, &self.f)
    }
    pub fn try_call<A, R, E>(&self, args: A) -> Result<R, E>
    where
        A: Serialize,
        R: Serialize + DeserializeOwned,
        F: Fn(&S, A) -> core::result::Result<R, E>,
    {
        self.memoized.try_call(&self.name, args, &self.f)
    }
}

impl<S, St, F> CachedMethod<S, St, F>
where
    St: AsyncStore,
{
    pub async fn call_async<A, R, Fut>(&self, args: A) -> Result<R>
    where
        A: Serialize,
        R: Serialize + DeserializeOwned,
        F: Fn(Arc<S>, A) -> Fut,
        Fut: Future<Output = R>,
    {
        self.memoized.call_async(&self.name, args, &self.f).await
    }
    pub async fn try_call_async<A, R, E, Fut>(&self, args: A) -> Result<R, E>
    where
        A: Serialize,
        R: Serialize + DeserializeOwned,
        F: Fn(Arc<S>, A) -> Fut,
        Fut: Future<Output = core::result::Result<R, E>>,
    {
        self.memoized.try_call_async(&self.name, args, &self.f).await
    }
}

impl<S, St, F> Clone for CachedMethod<S, St, F>
where
    F: Clone,
{
    fn clone(&self) -> Self {
        Self { memoized: self.memoized.clone(), name: self.name.clone(), f: self.f.clone() }
    }
}
