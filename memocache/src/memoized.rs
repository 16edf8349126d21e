//! The memoizing wrapper around a service.
mod method;

pub use self::method::CachedMethod;

use crate::config::{Config, MethodOptions};
use crate::entry;
use crate::error::{Error, Result};
use crate::key;
use crate::store::memory::MemoryStore;
use crate::store::{AsyncStore, Store};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::convert::Infallible;
use std::fmt::{self, Debug};
use std::future::Future;
use std::ops::Deref;
use std::sync::Arc;
use tracing::{debug, warn};

/// Wraps `service` so the methods named in `config` are cached in `store`.
pub fn wrap<S, St>(service: S, config: Config, store: St) -> Memoized<S, St> {
    MemoizedBuilder::new(service).config(config).store(store).build()
}

pub trait Memoizable<St>
where
    Self: Sized,
{
    fn memoized(self, config: Config, store: St) -> Memoized<Self, St>;
}

impl<S, St> Memoizable<St> for S {
    fn memoized(self, config: Config, store: St) -> Memoized<Self, St> {
        wrap(self, config, store)
    }
}

/// A service whose configured methods are memoized.
///
/// Methods are invoked by name through [`call`](Self::call) and its variants,
/// with the arguments as a tuple and a closure that runs the real method on
/// the wrapped service. Names without an entry in the [`Config`] always reach
/// the real method. Everything else on the service (fields, methods invoked
/// directly) is available unchanged through `Deref`.
///
/// ```
/// use memocache::{Config, MethodOptions, Memoized};
///
/// struct Calculator {
///     offset: i32,
/// }
///
/// impl Calculator {
///     fn add(&self, x: i32, y: i32) -> i32 {
///         x + y + self.offset
///     }
/// }
///
/// let calculator = Memoized::builder(Calculator { offset: 5 })
///     .config(Config::new().method("add", MethodOptions::new()))
///     .build();
/// let sum = calculator.call("add", (2, 3), |c, (x, y)| c.add(x, y)).unwrap();
/// assert_eq!(sum, 10);
/// assert_eq!(calculator.offset, 5);
/// ```
pub struct Memoized<S, St = MemoryStore> {
    service: Arc<S>,
    config: Arc<Config>,
    store: Arc<St>,
}

impl<S> Memoized<S> {
    /// Wraps `service` with an empty config and a fresh [`MemoryStore`].
    ///
    /// Nothing is cached until methods are configured, see [`builder`](Self::builder).
    pub fn new(service: S) -> Self {
        Self::builder(service).build()
    }
    pub fn builder(service: S) -> MemoizedBuilder<S> {
        MemoizedBuilder::new(service)
    }
}

impl<S, St> Memoized<S, St> {
    pub fn service(&self) -> &Arc<S> {
        &self.service
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn store(&self) -> &St {
        &self.store
    }
    /// Binds the method `name` to the wrapped service.
    ///
    /// The returned handle owns everything it needs and can be stored and
    /// called later; it caches exactly as calling through the wrapper would.
    pub fn method<F>(&self, name: impl Into<String>, f: F) -> CachedMethod<S, St, F> {
        CachedMethod::new(self.clone(), name.into(), f)
    }
    fn cache_key<A, E>(&self, method: &str, args: &A, options: &MethodOptions) -> Result<String, E>
    where
        A: Serialize,
    {
        let error = |source| Error::Arguments { method: method.to_string(), source };
        let args = key::arguments(args).map_err(error)?;
        key::cache_key(method, &args, options).map_err(error)
    }
}

fn encode<T, E>(method: &str, value: &T) -> Result<String, E>
where
    T: Serialize,
{
    entry::encode(value).map_err(|source| Error::Serialize { method: method.to_string(), source })
}

fn decode<T, E>(key: String, raw: &str) -> Result<T, E>
where
    T: DeserializeOwned,
{
    entry::decode(raw).map_err(|source| Error::Deserialize { key, source })
}

impl<S, St> Memoized<S, St>
where
    St: Store,
{
    /// Calls the method `name`, caching its result if it is configured.
    pub fn call<A, R, F>(&self, name: &str, args: A, f: F) -> Result<R>
    where
        A: Serialize,
        R: Serialize + DeserializeOwned,
        F: FnOnce(&S, A) -> R,
    {
        self.try_call(name, args, |service, args| Ok::<_, Infallible>(f(service, args)))
    }
    /// Calls the fallible method `name`, caching only its `Ok` results.
    pub fn try_call<A, R, E, F>(&self, name: &str, args: A, f: F) -> Result<R, E>
    where
        A: Serialize,
        R: Serialize + DeserializeOwned,
        F: FnOnce(&S, A) -> core::result::Result<R, E>,
    {
        let Some(options) = self.config.get(name) else {
            debug!(method = name, "not cached");
            return f(&self.service, args).map_err(Error::Method);
        };
        if options.asynchronous {
            warn!(method = name, "configured as async but called synchronously");
        }
        // Arguments are consumed by the call, so the key is built first.
        let key = self.cache_key::<A, E>(name, &args, options)?;
        if let Some(raw) = Store::get(&*self.store, &key).map_err(Error::<E>::store)? {
            debug!(method = name, %key, "cache hit");
            return decode(key, &raw);
        }
        debug!(method = name, %key, "cache miss");
        let value = f(&self.service, args).map_err(Error::Method)?;
        let raw = encode::<R, E>(name, &value)?;
        Store::set(&*self.store, key, raw).map_err(Error::<E>::store)?;
        Ok(value)
    }
}

impl<S, St> Memoized<S, St>
where
    St: AsyncStore,
{
    /// Calls the async method `name`, caching its result if it is configured.
    ///
    /// `f` receives the service by `Arc` so the returned future can own it.
    pub async fn call_async<A, R, F, Fut>(&self, name: &str, args: A, f: F) -> Result<R>
    where
        A: Serialize,
        R: Serialize + DeserializeOwned,
        F: FnOnce(Arc<S>, A) -> Fut,
        Fut: Future<Output = R>,
    {
        self.try_call_async(name, args, |service, args| {
            let fut = f(service, args);
            async move { Ok::<_, Infallible>(fut.await) }
        })
        .await
    }
    /// Calls the fallible async method `name`, caching only its `Ok` results.
    ///
    /// A cache hit resolves without calling `f` at all. An `Err` is returned
    /// as [`Error::Method`] and the next call with the same key runs again.
    ///
    /// Dropping the returned future before it completes also drops the
    /// method's future, so nothing is stored for that call.
    pub async fn try_call_async<A, R, E, F, Fut>(&self, name: &str, args: A, f: F) -> Result<R, E>
    where
        A: Serialize,
        R: Serialize + DeserializeOwned,
        F: FnOnce(Arc<S>, A) -> Fut,
        Fut: Future<Output = core::result::Result<R, E>>,
    {
        let Some(options) = self.config.get(name) else {
            debug!(method = name, "not cached");
            return f(Arc::clone(&self.service), args).await.map_err(Error::Method);
        };
        if !options.asynchronous {
            warn!(method = name, "configured as sync but called asynchronously");
        }
        let key = self.cache_key::<A, E>(name, &args, options)?;
        let cached = AsyncStore::get(&*self.store, &key).await.map_err(Error::<E>::store)?;
        if let Some(raw) = cached {
            debug!(method = name, %key, "cache hit");
            return decode(key, &raw);
        }
        debug!(method = name, %key, "cache miss");
        let value = f(Arc::clone(&self.service), args).await.map_err(Error::Method)?;
        let raw = encode::<R, E>(name, &value)?;
        AsyncStore::set(&*self.store, key, raw).await.map_err(Error::<E>::store)?;
        Ok(value)
    }
}

impl<S, St> Clone for Memoized<S, St> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            config: Arc::clone(&self.config),
            store: Arc::clone(&self.store),
        }
    }
}

impl<S, St> Deref for Memoized<S, St> {
    type Target = S;

    fn deref(&self) -> &Self::Target {
        &self.service
    }
}

impl<S, St> Debug for Memoized<S, St>
where
    S: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoized")
            .field("service", &self.service)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// A builder for creating a [`Memoized`] service.
pub struct MemoizedBuilder<S, St = MemoryStore> {
    service: S,
    config: Config,
    store: St,
}

impl<S> MemoizedBuilder<S> {
    /// Create a new builder with an empty config and a [`MemoryStore`].
    pub fn new(service: S) -> Self {
        Self { service, config: Config::default(), store: MemoryStore::default() }
    }
}

impl<S, St> MemoizedBuilder<S, St> {
    /// Set the methods to cache.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }
    /// Set the store for cache entries.
    ///
    /// Returns a new builder with the store set.
    pub fn store<St0>(self, store: St0) -> MemoizedBuilder<S, St0> {
        MemoizedBuilder { service: self.service, config: self.config, store }
    }
    pub fn build(self) -> Memoized<S, St> {
        Memoized {
            service: Arc::new(self.service),
            config: Arc::new(self.config),
            store: Arc::new(self.store),
        }
    }
}
