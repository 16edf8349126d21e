//! Per-method caching configuration.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::Arc;

/// A custom key function.
///
/// Receives the positional arguments of a call and returns the cache key
/// verbatim; keeping keys distinct is up to the function.
pub type KeyFn = Arc<dyn Fn(&[Value]) -> String + Send + Sync>;

/// Options for a single cached method.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct MethodOptions {
    /// Whether the method returns a future.
    #[serde(default, rename = "async")]
    pub asynchronous: bool,
    /// Overrides the default `{"method", "args"}` key.
    #[serde(skip)]
    pub key: Option<KeyFn>,
}

impl MethodOptions {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn asynchronous(mut self) -> Self {
        self.asynchronous = true;
        self
    }
    pub fn key<F>(mut self, key: F) -> Self
    where
        F: Fn(&[Value]) -> String + Send + Sync + 'static,
    {
        self.key = Some(Arc::new(key));
        self
    }
    pub fn is_async(&self) -> bool {
        self.asynchronous
    }
    pub fn has_custom_key(&self) -> bool {
        self.key.is_some()
    }
}

impl Debug for MethodOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodOptions")
            .field("asynchronous", &self.asynchronous)
            .field("key", &self.key.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Which methods are cached, and how.
///
/// A method with no entry is never cached. Deserializes from a JSON object
/// such as `{"add": {}, "fetch": {"async": true}}`; key functions can only be
/// attached in code.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    methods: HashMap<String, MethodOptions>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }
    /// Marks `name` as cached, replacing any previous options for it.
    pub fn method(mut self, name: impl Into<String>, options: MethodOptions) -> Self {
        self.methods.insert(name.into(), options);
        self
    }
    pub fn get(&self, name: &str) -> Option<&MethodOptions> {
        self.methods.get(name)
    }
    pub fn is_cached(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }
    pub fn len(&self) -> usize {
        self.methods.len()
    }
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl<K> FromIterator<(K, MethodOptions)> for Config
where
    K: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, MethodOptions)>>(iter: I) -> Self {
        Self { methods: iter.into_iter().map(|(name, options)| (name.into(), options)).collect() }
    }
}
