//! Transparent memoization of service methods.
//!
//! A [`Memoized`] wraps any service value. Methods listed in its [`Config`]
//! have their results stored in a key-value [`Store`](store::Store), keyed by
//! method name and arguments, and later calls with equal arguments are served
//! from the store without running the method again. Everything else passes
//! through to the service untouched.
//!
//! Results and arguments must be JSON-representable. Errors returned by a
//! method are never cached.
//!
//! Async calls are ordinary futures: dropping one before it resolves cancels
//! the wrapped method too, and nothing is cached for it. Keep the future alive
//! (or spawn it) if the result should be stored regardless of the caller.
pub mod config;
mod entry;
mod error;
pub mod key;
mod memoized;
pub mod store;

pub use config::{Config, KeyFn, MethodOptions};
pub use error::{Error, Result};
pub use memoized::{wrap, CachedMethod, Memoizable, Memoized, MemoizedBuilder};
