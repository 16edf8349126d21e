use std::convert::Infallible;
use thiserror::Error;

/// Error type for this crate.
///
/// `E` is the error of the wrapped method itself. It is passed through as
/// [`Error::Method`] and never cached.
#[derive(Error, Debug)]
pub enum Error<E = Infallible> {
    #[error(transparent)]
    Method(E),
    #[error("failed to serialize arguments of `{method}`: {source}")]
    Arguments { method: String, source: serde_json::Error },
    #[error("failed to serialize result of `{method}`: {source}")]
    Serialize { method: String, source: serde_json::Error },
    #[error("malformed cache entry at {key}: {source}")]
    Deserialize { key: String, source: serde_json::Error },
    #[error("store error: {0}")]
    Store(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl<E> Error<E> {
    pub(crate) fn store(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Store(Box::new(error))
    }
    /// Returns the wrapped method's own error, if that is what this is.
    pub fn into_method(self) -> Option<E> {
        match self {
            Self::Method(e) => Some(e),
            _ => None,
        }
    }
}

/// Type alias to use this crate's [`Error`](enum@crate::Error) type in a [`Result`](core::result::Result).
pub type Result<T, E = Infallible> = core::result::Result<T, Error<E>>;
