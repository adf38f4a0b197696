//! Error types for fact cache operations
//!
//! This module defines the error type shared by backends, the loader, the
//! adjudicator and the fact cache. Backend failures travel through the
//! adjudicator unchanged; only load failures get wrapped with the name of the
//! backend that was attempted.

use thiserror::Error;

/// Main error type for cache operations
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key is not present in the backend
    #[error("Key not found: {0}")]
    KeyNotFoundError(String),

    /// No backend is registered under the requested name
    #[error("Unknown cache backend: {0}")]
    UnknownBackendError(String),

    /// Backend needs a configuration option that was not supplied
    #[error("Cache backend '{backend}' requires the '{option}' option")]
    MissingOptionError { backend: String, option: String },

    /// Adjudicator could not resolve its backend
    #[error("Unable to load the cache plugin ({backend}): {source}")]
    LoadError {
        backend: String,
        #[source]
        source: Box<CacheError>,
    },

    /// Fact cache could not resolve the configured backend
    #[error("Unable to load the facts cache plugin ({backend}): {source}")]
    FactCacheLoadError {
        backend: String,
        #[source]
        source: Box<CacheError>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization/Deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Filesystem error from a file-backed store
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Backend-internal failure
    #[error("Backend error: {0}")]
    BackendError(String),
}

impl CacheError {
    /// True for the mapping-style "key is absent" error
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, CacheError::KeyNotFoundError(_))
    }

    /// True when the error came from resolving a backend
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            CacheError::LoadError { .. } | CacheError::FactCacheLoadError { .. }
        )
    }
}

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;

impl From<serde_json::Error> for CacheError {
    fn from(e: serde_json::Error) -> Self {
        CacheError::SerializationError(e.to_string())
    }
}
