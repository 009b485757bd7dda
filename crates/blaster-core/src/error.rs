use thiserror::Error;

/// Result type for operations on shared core types.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

/// Errors produced while deriving a short code from a long URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("base58 encoding failed: {0}")]
    Encoding(String),
}

/// Errors surfaced by a mapping store.
///
/// `Unavailable` covers every transport or backend failure, including an
/// elapsed command deadline. Stores never retry internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("short code not found: {0}")]
    NotFound(String),
    #[error("store backend unavailable: {0}")]
    Unavailable(String),
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid expiration: {0}")]
    InvalidExpiration(String),
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}
