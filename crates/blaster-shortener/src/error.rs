use blaster_core::{CoreError, GeneratorError, StoreError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("failed to encode short code: {0}")]
    Encoding(String),
    #[error("short code not found: {0}")]
    NotFound(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage rejected request: {0}")]
    Store(String),
}

impl From<CoreError> for ShortenerError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidShortCode(message) => Self::InvalidShortCode(message),
        }
    }
}

impl From<GeneratorError> for ShortenerError {
    fn from(value: GeneratorError) -> Self {
        match value {
            GeneratorError::InvalidUrl(message) => Self::InvalidUrl(message),
            GeneratorError::Encoding(message) => Self::Encoding(message),
        }
    }
}

impl From<StoreError> for ShortenerError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(code) => Self::NotFound(code),
            StoreError::Unavailable(message) => Self::Unavailable(message),
            StoreError::InvalidUrl(message) => Self::InvalidUrl(message),
            StoreError::InvalidShortCode(message) => Self::InvalidShortCode(message),
            other @ StoreError::InvalidExpiration(_) => Self::Store(other.to_string()),
        }
    }
}
