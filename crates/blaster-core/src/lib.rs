//! Core types and traits for the URL Blaster shortener.
//!
//! This crate provides the types shared by the code generator, the mapping
//! store implementations and the HTTP gateway.

pub mod base58;
pub mod error;
pub mod generator;
pub mod shortcode;
pub mod store;
pub mod url;

pub use base58::ShortCodeBase58;
pub use error::{CoreError, GeneratorError, StoreError};
pub use generator::Generator;
pub use shortcode::ShortCode;
pub use store::{
    ensure_target_url, ensure_valid_code, ExpirationPolicy, UrlStore, DEFAULT_MAPPING_TTL,
};
pub use url::validate_long_url;
