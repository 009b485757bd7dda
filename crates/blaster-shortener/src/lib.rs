//! URL shortener service.
//!
//! [`ShortenerService`] is the caller that composes a [`Generator`] and a
//! [`UrlStore`]: it validates input, picks the code and persists the mapping.
//!
//! [`Generator`]: blaster_core::Generator
//! [`UrlStore`]: blaster_core::UrlStore

pub mod error;
pub mod service;

pub use error::ShortenerError;
pub use service::{ShortenParams, Shortener, ShortenerService};
