use crate::error::ShortenerError;
use async_trait::async_trait;
use blaster_core::{validate_long_url, ExpirationPolicy, Generator, ShortCode, UrlStore};
use std::sync::Arc;
use tracing::{debug, info, warn};

type Result<T> = std::result::Result<T, ShortenerError>;

/// Parameters for creating a shortened URL.
#[derive(Debug, Clone)]
pub struct ShortenParams {
    /// The original URL to be shortened.
    pub long_url: String,
    /// Identifier of the user creating the link. Mixed into the generated code.
    pub user_id: String,
    /// Caller-supplied code that replaces the generated one.
    pub custom_code: Option<ShortCode>,
    /// Overrides the store's default expiration for this mapping.
    pub expiration: Option<ExpirationPolicy>,
}

impl ShortenParams {
    pub fn new(long_url: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into(),
            user_id: user_id.into(),
            custom_code: None,
            expiration: None,
        }
    }

    pub fn with_custom_code(mut self, code: ShortCode) -> Self {
        self.custom_code = Some(code);
        self
    }

    pub fn with_expiration(mut self, expiration: ExpirationPolicy) -> Self {
        self.expiration = Some(expiration);
        self
    }
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Creates (or idempotently re-creates) a mapping and returns its code.
    async fn shorten(&self, params: ShortenParams) -> Result<ShortCode>;

    /// Resolves a short code to the long URL it points at.
    async fn resolve(&self, code: &ShortCode) -> Result<String>;

    /// Points an existing code at a new long URL.
    /// Returns `NotFound` if the code is not live.
    async fn update(&self, code: &ShortCode, long_url: &str) -> Result<()>;

    /// Removes an existing code.
    /// Returns `NotFound` if the code is not live.
    async fn remove(&self, code: &ShortCode) -> Result<()>;
}

/// A concrete implementation of the [`Shortener`] trait.
///
/// This service wraps a [`Generator`] and a [`UrlStore`] to handle:
/// - URL validation
/// - Short code selection (generated or custom)
/// - Existence guards in front of update and remove
///
/// Saves are last-write-wins. A custom code that is already taken is
/// silently repointed; no conflict check is performed.
#[derive(Debug)]
pub struct ShortenerService<G, S> {
    generator: Arc<G>,
    store: Arc<S>,
}

impl<G, S> Clone for ShortenerService<G, S> {
    fn clone(&self) -> Self {
        Self {
            generator: Arc::clone(&self.generator),
            store: Arc::clone(&self.store),
        }
    }
}

impl<G: Generator, S: UrlStore> ShortenerService<G, S> {
    pub fn new(generator: G, store: S) -> Self {
        Self {
            generator: Arc::new(generator),
            store: Arc::new(store),
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    async fn ensure_exists(&self, code: &ShortCode) -> Result<()> {
        if self.store.check_if_short_url_exists(code).await {
            Ok(())
        } else {
            Err(ShortenerError::NotFound(code.to_string()))
        }
    }
}

#[async_trait]
impl<G: Generator, S: UrlStore> Shortener for ShortenerService<G, S> {
    async fn shorten(&self, params: ShortenParams) -> Result<ShortCode> {
        validate_long_url(&params.long_url)?;

        let code = match params.custom_code {
            Some(code) => code,
            None => self
                .generator
                .generate_short_link(&params.long_url, &params.user_id)?,
        };

        let saved = match params.expiration {
            Some(expiration) => {
                self.store
                    .save_url_mapping_with(&code, &params.long_url, expiration)
                    .await
            }
            None => self.store.save_url_mapping(&code, &params.long_url).await,
        };

        if let Err(e) = saved {
            warn!(code = %code, long_url = %params.long_url, error = %e, "failed saving mapping");
            return Err(e.into());
        }

        info!(code = %code, user_id = %params.user_id, "short url created");
        Ok(code)
    }

    async fn resolve(&self, code: &ShortCode) -> Result<String> {
        let url = self.store.retrieve_initial_url(code).await?;
        debug!(code = %code, "resolved short url");
        Ok(url)
    }

    async fn update(&self, code: &ShortCode, long_url: &str) -> Result<()> {
        validate_long_url(long_url)?;
        self.ensure_exists(code).await?;

        self.store.save_url_mapping(code, long_url).await?;
        info!(code = %code, "short url updated");
        Ok(())
    }

    async fn remove(&self, code: &ShortCode) -> Result<()> {
        self.ensure_exists(code).await?;

        self.store.delete_url_mapping(code).await?;
        info!(code = %code, "short url removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blaster_core::GeneratorError;
    use blaster_generator::HashGenerator;
    use blaster_storage::InMemoryStore;
    use std::time::Duration;

    const USER_ID: &str = "e0dba740-fc4b-4977-872c-d360239e6b1a";

    fn test_service() -> ShortenerService<HashGenerator, InMemoryStore> {
        ShortenerService::new(HashGenerator::new(), InMemoryStore::new())
    }

    struct BrokenGenerator;

    impl Generator for BrokenGenerator {
        fn generate_short_link(
            &self,
            _long_url: &str,
            _user_id: &str,
        ) -> std::result::Result<ShortCode, GeneratorError> {
            Err(GeneratorError::Encoding("broken".to_string()))
        }
    }

    #[tokio::test]
    async fn shorten_with_generated_code() {
        let service = test_service();

        let code = service
            .shorten(ShortenParams::new(
                "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
                USER_ID,
            ))
            .await
            .unwrap();
        assert_eq!(code.as_str(), "ASzHLChJ");

        let url = service.resolve(&code).await.unwrap();
        assert_eq!(url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[tokio::test]
    async fn shorten_same_input_is_idempotent() {
        let service = test_service();
        let params = ShortenParams::new("https://www.gojek.com/en-id/", USER_ID);

        let first = service.shorten(params.clone()).await.unwrap();
        let second = service.shorten(params).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(service.store().len(), 1);
    }

    #[tokio::test]
    async fn shorten_with_custom_code() {
        let service = test_service();

        let code = service
            .shorten(
                ShortenParams::new("https://example.com", USER_ID)
                    .with_custom_code(ShortCode::new("my-alias").unwrap()),
            )
            .await
            .unwrap();
        assert_eq!(code.as_str(), "my-alias");
    }

    #[tokio::test]
    async fn custom_code_is_last_write_wins() {
        let service = test_service();
        let alias = ShortCode::new("my-alias").unwrap();

        service
            .shorten(
                ShortenParams::new("https://example1.com", "alice")
                    .with_custom_code(alias.clone()),
            )
            .await
            .unwrap();
        service
            .shorten(
                ShortenParams::new("https://example2.com", "bob").with_custom_code(alias.clone()),
            )
            .await
            .unwrap();

        assert_eq!(service.resolve(&alias).await.unwrap(), "https://example2.com");
    }

    #[tokio::test]
    async fn shorten_with_invalid_url_fails() {
        let service = test_service();

        let err = service
            .shorten(ShortenParams::new("hahaha", USER_ID))
            .await
            .unwrap_err();
        assert!(matches!(err, ShortenerError::InvalidUrl(_)));

        let err = service
            .shorten(
                ShortenParams::new("ftp://example.com", USER_ID)
                    .with_custom_code(ShortCode::new("alias").unwrap()),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ShortenerError::InvalidUrl(_)));
        assert!(service.store().is_empty());
    }

    #[tokio::test]
    async fn unchecked_custom_code_is_rejected() {
        let service = test_service();

        let err = service
            .shorten(
                ShortenParams::new("https://example.com", USER_ID)
                    .with_custom_code(ShortCode::Predefined(String::new())),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ShortenerError::InvalidShortCode(_)));
        assert!(service.store().is_empty());
    }

    #[tokio::test]
    async fn shorten_with_invalid_expiration_fails() {
        let service = test_service();

        let err = service
            .shorten(
                ShortenParams::new("https://example.com", USER_ID)
                    .with_expiration(ExpirationPolicy::AfterDuration(Duration::ZERO)),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ShortenerError::Store(_)));
    }

    #[tokio::test]
    async fn generator_failure_is_propagated() {
        let service = ShortenerService::new(BrokenGenerator, InMemoryStore::new());

        let err = service
            .shorten(ShortenParams::new("https://example.com", USER_ID))
            .await
            .unwrap_err();
        assert!(matches!(err, ShortenerError::Encoding(_)));
        assert!(service.store().is_empty());
    }

    #[tokio::test]
    async fn resolve_nonexistent_code() {
        let service = test_service();

        let err = service
            .resolve(&ShortCode::new("nonexistent").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ShortenerError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_existing_code() {
        let service = test_service();
        let code = service
            .shorten(ShortenParams::new("https://old.example", USER_ID))
            .await
            .unwrap();

        service.update(&code, "https://new.example").await.unwrap();

        assert_eq!(service.resolve(&code).await.unwrap(), "https://new.example");
    }

    #[tokio::test]
    async fn update_missing_code_is_not_found() {
        let service = test_service();

        let err = service
            .update(&ShortCode::new("ghost").unwrap(), "https://new.example")
            .await
            .unwrap_err();
        assert!(matches!(err, ShortenerError::NotFound(_)));
        assert!(service.store().is_empty());
    }

    #[tokio::test]
    async fn update_rejects_insecure_url() {
        let service = test_service();
        let code = service
            .shorten(ShortenParams::new("https://old.example", USER_ID))
            .await
            .unwrap();

        let err = service.update(&code, "http://new.example").await.unwrap_err();
        assert!(matches!(err, ShortenerError::InvalidUrl(_)));
        assert_eq!(service.resolve(&code).await.unwrap(), "https://old.example");
    }

    #[tokio::test]
    async fn remove_existing_code() {
        let service = test_service();
        let code = service
            .shorten(ShortenParams::new("https://example.com", USER_ID))
            .await
            .unwrap();

        service.remove(&code).await.unwrap();

        let err = service.resolve(&code).await.unwrap_err();
        assert!(matches!(err, ShortenerError::NotFound(_)));
    }

    #[tokio::test]
    async fn remove_missing_code_is_not_found() {
        let service = test_service();

        let err = service
            .remove(&ShortCode::new("ghost").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ShortenerError::NotFound(_)));
    }

    #[tokio::test]
    async fn unavailable_store_is_surfaced() {
        let service = test_service();
        service.store().set_available(false);

        let err = service
            .shorten(ShortenParams::new("https://example.com", USER_ID))
            .await
            .unwrap_err();
        assert!(matches!(err, ShortenerError::Unavailable(_)));

        let err = service
            .resolve(&ShortCode::new("abc").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ShortenerError::Unavailable(_)));
    }
}
