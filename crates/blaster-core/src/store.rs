use crate::error::StoreError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use std::time::Duration;

/// Result type for mapping store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Lifetime of a saved mapping before it passively expires.
pub const DEFAULT_MAPPING_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// Expiration policy for a saved mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpirationPolicy {
    /// The mapping lives until it is explicitly deleted.
    Never,
    /// The mapping expires after the given duration from the save.
    AfterDuration(Duration),
}

impl Default for ExpirationPolicy {
    fn default() -> Self {
        ExpirationPolicy::AfterDuration(DEFAULT_MAPPING_TTL)
    }
}

impl ExpirationPolicy {
    /// Builds a policy from a TTL in seconds, where `0` means no expiration.
    pub fn from_secs(secs: u64) -> Self {
        match secs {
            0 => ExpirationPolicy::Never,
            secs => ExpirationPolicy::AfterDuration(Duration::from_secs(secs)),
        }
    }

    /// Returns the TTL in whole seconds, or `None` for [`ExpirationPolicy::Never`].
    ///
    /// Sub-second durations are rejected since the key-value service expires
    /// keys at second granularity.
    pub fn ttl_secs(&self) -> Result<Option<u64>> {
        match self {
            ExpirationPolicy::Never => Ok(None),
            ExpirationPolicy::AfterDuration(ttl) if ttl.as_secs() == 0 => {
                Err(StoreError::InvalidExpiration(format!(
                    "ttl must be at least one second, got {ttl:?}"
                )))
            }
            ExpirationPolicy::AfterDuration(ttl) => Ok(Some(ttl.as_secs())),
        }
    }
}

/// The mapping store contract: code → long URL associations with TTL.
///
/// Saves are last-write-wins. Every operation that reaches the backend may
/// fail with [`StoreError::Unavailable`]; nothing is retried internally.
/// Dropping a pending future aborts the call.
#[async_trait]
pub trait UrlStore: Send + Sync + 'static {
    /// The policy applied by [`UrlStore::save_url_mapping`].
    fn expiration(&self) -> &ExpirationPolicy;

    /// Writes or overwrites the mapping using the store's default expiration.
    async fn save_url_mapping(&self, code: &ShortCode, url: &str) -> Result<()> {
        let expiration = *self.expiration();
        self.save_url_mapping_with(code, url, expiration).await
    }

    /// Writes or overwrites the mapping with an explicit expiration policy.
    async fn save_url_mapping_with(
        &self,
        code: &ShortCode,
        url: &str,
        expiration: ExpirationPolicy,
    ) -> Result<()>;

    /// Resolves a code to its long URL.
    ///
    /// Returns [`StoreError::NotFound`] when the code is absent or expired.
    async fn retrieve_initial_url(&self, code: &ShortCode) -> Result<String>;

    /// Returns `true` iff a live mapping exists for the code.
    ///
    /// Backend failures are reported as `false`.
    async fn check_if_short_url_exists(&self, code: &ShortCode) -> bool;

    /// Removes the mapping. Deleting an absent code is not an error.
    async fn delete_url_mapping(&self, code: &ShortCode) -> Result<()>;
}

/// Rejects a malformed short code before any backend call.
pub fn ensure_valid_code(code: &ShortCode) -> Result<()> {
    code.ensure_valid()
        .map_err(|e| StoreError::InvalidShortCode(e.to_string()))
}

/// Rejects an empty target URL before any backend call.
pub fn ensure_target_url(url: &str) -> Result<()> {
    if url.is_empty() {
        return Err(StoreError::InvalidUrl("url cannot be empty".to_string()));
    }
    Ok(())
}
