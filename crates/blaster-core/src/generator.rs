use crate::error::GeneratorError;
use crate::shortcode::ShortCode;

/// Trait for deriving short codes.
///
/// Implementations are pure: they hold no mutable state, never touch the
/// mapping store and can be called concurrently without coordination.
pub trait Generator: Send + Sync + 'static {
    /// Derives a short code for `long_url` on behalf of `user_id`.
    ///
    /// The same `(long_url, user_id)` pair must always yield the same code.
    fn generate_short_link(
        &self,
        long_url: &str,
        user_id: &str,
    ) -> Result<ShortCode, GeneratorError>;
}
