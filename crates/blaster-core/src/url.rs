use crate::error::GeneratorError;

/// The only scheme accepted for long URLs.
pub const SECURE_SCHEME_PREFIX: &str = "https://";

/// Checks that `long_url` is a secure URL.
///
/// This is a prefix check, not a full parse: the URL must start with
/// `https://` and carry something after the scheme.
pub fn validate_long_url(long_url: &str) -> Result<(), GeneratorError> {
    match long_url.strip_prefix(SECURE_SCHEME_PREFIX) {
        Some(rest) if !rest.is_empty() => Ok(()),
        Some(_) => Err(GeneratorError::InvalidUrl(format!(
            "url has no host after the scheme: '{long_url}'"
        ))),
        None => Err(GeneratorError::InvalidUrl(format!(
            "url must start with {SECURE_SCHEME_PREFIX}: '{long_url}'"
        ))),
    }
}
