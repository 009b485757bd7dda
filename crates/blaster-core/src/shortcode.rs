use crate::base58::ShortCodeBase58;
use crate::error::{CoreError, Result};
use std::fmt::Display;

/// The key of a URL mapping.
///
/// A code is either produced by a [`Generator`][crate::Generator] or supplied
/// by the caller ("predefined"). Both kinds share one flat key namespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShortCode {
    /// A code derived from the long URL and user id.
    Generated(ShortCodeBase58),
    /// A caller-supplied code.
    Predefined(String),
}

const MAX_PREDEFINED_LENGTH: usize = 128;

impl ShortCode {
    /// Creates a `ShortCode` from an already-encoded base58 code.
    pub fn generated(code: impl Into<ShortCodeBase58>) -> Self {
        Self::Generated(code.into())
    }

    /// Creates a predefined `ShortCode` after validating the input.
    ///
    /// Predefined codes may be any non-empty string of at most 128 bytes
    /// without whitespace or control characters.
    pub fn new(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self::Predefined(code))
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        match self {
            ShortCode::Generated(code) => code.as_str(),
            ShortCode::Predefined(s) => s.as_str(),
        }
    }

    /// Re-checks a code that may have been built without [`ShortCode::new`].
    pub fn ensure_valid(&self) -> Result<()> {
        match self {
            ShortCode::Generated(_) => Ok(()),
            ShortCode::Predefined(s) => Self::validate(s),
        }
    }

    fn validate(code: &str) -> Result<()> {
        if code.is_empty() {
            return Err(CoreError::InvalidShortCode(
                "short code cannot be empty".to_string(),
            ));
        }

        if code.len() > MAX_PREDEFINED_LENGTH {
            return Err(CoreError::InvalidShortCode(format!(
                "length must be at most {}, got {}",
                MAX_PREDEFINED_LENGTH,
                code.len()
            )));
        }

        if code.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(CoreError::InvalidShortCode(format!(
                "must not contain whitespace or control characters: '{}'",
                code.escape_debug()
            )));
        }

        Ok(())
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
