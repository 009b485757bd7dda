use crate::error::CoreError;
use std::fmt::Display;

/// Number of characters kept from the base58 rendering of a hash.
pub const GENERATED_CODE_LENGTH: usize = 8;

/// A generated short code: exactly [`GENERATED_CODE_LENGTH`] characters of
/// the Bitcoin base58 alphabet (no `0`, `O`, `I` or `l`).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ShortCodeBase58(String);

impl ShortCodeBase58 {
    /// Wraps an already-encoded base58 code after checking length and alphabet.
    pub fn new(encoded: impl Into<String>) -> Result<Self, CoreError> {
        let encoded = encoded.into();
        if encoded.len() != GENERATED_CODE_LENGTH {
            return Err(CoreError::InvalidShortCode(format!(
                "generated code must be {} characters, got {}",
                GENERATED_CODE_LENGTH,
                encoded.len()
            )));
        }
        if !Self::is_base58(&encoded) {
            return Err(CoreError::InvalidShortCode(format!(
                "generated code contains characters outside the base58 alphabet: '{encoded}'"
            )));
        }
        Ok(Self(encoded))
    }

    /// Returns `true` if every character of `s` belongs to the Bitcoin alphabet.
    pub fn is_base58(s: &str) -> bool {
        bs58::decode(s).into_vec().is_ok()
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ShortCodeBase58 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ShortCodeBase58").field(&self.0).finish()
    }
}

impl Display for ShortCodeBase58 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_eight_base58_chars() {
        let code = ShortCodeBase58::new("ASzHLChJ").unwrap();
        assert_eq!(code.as_str(), "ASzHLChJ");
        assert_eq!(code.to_string(), "ASzHLChJ");
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(ShortCodeBase58::new("ASzHLCh").is_err());
        assert!(ShortCodeBase58::new("ASzHLChJz").is_err());
        assert!(ShortCodeBase58::new("").is_err());
    }

    #[test]
    fn rejects_ambiguous_characters() {
        for bad in ["0SzHLChJ", "OSzHLChJ", "ISzHLChJ", "lSzHLChJ", "ASzH-ChJ"] {
            assert!(ShortCodeBase58::new(bad).is_err(), "{bad} should be rejected");
        }
    }
}
