use blaster_core::base58::GENERATED_CODE_LENGTH;
use blaster_core::{validate_long_url, Generator, GeneratorError, ShortCode, ShortCodeBase58};
use sha2::{Digest, Sha256};
use tracing::{trace, warn};

/// Deterministic short code generator.
///
/// The code is computed as:
///
/// 1. SHA-256 over `long_url ++ user_id`.
/// 2. The digest read as a big-endian integer, truncated to its low 64 bits.
/// 3. That integer rendered as a decimal numeral.
/// 4. The numeral base58-encoded (Bitcoin alphabet) as a number, not as text.
/// 5. The first 8 characters of the encoding.
///
/// Identical inputs always produce identical codes, so shortening the same
/// URL twice for the same user is idempotent.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashGenerator;

impl HashGenerator {
    pub fn new() -> Self {
        Self
    }
}

/// Low 64 bits of the SHA-256 digest of `input`, read big-endian.
fn truncated_digest(input: &[u8]) -> u64 {
    let digest = Sha256::digest(input);
    let mut low = [0u8; 8];
    low.copy_from_slice(&digest[digest.len() - 8..]);
    u64::from_be_bytes(low)
}

/// Base58-encodes the number written in `decimal`.
///
/// The digits are treated as a base-10 numeral, so `"58"` encodes to `"21"`.
/// Leading zero digits each become a leading `1`, matching how leading zero
/// bytes are rendered.
pub fn encode_decimal(decimal: &str) -> Result<String, GeneratorError> {
    if decimal.is_empty() || !decimal.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GeneratorError::Encoding(format!(
            "expected a decimal numeral, got '{decimal}'"
        )));
    }

    let significant = decimal.trim_start_matches('0');
    let leading_zeros = decimal.len() - significant.len();

    let value: u64 = if significant.is_empty() {
        0
    } else {
        significant.parse().map_err(|e| {
            GeneratorError::Encoding(format!("numeral '{decimal}' does not fit in 64 bits: {e}"))
        })?
    };

    let bytes = value.to_be_bytes();
    let first_nonzero = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    let encoded = bs58::encode(&bytes[first_nonzero..]).into_string();

    let mut out = "1".repeat(leading_zeros);
    out.push_str(&encoded);
    Ok(out)
}

impl Generator for HashGenerator {
    fn generate_short_link(
        &self,
        long_url: &str,
        user_id: &str,
    ) -> Result<ShortCode, GeneratorError> {
        if let Err(e) = validate_long_url(long_url) {
            warn!(long_url, error = %e, "refusing to shorten insecure url");
            return Err(e);
        }

        let mut input = Vec::with_capacity(long_url.len() + user_id.len());
        input.extend_from_slice(long_url.as_bytes());
        input.extend_from_slice(user_id.as_bytes());

        let number = truncated_digest(&input);
        let encoded = encode_decimal(&number.to_string())?;

        let Some(prefix) = encoded.get(..GENERATED_CODE_LENGTH) else {
            warn!(number, encoded = %encoded, "base58 rendering shorter than a short code");
            return Err(GeneratorError::Encoding(format!(
                "encoding of {number} yields only {} characters",
                encoded.len()
            )));
        };

        let code = ShortCodeBase58::new(prefix)
            .map_err(|e| GeneratorError::Encoding(e.to_string()))?;
        trace!(code = %code, "generated short code");
        Ok(ShortCode::generated(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_ID: &str = "e0dba740-fc4b-4977-872c-d360239e6b1a";

    fn generate(url: &str, user_id: &str) -> String {
        HashGenerator::new()
            .generate_short_link(url, user_id)
            .unwrap()
            .to_string()
    }

    #[test]
    fn known_vectors() {
        assert_eq!(
            generate("https://www.youtube.com/watch?v=dQw4w9WgXcQ", USER_ID),
            "ASzHLChJ"
        );
        assert_eq!(generate("https://www.gojek.com/en-id/", USER_ID), "aSLo122q");
        assert_eq!(
            generate("https://ultra.fandom.com/wiki/Ultraman_(character)", USER_ID),
            "Y6edurWL"
        );
    }

    #[test]
    fn deterministic() {
        let generator = HashGenerator::new();
        for url in ["https://example.com", "https://example.com/a?b=c"] {
            let first = generator.generate_short_link(url, USER_ID).unwrap();
            let second = generator.generate_short_link(url, USER_ID).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn user_id_changes_code() {
        assert_ne!(
            generate("https://example.com", "alice"),
            generate("https://example.com", "bob")
        );
    }

    #[test]
    fn codes_are_eight_base58_chars() {
        for i in 0..200 {
            let code = generate(&format!("https://example.com/page/{i}"), USER_ID);
            assert_eq!(code.len(), GENERATED_CODE_LENGTH);
            assert!(ShortCodeBase58::is_base58(&code), "{code} is not base58");
        }
    }

    #[test]
    fn empty_user_id_is_accepted() {
        let code = generate("https://example.com", "");
        assert_eq!(code.len(), GENERATED_CODE_LENGTH);
    }

    #[test]
    fn insecure_url_rejected() {
        let err = HashGenerator::new()
            .generate_short_link("hahaha", USER_ID)
            .unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidUrl(_)));

        let err = HashGenerator::new()
            .generate_short_link("http://example.com", USER_ID)
            .unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidUrl(_)));
    }

    #[test]
    fn truncated_digest_uses_low_bytes() {
        let input = b"https://www.youtube.com/watch?v=dQw4w9WgXcQe0dba740-fc4b-4977-872c-d360239e6b1a";
        assert_eq!(truncated_digest(input), 4070264984971635772);
    }

    #[test]
    fn encode_decimal_treats_digits_as_number() {
        assert_eq!(encode_decimal("4070264984971635772").unwrap(), "ASzHLChJzLb");
        assert_eq!(encode_decimal("57").unwrap(), "z");
        assert_eq!(encode_decimal("58").unwrap(), "21");
        assert_eq!(encode_decimal("0").unwrap(), "1");
        assert_eq!(encode_decimal("007").unwrap(), "118");
    }

    #[test]
    fn encode_decimal_rejects_non_numerals() {
        assert!(matches!(encode_decimal(""), Err(GeneratorError::Encoding(_))));
        assert!(matches!(encode_decimal("12a"), Err(GeneratorError::Encoding(_))));
        assert!(matches!(
            encode_decimal("18446744073709551616"),
            Err(GeneratorError::Encoding(_))
        ));
    }
}
