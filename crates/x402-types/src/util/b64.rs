//! Base64 encoding and decoding utilities.
//!
//! Payment payloads travel in HTTP headers as base64 of JSON text. [`Base64Bytes`]
//! holds such encoded data; [`safe_base64_encode`] and [`safe_base64_decode`] are the
//! text-level helpers the payload codec is built on.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as b64;
use std::borrow::Cow;
use std::fmt::Display;

/// A wrapper for base64-encoded byte data.
///
/// Uses the standard alphabet with padding, which is what independent x402 clients emit.
///
/// ```rust
/// use x402_types::util::Base64Bytes;
///
/// let encoded = Base64Bytes::encode(b"hello world");
/// assert_eq!(encoded.to_string(), "aGVsbG8gd29ybGQ=");
/// assert_eq!(encoded.decode().unwrap(), b"hello world");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base64Bytes<'a>(pub Cow<'a, [u8]>);

impl Base64Bytes<'_> {
    /// Decodes the base64 string bytes to raw binary data.
    ///
    /// Surrounding ASCII whitespace is ignored; anything else outside the alphabet is an error.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        b64.decode(self.0.trim_ascii())
    }

    /// Encodes raw binary data into base64 string bytes.
    pub fn encode<T: AsRef<[u8]>>(input: T) -> Base64Bytes<'static> {
        let encoded = b64.encode(input.as_ref());
        Base64Bytes(Cow::Owned(encoded.into_bytes()))
    }

    /// Returns `true` if the held bytes are well-formed base64.
    pub fn is_valid(&self) -> bool {
        self.decode().is_ok()
    }
}

impl AsRef<[u8]> for Base64Bytes<'_> {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl<'a> From<&'a [u8]> for Base64Bytes<'a> {
    fn from(slice: &'a [u8]) -> Self {
        Base64Bytes(Cow::Borrowed(slice))
    }
}

impl<'a> From<&'a str> for Base64Bytes<'a> {
    fn from(s: &'a str) -> Self {
        Base64Bytes(Cow::Borrowed(s.as_bytes()))
    }
}

impl Display for Base64Bytes<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.0.as_ref()))
    }
}

/// Encodes UTF-8 text as a base64 string.
pub fn safe_base64_encode(text: &str) -> String {
    b64.encode(text.as_bytes())
}

/// Decodes a base64 string into raw bytes.
///
/// The decoded bytes are not required to be UTF-8; callers that expect text
/// report non-text content at their parse step.
pub fn safe_base64_decode(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    Base64Bytes::from(encoded).decode()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_helpers_round_trip() {
        let text = r#"{"network":"base"}"#;
        let encoded = safe_base64_encode(text);
        assert_eq!(encoded, "eyJuZXR3b3JrIjoiYmFzZSJ9");
        assert_eq!(safe_base64_decode(&encoded).unwrap(), text.as_bytes());
    }

    #[test]
    fn test_decode_rejects_outside_alphabet() {
        assert!(safe_base64_decode("not base64!").is_err());
        assert!(!Base64Bytes::from("%%%").is_valid());
    }

    #[test]
    fn test_decode_ignores_surrounding_whitespace() {
        assert_eq!(safe_base64_decode(" aGk=\n").unwrap(), b"hi");
    }
}
