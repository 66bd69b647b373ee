use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{MedibotError, Result};

/// A generated prescription document, kept base64-encoded until delivery.
///
/// The wizard receives it as base64 text; history records carry raw bytes,
/// which are encoded on the way in so both paths share this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentPayload(String);

impl DocumentPayload {
    /// Wraps base64 text received from the server.
    pub fn from_base64(encoded: impl Into<String>) -> Result<Self> {
        let encoded = encoded.into();
        if encoded.trim().is_empty() {
            return Err(MedibotError::invalid_response("document payload is empty"));
        }
        Ok(Self(encoded))
    }

    /// Encodes raw document bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(BASE64_STANDARD.encode(bytes))
    }

    pub fn as_base64(&self) -> &str {
        &self.0
    }

    /// Decodes the payload to the raw file bytes.
    ///
    /// Line breaks inserted by some encoders are ignored.
    pub fn decode(&self) -> Result<Vec<u8>> {
        let compact: String = self.0.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        BASE64_STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| MedibotError::document(format!("invalid base64 payload: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_survive_encoding() {
        let payload = DocumentPayload::from_bytes(b"%PDF-1.4\n");
        assert_eq!(payload.as_base64(), "JVBERi0xLjQK");
        assert_eq!(payload.decode().unwrap(), b"%PDF-1.4\n");
    }

    #[test]
    fn test_decode_ignores_line_breaks() {
        let payload = DocumentPayload::from_base64("JVBE\nRi0x\r\nLjQK").unwrap();
        assert_eq!(payload.decode().unwrap(), b"%PDF-1.4\n");
    }

    #[test]
    fn test_rejects_empty_payload() {
        assert!(DocumentPayload::from_base64("  ").is_err());
    }

    #[test]
    fn test_garbage_fails_as_document_error() {
        let payload = DocumentPayload::from_base64("not base64 at all!").unwrap();
        assert!(matches!(payload.decode(), Err(MedibotError::Document(_))));
    }
}
