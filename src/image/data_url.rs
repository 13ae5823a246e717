//! `data:<mime>;base64,<payload>` codec

use super::error::ImageEditError;
use base64::engine::general_purpose;
use base64::Engine;
use std::fmt;

/// MIME type assumed when the service does not report one
pub const DEFAULT_MIME_TYPE: &str = "image/png";

/// A base64 image with its MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime_type: String,
    /// Base64 payload without the `data:` prefix
    pub data: String,
}

impl DataUrl {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Encode raw bytes
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(mime_type, general_purpose::STANDARD.encode(bytes))
    }

    /// Parse a stored data URL. Both the MIME type and payload must be non-empty.
    pub fn parse(value: &str) -> Result<Self, ImageEditError> {
        let rest = value
            .strip_prefix("data:")
            .ok_or(ImageEditError::InvalidImageFormat)?;
        let (mime_type, data) = rest
            .rsplit_once(";base64,")
            .ok_or(ImageEditError::InvalidImageFormat)?;
        if mime_type.is_empty() || data.is_empty() || data.contains('\n') {
            return Err(ImageEditError::InvalidImageFormat);
        }
        Ok(Self::new(mime_type, data))
    }

    pub fn decode(&self) -> Result<Vec<u8>, ImageEditError> {
        Ok(general_purpose::STANDARD.decode(&self.data)?)
    }

    /// Size of the decoded payload, estimated from the base64 length
    pub fn approx_byte_len(&self) -> usize {
        let padding = self.data.bytes().rev().take_while(|b| *b == b'=').count();
        (self.data.len() / 4 * 3).saturating_sub(padding)
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}
