//! Inline base64 image payloads (`data:image/<ext>;base64,<payload>`).

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// A decoded inline image: extension plus raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub extension: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DataUriError {
    #[error("not an image data URI")]
    NotAnImage,
    #[error("malformed data URI")]
    Malformed,
    #[error("invalid base64 payload")]
    InvalidBase64,
}

/// Parse a `data:image/<ext>;base64,<payload>` string into its decoded payload.
///
/// Only image media types are accepted; the extension is taken from the
/// media subtype (`png`, `jpeg`, ...).
pub fn parse_image_data_uri(data: &str) -> Result<ImagePayload, DataUriError> {
    let rest = data.strip_prefix("data:image/").ok_or(DataUriError::NotAnImage)?;
    let (extension, payload) = rest.split_once(";base64,").ok_or(DataUriError::Malformed)?;
    if extension.is_empty() || !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(DataUriError::Malformed);
    }
    let bytes = STANDARD
        .decode(payload)
        .map_err(|_| DataUriError::InvalidBase64)?;
    Ok(ImagePayload {
        extension: extension.to_owned(),
        bytes,
    })
}
