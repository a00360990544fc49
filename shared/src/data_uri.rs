use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// Largest accepted upload: 4 MiB. A file of exactly this size is accepted.
pub const MAX_UPLOAD_BYTES: u64 = 4 * 1024 * 1024;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataUriError {
    #[error("not a data URI")]
    MissingScheme,
    #[error("data URI is missing the base64 marker")]
    MissingBase64Marker,
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),
    #[error("data URI payload is not valid base64")]
    InvalidPayload,
    #[error("image is larger than 4MB")]
    TooLarge,
}

/// Borrowed view of a `data:<mimetype>;base64,<encoded_data>` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUri<'a> {
    pub mime_type: &'a str,
    /// Base64 text, not yet decoded.
    pub payload: &'a str,
}

impl<'a> DataUri<'a> {
    pub fn parse(input: &'a str) -> Result<Self, DataUriError> {
        let rest = input
            .strip_prefix("data:")
            .ok_or(DataUriError::MissingScheme)?;
        let (mime_type, payload) = rest
            .split_once(";base64,")
            .ok_or(DataUriError::MissingBase64Marker)?;
        if mime_type.is_empty() {
            return Err(DataUriError::UnsupportedMediaType(String::new()));
        }
        Ok(Self { mime_type, payload })
    }

    /// Parse and require an `image/*` media type with a decodable payload.
    pub fn parse_image(input: &'a str) -> Result<Self, DataUriError> {
        let uri = Self::parse(input)?;
        if !uri.mime_type.starts_with("image/") {
            return Err(DataUriError::UnsupportedMediaType(uri.mime_type.to_string()));
        }
        STANDARD
            .decode(uri.payload)
            .map_err(|_| DataUriError::InvalidPayload)?;
        Ok(uri)
    }

    pub fn decode_payload(&self) -> Result<Vec<u8>, DataUriError> {
        STANDARD
            .decode(self.payload)
            .map_err(|_| DataUriError::InvalidPayload)
    }
}

/// Capacity gate applied to an upload's byte size before any read is attempted.
pub fn check_upload_size(bytes: u64) -> Result<(), DataUriError> {
    if bytes > MAX_UPLOAD_BYTES {
        return Err(DataUriError::TooLarge);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_png_data_uri() {
        let uri = DataUri::parse_image("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(uri.mime_type, "image/png");
        assert_eq!(uri.decode_payload().unwrap(), b"hello");
    }

    #[test]
    fn rejects_plain_string() {
        assert_eq!(
            DataUri::parse("just some text"),
            Err(DataUriError::MissingScheme)
        );
    }

    #[test]
    fn rejects_uri_without_base64_marker() {
        assert_eq!(
            DataUri::parse("data:image/png,rawbytes"),
            Err(DataUriError::MissingBase64Marker)
        );
    }

    #[test]
    fn rejects_non_image_media_type() {
        assert_eq!(
            DataUri::parse_image("data:text/plain;base64,aGVsbG8="),
            Err(DataUriError::UnsupportedMediaType("text/plain".to_string()))
        );
    }

    #[test]
    fn rejects_garbage_payload() {
        assert_eq!(
            DataUri::parse_image("data:image/jpeg;base64,%%%not-base64%%%"),
            Err(DataUriError::InvalidPayload)
        );
    }

    #[test]
    fn accepts_exactly_four_mebibytes() {
        assert_eq!(check_upload_size(4 * 1024 * 1024), Ok(()));
    }

    #[test]
    fn rejects_one_byte_over_the_limit() {
        assert_eq!(
            check_upload_size(4 * 1024 * 1024 + 1),
            Err(DataUriError::TooLarge)
        );
    }
}
