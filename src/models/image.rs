use crate::error::{GenerationError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

pub const DEFAULT_REFERENCE_MIME: &str = "image/png";
pub const GENERATED_IMAGE_MIME: &str = "image/png";

/// A reference image split into its media type and bare base64 payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceImage {
    pub mime_type: String,
    pub data: String,
}

impl ReferenceImage {
    /// Accepts either a bare base64 payload or a `data:<mime>;base64,` URI.
    pub fn parse(payload: &str) -> Self {
        let payload = payload.trim();
        if let Some(rest) = payload.strip_prefix("data:") {
            if let Some((header, data)) = rest.split_once(',') {
                let mime = header.split(';').next().unwrap_or_default();
                let mime_type = if mime.is_empty() {
                    DEFAULT_REFERENCE_MIME.to_string()
                } else {
                    mime.to_string()
                };
                return Self {
                    mime_type,
                    data: data.to_string(),
                };
            }
        }

        Self {
            mime_type: DEFAULT_REFERENCE_MIME.to_string(),
            data: payload.to_string(),
        }
    }

    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: STANDARD.encode(bytes),
        }
    }
}

/// Strips an embedded data-URI header, leaving only the base64 payload.
pub fn normalize_image_payload(payload: &str) -> String {
    ReferenceImage::parse(payload).data
}

/// A generated image, held as a PNG data-URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub data_uri: String,
}

impl GeneratedImage {
    pub fn from_base64(data: &str) -> Self {
        Self {
            data_uri: format!("data:{};base64,{}", GENERATED_IMAGE_MIME, data),
        }
    }

    pub fn base64_data(&self) -> &str {
        self.data_uri
            .split_once(',')
            .map(|(_, data)| data)
            .unwrap_or(&self.data_uri)
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(self.base64_data())
            .map_err(|e| GenerationError::Response(format!("Invalid image data: {}", e)))
    }
}

/// One successful unit of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItem {
    pub image: GeneratedImage,
    pub prompt: String,
}

/// The settled outcome of a single unit, paired with the prompt that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub prompt: String,
    pub outcome: Result<GeneratedImage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_data_uri_prefix() {
        assert_eq!(normalize_image_payload("data:image/png;base64,AAAA"), "AAAA");
        assert_eq!(normalize_image_payload("AAAA"), "AAAA");
    }

    #[test]
    fn keeps_declared_mime_type() {
        let image = ReferenceImage::parse("data:image/jpeg;base64,/9j/");
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data, "/9j/");
        assert_eq!(ReferenceImage::parse("iVBO").mime_type, DEFAULT_REFERENCE_MIME);
    }

    #[test]
    fn generated_image_round_trips_bytes() {
        let image = GeneratedImage::from_base64(&STANDARD.encode(b"png-bytes"));
        assert!(image.data_uri.starts_with("data:image/png;base64,"));
        assert_eq!(image.decode().unwrap(), b"png-bytes");
    }
}
