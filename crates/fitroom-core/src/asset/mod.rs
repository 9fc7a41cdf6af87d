//! Data-URI image assets
//!
//! Every image entering or leaving the generation pipeline is carried as a
//! `data:<mediaType>;base64,<payload>` string, so any generated output can be
//! fed back in as input without reformatting. `ImageAsset` is the parsed form
//! of that string: a media type plus the base64 payload.

use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A binary image plus its media type, in the wire-ready base64 form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAsset {
    media_type: String,
    payload: String,
}

impl ImageAsset {
    /// Create an asset from an already-encoded media type and base64 payload
    pub fn new(media_type: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            media_type: media_type.into(),
            payload: payload.into(),
        }
    }

    /// Parse a `data:<mediaType>;base64,<payload>` string
    ///
    /// Fails if the string has no comma separator or the media-type segment
    /// cannot be extracted between the `:` and `;` delimiters.
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let (header, payload) = uri.split_once(',').ok_or_else(|| {
            Error::MalformedAsset("data URI has no base64 payload separator".to_string())
        })?;

        let media_type = header
            .split_once(':')
            .and_then(|(_, rest)| rest.split_once(';'))
            .map(|(media_type, _)| media_type)
            .filter(|media_type| !media_type.is_empty())
            .ok_or_else(|| {
                Error::MalformedAsset("could not parse media type from data URI".to_string())
            })?;

        Ok(Self {
            media_type: media_type.to_string(),
            payload: payload.to_string(),
        })
    }

    /// Encode raw image bytes, sniffing the media type from magic numbers
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let media_type = detect_media_type(bytes).ok_or_else(|| {
            Error::MalformedAsset("unrecognized image format (expected PNG, JPEG, WebP or GIF)".to_string())
        })?;

        Ok(Self {
            media_type: media_type.to_string(),
            payload: BASE64.encode(bytes),
        })
    }

    /// Read a file fully into memory and encode it
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// The media type, e.g. `image/png`
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// The base64-encoded payload
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Render back to the `data:<mediaType>;base64,<payload>` form
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.payload)
    }

    /// Decode the payload back to raw bytes
    pub fn decode(&self) -> Result<Vec<u8>> {
        BASE64
            .decode(&self.payload)
            .map_err(|e| Error::MalformedAsset(format!("invalid base64 payload: {}", e)))
    }

    /// File extension matching the media type
    pub fn extension(&self) -> &'static str {
        match self.media_type.as_str() {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }
}

/// Detect media type from image bytes
fn detect_media_type(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        Some("image/png")
    } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if data.starts_with(b"RIFF") && data.get(8..12) == Some(b"WEBP") {
        Some("image/webp")
    } else if data.starts_with(b"GIF8") {
        Some("image/gif")
    } else {
        None
    }
}
