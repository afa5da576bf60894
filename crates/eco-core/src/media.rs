//! Media payloads: base64 data URLs for photos and signatures.
//!
//! Records carry images inline as `data:<media-type>;base64,<data>` strings so
//! that a record is self-contained.

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures::future::join_all;

use crate::error::MediaError;

/// A decoded data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub media_type: String,
    pub data: Vec<u8>,
}

impl DataUrl {
    pub fn new(media_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            data,
        }
    }

    pub fn png(data: Vec<u8>) -> Self {
        Self::new("image/png", data)
    }

    /// Parse a `data:<type>;base64,<payload>` string.
    pub fn parse(payload: &str) -> Result<Self, MediaError> {
        let rest = payload
            .strip_prefix("data:")
            .ok_or(MediaError::InvalidDataUrl {
                reason: "missing data: prefix",
            })?;
        let (header, body) = rest.split_once(',').ok_or(MediaError::InvalidDataUrl {
            reason: "missing comma",
        })?;
        let media_type = header
            .strip_suffix(";base64")
            .ok_or(MediaError::InvalidDataUrl {
                reason: "only base64 payloads are supported",
            })?;
        let data = STANDARD.decode(body.trim())?;
        Ok(Self::new(media_type, data))
    }

    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.media_type, STANDARD.encode(&self.data))
    }
}

/// Something a photo can be read from.
pub trait PhotoSource {
    /// Name used in error reports.
    fn name(&self) -> String;

    fn read(&self) -> impl Future<Output = Result<DataUrl, MediaError>>;
}

/// A photo on the local filesystem. The media type is detected from content.
#[derive(Debug, Clone)]
pub struct FilePhotoSource {
    path: PathBuf,
}

impl FilePhotoSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PhotoSource for FilePhotoSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    async fn read(&self) -> Result<DataUrl, MediaError> {
        let data = tokio::fs::read(&self.path)
            .await
            .map_err(|source| MediaError::Read {
                path: self.path.clone(),
                source,
            })?;
        let format = image::guess_format(&data).map_err(|_| MediaError::UnsupportedImage {
            name: self.name(),
        })?;
        Ok(DataUrl::new(format.to_mime_type(), data))
    }
}

/// Read every source concurrently. Results keep the order of `sources`.
pub async fn read_photos<S: PhotoSource>(sources: &[S]) -> Vec<Result<DataUrl, MediaError>> {
    join_all(sources.iter().map(PhotoSource::read)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_prints_base64_payloads() {
        let url = DataUrl::parse("data:image/jpeg;base64,/9j/4A==").unwrap();
        assert_eq!(url.media_type, "image/jpeg");
        assert_eq!(url.data, vec![0xff, 0xd8, 0xff, 0xe0]);
        assert!(url.is_image());
        assert_eq!(url.to_string(), "data:image/jpeg;base64,/9j/4A==");
    }

    #[test]
    fn rejects_malformed_payloads() {
        for bad in ["", "image/png;base64,AA", "data:image/png,AA", "data:image/png;base64"] {
            assert!(matches!(
                DataUrl::parse(bad),
                Err(MediaError::InvalidDataUrl { .. })
            ));
        }
        assert!(matches!(
            DataUrl::parse("data:image/png;base64,***"),
            Err(MediaError::Base64(_))
        ));
    }
}
