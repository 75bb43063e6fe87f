//! Image reference and upload types.

use serde::{Deserialize, Serialize};

/// Stable string locator for an object in the storage gateway.
///
/// References are opaque to the rest of the system; equality is exact string
/// match. The final path segment doubles as the object name within its entity
/// prefix.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub struct ImageRef(String);

impl ImageRef {
    /// Wrap a reference string.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// The full reference string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The object name: everything after the last `/`.
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// The object name without its extension.
    pub fn stem(&self) -> &str {
        let name = self.name();
        name.rsplit_once('.').map_or(name, |(stem, _)| stem)
    }
}

impl From<String> for ImageRef {
    fn from(reference: String) -> Self {
        Self(reference)
    }
}

impl From<&str> for ImageRef {
    fn from(reference: &str) -> Self {
        Self(reference.to_string())
    }
}

/// A freshly supplied image that has no storage reference yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    /// Original filename as submitted by the uploader
    pub filename: String,
    /// Encoded image bytes
    pub bytes: Vec<u8>,
}

impl NewImage {
    /// Create a new upload candidate.
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Filename up to the first `.`, used to derive the storage name.
    pub fn stem(&self) -> &str {
        self.filename
            .split_once('.')
            .map_or(self.filename.as_str(), |(stem, _)| stem)
    }
}

/// One slot of a submitted image list: either a reference the caller keeps, or
/// new binary content to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A reference to an already-stored image the caller wants to keep
    Existing(ImageRef),
    /// New content to be uploaded
    New(NewImage),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ref_name_and_stem() {
        let r = ImageRef::new("img/chapter/3/7/page_04.webp");
        assert_eq!(r.name(), "page_04.webp");
        assert_eq!(r.stem(), "page_04");

        let bare = ImageRef::new("page.webp");
        assert_eq!(bare.name(), "page.webp");
    }

    #[test]
    fn new_image_stem_cuts_at_first_dot() {
        let img = NewImage::new("cover.final.png", vec![]);
        assert_eq!(img.stem(), "cover");
    }
}
