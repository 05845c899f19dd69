// # Preview Reader and File Input Traits
//
// A preview reader turns the bytes of a selected image into something the
// presentation layer can display. Reading is asynchronous: the session holds
// the pending image before its preview exists.
//
// ## Implementations
//
// - `preview::DataUrlReader`: base64 `data:` URL

use async_trait::async_trait;

use crate::payload::ImageAttachment;

/// Displayable representation of a pending image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview(String);

impl Preview {
    /// Wrap a displayable representation (e.g. a data URL)
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Produces previews for selected images
///
/// Best effort: a failed read leaves the session without a preview but does
/// not affect the pending image or its validity.
#[async_trait]
pub trait PreviewReader: Send + Sync {
    /// Read `image` into a preview
    async fn read_preview(&self, image: &ImageAttachment) -> Result<Preview, crate::Error>;
}

/// The file picker control bound to the image field
pub trait FileInput: Send + Sync {
    /// Reset the control so the same file can be selected again
    fn clear(&self);

    /// Open the picker
    fn open_picker(&self);
}
