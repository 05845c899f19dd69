//! Data URL preview reader
//!
//! Encodes the selected image as `data:<content type>;base64,<payload>`, the
//! form an `<img>` element or an embedded webview can display directly.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::Error;
use crate::payload::ImageAttachment;
use crate::traits::preview::{Preview, PreviewReader};

/// Preview reader producing base64 data URLs
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUrlReader;

impl DataUrlReader {
    /// Create a new reader
    pub fn new() -> Self {
        Self
    }

    /// Encode an image as a data URL
    pub fn encode(image: &ImageAttachment) -> String {
        format!(
            "data:{};base64,{}",
            image.content_type(),
            STANDARD.encode(image.bytes())
        )
    }
}

#[async_trait]
impl PreviewReader for DataUrlReader {
    async fn read_preview(&self, image: &ImageAttachment) -> Result<Preview, Error> {
        if image.size() == 0 {
            return Err(Error::preview(format!("{} is empty", image.filename())));
        }
        tracing::debug!(
            "Encoding preview for {} ({} bytes)",
            image.filename(),
            image.size()
        );
        Ok(Preview::new(Self::encode(image)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_png_as_data_url() {
        let image = ImageAttachment::new(b"\x89PNG".to_vec(), "id.png");
        let preview = tokio_test::block_on(DataUrlReader::new().read_preview(&image)).unwrap();
        assert_eq!(preview.as_str(), "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn empty_file_has_no_preview() {
        let image = ImageAttachment::new(Vec::new(), "empty.jpg");
        let result = tokio_test::block_on(DataUrlReader::new().read_preview(&image));
        assert!(matches!(result, Err(Error::Preview(_))));
    }
}
