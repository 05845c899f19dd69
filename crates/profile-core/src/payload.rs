//! Payloads handed to the profile store
//!
//! - [`ProfileUpdatePayload`]: the field map sent to `ProfileStore::update`
//! - [`FormPayload`]: the form-encoded image upload sent to
//!   `ProfileStore::complete_profile`
//! - [`ImageAttachment`]: a candidate national-ID image held by the session
//!
//! Payloads are assembled by the controller for a single submit and dropped
//! when it resolves.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{Error, Result};

/// Submitted form values, keyed by form control name
pub type FormValues = BTreeMap<String, String>;

/// Field name of the stored national-ID image reference
pub const NID_IMAGE_FIELD: &str = "nid_image";

/// Form part name used for the uploaded image
pub const IMAGE_PART: &str = "image";

/// A candidate image selected by the user
///
/// Cloning is cheap: the bytes are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    filename: String,
    bytes: Arc<[u8]>,
}

impl ImageAttachment {
    /// Create an attachment from raw file bytes
    pub fn new(bytes: impl Into<Arc<[u8]>>, filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    /// Original file name
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Raw file bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size in bytes
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the image is at or above `limit` bytes
    pub fn exceeds(&self, limit: usize) -> bool {
        self.size() >= limit
    }

    /// Content type inferred from the file extension
    pub fn content_type(&self) -> &'static str {
        let ext = self
            .filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "bmp" => "image/bmp",
            "svg" => "image/svg+xml",
            "heic" => "image/heic",
            _ => "application/octet-stream",
        }
    }
}

/// Payload for `ProfileStore::update`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdatePayload {
    /// Derived display name, sent as `username`
    #[serde(rename = "username", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Submitted fields, sent as `additionalData`
    #[serde(rename = "additionalData")]
    pub fields: FormValues,

    #[serde(skip)]
    attached_image: Option<ImageAttachment>,
}

impl ProfileUpdatePayload {
    /// Create a payload from submitted form values
    pub fn new(fields: FormValues) -> Self {
        Self {
            display_name: None,
            fields,
            attached_image: None,
        }
    }

    /// Set the derived display name
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Attach an image, refusing one at or above `limit` bytes
    pub fn attach_image(&mut self, image: ImageAttachment, limit: usize) -> Result<()> {
        if image.exceeds(limit) {
            return Err(Error::ImageTooLarge {
                size: image.size(),
                limit,
            });
        }
        self.attached_image = Some(image);
        Ok(())
    }

    /// The attached image, if any
    pub fn attached_image(&self) -> Option<&ImageAttachment> {
        self.attached_image.as_ref()
    }

    /// Detach the image and encode it as an upload form
    ///
    /// After this call the payload carries only the submitted fields.
    pub fn take_image_form(&mut self) -> Option<FormPayload> {
        self.attached_image.take().map(|image| FormPayload::from_image(&image))
    }

    /// JSON body as a store would send it
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// One part of a form-encoded payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    /// Plain text field
    Text {
        /// Part name
        name: String,
        /// Field value
        value: String,
    },
    /// File field
    File {
        /// Part name
        name: String,
        /// Original file name
        filename: String,
        /// Content type of the file
        content_type: String,
        /// File bytes
        bytes: Arc<[u8]>,
    },
}

impl FormPart {
    /// Part name
    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

/// Form-encoded payload for `ProfileStore::complete_profile`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    parts: Vec<FormPart>,
}

impl FormPayload {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the image upload form (a single `image` file part)
    pub fn from_image(image: &ImageAttachment) -> Self {
        Self::new().file(IMAGE_PART, image)
    }

    /// Append a text part
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Append a file part
    pub fn file(mut self, name: impl Into<String>, image: &ImageAttachment) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            filename: image.filename().to_string(),
            content_type: image.content_type().to_string(),
            bytes: Arc::clone(&image.bytes),
        });
        self
    }

    /// All parts, in insertion order
    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// First part with the given name
    pub fn get(&self, name: &str) -> Option<&FormPart> {
        self.parts.iter().find(|part| part.name() == name)
    }

    /// File name of the file part with the given name
    pub fn filename(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            FormPart::File { filename, .. } => Some(filename),
            FormPart::Text { .. } => None,
        }
    }
}
