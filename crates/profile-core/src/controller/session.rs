//! Edit session state
//!
//! [`ProfileEditSession`] is the local state of one profile page view. All
//! transitions here are synchronous and free of I/O; the controller wraps them
//! with collaborator calls, logging and events.
//!
//! ```text
//!            toggle_edit                submit ok / cancel / toggle_edit
//!   VIEWING ─────────────▶ EDITING ─────────────────────────────────────▶ VIEWING
//!      ▲                                                                    │
//!      └────────────────────── switch_tab (from either) ◀───────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::payload::ImageAttachment;
use crate::traits::preview::Preview;

/// Tabs of the profile page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfileTab {
    /// Name, birth date, national ID
    #[default]
    Personal,
    /// Phone, address, national-ID image
    Contact,
    /// Email and password
    Account,
}

impl std::fmt::Display for ProfileTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileTab::Personal => write!(f, "PERSONAL"),
            ProfileTab::Contact => write!(f, "CONTACT"),
            ProfileTab::Account => write!(f, "ACCOUNT"),
        }
    }
}

/// Whether form fields can currently be changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Read-only
    Viewing,
    /// Fields editable, save/cancel available
    Editing,
}

/// Local state of a profile page view
///
/// Invariants:
/// - a pending image exists only while editing the contact tab
/// - `image_invalid` is set iff the pending image reached the size limit
/// - a preview exists only for the current pending image
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileEditSession {
    active_tab: ProfileTab,
    editable: bool,
    pending_image: Option<ImageAttachment>,
    pending_image_preview: Option<Preview>,
    image_invalid: bool,
}

impl ProfileEditSession {
    /// Fresh session on the personal tab
    pub fn new() -> Self {
        Self::default()
    }

    /// The active tab
    pub fn active_tab(&self) -> ProfileTab {
        self.active_tab
    }

    /// Whether edit mode is on
    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// Current edit mode
    pub fn mode(&self) -> EditMode {
        if self.editable {
            EditMode::Editing
        } else {
            EditMode::Viewing
        }
    }

    /// Image awaiting upload, if any
    pub fn pending_image(&self) -> Option<&ImageAttachment> {
        self.pending_image.as_ref()
    }

    /// Preview of the pending image, once read
    pub fn pending_image_preview(&self) -> Option<&Preview> {
        self.pending_image_preview.as_ref()
    }

    /// Whether the pending image is too large to upload
    pub fn image_invalid(&self) -> bool {
        self.image_invalid
    }

    /// Activate `tab`, leaving edit mode and dropping any pending image
    pub fn switch_tab(&mut self, tab: ProfileTab) {
        *self = Self {
            active_tab: tab,
            ..Self::default()
        };
    }

    /// Flip edit mode
    ///
    /// Leaving edit mode drops the pending image, since one may only exist
    /// while editing.
    pub fn toggle_edit(&mut self) -> bool {
        self.editable = !self.editable;
        if !self.editable {
            self.clear_image();
        }
        self.editable
    }

    /// Hold `image` as the pending upload, replacing any previous one
    ///
    /// Returns whether the image is invalid (at or above `limit` bytes).
    pub fn attach_image(&mut self, image: ImageAttachment, limit: usize) -> Result<bool> {
        if !self.editable || self.active_tab != ProfileTab::Contact {
            return Err(Error::invalid_state(format!(
                "images can only be attached while editing the {} tab (active: {}, editing: {})",
                ProfileTab::Contact,
                self.active_tab,
                self.editable
            )));
        }

        self.image_invalid = image.exceeds(limit);
        self.pending_image = Some(image);
        self.pending_image_preview = None;
        Ok(self.image_invalid)
    }

    /// Store the preview of the current pending image
    pub(crate) fn set_preview(&mut self, preview: Preview) {
        if self.pending_image.is_some() {
            self.pending_image_preview = Some(preview);
        }
    }

    /// Drop the pending image, its preview and the invalid flag
    pub fn clear_image(&mut self) {
        self.pending_image = None;
        self.pending_image_preview = None;
        self.image_invalid = false;
    }

    /// Leave edit mode without saving
    pub fn cancel(&mut self) {
        self.editable = false;
        if self.active_tab == ProfileTab::Contact {
            self.clear_image();
        }
    }

    /// Leave edit mode after a successful save
    pub(crate) fn complete_submit(&mut self) {
        self.editable = false;
        self.clear_image();
    }
}
