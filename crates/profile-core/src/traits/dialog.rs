//! Dialog host
//!
//! The profile page opens two modal dialogs. Their contents live outside this
//! crate; the page only decides which dialog to open and how it is sized.

use crate::config::{DialogConfig, DialogSize};

/// Dialogs the profile page can open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    /// Logout confirmation
    Logout,
    /// Change-password form
    ChangePassword,
}

/// Presentation parameters for one dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogRequest {
    /// Which dialog to open
    pub kind: DialogKind,
    /// Styling hook for the presentation layer
    pub panel_class: String,
    /// Width and height
    pub size: DialogSize,
    /// Whether the dialog grabs focus when opened
    pub auto_focus: bool,
}

impl DialogRequest {
    /// Build the request for `kind` from configuration
    pub fn from_config(kind: DialogKind, config: &DialogConfig) -> Self {
        let size = match kind {
            DialogKind::Logout => config.logout.clone(),
            DialogKind::ChangePassword => config.change_password.clone(),
        };

        Self {
            kind,
            panel_class: config.panel_class.clone(),
            size,
            auto_focus: config.auto_focus,
        }
    }
}

/// Opens modal dialogs; results are not consumed
pub trait DialogHost: Send + Sync {
    /// Open a dialog
    fn open(&self, request: DialogRequest);
}
