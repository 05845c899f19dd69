//! Collaborator traits for the profile editing core
//!
//! The controller talks to everything outside the session through these
//! interfaces:
//!
//! - [`ProfileStore`]: persists profile updates and image uploads
//! - [`NotificationSink`]: shows transient success/failure notices
//! - [`DialogHost`]: opens modal dialogs
//! - [`PreviewReader`]: turns image bytes into a displayable preview
//! - [`FileInput`]: the bound file picker control

pub mod profile_store;
pub mod notification;
pub mod dialog;
pub mod preview;

pub use profile_store::ProfileStore;
pub use notification::{Notification, NotificationKind, NotificationSink, TracingNotificationSink};
pub use dialog::{DialogHost, DialogKind, DialogRequest};
pub use preview::{FileInput, Preview, PreviewReader};
