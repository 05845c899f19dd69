// # profile-core
//
// Core library for the profile editing screen.
//
// ## Architecture Overview
//
// - **nid**: National ID syntax and checksum validation
// - **ProfileEditSession**: Local state of one page view (tab, edit mode,
//   pending national-ID image)
// - **ProfileEditController**: Orchestrates tab submits against a ProfileStore
//   and reports outcomes through a NotificationSink
// - **ProfilePage**: Page chrome, password toggles and dialogs around the
//   controller
// - **ProfileStore / NotificationSink / DialogHost / PreviewReader /
//   FileInput**: Collaborators supplied by the host
//
// ## Design Principles
//
// 1. **Library-First**: The presentation layer is the host's; this crate
//    only holds state and decisions
// 2. **Explicit Outcomes**: Every collaborator call is checked, failures keep
//    the session editable
// 3. **Single Flight**: At most one submit per session is in flight

pub mod config;
pub mod controller;
pub mod error;
pub mod nid;
pub mod page;
pub mod payload;
pub mod preview;
pub mod store;
pub mod traits;

// Re-export core types for convenience
pub use config::{PageChrome, ProfileConfig};
pub use controller::{
    ControllerEvent, EditMode, PreviewOutcome, PreviewRequest, ProfileEditController,
    ProfileEditSession, ProfileTab,
};
pub use error::{Error, Result};
pub use nid::{HolderKind, NationalId, NationalIdError, validate};
pub use page::{PasswordVisibility, ProfilePage};
pub use payload::{FormPart, FormPayload, FormValues, ImageAttachment, ProfileUpdatePayload};
pub use preview::DataUrlReader;
pub use store::MemoryProfileStore;
pub use traits::{
    DialogHost, FileInput, Notification, NotificationSink, Preview, PreviewReader, ProfileStore,
    TracingNotificationSink,
};
