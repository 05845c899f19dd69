//! Profile edit controller
//!
//! The ProfileEditController is responsible for:
//! - Owning the edit session of one profile page view
//! - Gating and holding the national-ID image
//! - Submitting each tab's form through the ProfileStore
//! - Telling the user how a save went
//!
//! ## Architecture
//!
//! ```text
//!   UI events ──▶ ┌──────────────────────┐
//!                 │ ProfileEditController│── ControllerEvent ──▶ (monitoring)
//!                 └──────────────────────┘
//!                            │
//!        ┌───────────────────┼───────────────────┐
//!        ▼                   ▼                   ▼
//! ┌──────────────┐   ┌────────────────┐   ┌──────────────┐
//! │ ProfileStore │   │NotificationSink│   │PreviewReader │
//! │ (persist)    │   │ (notify)       │   │ (preview)    │
//! └──────────────┘   └────────────────┘   └──────────────┘
//! ```
//!
//! ## Submit Flow
//!
//! 1. Claim the busy flag (one submit in flight per session)
//! 2. Assemble the payload for the tab
//! 3. Contact tab only: upload a pending image, refusing an invalid one
//! 4. Call ProfileStore::update()
//! 5. On success leave edit mode and notify; on failure stay in edit mode and notify

pub mod session;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, error, info, warn};

use crate::config::ProfileConfig;
use crate::error::{Error, Result};
use crate::payload::{FormValues, IMAGE_PART, ImageAttachment, NID_IMAGE_FIELD, ProfileUpdatePayload};
use crate::preview::DataUrlReader;
use crate::traits::{FileInput, Notification, NotificationSink, Preview, PreviewReader, ProfileStore};

pub use session::{EditMode, ProfileEditSession, ProfileTab};

/// Form control holding the first name on the personal tab
pub const FIRST_NAME_FIELD: &str = "firstName";

/// Form control holding the last name on the personal tab
pub const LAST_NAME_FIELD: &str = "lastName";

/// Events emitted by the ProfileEditController
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// Active tab changed
    TabSwitched { tab: ProfileTab },

    /// Edit mode flipped
    EditToggled { tab: ProfileTab, editable: bool },

    /// Image held as pending upload
    ImageAttached {
        filename: String,
        size: usize,
        invalid: bool,
    },

    /// Preview of the pending image became available
    PreviewReady { filename: String },

    /// Preview arrived for an image that is no longer pending
    PreviewDiscarded { filename: String },

    /// Preview could not be produced
    PreviewFailed { filename: String, error: String },

    /// Pending image dropped by the user
    ImageRemoved,

    /// Edit mode left without saving
    Cancelled { tab: ProfileTab },

    /// Submit started
    SubmitStarted { tab: ProfileTab },

    /// Submit refused because another one is in flight
    SubmitRejected { tab: ProfileTab },

    /// Pending image uploaded via complete_profile
    ImageUploaded { filename: String },

    /// Submit succeeded; edit mode left
    SubmitSucceeded { tab: ProfileTab },

    /// Submit failed or was refused; session unchanged
    SubmitFailed { tab: ProfileTab, error: String },
}

/// Ticket for reading the preview of an attached image
///
/// Returned by [`ProfileEditController::attach_image`]. The read runs outside
/// the controller so the page stays interactive; hand the outcome back with
/// [`ProfileEditController::apply_preview`]. Outcomes for an image that was
/// replaced or removed in the meantime are discarded.
#[derive(Debug, Clone)]
pub struct PreviewRequest {
    ticket: u64,
    image: ImageAttachment,
}

impl PreviewRequest {
    /// The image to preview
    pub fn image(&self) -> &ImageAttachment {
        &self.image
    }

    /// Read the preview with `reader`
    pub async fn read(self, reader: &dyn PreviewReader) -> PreviewOutcome {
        let result = reader.read_preview(&self.image).await;
        PreviewOutcome {
            ticket: self.ticket,
            filename: self.image.filename().to_string(),
            result,
        }
    }
}

/// Result of a preview read, ready to apply
#[derive(Debug)]
pub struct PreviewOutcome {
    ticket: u64,
    filename: String,
    result: Result<Preview>,
}

/// Session plus the tickets that tie async results to the session they began on
#[derive(Debug, Default)]
struct ControllerState {
    session: ProfileEditSession,
    preview_ticket: u64,
    /// Bumped whenever the user changes the session
    generation: u64,
}

impl ControllerState {
    fn touch(&mut self) {
        self.generation += 1;
    }
}

/// Releases the busy flag when the submit resolves or its future is dropped
struct SubmitGuard<'a> {
    busy: &'a AtomicBool,
    /// Session generation the submit was started against
    generation: u64,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Profile edit controller
///
/// Owns the [`ProfileEditSession`] of one page view and orchestrates the
/// three tab submits against a [`ProfileStore`].
///
/// ## Threading
///
/// All methods take `&self`, so the controller can be shared (e.g. in an
/// `Arc`) between UI tasks. The session lock is only held for synchronous
/// transitions, never across a collaborator call.
///
/// ## Failure Handling
///
/// Every collaborator call is checked. A failed submit leaves the session
/// exactly as it was (still editing, pending image kept), emits a failure
/// notification, and returns the error so the caller can offer a retry.
pub struct ProfileEditController {
    /// Store persisting profile changes
    store: Box<dyn ProfileStore>,

    /// Sink for success/failure notices
    notifier: Box<dyn NotificationSink>,

    /// Reader producing image previews
    reader: Box<dyn PreviewReader>,

    /// Bound file picker, if the page has one
    file_input: Option<Box<dyn FileInput>>,

    /// Limits, texts and styling
    config: ProfileConfig,

    /// Session state
    state: Mutex<ControllerState>,

    /// Set while a submit is in flight
    busy: AtomicBool,

    /// Event sender for external monitoring
    event_tx: mpsc::Sender<ControllerEvent>,
}

impl std::fmt::Debug for ProfileEditController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileEditController")
            .field("store", &self.store.store_name())
            .field("session", &self.session())
            .field("busy", &self.is_busy())
            .finish_non_exhaustive()
    }
}

impl ProfileEditController {
    /// Create a new controller
    ///
    /// # Parameters
    ///
    /// - `store`: Profile store implementation
    /// - `notifier`: Notification sink implementation
    /// - `config`: Profile configuration
    ///
    /// # Returns
    ///
    /// A tuple of (controller, event_receiver) where event_receiver yields controller events
    pub fn new(
        store: Box<dyn ProfileStore>,
        notifier: Box<dyn NotificationSink>,
        config: ProfileConfig,
    ) -> Result<(Self, mpsc::Receiver<ControllerEvent>)> {
        config.validate()?;

        let (tx, rx) = mpsc::channel(config.event_channel_capacity);

        let controller = Self {
            store,
            notifier,
            reader: Box::new(DataUrlReader::new()),
            file_input: None,
            config,
            state: Mutex::new(ControllerState::default()),
            busy: AtomicBool::new(false),
            event_tx: tx,
        };

        Ok((controller, rx))
    }

    /// Replace the default data URL preview reader
    pub fn with_preview_reader(mut self, reader: Box<dyn PreviewReader>) -> Self {
        self.reader = reader;
        self
    }

    /// Bind the page's file picker control
    pub fn with_file_input(mut self, file_input: Box<dyn FileInput>) -> Self {
        self.file_input = Some(file_input);
        self
    }

    /// The configuration in use
    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    /// Snapshot of the session
    pub fn session(&self) -> ProfileEditSession {
        self.state().session.clone()
    }

    /// The active tab
    pub fn active_tab(&self) -> ProfileTab {
        self.state().session.active_tab()
    }

    /// Whether edit mode is on
    pub fn is_editable(&self) -> bool {
        self.state().session.is_editable()
    }

    /// Whether a submit is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Activate `tab`, leaving edit mode and dropping any pending image
    pub fn switch_tab(&self, tab: ProfileTab) {
        {
            let mut state = self.state();
            state.session.switch_tab(tab);
            state.touch();
        }
        debug!("Switched to tab {}", tab);
        self.emit_event(ControllerEvent::TabSwitched { tab });
    }

    /// Flip edit mode, returning the new value
    pub fn toggle_edit(&self) -> bool {
        let (tab, editable) = {
            let mut state = self.state();
            let editable = state.session.toggle_edit();
            state.touch();
            (state.session.active_tab(), editable)
        };
        debug!("Edit mode on {} tab: {}", tab, editable);
        self.emit_event(ControllerEvent::EditToggled { tab, editable });
        editable
    }

    /// Hold a selected image as the pending national-ID upload
    ///
    /// The image is kept even when it is too large, so the page can show it
    /// together with the size error; it is never uploaded in that case.
    ///
    /// # Returns
    ///
    /// - `Ok(PreviewRequest)`: Ticket for reading the preview
    /// - `Err(Error::InvalidState)`: Not editing the contact tab
    pub fn attach_image(
        &self,
        bytes: impl Into<std::sync::Arc<[u8]>>,
        filename: impl Into<String>,
    ) -> Result<PreviewRequest> {
        let image = ImageAttachment::new(bytes, filename);
        let limit = self.config.max_image_bytes;

        let (ticket, invalid) = {
            let mut state = self.state();
            let invalid = state.session.attach_image(image.clone(), limit)?;
            state.preview_ticket += 1;
            state.touch();
            (state.preview_ticket, invalid)
        };

        if invalid {
            warn!(
                "Image {} is {} bytes, at or above the {} byte limit",
                image.filename(),
                image.size(),
                limit
            );
        } else {
            debug!("Attached image {} ({} bytes)", image.filename(), image.size());
        }

        self.emit_event(ControllerEvent::ImageAttached {
            filename: image.filename().to_string(),
            size: image.size(),
            invalid,
        });

        Ok(PreviewRequest { ticket, image })
    }

    /// Store a finished preview read
    ///
    /// # Returns
    ///
    /// `true` if the preview now belongs to the pending image
    pub fn apply_preview(&self, outcome: PreviewOutcome) -> bool {
        let PreviewOutcome {
            ticket,
            filename,
            result,
        } = outcome;

        let event = {
            let mut state = self.state();
            let current =
                state.preview_ticket == ticket && state.session.pending_image().is_some();

            match result {
                _ if !current => {
                    debug!("Discarding preview for {}, image no longer pending", filename);
                    ControllerEvent::PreviewDiscarded { filename }
                }
                Ok(preview) => {
                    state.session.set_preview(preview);
                    ControllerEvent::PreviewReady { filename }
                }
                Err(e) => {
                    warn!("Preview for {} failed: {}", filename, e);
                    ControllerEvent::PreviewFailed {
                        filename,
                        error: e.to_string(),
                    }
                }
            }
        };

        let applied = matches!(event, ControllerEvent::PreviewReady { .. });
        self.emit_event(event);
        applied
    }

    /// Read and apply a preview with the controller's reader
    pub async fn load_preview(&self, request: PreviewRequest) -> bool {
        let outcome = request.read(self.reader.as_ref()).await;
        self.apply_preview(outcome)
    }

    /// Drop the pending image and reset the file picker
    ///
    /// Resetting the picker lets the user select the same file again.
    pub fn remove_image(&self) {
        {
            let mut state = self.state();
            state.session.clear_image();
            state.touch();
        }
        if let Some(input) = &self.file_input {
            input.clear();
        }
        debug!("Pending image removed");
        self.emit_event(ControllerEvent::ImageRemoved);
    }

    /// Open the bound file picker
    pub fn open_image_picker(&self) {
        match &self.file_input {
            Some(input) => input.open_picker(),
            None => warn!("No file input bound, cannot open image picker"),
        }
    }

    /// Leave edit mode without saving
    ///
    /// Affects local state only; an in-flight submit keeps running.
    pub fn cancel(&self) {
        let tab = {
            let mut state = self.state();
            state.session.cancel();
            state.touch();
            state.session.active_tab()
        };
        debug!("Edit cancelled on {} tab", tab);
        self.emit_event(ControllerEvent::Cancelled { tab });
    }

    /// Save the personal tab
    ///
    /// The stored `nid_image` reference is carried over from the profile
    /// store; a newly attached image is never part of this submit. The display
    /// name is first and last name joined by the configured separator.
    pub async fn submit_personal(&self, form: FormValues) -> Result<()> {
        let tab = ProfileTab::Personal;
        let guard = self.begin_submit(tab)?;

        let result = match self.personal_payload(form).await {
            Ok(payload) => self.push_update(&payload).await,
            Err(e) => Err(e),
        };

        self.finish_submit(tab, &guard, result)
    }

    /// Save the contact tab
    ///
    /// A pending image is uploaded first and the fields are only updated once
    /// the upload succeeded. An invalid image refuses the whole submit without
    /// calling the store.
    pub async fn submit_contact(&self, form: FormValues) -> Result<()> {
        let tab = ProfileTab::Contact;
        let guard = self.begin_submit(tab)?;

        let pending = self.state().session.pending_image().cloned();
        let mut payload = ProfileUpdatePayload::new(form);

        if let Some(image) = pending {
            if let Err(e) = payload.attach_image(image, self.config.max_image_bytes) {
                warn!("Refusing to upload invalid image: {}", e);
                return self.finish_submit(tab, &guard, Err(e));
            }
        }

        let result = match self.upload_image(&mut payload).await {
            Ok(()) => self.push_update(&payload).await,
            Err(e) => Err(e),
        };

        self.finish_submit(tab, &guard, result)
    }

    /// Save the account tab
    pub async fn submit_account(&self, form: FormValues) -> Result<()> {
        let tab = ProfileTab::Account;
        let guard = self.begin_submit(tab)?;

        let payload = ProfileUpdatePayload::new(form);
        let result = self.push_update(&payload).await;

        self.finish_submit(tab, &guard, result)
    }

    /// Claim the busy flag for one submit
    fn begin_submit(&self, tab: ProfileTab) -> Result<SubmitGuard<'_>> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Rejected {} submit, another submit is in flight", tab);
            self.emit_event(ControllerEvent::SubmitRejected { tab });
            return Err(Error::SubmitInProgress);
        }

        let generation = self.state().generation;
        info!("Submitting {} tab", tab);
        self.emit_event(ControllerEvent::SubmitStarted { tab });
        Ok(SubmitGuard {
            busy: &self.busy,
            generation,
        })
    }

    /// Apply the outcome of a submit to the session and tell the user
    ///
    /// A success only leaves edit mode if the user has not changed the
    /// session since the submit started; later edits belong to a new save.
    fn finish_submit(
        &self,
        tab: ProfileTab,
        guard: &SubmitGuard<'_>,
        result: Result<()>,
    ) -> Result<()> {
        match result {
            Ok(()) => {
                {
                    let mut state = self.state();
                    if state.generation == guard.generation {
                        state.session.complete_submit();
                    } else {
                        debug!("Session changed during {} submit, keeping it", tab);
                    }
                }
                info!("Saved {} tab", tab);
                self.notifier
                    .notify(Notification::success(&self.config.notifications));
                self.emit_event(ControllerEvent::SubmitSucceeded { tab });
                Ok(())
            }
            Err(e) => {
                error!("Failed to save {} tab: {}", tab, e);
                self.notifier
                    .notify(Notification::failure(&self.config.notifications));
                self.emit_event(ControllerEvent::SubmitFailed {
                    tab,
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Build the personal tab payload
    async fn personal_payload(&self, mut form: FormValues) -> Result<ProfileUpdatePayload> {
        let stored = self
            .store
            .additional_data()
            .await
            .map_err(|e| Error::store(format!("{}: {}", self.store.store_name(), e)))?;

        form.remove(NID_IMAGE_FIELD);
        if let Some(nid_image) = stored.get(NID_IMAGE_FIELD) {
            form.insert(NID_IMAGE_FIELD.to_string(), nid_image.clone());
        }

        let display_name = [FIRST_NAME_FIELD, LAST_NAME_FIELD]
            .map(|field| form.get(field).map(String::as_str).unwrap_or_default())
            .join(self.config.display_name_separator.as_str());

        Ok(ProfileUpdatePayload::new(form).with_display_name(display_name))
    }

    /// Upload the payload's image, if it carries one
    async fn upload_image(&self, payload: &mut ProfileUpdatePayload) -> Result<()> {
        let Some(form) = payload.take_image_form() else {
            return Ok(());
        };
        let filename = form.filename(IMAGE_PART).unwrap_or_default().to_string();

        debug!("Uploading image {} via {}", filename, self.store.store_name());
        self.store
            .complete_profile(&form)
            .await
            .map_err(|e| Error::upload(format!("{}: {}", self.store.store_name(), e)))?;

        info!("Uploaded image {}", filename);
        self.emit_event(ControllerEvent::ImageUploaded { filename });
        Ok(())
    }

    /// Send a profile update
    async fn push_update(&self, payload: &ProfileUpdatePayload) -> Result<()> {
        debug!(
            "Updating {} field(s) via {}",
            payload.fields.len(),
            self.store.store_name()
        );
        self.store
            .update(payload)
            .await
            .map_err(|e| Error::store(format!("{}: {}", self.store.store_name(), e)))
    }

    /// Lock the session state
    fn state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Emit a controller event
    fn emit_event(&self, event: ControllerEvent) {
        match self.event_tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!("Event channel full, dropping event. Consider increasing event_channel_capacity.");
            }
            Err(TrySendError::Closed(_)) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_compare_by_value() {
        let event = ControllerEvent::SubmitFailed {
            tab: ProfileTab::Contact,
            error: "Image upload error: offline".to_string(),
        };
        assert_eq!(event.clone(), event);
        assert_ne!(event, ControllerEvent::SubmitSucceeded { tab: ProfileTab::Contact });
    }

    #[test]
    fn guard_releases_busy_flag_on_drop() {
        let busy = AtomicBool::new(true);
        drop(SubmitGuard {
            busy: &busy,
            generation: 0,
        });
        assert!(!busy.load(Ordering::Acquire));
    }
}
