//! Test doubles and common utilities for controller contract tests
//!
//! The doubles record every collaborator call so tests can assert on call
//! order and on what was (or was not) sent to the store.

use profile_core::error::{Error, Result};
use profile_core::traits::{
    FileInput, Notification, NotificationKind, NotificationSink, Preview, PreviewReader,
    ProfileStore,
};
use profile_core::{
    ControllerEvent, FormPayload, FormValues, ImageAttachment, ProfileConfig,
    ProfileEditController, ProfileUpdatePayload,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::{Notify, mpsc};

/// One call received by [`MockProfileStore`]
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    AdditionalData,
    CompleteProfile(FormPayload),
    Update(ProfileUpdatePayload),
}

/// A mock ProfileStore that records calls and can be told to fail
pub struct MockProfileStore {
    /// Every call, in order
    calls: Arc<std::sync::Mutex<Vec<StoreCall>>>,
    /// Call counter for update()
    update_call_count: Arc<AtomicUsize>,
    /// Call counter for complete_profile()
    upload_call_count: Arc<AtomicUsize>,
    /// Data returned by additional_data()
    additional: Arc<std::sync::Mutex<FormValues>>,
    fail_update: Arc<AtomicBool>,
    fail_upload: Arc<AtomicBool>,
    fail_additional: Arc<AtomicBool>,
    /// When set, update() waits for a notification before resolving
    update_gate: Option<Arc<Notify>>,
}

impl MockProfileStore {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(std::sync::Mutex::new(Vec::new())),
            update_call_count: Arc::new(AtomicUsize::new(0)),
            upload_call_count: Arc::new(AtomicUsize::new(0)),
            additional: Arc::new(std::sync::Mutex::new(FormValues::new())),
            fail_update: Arc::new(AtomicBool::new(false)),
            fail_upload: Arc::new(AtomicBool::new(false)),
            fail_additional: Arc::new(AtomicBool::new(false)),
            update_gate: None,
        }
    }

    /// Answer additional_data() with `pairs`
    pub fn with_additional_data(self, pairs: &[(&str, &str)]) -> Self {
        *self.additional.lock().unwrap() = form(pairs);
        self
    }

    /// Hold every update() until `gate` is notified
    pub fn with_update_gate(mut self, gate: Arc<Notify>) -> Self {
        self.update_gate = Some(gate);
        self
    }

    pub fn set_fail_update(&self, fail: bool) {
        self.fail_update.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_upload(&self, fail: bool) {
        self.fail_upload.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_additional(&self, fail: bool) {
        self.fail_additional.store(fail, Ordering::SeqCst);
    }

    /// Get the number of times update() was called
    pub fn update_call_count(&self) -> usize {
        self.update_call_count.load(Ordering::SeqCst)
    }

    /// Get the number of times complete_profile() was called
    pub fn upload_call_count(&self) -> usize {
        self.upload_call_count.load(Ordering::SeqCst)
    }

    /// All calls received so far
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Payloads passed to update(), in order
    pub fn updates(&self) -> Vec<ProfileUpdatePayload> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                StoreCall::Update(payload) => Some(payload),
                _ => None,
            })
            .collect()
    }

    /// Create a new MockProfileStore that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            calls: Arc::clone(&other.calls),
            update_call_count: Arc::clone(&other.update_call_count),
            upload_call_count: Arc::clone(&other.upload_call_count),
            additional: Arc::clone(&other.additional),
            fail_update: Arc::clone(&other.fail_update),
            fail_upload: Arc::clone(&other.fail_upload),
            fail_additional: Arc::clone(&other.fail_additional),
            update_gate: other.update_gate.clone(),
        }
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl ProfileStore for MockProfileStore {
    async fn update(&self, payload: &ProfileUpdatePayload) -> Result<()> {
        self.update_call_count.fetch_add(1, Ordering::SeqCst);
        self.record(StoreCall::Update(payload.clone()));

        if let Some(gate) = &self.update_gate {
            gate.notified().await;
        }

        if self.fail_update.load(Ordering::SeqCst) {
            return Err(Error::Other("update rejected".to_string()));
        }
        Ok(())
    }

    async fn complete_profile(&self, form: &FormPayload) -> Result<()> {
        self.upload_call_count.fetch_add(1, Ordering::SeqCst);
        self.record(StoreCall::CompleteProfile(form.clone()));

        if self.fail_upload.load(Ordering::SeqCst) {
            return Err(Error::Other("upload rejected".to_string()));
        }
        Ok(())
    }

    async fn additional_data(&self) -> Result<FormValues> {
        self.record(StoreCall::AdditionalData);

        if self.fail_additional.load(Ordering::SeqCst) {
            return Err(Error::Other("profile unavailable".to_string()));
        }
        Ok(self.additional.lock().unwrap().clone())
    }

    fn store_name(&self) -> &'static str {
        "mock"
    }
}

/// A NotificationSink that keeps every notification
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    notifications: Arc<std::sync::Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn kinds(&self) -> Vec<NotificationKind> {
        self.notifications().into_iter().map(|n| n.kind).collect()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

/// A FileInput that counts clears and picker opens
#[derive(Clone, Default)]
pub struct RecordingFileInput {
    clear_count: Arc<AtomicUsize>,
    open_count: Arc<AtomicUsize>,
}

impl RecordingFileInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_count(&self) -> usize {
        self.clear_count.load(Ordering::SeqCst)
    }

    pub fn open_count(&self) -> usize {
        self.open_count.load(Ordering::SeqCst)
    }
}

impl FileInput for RecordingFileInput {
    fn clear(&self) {
        self.clear_count.fetch_add(1, Ordering::SeqCst);
    }

    fn open_picker(&self) {
        self.open_count.fetch_add(1, Ordering::SeqCst);
    }
}

/// A PreviewReader that always fails
pub struct FailingPreviewReader;

#[async_trait::async_trait]
impl PreviewReader for FailingPreviewReader {
    async fn read_preview(&self, image: &ImageAttachment) -> Result<Preview> {
        Err(Error::preview(format!("cannot decode {}", image.filename())))
    }
}

/// Build form values from pairs
pub fn form(pairs: &[(&str, &str)]) -> FormValues {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Controller over `store` and `notifier` with the default configuration
pub fn controller(
    store: MockProfileStore,
    notifier: RecordingNotifier,
) -> (ProfileEditController, mpsc::Receiver<ControllerEvent>) {
    ProfileEditController::new(Box::new(store), Box::new(notifier), ProfileConfig::default())
        .expect("controller construction succeeds")
}

/// Everything currently queued on the event channel
pub fn drain_events(rx: &mut mpsc::Receiver<ControllerEvent>) -> Vec<ControllerEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
