// # Memory Profile Store
//
// In-memory implementation of ProfileStore.
//
// ## Purpose
//
// Keeps the current user's profile in a map so the controller can be
// embedded and exercised without a backend: demos, previews, tests.
//
// ## Behavior
//
// - `update` merges submitted fields into the stored additional data and
//   records the display name, if any
// - `complete_profile` requires an `image` file part and stores its file name
//   as the `nid_image` reference
// - Nothing survives the process

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::Error;
use crate::payload::{FormPayload, FormValues, IMAGE_PART, NID_IMAGE_FIELD, ProfileUpdatePayload};
use crate::traits::profile_store::ProfileStore;

/// In-memory profile store implementation
///
/// Clones share the same profile, so a test or host can keep a handle while
/// the controller owns another.
///
/// # Example
///
/// ```rust,no_run
/// use profile_core::store::MemoryProfileStore;
/// use profile_core::traits::ProfileStore;
/// use profile_core::ProfileUpdatePayload;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = MemoryProfileStore::new();
///
///     let mut payload = ProfileUpdatePayload::default();
///     payload.fields.insert("phone".into(), "0555".into());
///     store.update(&payload).await?;
///
///     let data = store.additional_data().await?;
///     assert_eq!(data.get("phone").map(String::as_str), Some("0555"));
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    inner: Arc<RwLock<MemoryProfile>>,
}

#[derive(Debug, Default)]
struct MemoryProfile {
    username: Option<String>,
    additional_data: FormValues,
    uploads: Vec<FormPayload>,
}

impl MemoryProfileStore {
    /// Create a new empty memory profile store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store for a user who already has additional data
    pub fn with_additional_data(additional_data: FormValues) -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryProfile {
                additional_data,
                ..MemoryProfile::default()
            })),
        }
    }

    /// The stored display name
    pub async fn username(&self) -> Option<String> {
        self.inner.read().await.username.clone()
    }

    /// A single stored field
    pub async fn field(&self, name: &str) -> Option<String> {
        self.inner.read().await.additional_data.get(name).cloned()
    }

    /// Image uploads received, oldest first
    pub async fn uploads(&self) -> Vec<FormPayload> {
        self.inner.read().await.uploads.clone()
    }

    /// Forget everything
    pub async fn clear(&self) {
        let mut guard = self.inner.write().await;
        *guard = MemoryProfile::default();
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn update(&self, payload: &ProfileUpdatePayload) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        if let Some(name) = &payload.display_name {
            guard.username = Some(name.clone());
        }
        guard.additional_data.extend(
            payload
                .fields
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        tracing::debug!("Stored {} field(s)", payload.fields.len());
        Ok(())
    }

    async fn complete_profile(&self, form: &FormPayload) -> Result<(), Error> {
        let filename = form
            .filename(IMAGE_PART)
            .ok_or_else(|| Error::upload(format!("form has no `{IMAGE_PART}` file part")))?
            .to_string();

        let mut guard = self.inner.write().await;
        guard
            .additional_data
            .insert(NID_IMAGE_FIELD.to_string(), filename);
        guard.uploads.push(form.clone());
        Ok(())
    }

    async fn additional_data(&self) -> Result<FormValues, Error> {
        Ok(self.inner.read().await.additional_data.clone())
    }

    fn store_name(&self) -> &'static str {
        "memory"
    }
}
