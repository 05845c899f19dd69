// # Profile Store Trait
//
// Defines the interface to the service that persists the current user's
// profile.
//
// ## Implementations
//
// - In-memory: `store::MemoryProfileStore`
// - Hosting applications provide their own backed by whatever API they use
//
// ## Usage
//
// ```rust,ignore
// use profile_core::{ProfileStore, ProfileUpdatePayload};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let store = /* ProfileStore implementation */;
//
//     // Stored reference to the national-ID image
//     let data = store.additional_data().await?;
//     println!("nid_image: {:?}", data.get("nid_image"));
//
//     // Push an update
//     store.update(&ProfileUpdatePayload::default()).await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::payload::{FormPayload, FormValues, ProfileUpdatePayload};

/// Trait for profile store implementations
///
/// Every call is fallible. The controller branches on each result and never
/// treats a call as succeeded until it returns `Ok`.
///
/// # Contract
///
/// - A call performs exactly one request; retrying is the user's decision,
///   made by submitting again
/// - Implementations do not touch the edit session or notify the user
/// - Implementations must be usable across async tasks
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Update the current user's profile
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The update was accepted
    /// - `Err(Error)`: The store was unreachable or rejected the update
    async fn update(&self, payload: &ProfileUpdatePayload) -> Result<(), crate::Error>;

    /// Upload the national-ID image that completes the profile
    ///
    /// # Parameters
    ///
    /// - `form`: Form-encoded body with an `image` file part
    async fn complete_profile(&self, form: &FormPayload) -> Result<(), crate::Error>;

    /// The current user's stored additional data
    ///
    /// Read during personal-info submits to carry the stored `nid_image`
    /// reference forward unchanged.
    async fn additional_data(&self) -> Result<FormValues, crate::Error>;

    /// Get the store name (for logging/debugging)
    fn store_name(&self) -> &'static str;
}
