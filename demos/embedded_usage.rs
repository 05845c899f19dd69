//! Minimal embedding example for profile-core
//!
//! Drives a profile page the way a host UI would: switch tabs, edit, attach
//! an image, submit. The presentation layer is replaced by console output.
//!
//! Environment:
//! - `PROFILE_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
//! - `PROFILE_MAX_IMAGE_BYTES`: image size limit (default: 2 MiB)

use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use profile_core::payload::NID_IMAGE_FIELD;
use profile_core::traits::{DialogRequest, ProfileStore};
use profile_core::{
    DialogHost, FileInput, FormValues, MemoryProfileStore, Notification, NotificationSink,
    ProfileConfig, ProfileEditController, ProfilePage, ProfileTab, nid,
};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// Prints notifications instead of showing a snackbar
struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        println!(
            "[Notification:{}] {} ({} ms)",
            notification.panel_class,
            notification.message,
            notification.duration.as_millis()
        );
    }
}

/// Prints dialog requests instead of opening a modal
struct ConsoleDialogs;

impl DialogHost for ConsoleDialogs {
    fn open(&self, request: DialogRequest) {
        println!(
            "[Dialog] {:?} {}x{} ({})",
            request.kind, request.size.width, request.size.height, request.panel_class
        );
    }
}

/// Stands in for the `<input type="file">` element
struct ConsoleFileInput;

impl FileInput for ConsoleFileInput {
    fn clear(&self) {
        println!("[FileInput] cleared");
    }

    fn open_picker(&self) {
        println!("[FileInput] picker opened");
    }
}

fn form(pairs: &[(&str, &str)]) -> FormValues {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn init_tracing() -> Result<()> {
    let log_level = match env::var("PROFILE_LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

fn load_config() -> Result<ProfileConfig> {
    let mut config = ProfileConfig::new();
    if let Ok(raw) = env::var("PROFILE_MAX_IMAGE_BYTES") {
        let limit = raw
            .parse()
            .with_context(|| format!("PROFILE_MAX_IMAGE_BYTES must be a byte count, got '{raw}'"))?;
        config = config.with_max_image_bytes(limit);
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;
    let config = load_config()?;

    println!("=== Embedded profile-core Example ===\n");

    for id in ["1012345672", "1012345679", "30123"] {
        println!("National ID {id}: valid = {}", nid::validate(id));
    }

    // The host keeps a handle on the store to inspect it afterwards
    let store = MemoryProfileStore::with_additional_data(form(&[(NID_IMAGE_FIELD, "nid-2024.png")]));

    println!("\n1. Composing page...");
    let (controller, event_rx) =
        ProfileEditController::new(Box::new(store.clone()), Box::new(ConsoleNotifier), config)?;
    let controller = Arc::new(controller.with_file_input(Box::new(ConsoleFileInput)));
    let page = ProfilePage::new(Arc::clone(&controller), Box::new(ConsoleDialogs));

    let event_listener = tokio::spawn(async move {
        let mut events = ReceiverStream::new(event_rx);
        while let Some(event) = events.next().await {
            println!("[Event] {:?}", event);
        }
    });

    println!("\n2. Personal tab");
    controller.toggle_edit();
    controller
        .submit_personal(form(&[
            ("firstName", "Ali"),
            ("lastName", "Hassan"),
            ("nid", "1012345672"),
        ]))
        .await?;

    println!("\n3. Contact tab with an oversized image");
    controller.switch_tab(ProfileTab::Contact);
    controller.toggle_edit();
    page.trigger_image_picker();
    let limit = controller.config().max_image_bytes;
    controller.attach_image(vec![0u8; limit + 1], "scan.jpg")?;
    if let Err(e) = controller.submit_contact(form(&[("phone", "0555")])).await {
        info!("Submit refused as expected: {}", e);
    }

    println!("\n4. Replacing the image and retrying");
    controller.remove_image();
    let request = controller.attach_image(vec![0x89, b'P', b'N', b'G'], "nid.png")?;
    controller.load_preview(request).await;
    controller.submit_contact(form(&[("phone", "0555")])).await?;

    println!("\n5. Account tab dialogs");
    controller.switch_tab(ProfileTab::Account);
    page.open_change_password_dialog();
    page.open_logout_dialog();

    println!("\n6. Stored profile:");
    println!("   username: {:?}", store.username().await);
    println!(
        "{}",
        serde_json::to_string_pretty(&store.additional_data().await?)?
    );

    drop(page);
    drop(controller);
    let _ = tokio::time::timeout(std::time::Duration::from_millis(100), event_listener).await;

    println!("\n=== Embedding Successful ===");
    Ok(())
}
