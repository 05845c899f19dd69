//! Notification sink
//!
//! Notifications are fire-and-forget: the controller never waits on or
//! inspects what the sink does with them.

use std::time::Duration;

use crate::config::NotificationConfig;

/// Outcome a notification reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// A save completed
    Success,
    /// A save failed or was refused
    Failure,
}

/// A transient notice shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Success or failure
    pub kind: NotificationKind,
    /// Text shown to the user
    pub message: String,
    /// Styling hook for the presentation layer
    pub panel_class: String,
    /// How long the notice stays visible
    pub duration: Duration,
}

impl Notification {
    /// Success notice styled from configuration
    pub fn success(config: &NotificationConfig) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: config.success_message.clone(),
            panel_class: config.success_panel_class.clone(),
            duration: Duration::from_millis(config.duration_ms),
        }
    }

    /// Failure notice styled from configuration
    pub fn failure(config: &NotificationConfig) -> Self {
        Self {
            kind: NotificationKind::Failure,
            message: config.failure_message.clone(),
            panel_class: config.failure_panel_class.clone(),
            duration: Duration::from_millis(config.duration_ms),
        }
    }
}

/// Receives notifications emitted by the controller
pub trait NotificationSink: Send + Sync {
    /// Show a notification
    fn notify(&self, notification: Notification);
}

/// Sink that writes notifications to the log
///
/// For hosts without a notification surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => tracing::info!("{}", notification.message),
            NotificationKind::Failure => tracing::warn!("{}", notification.message),
        }
    }
}
