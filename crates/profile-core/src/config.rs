//! Configuration types for the profile editing core
//!
//! This module defines all configuration structures used throughout the crate.

use serde::{Deserialize, Serialize};

/// Upload limit for the national-ID image: images of this size or larger are invalid
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 2_097_152;

/// Main profile editing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Exclusive upper bound for the national-ID image size in bytes
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,

    /// Separator between first and last name in the derived display name
    #[serde(default = "default_display_name_separator")]
    pub display_name_separator: String,

    /// Minimum age used to bound the birth-date picker
    #[serde(default = "default_minimum_age_years")]
    pub minimum_age_years: u32,

    /// Capacity of the controller event channel
    ///
    /// When full, new events are dropped (with a warning log).
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,

    /// Notification texts and styling
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Dialog presentation parameters
    #[serde(default)]
    pub dialogs: DialogConfig,

    /// Navbar/footer visibility of the hosting page
    #[serde(default)]
    pub chrome: PageChrome,
}

impl ProfileConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            max_image_bytes: default_max_image_bytes(),
            display_name_separator: default_display_name_separator(),
            minimum_age_years: default_minimum_age_years(),
            event_channel_capacity: default_event_channel_capacity(),
            notifications: NotificationConfig::default(),
            dialogs: DialogConfig::default(),
            chrome: PageChrome::default(),
        }
    }

    /// Set the image size limit
    pub fn with_max_image_bytes(mut self, max_image_bytes: usize) -> Self {
        self.max_image_bytes = max_image_bytes;
        self
    }

    /// Set the page chrome
    pub fn with_chrome(mut self, chrome: PageChrome) -> Self {
        self.chrome = chrome;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.max_image_bytes == 0 {
            return Err(crate::Error::config("max_image_bytes must be > 0"));
        }

        if self.event_channel_capacity == 0 {
            return Err(crate::Error::config("event_channel_capacity must be > 0"));
        }

        self.notifications.validate()?;
        self.dialogs.validate()?;

        Ok(())
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Notification texts and styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Message shown after a successful save
    #[serde(default = "default_success_message")]
    pub success_message: String,

    /// Message shown after a failed save
    #[serde(default = "default_failure_message")]
    pub failure_message: String,

    /// Panel class for success notifications
    #[serde(default = "default_success_panel_class")]
    pub success_panel_class: String,

    /// Panel class for failure notifications
    #[serde(default = "default_failure_panel_class")]
    pub failure_panel_class: String,

    /// How long a notification stays visible, in milliseconds
    #[serde(default = "default_notification_duration_ms")]
    pub duration_ms: u64,
}

impl NotificationConfig {
    fn validate(&self) -> Result<(), crate::Error> {
        if self.success_message.trim().is_empty() {
            return Err(crate::Error::config("success_message cannot be empty"));
        }
        if self.failure_message.trim().is_empty() {
            return Err(crate::Error::config("failure_message cannot be empty"));
        }
        if self.duration_ms == 0 {
            return Err(crate::Error::config("notification duration must be > 0"));
        }
        Ok(())
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            success_message: default_success_message(),
            failure_message: default_failure_message(),
            success_panel_class: default_success_panel_class(),
            failure_panel_class: default_failure_panel_class(),
            duration_ms: default_notification_duration_ms(),
        }
    }
}

/// Size of a modal dialog, in CSS length units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogSize {
    /// Dialog width (e.g. "58rem")
    pub width: String,
    /// Dialog height (e.g. "39rem")
    pub height: String,
}

impl DialogSize {
    /// Create a dialog size
    pub fn new(width: impl Into<String>, height: impl Into<String>) -> Self {
        Self {
            width: width.into(),
            height: height.into(),
        }
    }
}

/// Dialog presentation parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogConfig {
    /// Panel class applied to every dialog
    #[serde(default = "default_dialog_panel_class")]
    pub panel_class: String,

    /// Whether dialogs grab focus when opened
    #[serde(default)]
    pub auto_focus: bool,

    /// Logout confirmation size
    #[serde(default = "default_logout_size")]
    pub logout: DialogSize,

    /// Change-password dialog size
    #[serde(default = "default_change_password_size")]
    pub change_password: DialogSize,
}

impl DialogConfig {
    fn validate(&self) -> Result<(), crate::Error> {
        for (name, size) in [
            ("logout", &self.logout),
            ("change_password", &self.change_password),
        ] {
            if size.width.is_empty() || size.height.is_empty() {
                return Err(crate::Error::config(format!(
                    "{name} dialog size cannot be empty"
                )));
            }
        }
        Ok(())
    }
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            panel_class: default_dialog_panel_class(),
            auto_focus: false,
            logout: default_logout_size(),
            change_password: default_change_password_size(),
        }
    }
}

/// Navbar/footer visibility of the page hosting the profile screen
///
/// Fixed when the page is composed; nothing mutates it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageChrome {
    /// Whether the navigation bar is shown
    #[serde(default = "default_visible")]
    pub navbar_visible: bool,

    /// Whether the footer is shown
    #[serde(default = "default_visible")]
    pub footer_visible: bool,
}

impl Default for PageChrome {
    fn default() -> Self {
        Self {
            navbar_visible: true,
            footer_visible: true,
        }
    }
}

fn default_max_image_bytes() -> usize {
    DEFAULT_MAX_IMAGE_BYTES
}

fn default_display_name_separator() -> String {
    "  ".to_string()
}

fn default_minimum_age_years() -> u32 {
    18
}

fn default_event_channel_capacity() -> usize {
    100
}

fn default_success_message() -> String {
    "تم حفظ التعديلات بنجاح".to_string()
}

fn default_failure_message() -> String {
    "تعذر حفظ التعديلات، حاول مرة أخرى".to_string()
}

fn default_success_panel_class() -> String {
    "success-snackbar".to_string()
}

fn default_failure_panel_class() -> String {
    "error-snackbar".to_string()
}

fn default_notification_duration_ms() -> u64 {
    1500
}

fn default_dialog_panel_class() -> String {
    "white-dialog".to_string()
}

fn default_logout_size() -> DialogSize {
    DialogSize::new("58rem", "39rem")
}

fn default_change_password_size() -> DialogSize {
    DialogSize::new("82rem", "68rem")
}

fn default_visible() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ProfileConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_image_bytes, 2_097_152);
        assert_eq!(config.display_name_separator, "  ");
        assert_eq!(config.notifications.duration_ms, 1500);
        assert_eq!(config.dialogs.logout, DialogSize::new("58rem", "39rem"));
        assert!(!config.dialogs.auto_focus);
    }

    #[test]
    fn empty_json_falls_back_to_defaults() {
        let config: ProfileConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ProfileConfig::default());
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let config: ProfileConfig = serde_json::from_str(
            r#"{"max_image_bytes": 1024, "chrome": {"footer_visible": false}}"#,
        )
        .unwrap();
        assert_eq!(config.max_image_bytes, 1024);
        assert!(config.chrome.navbar_visible);
        assert!(!config.chrome.footer_visible);
        assert_eq!(config.notifications, NotificationConfig::default());
    }

    #[test]
    fn zero_limits_are_rejected() {
        assert!(ProfileConfig::new().with_max_image_bytes(0).validate().is_err());

        let mut config = ProfileConfig::new();
        config.event_channel_capacity = 0;
        assert!(config.validate().is_err());

        let mut config = ProfileConfig::new();
        config.dialogs.logout.width.clear();
        assert!(config.validate().is_err());
    }
}
