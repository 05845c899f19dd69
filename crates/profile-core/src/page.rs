//! Profile page composition
//!
//! [`ProfilePage`] is the layer the presentation code talks to. It holds the
//! page chrome fixed at construction, the password visibility toggles and the
//! dialog openers, and hands edit-session work to the shared
//! [`ProfileEditController`]. The controller knows nothing about this layer.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::config::PageChrome;
use crate::controller::ProfileEditController;
use crate::traits::{DialogHost, DialogKind, DialogRequest};

/// Visibility of the three password fields on the account tab
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordVisibility {
    /// Current password shown in clear text
    pub show_old: bool,
    /// New password shown in clear text
    pub show_new: bool,
    /// Confirmation shown in clear text
    pub show_confirm: bool,
    /// Whether the update-password fields have been revealed
    pub update_password_shown: bool,
}

impl PasswordVisibility {
    /// Flip the current-password field, returning the new value
    pub fn toggle_old(&mut self) -> bool {
        self.show_old = !self.show_old;
        self.show_old
    }

    /// Flip the new-password field, returning the new value
    pub fn toggle_new(&mut self) -> bool {
        self.show_new = !self.show_new;
        self.show_new
    }

    /// Flip the confirmation field, returning the new value
    pub fn toggle_confirm(&mut self) -> bool {
        self.show_confirm = !self.show_confirm;
        self.show_confirm
    }

    /// Reveal the update-password fields (one way)
    pub fn reveal_update_password(&mut self) {
        self.update_password_shown = true;
    }
}

/// The profile page
pub struct ProfilePage {
    chrome: PageChrome,
    controller: Arc<ProfileEditController>,
    dialogs: Box<dyn DialogHost>,
    passwords: PasswordVisibility,
}

impl std::fmt::Debug for ProfilePage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfilePage")
            .field("chrome", &self.chrome)
            .field("controller", &self.controller)
            .field("passwords", &self.passwords)
            .finish_non_exhaustive()
    }
}

impl ProfilePage {
    /// Compose the page around a controller
    ///
    /// The chrome is taken from the controller's configuration and does not
    /// change for the lifetime of the page.
    pub fn new(controller: Arc<ProfileEditController>, dialogs: Box<dyn DialogHost>) -> Self {
        let chrome = controller.config().chrome;
        debug!(
            "Composing profile page (navbar: {}, footer: {})",
            chrome.navbar_visible, chrome.footer_visible
        );

        Self {
            chrome,
            controller,
            dialogs,
            passwords: PasswordVisibility::default(),
        }
    }

    /// Navbar/footer visibility
    pub fn chrome(&self) -> PageChrome {
        self.chrome
    }

    /// The shared edit controller
    pub fn controller(&self) -> &Arc<ProfileEditController> {
        &self.controller
    }

    /// Password field visibility
    pub fn passwords(&self) -> PasswordVisibility {
        self.passwords
    }

    /// Mutable password field visibility
    pub fn passwords_mut(&mut self) -> &mut PasswordVisibility {
        &mut self.passwords
    }

    /// Latest birth date the date picker accepts on `today`
    ///
    /// Counts whole 365-day years back, so leap days are not compensated.
    pub fn birth_date_limit(&self, today: NaiveDate) -> NaiveDate {
        let years = u64::from(self.controller.config().minimum_age_years);
        today
            .checked_sub_days(Days::new(years * 365))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Whether `birth_date` is selectable on `today`
    pub fn accepts_birth_date(&self, birth_date: NaiveDate, today: NaiveDate) -> bool {
        birth_date <= self.birth_date_limit(today)
    }

    /// Open the logout confirmation dialog
    pub fn open_logout_dialog(&self) {
        self.open_dialog(DialogKind::Logout);
    }

    /// Open the change-password dialog
    pub fn open_change_password_dialog(&self) {
        self.open_dialog(DialogKind::ChangePassword);
    }

    /// Open the file picker bound to the national-ID image
    pub fn trigger_image_picker(&self) {
        self.controller.open_image_picker();
    }

    fn open_dialog(&self, kind: DialogKind) {
        let request = DialogRequest::from_config(kind, &self.controller.config().dialogs);
        debug!("Opening {:?} dialog ({}x{})", kind, request.size.width, request.size.height);
        self.dialogs.open(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DialogSize, ProfileConfig};
    use crate::store::MemoryProfileStore;
    use crate::traits::notification::TracingNotificationSink;
    use std::sync::Mutex;

    #[derive(Default, Clone)]
    struct RecordingDialogs {
        opened: Arc<Mutex<Vec<DialogRequest>>>,
    }

    impl DialogHost for RecordingDialogs {
        fn open(&self, request: DialogRequest) {
            self.opened.lock().unwrap().push(request);
        }
    }

    fn page(config: ProfileConfig) -> (ProfilePage, RecordingDialogs) {
        let (controller, _events) = ProfileEditController::new(
            Box::new(MemoryProfileStore::new()),
            Box::new(TracingNotificationSink),
            config,
        )
        .unwrap();
        let dialogs = RecordingDialogs::default();
        let page = ProfilePage::new(Arc::new(controller), Box::new(dialogs.clone()));
        (page, dialogs)
    }

    #[test]
    fn chrome_comes_from_configuration() {
        let config = ProfileConfig::new().with_chrome(PageChrome {
            navbar_visible: true,
            footer_visible: false,
        });
        let (page, _) = page(config);
        assert!(page.chrome().navbar_visible);
        assert!(!page.chrome().footer_visible);
    }

    #[test]
    fn dialogs_use_configured_sizes() {
        let (page, dialogs) = page(ProfileConfig::default());
        page.open_logout_dialog();
        page.open_change_password_dialog();

        let opened = dialogs.opened.lock().unwrap().clone();
        assert_eq!(opened.len(), 2);
        assert_eq!(opened[0].kind, DialogKind::Logout);
        assert_eq!(opened[0].size, DialogSize::new("58rem", "39rem"));
        assert_eq!(opened[1].kind, DialogKind::ChangePassword);
        assert_eq!(opened[1].size, DialogSize::new("82rem", "68rem"));
        assert!(opened.iter().all(|d| d.panel_class == "white-dialog" && !d.auto_focus));
    }

    #[test]
    fn password_toggles_are_independent() {
        let (mut page, _) = page(ProfileConfig::default());
        assert!(page.passwords_mut().toggle_new());
        assert!(page.passwords_mut().toggle_confirm());
        assert!(!page.passwords_mut().toggle_new());

        let passwords = page.passwords();
        assert!(!passwords.show_old);
        assert!(!passwords.show_new);
        assert!(passwords.show_confirm);

        page.passwords_mut().reveal_update_password();
        page.passwords_mut().reveal_update_password();
        assert!(page.passwords().update_password_shown);
    }

    #[test]
    fn birth_date_limit_counts_365_day_years() {
        let (page, _) = page(ProfileConfig::default());
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        // 18 * 365 = 6570 days, four short of 18 calendar years (leap days).
        let limit = page.birth_date_limit(today);
        assert_eq!(limit, NaiveDate::from_ymd_opt(2008, 10, 23).unwrap());
        assert!(page.accepts_birth_date(limit, today));
        assert!(!page.accepts_birth_date(limit.succ_opt().unwrap(), today));
    }
}
