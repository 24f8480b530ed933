//! Browser that records effects for the front-end shell

use std::sync::Mutex;

use crate::domain::browser::{Browser, Navigation, ShellEffects};

#[derive(Debug)]
struct Inner {
    current_path: String,
    pending: ShellEffects,
}

/// Queues navigations and alerts until [`RecordingBrowser::drain`] is called.
/// A navigation also moves the tracked location.
#[derive(Debug)]
pub struct RecordingBrowser {
    inner: Mutex<Inner>,
}

impl Default for RecordingBrowser {
    fn default() -> Self {
        Self::new("/")
    }
}

impl RecordingBrowser {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                current_path: path.into(),
                pending: ShellEffects::default(),
            }),
        }
    }

    /// The shell reported its location
    pub fn set_current_path(&self, path: impl Into<String>) {
        self.lock().current_path = path.into();
    }

    /// Take everything recorded so far
    pub fn drain(&self) -> ShellEffects {
        std::mem::take(&mut self.lock().pending)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Browser for RecordingBrowser {
    fn navigate(&self, navigation: Navigation) {
        tracing::debug!(to = %navigation.to, replace = navigation.replace, "Navigate");
        let mut inner = self.lock();
        inner.current_path = navigation.to.clone();
        inner.pending.navigations.push(navigation);
    }

    fn alert(&self, message: &str) {
        tracing::debug!(message, "Alert");
        self.lock().pending.alerts.push(message.to_string());
    }

    fn current_path(&self) -> String {
        self.lock().current_path.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_and_drains() {
        let browser = RecordingBrowser::new("/profile");
        browser.alert("Please log in to access this page.");
        browser.navigate(Navigation::push("/login"));

        assert_eq!(browser.current_path(), "/login");

        let effects = browser.drain();
        assert_eq!(effects.alerts, vec!["Please log in to access this page."]);
        assert_eq!(effects.navigations, vec![Navigation::push("/login")]);
        assert!(browser.drain().is_empty());
    }

    #[test]
    fn test_effects_json_shape() {
        let browser = RecordingBrowser::default();
        browser.navigate(Navigation::replace("/admin-login").from_location("/AdUplink"));

        let json = serde_json::to_value(browser.drain()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "navigations": [{ "to": "/admin-login", "replace": true, "from": "/AdUplink" }],
                "alerts": []
            })
        );
    }
}
