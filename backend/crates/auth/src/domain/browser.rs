//! Browser effects
//!
//! Navigation and blocking alerts are side effects on the user's tab. The
//! portal records them through [`Browser`] and hands them to the front-end
//! shell, which performs them.

use serde::Serialize;

/// One navigation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    pub to: String,
    /// Replace the current history entry instead of pushing
    pub replace: bool,
    /// Location the visitor was trying to reach
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl Navigation {
    pub fn push(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            replace: false,
            from: None,
        }
    }

    pub fn replace(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            replace: true,
            from: None,
        }
    }

    pub fn from_location(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }
}

/// Effects accumulated since the shell last collected them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellEffects {
    pub navigations: Vec<Navigation>,
    pub alerts: Vec<String>,
}

impl ShellEffects {
    pub fn is_empty(&self) -> bool {
        self.navigations.is_empty() && self.alerts.is_empty()
    }
}

/// A browser tab as seen by the session logic
pub trait Browser: Send + Sync {
    fn navigate(&self, navigation: Navigation);

    /// Blocking alert dialog
    fn alert(&self, message: &str);

    fn current_path(&self) -> String;
}
