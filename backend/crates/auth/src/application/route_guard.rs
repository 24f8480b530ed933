//! Generic authenticated route guard
//!
//! Authorized iff an admin token is stored, or a stored identity passes the
//! domain policy. An unauthorized visitor gets one notice and is sent to
//! `/login`; the notice flag lives as long as the mounted guard.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::browser::{Browser, Navigation};
use crate::domain::domain_policy::DomainPolicy;
use crate::domain::session_store::SessionRepository;

pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to access this page.";
pub const INVALID_DOMAIN_MESSAGE: &str = "Access Denied: You must log in with a valid MFU email.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GuardState {
    Checking,
    Authorized,
    Unauthorized,
}

/// Why a tab is or is not allowed through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Authorized,
    /// Neither an identity nor an admin token
    Missing,
    /// Identity present but its email is not allowed
    Disallowed,
}

impl Authorization {
    /// Evaluate the stored records
    pub fn evaluate(repo: &SessionRepository, policy: &DomainPolicy) -> Self {
        let identity = repo.identity();
        let has_admin_token = repo.has_admin_token();

        if has_admin_token {
            return Authorization::Authorized;
        }
        match identity {
            None => Authorization::Missing,
            Some(identity) if policy.is_email_allowed(&identity.email) => Authorization::Authorized,
            Some(_) => Authorization::Disallowed,
        }
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self, Authorization::Authorized)
    }

    /// Notice shown to an unauthorized visitor
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Authorization::Authorized => None,
            Authorization::Missing => Some(LOGIN_REQUIRED_MESSAGE),
            Authorization::Disallowed => Some(INVALID_DOMAIN_MESSAGE),
        }
    }
}

/// A mounted generic guard. Dropping it is the unmount.
pub struct RouteGuard {
    repo: SessionRepository,
    policy: Arc<DomainPolicy>,
    browser: Arc<dyn Browser>,
    state: GuardState,
    notice_shown: bool,
}

impl RouteGuard {
    pub fn mount(
        repo: SessionRepository,
        policy: Arc<DomainPolicy>,
        browser: Arc<dyn Browser>,
    ) -> Self {
        Self {
            repo,
            policy,
            browser,
            state: GuardState::Checking,
            notice_shown: false,
        }
    }

    /// Validate on mount or path change. Suspended entirely while logging out.
    pub fn check(&mut self, logging_out: bool) -> GuardState {
        if logging_out {
            return self.state;
        }

        let authorization = Authorization::evaluate(&self.repo, &self.policy);
        if let Some(notice) = authorization.notice() {
            if !self.notice_shown {
                self.notice_shown = true;
                self.browser.alert(notice);
                self.browser.navigate(Navigation::push("/login"));
            }
            self.state = GuardState::Unauthorized;
        } else {
            self.state = GuardState::Authorized;
        }
        self.state
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Render contract: wrapped content iff the stored records authorize it now
    pub fn renders_content(&self) -> bool {
        Authorization::evaluate(&self.repo, &self.policy).is_authorized()
    }
}
