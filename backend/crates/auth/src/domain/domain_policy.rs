//! Domain Policy
//!
//! Classifies email addresses by ordered suffix rules. The first matching rule
//! wins, so a more specific suffix must be listed before a broader one.

use kernel::error::app_error::{AppError, AppResult};

use crate::domain::user_type::UserType;

/// Student mailboxes
pub const STUDENT_SUFFIX: &str = "@lamduan.mfu.ac.th";
/// Staff mailboxes
pub const STAFF_SUFFIX: &str = "@mfu.ac.th";

/// What a rule compares against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainMatch {
    /// `email.ends_with(suffix)`, case-sensitive
    Suffix(String),
    /// One whole address, compared case-insensitively
    Exact(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRule {
    pub pattern: DomainMatch,
    pub user_type: UserType,
}

impl DomainRule {
    pub fn suffix(suffix: impl Into<String>, user_type: UserType) -> Self {
        Self {
            pattern: DomainMatch::Suffix(suffix.into()),
            user_type,
        }
    }

    pub fn exact(email: impl Into<String>, user_type: UserType) -> Self {
        Self {
            pattern: DomainMatch::Exact(email.into().trim().to_ascii_lowercase()),
            user_type,
        }
    }

    fn matches(&self, email: &str) -> bool {
        match &self.pattern {
            DomainMatch::Suffix(suffix) => email.ends_with(suffix.as_str()),
            DomainMatch::Exact(address) => email.trim().eq_ignore_ascii_case(address),
        }
    }

    /// Parse `email=type,email=type` into exact-address rules
    pub fn parse_exceptions(raw: &str) -> AppResult<Vec<DomainRule>> {
        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let (email, code) = entry.split_once('=').ok_or_else(|| {
                    AppError::bad_request(format!("Exception '{entry}' must look like email=type"))
                })?;
                let user_type = UserType::from_code(code);
                if !matches!(user_type, UserType::Student | UserType::Staff) {
                    return Err(AppError::bad_request(format!(
                        "Exception '{entry}' must map to student or staff"
                    )));
                }
                if !email.contains('@') {
                    return Err(AppError::bad_request(format!(
                        "Exception '{entry}' is not an email address"
                    )));
                }
                Ok(DomainRule::exact(email, user_type))
            })
            .collect()
    }
}

/// Ordered allow-list of email rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainPolicy {
    rules: Vec<DomainRule>,
}

impl Default for DomainPolicy {
    fn default() -> Self {
        Self::new(vec![
            DomainRule::suffix(STUDENT_SUFFIX, UserType::Student),
            DomainRule::suffix(STAFF_SUFFIX, UserType::Staff),
        ])
    }
}

impl DomainPolicy {
    pub fn new(rules: Vec<DomainRule>) -> Self {
        Self { rules }
    }

    /// Append rules after the existing ones
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = DomainRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn rules(&self) -> &[DomainRule] {
        &self.rules
    }

    pub fn is_email_allowed(&self, email: &str) -> bool {
        !email.is_empty() && self.rules.iter().any(|rule| rule.matches(email))
    }

    /// First matching rule's type, `Unknown` otherwise
    pub fn user_type(&self, email: &str) -> UserType {
        if email.is_empty() {
            return UserType::Unknown;
        }
        self.rules
            .iter()
            .find(|rule| rule.matches(email))
            .map(|rule| rule.user_type)
            .unwrap_or(UserType::Unknown)
    }

    /// Alert shown when an OAuth login uses a mailbox outside the allow-list
    pub fn denial_message(&self) -> String {
        let suffixes: Vec<&str> = self
            .rules
            .iter()
            .filter_map(|rule| match &rule.pattern {
                DomainMatch::Suffix(suffix) => Some(suffix.as_str()),
                DomainMatch::Exact(_) => None,
            })
            .collect();
        format!(
            "Access Denied: Only {} emails can log in.",
            suffixes.join(" or ")
        )
    }
}
