use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Portal audience derived from an email address (or from an admin login)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[display("Student")]
    Student,
    #[display("Staff")]
    Staff,
    #[display("Admin")]
    Admin,
    #[default]
    #[display("Unknown")]
    Unknown,
}

impl UserType {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserType::*;
        match self {
            Student => "student",
            Staff => "staff",
            Admin => "admin",
            Unknown => "unknown",
        }
    }

    /// Parse a lowercase code; anything unrecognised is `Unknown`
    pub fn from_code(code: &str) -> Self {
        use UserType::*;
        match code.trim().to_ascii_lowercase().as_str() {
            "student" => Student,
            "staff" => Staff,
            "admin" => Admin,
            _ => Unknown,
        }
    }

    /// View a signed-in user of this type lands on
    pub const fn landing_path(&self) -> &'static str {
        use UserType::*;
        match self {
            Student => "/student-dash",
            Staff => "/staff-dash",
            Admin => "/admin-dashboard",
            Unknown => "/home",
        }
    }

    #[inline]
    pub const fn is_known(&self) -> bool {
        !matches!(self, UserType::Unknown)
    }
}
