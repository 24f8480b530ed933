//! Identity records kept in a tab's session store

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decoded OAuth identity plus whatever other claims the provider sent
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IdentityRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(flatten)]
    pub claims: Map<String, Value>,
}

impl IdentityRecord {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn claim(&self, key: &str) -> Option<&Value> {
        self.claims.get(key)
    }
}

/// Reduced admin user stored next to the admin bearer token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminProfile {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub role: String,
}

impl AdminProfile {
    pub const DEFAULT_ROLE: &'static str = "authenticated";

    /// Keep only id, username, email and the role type from an upstream user object
    pub fn from_upstream(user: &Value) -> Self {
        let text = |key: &str| {
            user.get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        let role = user
            .get("role")
            .and_then(|role| role.get("type"))
            .and_then(Value::as_str)
            .filter(|role| !role.is_empty())
            .unwrap_or(Self::DEFAULT_ROLE)
            .to_string();

        Self {
            id: user.get("id").cloned().unwrap_or(Value::Null),
            username: text("username"),
            email: text("email"),
            role,
        }
    }
}

/// Admin credentials as sent upstream
#[derive(Debug, Clone, Serialize)]
pub struct AdminCredentials {
    pub identifier: String,
    pub password: String,
    /// Epoch milliseconds at submission
    pub timestamp: i64,
}

/// Upstream answer to a credential login
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminGrant {
    #[serde(default)]
    pub jwt: Option<String>,
    #[serde(default)]
    pub user: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identity_keeps_extra_claims() {
        let raw = json!({
            "name": "Somchai",
            "email": "s@lamduan.mfu.ac.th",
            "picture": "https://lh3.example/p.png",
            "hd": "lamduan.mfu.ac.th",
            "email_verified": true
        });
        let record: IdentityRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.email, "s@lamduan.mfu.ac.th");
        assert_eq!(record.claim("hd"), Some(&json!("lamduan.mfu.ac.th")));

        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }

    #[test]
    fn test_identity_missing_email_defaults_empty() {
        let record: IdentityRecord = serde_json::from_value(json!({ "name": "x" })).unwrap();
        assert!(record.email.is_empty());
        assert!(record.picture.is_none());
    }

    #[test]
    fn test_admin_profile_strips_sensitive_fields() {
        let user = json!({
            "id": 7,
            "username": "editor",
            "email": "editor@mfu.ac.th",
            "provider": "local",
            "resetPasswordToken": "secret",
            "role": { "type": "admin", "name": "Admin" }
        });
        let profile = AdminProfile::from_upstream(&user);
        assert_eq!(profile.id, json!(7));
        assert_eq!(profile.role, "admin");

        let stored = serde_json::to_value(&profile).unwrap();
        assert_eq!(
            stored,
            json!({ "id": 7, "username": "editor", "email": "editor@mfu.ac.th", "role": "admin" })
        );
    }

    #[test]
    fn test_admin_profile_role_defaults() {
        let profile = AdminProfile::from_upstream(&json!({ "id": 1, "username": "u" }));
        assert_eq!(profile.role, AdminProfile::DEFAULT_ROLE);
    }
}
