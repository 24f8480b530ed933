//! Application Configuration
//!
//! Configuration for the portal session layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::lockout::LockoutPolicy;

use crate::domain::domain_policy::DomainPolicy;
use crate::infra::strapi::DEFAULT_CMS_BASE_URL;

/// Portal session configuration
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Tab cookie settings (browser-session cookie, no Max-Age)
    pub tab_cookie: CookieConfig,
    /// HMAC key for the tab cookie (32 bytes)
    pub tab_secret: [u8; 32],
    /// Tabs untouched for this long are dropped
    pub tab_idle_ttl: Duration,
    /// Email classification rules
    pub domain_policy: DomainPolicy,
    /// Admin token revalidation period while an admin view is mounted
    pub token_check_interval: Duration,
    /// How long the logging-out flag stays raised
    pub logout_grace: Duration,
    /// Delay before navigating to the admin dashboard after login
    pub admin_redirect_delay: Duration,
    /// Admin login attempt lockout
    pub lockout: LockoutPolicy,
    /// Identity provider base URL (`/users/me`, `/auth/local`)
    pub cms_base_url: String,
    /// Expected `aud` of Google ID tokens, if checked
    pub google_client_id: Option<String>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            tab_cookie: CookieConfig::default(),
            tab_secret: [0u8; 32],
            tab_idle_ttl: Duration::from_secs(12 * 3600), // 12 hours
            domain_policy: DomainPolicy::default(),
            token_check_interval: Duration::from_secs(5 * 60), // 5 minutes
            logout_grace: Duration::from_millis(500),
            admin_redirect_delay: Duration::from_millis(100),
            lockout: LockoutPolicy::default(),
            cms_base_url: DEFAULT_CMS_BASE_URL.to_string(),
            google_client_id: None,
        }
    }
}

impl PortalConfig {
    /// Create config with a random tab secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            tab_secret: platform::crypto::random_secret(),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            tab_cookie: CookieConfig::development(),
            ..Self::with_random_secret()
        }
    }

    /// Idle TTL in milliseconds
    pub fn tab_idle_ttl_ms(&self) -> i64 {
        self.tab_idle_ttl.as_millis() as i64
    }
}
