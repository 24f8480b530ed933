//! Application Configuration
//!
//! Configuration for the content application layer.

use std::time::Duration;

pub use auth::infra::strapi::DEFAULT_CMS_BASE_URL;

pub const DEFAULT_BLOG_BASE_URL: &str = "https://ai.mfu.ac.th/wp-json/wp/v2";

/// Content application configuration
#[derive(Debug, Clone)]
pub struct ContentConfig {
    /// Headless CMS REST base URL
    pub cms_base_url: String,
    /// Blog engine REST base URL
    pub blog_base_url: String,
    /// Every outbound content call is aborted after this long
    pub request_timeout: Duration,
    /// Entries kept in the "recent" dashboard slices
    pub recent_limit: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            cms_base_url: DEFAULT_CMS_BASE_URL.to_string(),
            blog_base_url: DEFAULT_BLOG_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            recent_limit: 5,
        }
    }
}
