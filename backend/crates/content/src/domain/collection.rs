//! CMS collection names

use std::fmt;
use std::str::FromStr;

use crate::error::ContentError;

/// Collections the dashboards read
pub mod known {
    pub const POSTS: &str = "posts";
    pub const CODINGS: &str = "codings";
    pub const ARTICLES: &str = "articles";
    pub const TOOLS: &str = "tools";
}

const MAX_LEN: usize = 64;

/// A CMS collection slug (`posts`, `text-and-contents`, `Chatgpts`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionName(String);

impl CollectionName {
    /// Known-good name; no validation
    pub(crate) fn known(name: &'static str) -> Self {
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CollectionName {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = !s.is_empty()
            && s.len() <= MAX_LEN
            && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(ContentError::InvalidCollection(s.to_string()))
        }
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_slugs() {
        for name in ["posts", "text-and-contents", "Chatgpts", "ai_tools2"] {
            assert_eq!(name.parse::<CollectionName>().unwrap().as_str(), name);
        }
    }

    #[test]
    fn test_rejects_paths_and_queries() {
        for name in ["", "users/me", "../auth", "posts?x=1", "p%2Fx"] {
            assert!(name.parse::<CollectionName>().is_err(), "{name}");
        }
        assert!("a".repeat(65).parse::<CollectionName>().is_err());
    }
}
