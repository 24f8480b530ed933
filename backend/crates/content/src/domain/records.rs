//! Aggregated content handed to the dashboards

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Shared landing data; a section that failed to load is empty
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommonData {
    pub articles: Vec<Value>,
    pub tools: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentData {
    pub email: String,
    pub posts: Vec<Value>,
    pub codings: Vec<Value>,
    pub total_posts: usize,
    pub total_codings: usize,
    pub recent_posts: Vec<Value>,
    pub recent_codings: Vec<Value>,
    pub last_fetched: DateTime<Utc>,
}

impl StudentData {
    /// Totals and the first `recent` entries of each list
    pub fn new(
        email: impl Into<String>,
        posts: Vec<Value>,
        codings: Vec<Value>,
        recent: usize,
        last_fetched: DateTime<Utc>,
    ) -> Self {
        Self {
            email: email.into(),
            total_posts: posts.len(),
            total_codings: codings.len(),
            recent_posts: posts.iter().take(recent).cloned().collect(),
            recent_codings: codings.iter().take(recent).cloned().collect(),
            posts,
            codings,
            last_fetched,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffData {
    pub email: String,
    pub last_fetched: DateTime<Utc>,
}

/// Dashboard data for the signed-in audience
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum UserData {
    Student(StudentData),
    Staff(StaffData),
}

/// Blog category with its posts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogCategory {
    pub category: Value,
    pub posts: Vec<Value>,
}

impl BlogCategory {
    pub fn name(&self) -> Option<&str> {
        self.category.get("name").and_then(Value::as_str)
    }
}
