//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Collection entries
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub data: Vec<Value>,
}

/// Create request, shaped like the CMS's own `{ "data": { ... } }`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEntryRequest {
    pub data: Value,
}

/// Created entry as returned by the CMS
#[derive(Debug, Clone, Serialize)]
pub struct CreateEntryResponse {
    pub data: Value,
}
