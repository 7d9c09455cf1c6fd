//! Content browsing DTOs.
//!
//! - `ContentEntry`: One file or directory under the content root
//! - `FilesResponse`: Directory listing or file content, tagged by `type`
//! - `CreateRequest` / `UpdateRequest`: Mutation bodies
//! - `MutationResponse`: Success marker for mutations
//!
//! Used by: documents and prototypes list views, file browser, editor

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub size: u64,
    pub modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FilesResponse {
    Directory { items: Vec<ContentEntry> },
    File { content: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequest {
    #[serde(default)]
    pub path: String,
    pub content: Option<String>,
    #[serde(default, rename = "isDirectory")]
    pub is_directory: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRequest {
    #[serde(default)]
    pub path: String,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MutationResponse {
    pub success: bool,
    pub message: String,
}

impl MutationResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
