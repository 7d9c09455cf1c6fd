//! Hub metadata and rendering DTOs.
//!
//! - `HubInfo`: Content root and the conventional folder names (sidebar)
//! - `RenderedDocument`: Markdown rendered to HTML (document view)

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct HubInfo {
    pub content_root: String,
    pub documents_dir: String,
    pub prototypes_dir: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedDocument {
    pub path: String,
    pub html: String,
    pub modified: DateTime<Utc>,
}
