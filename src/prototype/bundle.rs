use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::content::path::normalize;
use crate::content::{ContentRepository, PROTOTYPES_DIR, PROTOTYPE_INDEX};
use crate::error::{AppError, Result};
use crate::models::EntryKind;
use crate::prototype::inline::inline_assets;

/// One prototype folder read into memory for a single render.
#[derive(Debug, Clone, Default)]
pub struct PrototypeBundle {
    pub document: String,
    /// Sibling file name → text content
    pub assets: BTreeMap<String, String>,
}

impl PrototypeBundle {
    /// Read `prototypes/<name>/index.html` and every readable text file next
    /// to it. A missing folder or root document is `NotFound`; an unreadable
    /// or binary sibling is skipped.
    pub async fn load(repo: &ContentRepository, name: &str) -> Result<Self> {
        let segments = normalize(name)?;
        if segments.len() != 1 || segments[0] != name {
            return Err(AppError::InvalidPath(format!("{} is not a prototype name", name)));
        }

        let dir = format!("{}/{}", PROTOTYPES_DIR, name);
        let entries = repo.list(&dir).await?;

        let index_path = format!("{}/{}", dir, PROTOTYPE_INDEX);
        let document = match repo.read(&index_path).await {
            Ok(bytes) => String::from_utf8(bytes).map_err(|_| AppError::NotText(index_path.clone()))?,
            Err(AppError::IsADirectory(_)) => return Err(AppError::NotFound(index_path)),
            Err(e) => return Err(e),
        };

        let mut assets = BTreeMap::new();
        for entry in entries {
            if entry.kind != EntryKind::File || entry.name == PROTOTYPE_INDEX {
                continue;
            }
            match repo.read(&entry.path).await {
                Ok(bytes) => match String::from_utf8(bytes) {
                    Ok(text) => {
                        assets.insert(entry.name, text);
                    }
                    Err(_) => warn!("Skipping non-text asset {}", entry.path),
                },
                Err(e) => warn!("Could not read asset {}: {}", entry.path, e),
            }
        }

        debug!("Loaded prototype {} with {} assets", name, assets.len());
        Ok(Self { document, assets })
    }

    /// The self-contained page for this bundle.
    pub fn render(&self) -> String {
        inline_assets(&self.document, &self.assets)
    }
}
