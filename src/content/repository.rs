use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::UNIX_EPOCH;

use chrono::{DateTime, Utc};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::content::path::{resolve, ResolvedPath};
use crate::content::{DOCUMENTS_DIR, PROTOTYPES_DIR};
use crate::error::{AppError, Result};
use crate::models::{ContentEntry, EntryKind};

/// What `ContentRepository::create` should put at the target path.
#[derive(Debug, Clone, Copy)]
pub enum NewEntry<'a> {
    Directory,
    File(&'a [u8]),
}

/// Filesystem-backed store rooted at a single directory.
///
/// Holds no state besides the root; every call reflects the filesystem as it
/// is at call time. Concurrent writers to the same path are not serialized.
pub struct ContentRepository {
    root: PathBuf,
}

impl ContentRepository {
    /// Open (creating if needed) the content root and its conventional folders.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        std::fs::create_dir_all(root)?;
        let root = std::fs::canonicalize(root)?;

        for dir in [DOCUMENTS_DIR, PROTOTYPES_DIR] {
            std::fs::create_dir_all(root.join(dir))?;
        }

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<ResolvedPath> {
        resolve(&self.root, path)
    }

    /// List the immediate children of `dir` (empty string for the root).
    ///
    /// Entries come back in filesystem order; callers sort and filter.
    pub async fn list(&self, dir: &str) -> Result<Vec<ContentEntry>> {
        let target = self.resolve(dir)?;
        let meta = fs::metadata(&target.absolute)
            .await
            .map_err(|e| AppError::from_io(e, target.display()))?;
        if !meta.is_dir() {
            return Err(AppError::InvalidPath(format!("{} is not a directory", target.display())));
        }

        let mut read_dir = fs::read_dir(&target.absolute)
            .await
            .map_err(|e| AppError::from_io(e, target.display()))?;

        let mut entries = Vec::new();
        while let Some(entry) = read_dir.next_entry().await? {
            let name = entry.file_name().to_string_lossy().to_string();
            let meta = match fs::metadata(entry.path()).await {
                Ok(m) => m,
                Err(e) => {
                    warn!("Skipping {}: {}", target.child(&name), e);
                    continue;
                }
            };
            let path = target.child(&name);
            entries.push(entry_from_metadata(name, path, &meta));
        }

        debug!("Listed {} entries in {}", entries.len(), target.display());
        Ok(entries)
    }

    /// Describe a single path.
    pub async fn stat(&self, path: &str) -> Result<ContentEntry> {
        let target = self.resolve(path)?;
        let meta = fs::metadata(&target.absolute)
            .await
            .map_err(|e| AppError::from_io(e, target.display()))?;
        let name = target
            .relative
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();

        Ok(entry_from_metadata(name, target.relative, &meta))
    }

    /// Read a file's raw bytes. No size limit is applied.
    pub async fn read(&self, path: &str) -> Result<Vec<u8>> {
        let target = self.resolve(path)?;
        let meta = fs::metadata(&target.absolute)
            .await
            .map_err(|e| AppError::from_io(e, target.display()))?;
        if meta.is_dir() {
            return Err(AppError::IsADirectory(target.display().to_string()));
        }

        fs::read(&target.absolute)
            .await
            .map_err(|e| AppError::from_io(e, target.display()))
    }

    /// Create a directory (with ancestors, idempotent) or write a file after
    /// creating its missing ancestors. Existing files are overwritten.
    pub async fn create(&self, path: &str, entry: NewEntry<'_>) -> Result<()> {
        let target = self.resolve(path)?;

        match entry {
            NewEntry::Directory => {
                fs::create_dir_all(&target.absolute)
                    .await
                    .map_err(|e| AppError::from_io(e, target.display()))?;
                info!("Created directory {}", target.display());
            }
            NewEntry::File(content) => {
                if target.is_root() || is_dir(&target.absolute).await {
                    return Err(AppError::IsADirectory(target.display().to_string()));
                }
                if let Some(parent) = target.absolute.parent() {
                    fs::create_dir_all(parent)
                        .await
                        .map_err(|e| AppError::from_io(e, target.display()))?;
                }
                fs::write(&target.absolute, content)
                    .await
                    .map_err(|e| AppError::from_io(e, target.display()))?;
                info!("Created file {} ({} bytes)", target.display(), content.len());
            }
        }

        Ok(())
    }

    /// Create-or-replace a file. Missing ancestors are not created.
    pub async fn update(&self, path: &str, content: &[u8]) -> Result<()> {
        let target = self.resolve(path)?;
        if target.is_root() || is_dir(&target.absolute).await {
            return Err(AppError::IsADirectory(target.display().to_string()));
        }

        fs::write(&target.absolute, content)
            .await
            .map_err(|e| AppError::from_io(e, target.display()))?;
        info!("Updated file {} ({} bytes)", target.display(), content.len());

        Ok(())
    }

    /// Delete a file, or a directory with everything beneath it.
    pub async fn remove(&self, path: &str) -> Result<()> {
        let target = self.resolve(path)?;
        if target.is_root() {
            return Err(AppError::InvalidPath("cannot remove the content root".to_string()));
        }

        let meta = fs::symlink_metadata(&target.absolute)
            .await
            .map_err(|e| AppError::from_io(e, target.display()))?;

        let removed = if meta.is_dir() {
            fs::remove_dir_all(&target.absolute).await
        } else {
            fs::remove_file(&target.absolute).await
        };
        removed.map_err(|e| AppError::from_io(e, target.display()))?;

        info!("Removed {}", target.display());
        Ok(())
    }
}

pub type SharedContent = Arc<ContentRepository>;

async fn is_dir(path: &Path) -> bool {
    fs::metadata(path).await.map(|m| m.is_dir()).unwrap_or(false)
}

fn entry_from_metadata(name: String, path: String, meta: &Metadata) -> ContentEntry {
    let kind = if meta.is_dir() {
        EntryKind::Directory
    } else {
        EntryKind::File
    };
    let size = match kind {
        EntryKind::File => meta.len(),
        EntryKind::Directory => 0,
    };
    let modified: DateTime<Utc> = meta.modified().unwrap_or(UNIX_EPOCH).into();

    ContentEntry {
        name,
        path,
        kind,
        size,
        modified,
    }
}
