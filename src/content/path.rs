//! Lexical resolution of content-relative paths.
//!
//! Requests name files with `/`-separated paths relative to the content root.
//! Resolution never touches the filesystem: `.` and empty segments are dropped,
//! `..` pops the previous segment, and anything that would climb above the
//! root (or is not a plain relative path) is rejected with `InvalidPath`.

use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

/// A request path that is known to stay beneath the content root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Normalized relative form, `/`-separated, empty for the root itself
    pub relative: String,
    pub absolute: PathBuf,
}

impl ResolvedPath {
    pub fn is_root(&self) -> bool {
        self.relative.is_empty()
    }

    /// Relative path of a direct child named `name`.
    pub fn child(&self, name: &str) -> String {
        if self.relative.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.relative, name)
        }
    }

    /// Label used in error messages and logs.
    pub fn display(&self) -> &str {
        if self.relative.is_empty() { "/" } else { &self.relative }
    }
}

/// Split `path` into normalized segments.
pub fn normalize(path: &str) -> Result<Vec<&str>> {
    if path.contains('\0') {
        return Err(AppError::InvalidPath("path contains a NUL byte".to_string()));
    }
    if path.starts_with('/') {
        return Err(AppError::InvalidPath(format!("{} is absolute", path)));
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(AppError::InvalidPath(format!("{} escapes the content root", path)));
                }
            }
            s if s.contains('\\') || (cfg!(windows) && s.contains(':')) => {
                return Err(AppError::InvalidPath(format!("{} is not a portable path", path)));
            }
            s => segments.push(s),
        }
    }

    Ok(segments)
}

pub fn resolve(root: &Path, path: &str) -> Result<ResolvedPath> {
    let segments = normalize(path)?;
    let absolute = segments.iter().fold(root.to_path_buf(), |acc, s| acc.join(s));

    Ok(ResolvedPath {
        relative: segments.join("/"),
        absolute,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_is_root() {
        let resolved = resolve(Path::new("/srv/content"), "").unwrap();
        assert!(resolved.is_root());
        assert_eq!(resolved.absolute, PathBuf::from("/srv/content"));
        assert_eq!(resolved.display(), "/");
    }

    #[test]
    fn dot_segments_are_collapsed() {
        let resolved = resolve(Path::new("/srv/content"), "./docs//a/../b.md").unwrap();
        assert_eq!(resolved.relative, "docs/b.md");
        assert_eq!(resolved.absolute, PathBuf::from("/srv/content/docs/b.md"));
    }

    #[test]
    fn parent_segments_cannot_escape() {
        for path in ["..", "../etc/passwd", "docs/../../x", "a/b/../../../c"] {
            let err = resolve(Path::new("/srv/content"), path).unwrap_err();
            assert!(matches!(err, AppError::InvalidPath(_)), "{path} should be rejected");
        }
    }

    #[test]
    fn climbing_back_to_root_is_allowed() {
        let resolved = resolve(Path::new("/srv/content"), "docs/..").unwrap();
        assert!(resolved.is_root());
    }

    #[test]
    fn absolute_and_malformed_paths_are_rejected() {
        for path in ["/etc/passwd", "a\0b", "C:\\Windows", "docs\\..\\..\\x"] {
            assert!(matches!(
                normalize(path),
                Err(AppError::InvalidPath(_))
            ));
        }
    }

    #[cfg(unix)]
    #[test]
    fn colons_are_allowed_on_unix() {
        assert_eq!(normalize("docs/standup 10:30.md").unwrap(), vec!["docs", "standup 10:30.md"]);
    }

    #[test]
    fn names_with_spaces_survive() {
        let resolved = resolve(Path::new("/c"), "docs and prds/plan.md").unwrap();
        assert_eq!(resolved.relative, "docs and prds/plan.md");
        assert_eq!(resolved.child("x"), "docs and prds/plan.md/x");
    }
}
