//! Filesystem-backed content store.
//!
//! All paths are relative to one content root; see `path` for how they are
//! resolved and `repository` for the list/read/create/update/remove surface.
//! The folder names below are a convention of the UI and the prototype
//! route, not something the repository enforces.

pub mod path;
pub mod repository;

pub use repository::{ContentRepository, NewEntry, SharedContent};

/// Folder holding markdown documents.
pub const DOCUMENTS_DIR: &str = "docs and prds";

/// Folder holding one sub-folder per prototype.
pub const PROTOTYPES_DIR: &str = "prototypes";

/// Root document of a prototype folder.
pub const PROTOTYPE_INDEX: &str = "index.html";
