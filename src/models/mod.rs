//! Data transfer objects (DTOs) for API responses.
//!
//! These structs are serialized to JSON for frontend consumption.
//! - `content`: ContentEntry, FilesResponse, mutation requests/responses
//! - `hub`: HubInfo, RenderedDocument

pub mod content;
pub mod hub;

pub use content::*;
pub use hub::*;
