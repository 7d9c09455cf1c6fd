//! Prototype rendering: load a prototype folder and inline its CSS/JS so the
//! page can be served as one sandboxed document.

pub mod bundle;
pub mod inline;

pub use bundle::PrototypeBundle;
