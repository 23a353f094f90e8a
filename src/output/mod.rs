//! Output formatters for duplicate scan results.
//!
//! - [`text`]: grouped listing for terminals
//! - [`json`]: machine-readable document for scripting

pub mod json;
pub mod text;

pub use json::JsonOutput;
pub use text::TextOutput;
