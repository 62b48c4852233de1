//! Foundation Layer - shared data model and error handling for rehome
//!
//! - [`model`] - module records, quote characters, import styles, project layout
//! - [`report`] - per-clause and per-file report types
//! - [`error`] - the error type and result alias

pub mod error;
pub mod model;
pub mod report;

// Re-export commonly used types for convenience
pub use error::*;
pub use model::*;
pub use report::*;
