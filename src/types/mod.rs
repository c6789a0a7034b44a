//! Core data types shared by the index and the ranking engine.

pub mod config;
pub mod document;
pub mod error;
pub mod policy;

pub use config::SearchConfig;
pub use document::{Document, DocumentId, DocumentStatus};
pub use error::{ErrorKind, IndexError, IndexResult};
pub use policy::ExecutionPolicy;
