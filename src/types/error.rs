//! Error types for index mutation and ranking.

use thiserror::Error;

use super::document::DocumentId;

/// Every failure the index can report.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Document id is negative or already present.
    #[error("invalid document id {0}")]
    InvalidDocumentId(DocumentId),

    /// A document token or stop word contains a control character.
    #[error("word {0:?} is invalid")]
    InvalidWord(String),

    /// A query token is malformed (bare `-`, `--word`, control character).
    #[error("query word {0:?} is invalid")]
    InvalidQueryWord(String),

    /// The operation referenced a document that is not in the index.
    #[error("document {0} not found")]
    DocumentNotFound(DocumentId),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of an [`IndexError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed a malformed id, word or query.
    InvalidArgument,
    /// The caller referenced a document id the index does not know.
    OutOfRange,
    /// Reading a corpus or config file failed.
    Io,
}

impl IndexError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IndexError::InvalidDocumentId(_)
            | IndexError::InvalidWord(_)
            | IndexError::InvalidQueryWord(_)
            | IndexError::Config(_)
            | IndexError::Json(_) => ErrorKind::InvalidArgument,
            IndexError::DocumentNotFound(_) => ErrorKind::OutOfRange,
            IndexError::Io(_) => ErrorKind::Io,
        }
    }
}

pub type IndexResult<T> = Result<T, IndexError>;
