use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocsError>;

#[derive(Error, Debug)]
pub enum DocsError {
    /// The corpus directory is missing, unreadable, or holds no documents.
    /// Fatal at startup.
    #[error("corpus unavailable at {}: {reason}", path.display())]
    CorpusUnavailable { path: PathBuf, reason: String },

    /// A record could not be parsed or lacks a required field.
    #[error("malformed record in {}: {reason}", path.display())]
    MalformedRecord { path: PathBuf, reason: String },

    #[error("duplicate document id {id:?}")]
    DuplicateId { id: String },

    /// Caller error: bad pagination bounds, unknown category, zero result limit.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl DocsError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        DocsError::InvalidArgument(msg.into())
    }
}
