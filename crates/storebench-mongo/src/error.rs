//! # Document Store Errors
//!
//! Maps MongoDB driver failures onto the harness error taxonomy.
//!
//! ## Error Mapping
//! ```text
//! server code 48 (NamespaceExists)      → DocError::NamespaceExists
//! server code 11000 (DuplicateKey)      → DocError::DuplicateKey
//! ErrorKind::ServerSelection / Io /
//!   Authentication                      → DocError::ConnectionFailed
//! other command/write errors            → DocError::CommandFailed
//! everything else                       → DocError::Internal
//! ```

use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

/// Server error code for a duplicate key on a unique index.
const CODE_DUPLICATE_KEY: i32 = 11000;

/// Server error code when creating a collection that already exists.
const CODE_NAMESPACE_EXISTS: i32 = 48;

/// Document store operation errors.
#[derive(Debug, Error)]
pub enum DocError {
    /// Store unreachable or authentication failed. Fatal: aborts the run.
    #[error("MongoDB connection failed: {0}")]
    ConnectionFailed(String),

    /// Create-collection hit an existing namespace. Non-fatal: logged as
    /// "already exists" and the run continues.
    #[error("collection already exists: {0}")]
    NamespaceExists(String),

    /// Unique index violated by an insert. The collection being loaded is
    /// wiped and the load moves on to the next one.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// A command or write failed for a non-constraint reason.
    #[error("command failed (code {code}): {message}")]
    CommandFailed { code: i32, message: String },

    /// Anything the driver reports that has no better bucket.
    #[error("internal store error: {0}")]
    Internal(String),
}

impl DocError {
    /// True when a collection-setup statement can safely be skipped.
    pub fn is_namespace_exists(&self) -> bool {
        matches!(self, DocError::NamespaceExists(_))
    }
}

impl From<mongodb::error::Error> for DocError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::Command(c) if c.code == CODE_NAMESPACE_EXISTS => {
                DocError::NamespaceExists(c.message.clone())
            }
            ErrorKind::Command(c) if c.code == CODE_DUPLICATE_KEY => {
                DocError::DuplicateKey(c.message.clone())
            }
            ErrorKind::Command(c) => DocError::CommandFailed {
                code: c.code,
                message: c.message.clone(),
            },
            ErrorKind::Write(WriteFailure::WriteError(w)) if w.code == CODE_DUPLICATE_KEY => {
                DocError::DuplicateKey(w.message.clone())
            }
            ErrorKind::Write(WriteFailure::WriteError(w)) => DocError::CommandFailed {
                code: w.code,
                message: w.message.clone(),
            },
            ErrorKind::ServerSelection { message, .. } => {
                DocError::ConnectionFailed(message.clone())
            }
            ErrorKind::Authentication { message, .. } => {
                DocError::ConnectionFailed(message.clone())
            }
            ErrorKind::Io(e) => DocError::ConnectionFailed(e.to_string()),
            // insert_many surfaces duplicate keys through its own error kind;
            // the message carries the server's E11000 text
            _ => {
                let text = err.to_string();
                if text.contains("E11000") {
                    DocError::DuplicateKey(text)
                } else {
                    DocError::Internal(text)
                }
            }
        }
    }
}

/// Result type for document store operations.
pub type DocResult<T> = Result<T, DocError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_exists_is_skippable() {
        let err = DocError::NamespaceExists("orders".to_string());
        assert!(err.is_namespace_exists());
        assert!(!DocError::DuplicateKey("E11000".to_string()).is_namespace_exists());
    }

    #[test]
    fn test_display_includes_code() {
        let err = DocError::CommandFailed {
            code: 2,
            message: "bad value".to_string(),
        };
        assert_eq!(err.to_string(), "command failed (code 2): bad value");
    }
}
