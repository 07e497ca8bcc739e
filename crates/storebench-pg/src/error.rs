//! # Relational Store Errors
//!
//! Maps sqlx/PostgreSQL failures onto the harness error taxonomy.
//!
//! ## Error Mapping
//! ```text
//! SQLSTATE 23505 (unique_violation)   → StoreError::UniqueViolation
//! SQLSTATE 23503 (fk_violation)       → StoreError::ForeignKeyViolation
//! SQLSTATE 42P07 (duplicate_table)    → StoreError::SchemaConflict
//! sqlx::Error::PoolTimedOut           → StoreError::PoolExhausted
//! sqlx::Error::Io / Tls / Configuration → StoreError::ConnectionFailed
//! Other                               → StoreError::QueryFailed / Internal
//! ```

use thiserror::Error;

/// Relational store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store unreachable or authentication failed. Fatal: aborts the run.
    #[error("PostgreSQL connection failed: {0}")]
    ConnectionFailed(String),

    /// Create-table/index hit an existing object. Non-fatal: logged as
    /// "already exists" and the run continues.
    #[error("schema object already exists: {0}")]
    SchemaConflict(String),

    /// Unique constraint violated by an insert. The enclosing per-table
    /// transaction is rolled back and the load moves on.
    #[error("unique violation on {constraint}: {message}")]
    UniqueViolation { constraint: String, message: String },

    /// Foreign key constraint violated by an insert.
    #[error("foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Query execution failed for a non-constraint reason.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// All pool connections in use.
    #[error("connection pool exhausted")]
    PoolExhausted,

    /// Anything sqlx reports that has no better bucket.
    #[error("internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// True when a schema-setup statement can safely be skipped.
    pub fn is_schema_conflict(&self) -> bool {
        matches!(self, StoreError::SchemaConflict(_))
    }
}

/// Classifies a PostgreSQL error by SQLSTATE code.
///
/// Split out from the `From` impl so the mapping is testable without a
/// live database error in hand.
fn classify(code: Option<&str>, message: &str, constraint: Option<&str>) -> StoreError {
    match code {
        Some("23505") => StoreError::UniqueViolation {
            constraint: constraint.unwrap_or("unknown").to_string(),
            message: message.to_string(),
        },
        Some("23503") => StoreError::ForeignKeyViolation(message.to_string()),
        // duplicate_table / duplicate_object: schema setup re-run
        Some("42P07") | Some("42710") => StoreError::SchemaConflict(message.to_string()),
        _ => StoreError::QueryFailed(message.to_string()),
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string());
                classify(code.as_deref(), db_err.message(), db_err.constraint())
            }
            sqlx::Error::PoolTimedOut => StoreError::PoolExhausted,
            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("pool is closed".to_string()),
            sqlx::Error::Io(e) => StoreError::ConnectionFailed(e.to_string()),
            sqlx::Error::Tls(e) => StoreError::ConnectionFailed(e.to_string()),
            sqlx::Error::Configuration(e) => StoreError::ConnectionFailed(e.to_string()),
            other => StoreError::Internal(other.to_string()),
        }
    }
}

/// Result type for relational store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_classification() {
        let err = classify(
            Some("23505"),
            "duplicate key value violates unique constraint \"users_username_key\"",
            Some("users_username_key"),
        );
        match err {
            StoreError::UniqueViolation { constraint, .. } => {
                assert_eq!(constraint, "users_username_key");
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_fk_violation_classification() {
        let err = classify(Some("23503"), "violates foreign key constraint", None);
        assert!(matches!(err, StoreError::ForeignKeyViolation(_)));
    }

    #[test]
    fn test_duplicate_table_is_schema_conflict() {
        let err = classify(Some("42P07"), "relation \"users\" already exists", None);
        assert!(err.is_schema_conflict());
    }

    #[test]
    fn test_unknown_code_is_query_failure() {
        let err = classify(Some("22012"), "division by zero", None);
        assert!(matches!(err, StoreError::QueryFailed(_)));
        let err = classify(None, "something odd", None);
        assert!(matches!(err, StoreError::QueryFailed(_)));
    }
}
