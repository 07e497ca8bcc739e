//! Error types for dataset generation.
//!
//! Generation has no I/O, so the only failures are contract violations
//! caught before any work is done.

use thiserror::Error;

use crate::types::EntityKind;

/// Dataset generation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A requested entity count was negative or too large to address.
    ///
    /// Counts arrive from the CLI as signed integers so a typo like `-5`
    /// is representable; it must fail fast before any store I/O. Ids are
    /// `i32`, so anything beyond `i32::MAX` is unaddressable and rejected
    /// the same way.
    #[error("invalid {entity} count: {count} (must be 0..=i32::MAX)")]
    InvalidCount { entity: EntityKind, count: i64 },

    /// A generator needed to sample from an upstream collection that is
    /// empty (e.g. orders requested but no users were generated).
    #[error("cannot sample {needed} from empty {origin} collection")]
    EmptySource {
        origin: EntityKind,
        needed: EntityKind,
    },
}

/// Result type for generation operations.
pub type CoreResult<T> = Result<T, CoreError>;
