//! # storebench-pg: Relational Store for StoreBench
//!
//! Everything PostgreSQL: pool lifecycle, schema setup, the best-effort
//! dataset loader, the timed query battery, and the CAP probes.
//!
//! ## Module Organization
//!
//! - [`pool`] - `PgStore` handle and connection lifecycle
//! - [`schema`] - Table and index creation (idempotent)
//! - [`loader`] - Per-table transactional dataset load + counts
//! - [`queries`] - The six-query battery in SQL form
//! - [`probes`] - Rollback / FK / availability probes
//! - [`error`] - SQLSTATE → error taxonomy mapping
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storebench_pg::PgStore;
//!
//! let store = PgStore::connect(&config.pg_url).await?;
//! storebench_pg::schema::create_tables(store.pool()).await?;
//! let report = store.load(&dataset).await?;
//! let counts = store.counts().await?;
//! store.close().await;
//! ```

pub mod error;
pub mod loader;
pub mod pool;
pub mod probes;
pub mod queries;
pub mod schema;

pub use error::{StoreError, StoreResult};
pub use pool::PgStore;
