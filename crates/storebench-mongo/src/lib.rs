//! # storebench-mongo: Document Store for StoreBench
//!
//! Everything MongoDB: client lifecycle, collection and index setup, the
//! best-effort dataset loader, the timed query battery, and the CAP probes.
//!
//! ## Module Organization
//!
//! - [`client`] - `MongoStore` handle and connection lifecycle
//! - [`schema`] - Collection and index creation (idempotent)
//! - [`documents`] - Entity → BSON document mapping (`id` as `_id`)
//! - [`loader`] - Per-collection best-effort dataset load + counts
//! - [`queries`] - The six-query battery as finds and pipelines
//! - [`probes`] - Atomic-update / write-latency / availability probes
//! - [`error`] - Driver error → error taxonomy mapping
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storebench_mongo::MongoStore;
//!
//! let store = MongoStore::connect(&config.mongo_uri, &config.mongo_db).await?;
//! store.create_collections().await?;
//! store.create_indexes().await?;
//! let report = store.load(&dataset).await?;
//! let counts = store.counts().await?;
//! store.close().await;
//! ```

pub mod client;
pub mod documents;
pub mod error;
pub mod loader;
pub mod probes;
pub mod queries;
pub mod schema;

pub use client::MongoStore;
pub use error::{DocError, DocResult};
