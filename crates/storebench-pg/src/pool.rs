//! # Connection Pool
//!
//! Pool creation and lifecycle for the relational store. The pool is opened
//! at the start of a harness subcommand and closed before it exits, so each
//! invocation holds the connection exclusively for its own duration.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use crate::error::{StoreError, StoreResult};

/// Relational store handle. Cheap to clone (pool is reference-counted).
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connects to PostgreSQL.
    ///
    /// A failure here is fatal for the whole run: the caller aborts with a
    /// non-zero exit instead of limping on with one store.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(10))
            .connect(url)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        info!("connected to PostgreSQL");
        Ok(PgStore { pool })
    }

    /// Server version string, used as the connection smoke test.
    pub async fn ping(&self) -> StoreResult<String> {
        let version: String = sqlx::query_scalar("SELECT version()")
            .fetch_one(&self.pool)
            .await?;
        Ok(version)
    }

    /// Underlying pool, for queries owned by sibling modules.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Closes the pool. Called on subcommand exit, including error exit.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
