//! # CAP Probes (Relational)
//!
//! Small scripted checks framing the consistency/availability trade-off:
//! transaction rollback, foreign-key enforcement, and sequential response
//! latency. Probes observe; they never leave data behind.

use std::time::Instant;

use tracing::info;

use storebench_core::{AvailabilityProbe, ConstraintProbe, RollbackProbe};

use crate::error::StoreResult;
use crate::pool::PgStore;

/// Sequential count queries issued by the availability probe.
const AVAILABILITY_ITERATIONS: u32 = 20;

impl PgStore {
    /// Decrements product 1's stock inside a transaction, rolls back, and
    /// checks the value is restored.
    pub async fn probe_rollback(&self) -> StoreResult<RollbackProbe> {
        let initial_value: i32 =
            sqlx::query_scalar("SELECT stock_quantity FROM products WHERE id = 1")
                .fetch_one(self.pool())
                .await?;

        let mut tx = self.pool().begin().await?;
        sqlx::query("UPDATE products SET stock_quantity = stock_quantity - 10 WHERE id = 1")
            .execute(&mut *tx)
            .await?;
        tx.rollback().await?;

        let after_rollback: i32 =
            sqlx::query_scalar("SELECT stock_quantity FROM products WHERE id = 1")
                .fetch_one(self.pool())
                .await?;

        let passed = initial_value == after_rollback;
        info!(passed, initial_value, after_rollback, "rollback probe");
        Ok(RollbackProbe {
            passed,
            initial_value,
            after_rollback,
        })
    }

    /// Inserts an order for a user id that cannot exist. The probe passes
    /// when the store rejects the row.
    pub async fn probe_foreign_key(&self) -> StoreResult<ConstraintProbe> {
        let mut tx = self.pool().begin().await?;
        let outcome = sqlx::query(
            r#"
            INSERT INTO orders (order_number, user_id, status, total_amount)
            VALUES ('TEST-FK', 99999, 'pending', 100)
            "#,
        )
        .execute(&mut *tx)
        .await;

        let passed = match outcome {
            // FK not enforced: remove the probe row rather than commit it
            Ok(_) => {
                tx.rollback().await?;
                false
            }
            Err(_) => {
                tx.rollback().await?;
                true
            }
        };
        info!(passed, "foreign key probe");
        Ok(ConstraintProbe { passed })
    }

    /// Twenty sequential order counts; reports the response-time spread.
    pub async fn probe_availability(&self) -> StoreResult<AvailabilityProbe> {
        let mut samples = Vec::with_capacity(AVAILABILITY_ITERATIONS as usize);
        for _ in 0..AVAILABILITY_ITERATIONS {
            let start = Instant::now();
            let _: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
                .fetch_one(self.pool())
                .await?;
            samples.push(start.elapsed().as_secs_f64() * 1000.0);
        }

        let probe = AvailabilityProbe::from_samples(&samples);
        info!(
            avg_ms = probe.avg_response_ms,
            max_ms = probe.max_response_ms,
            "availability probe"
        );
        Ok(probe)
    }
}
