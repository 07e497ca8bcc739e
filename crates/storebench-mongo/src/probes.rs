//! # CAP Probes (Document)
//!
//! The document-side counterparts to the relational probes: single-document
//! atomic update, acknowledged-write latency, and sequential response
//! latency. Probes restore whatever they touch.

use std::time::Instant;

use mongodb::bson::doc;
use tracing::info;

use storebench_core::{AtomicUpdateProbe, AvailabilityProbe, EntityKind, WriteLatencyProbe};

use crate::client::MongoStore;
use crate::error::DocResult;

/// Sequential count queries issued by the availability probe.
const AVAILABILITY_ITERATIONS: u32 = 20;

impl MongoStore {
    /// Atomically decrements product 1's stock with `$inc`, then restores
    /// it. Passes when exactly one document reports modified.
    pub async fn probe_atomic_update(&self) -> DocResult<AtomicUpdateProbe> {
        let products = self.collection(EntityKind::Products);

        let outcome = products
            .update_one(
                doc! { "_id": 1 },
                doc! { "$inc": { "stock_quantity": -10 } },
            )
            .await?;
        let modified_count = outcome.modified_count;

        // put the stock back regardless of the verdict
        products
            .update_one(doc! { "_id": 1 }, doc! { "$inc": { "stock_quantity": 10 } })
            .await?;

        let passed = modified_count == 1;
        info!(passed, modified_count, "atomic update probe");
        Ok(AtomicUpdateProbe {
            passed,
            modified_count,
        })
    }

    /// Times one acknowledged `$set` on product 1, then removes the scratch
    /// field it wrote.
    pub async fn probe_write_latency(&self) -> DocResult<WriteLatencyProbe> {
        let products = self.collection(EntityKind::Products);

        let start = Instant::now();
        let outcome = products
            .update_one(
                doc! { "_id": 1 },
                doc! { "$set": { "availability_check": true } },
            )
            .await?;
        let write_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        products
            .update_one(
                doc! { "_id": 1 },
                doc! { "$unset": { "availability_check": "" } },
            )
            .await?;

        let passed = outcome.modified_count == 1;
        info!(passed, write_time_ms, "write latency probe");
        Ok(WriteLatencyProbe {
            passed,
            write_time_ms: storebench_core::battery::round3(write_time_ms),
        })
    }

    /// Twenty sequential order counts; reports the response-time spread.
    pub async fn probe_availability(&self) -> DocResult<AvailabilityProbe> {
        let orders = self.collection(EntityKind::Orders);

        let mut samples = Vec::with_capacity(AVAILABILITY_ITERATIONS as usize);
        for _ in 0..AVAILABILITY_ITERATIONS {
            let start = Instant::now();
            let _ = orders.count_documents(doc! {}).await?;
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
