//! # populate
//!
//! Generates the dataset once, loads PostgreSQL fully, then MongoDB fully
//! (strictly sequential, no cross-store transaction), then verifies that
//! both stores report identical per-entity counts.

use tracing::{error, info, warn};

use storebench_core::{Dataset, DatasetCounts, VerificationReport};
use storebench_mongo::MongoStore;
use storebench_pg::PgStore;

use crate::config::BenchConfig;
use crate::error::{HarnessError, HarnessResult};

pub async fn run(config: &BenchConfig, counts: DatasetCounts) -> HarnessResult<()> {
    let dataset = Dataset::generate(counts)?;
    let expected = dataset.counts();
    info!(
        categories = expected.categories,
        users = expected.users,
        products = expected.products,
        orders = expected.orders,
        order_items = expected.order_items,
        reviews = expected.reviews,
        "dataset generated"
    );

    // PostgreSQL first, in full
    let pg = PgStore::connect(&config.pg_url).await?;
    let pg_report = pg.load(&dataset).await?;
    if !pg_report.is_complete() {
        for table in pg_report.tables.iter().filter(|t| t.error.is_some()) {
            warn!(
                entity = %table.entity,
                error = table.error.as_deref().unwrap_or(""),
                "relational table failed to load"
            );
        }
    }
    let pg_counts = pg.counts().await?;
    pg.close().await;

    // then MongoDB, in full
    let mongo = MongoStore::connect(&config.mongo_uri, &config.mongo_db).await?;
    let mongo_report = mongo.load(&dataset).await?;
    if !mongo_report.is_complete() {
        for table in mongo_report.tables.iter().filter(|t| t.error.is_some()) {
            warn!(
                entity = %table.entity,
                error = table.error.as_deref().unwrap_or(""),
                "document collection failed to load"
            );
        }
    }
    let mongo_counts = mongo.counts().await?;
    mongo.close().await;

    // cross-store verification
    let report = VerificationReport::compare(pg_counts, mongo_counts);
    for entry in &report.entries {
        if entry.matched {
            info!(
                entity = %entry.entity,
                count = entry.relational,
                "counts match"
            );
        } else {
            error!(
                entity = %entry.entity,
                relational = entry.relational,
                document = entry.document,
                "COUNT MISMATCH"
            );
        }
    }

    if report.all_match() {
        info!(total = report.total(), "both stores verified");
        Ok(())
    } else {
        let detail = report
            .mismatches()
            .iter()
            .map(|e| format!("{} ({} vs {})", e.entity, e.relational, e.document))
            .collect::<Vec<_>>()
            .join(", ");
        Err(HarnessError::Verification(detail))
    }
}
