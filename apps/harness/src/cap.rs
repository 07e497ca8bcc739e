//! # cap
//!
//! Runs the consistency and availability probes on both stores and writes
//! `cap_analysis.json`. The artifact carries each store's CAP posture, the
//! probe outcomes, and a static analysis section for the dashboard.

use std::fs;
use std::path::Path;

use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

use storebench_mongo::MongoStore;
use storebench_pg::PgStore;

use crate::config::BenchConfig;
use crate::error::HarnessResult;

pub async fn run(config: &BenchConfig) -> HarnessResult<()> {
    // consistency probes, relational side
    let pg = PgStore::connect(&config.pg_url).await?;
    let rollback = pg.probe_rollback().await?;
    let foreign_key = pg.probe_foreign_key().await?;
    let pg_availability = pg.probe_availability().await?;
    pg.close().await;

    // consistency probes, document side
    let mongo = MongoStore::connect(&config.mongo_uri, &config.mongo_db).await?;
    let atomic_update = mongo.probe_atomic_update().await?;
    let write_concern = mongo.probe_write_latency().await?;
    let mongo_availability = mongo.probe_availability().await?;
    mongo.close().await;

    let artifact = json!({
        "test_date": Utc::now().to_rfc3339(),
        "postgresql": {
            "type": "SQL/Relational",
            "cap_focus": "CP (Consistency + Partition Tolerance)",
            "acid_compliant": true,
            "tests": {
                "transaction_rollback": rollback,
                "foreign_key_constraint": foreign_key,
                "availability": pg_availability,
            },
        },
        "mongodb": {
            "type": "NoSQL/Document",
            "cap_focus": "CP (with tunable consistency)",
            "acid_compliant": true,
            "tests": {
                "atomic_update": atomic_update,
                "write_concern": write_concern,
                "availability": mongo_availability,
            },
        },
        "analysis": analysis(),
    });

    fs::create_dir_all(&config.results_dir)?;
    let path = Path::new(&config.results_dir).join("cap_analysis.json");
    fs::write(&path, serde_json::to_string_pretty(&artifact)?)?;
    info!(path = %path.display(), "CAP artifact written");

    Ok(())
}

/// Static per-store analysis rendered into the dashboard verbatim.
fn analysis() -> Value {
    json!({
        "postgresql": {
            "deployment": "Single node",
            "partition_tolerance": "Requires external tools",
            "failover": "Manual or external tools required",
            "consistency_model": "Strong (ACID)",
            "recommendation": "Best for complex transactions, referential integrity",
        },
        "mongodb": {
            "deployment": "Replica set capable",
            "partition_tolerance": "Built-in with replica sets",
            "failover": "Automatic (primary election)",
            "consistency_model": "Tunable (eventual to strong)",
            "recommendation": "Best for flexible schema, horizontal scaling",
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_covers_both_stores() {
        let value = analysis();
        assert!(value["postgresql"]["consistency_model"].is_string());
        assert!(value["mongodb"]["failover"].is_string());
    }
}
