//! # perf
//!
//! Runs the six-query battery against both stores, five timed iterations
//! per query, and writes `performance_results.json`. Timing covers full
//! result materialization, measured at the harness so both stores are
//! clocked identically.

use std::fs;
use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use serde_json::{json, Map, Value};
use tracing::info;

use storebench_core::battery::round3;
use storebench_core::{BenchQuery, QueryTiming};
use storebench_mongo::MongoStore;
use storebench_pg::PgStore;

use crate::config::BenchConfig;
use crate::error::HarnessResult;

/// Timed iterations per query.
const ITERATIONS: usize = 5;

pub async fn run(config: &BenchConfig) -> HarnessResult<()> {
    // PostgreSQL battery
    let pg = PgStore::connect(&config.pg_url).await?;
    let mut pg_timings = Vec::with_capacity(BenchQuery::ALL.len());
    for query in BenchQuery::ALL {
        let timing = measure_pg(&pg, query).await?;
        info!(
            query = query.label(),
            avg_ms = timing.avg,
            rows = timing.result_count,
            "relational query timed"
        );
        pg_timings.push((query, timing));
    }
    pg.close().await;

    // MongoDB battery
    let mongo = MongoStore::connect(&config.mongo_uri, &config.mongo_db).await?;
    let mut mongo_timings = Vec::with_capacity(BenchQuery::ALL.len());
    for query in BenchQuery::ALL {
        let timing = measure_mongo(&mongo, query).await?;
        info!(
            query = query.label(),
            avg_ms = timing.avg,
            docs = timing.result_count,
            "document query timed"
        );
        mongo_timings.push((query, timing));
    }
    mongo.close().await;

    let artifact = build_artifact(&pg_timings, &mongo_timings)?;

    fs::create_dir_all(&config.results_dir)?;
    let path = Path::new(&config.results_dir).join("performance_results.json");
    fs::write(&path, serde_json::to_string_pretty(&artifact)?)?;
    info!(path = %path.display(), "performance artifact written");

    let pg_total = total_avg(&pg_timings);
    let mongo_total = total_avg(&mongo_timings);
    if pg_total < mongo_total && pg_total > 0.0 {
        info!(
            ratio = format!("{:.2}", mongo_total / pg_total),
            "PostgreSQL was faster overall"
        );
    } else if mongo_total > 0.0 {
        info!(
            ratio = format!("{:.2}", pg_total / mongo_total),
            "MongoDB was faster overall"
        );
    }

    Ok(())
}

async fn measure_pg(store: &PgStore, query: BenchQuery) -> HarnessResult<QueryTiming> {
    let mut samples = Vec::with_capacity(ITERATIONS);
    let mut result_count = 0u64;
    for _ in 0..ITERATIONS {
        let start = Instant::now();
        result_count = store.run_query(query).await?;
        samples.push(start.elapsed().as_secs_f64() * 1000.0);
    }
    Ok(QueryTiming::from_samples(&samples, result_count))
}

async fn measure_mongo(store: &MongoStore, query: BenchQuery) -> HarnessResult<QueryTiming> {
    let mut samples = Vec::with_capacity(ITERATIONS);
    let mut result_count = 0u64;
    for _ in 0..ITERATIONS {
        let start = Instant::now();
        result_count = store.run_query(query).await?;
        samples.push(start.elapsed().as_secs_f64() * 1000.0);
    }
    Ok(QueryTiming::from_samples(&samples, result_count))
}

fn total_avg(timings: &[(BenchQuery, QueryTiming)]) -> f64 {
    round3(timings.iter().map(|(_, t)| t.avg).sum())
}

/// Assembles the artifact: per-store sections keyed by query, plus a
/// side-by-side `queries` array the dashboard charts from.
fn build_artifact(
    pg: &[(BenchQuery, QueryTiming)],
    mongo: &[(BenchQuery, QueryTiming)],
) -> HarnessResult<Value> {
    let mut pg_section = Map::new();
    for (query, timing) in pg {
        pg_section.insert(
            query.relational_key().to_string(),
            serde_json::to_value(timing)?,
        );
    }
    pg_section.insert("total_avg_ms".to_string(), json!(total_avg(pg)));

    let mut mongo_section = Map::new();
    for (query, timing) in mongo {
        mongo_section.insert(
            query.document_key().to_string(),
            serde_json::to_value(timing)?,
        );
    }
    mongo_section.insert("total_avg_ms".to_string(), json!(total_avg(mongo)));

    let queries: Vec<Value> = pg
        .iter()
        .zip(mongo.iter())
        .map(|((query, pg_timing), (_, mongo_timing))| {
            json!({
                "name": query.label(),
                "postgresql": pg_timing.avg,
                "mongodb": mongo_timing.avg,
            })
        })
        .collect();

    Ok(json!({
        "test_date": Utc::now().to_rfc3339(),
        "postgresql": pg_section,
        "mongodb": mongo_section,
        "queries": queries,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing(avg: f64) -> QueryTiming {
        QueryTiming {
            min: avg,
            max: avg,
            avg,
            result_count: 10,
        }
    }

    #[test]
    fn test_artifact_shape() {
        let pg: Vec<_> = BenchQuery::ALL.iter().map(|&q| (q, timing(1.0))).collect();
        let mongo: Vec<_> = BenchQuery::ALL.iter().map(|&q| (q, timing(2.0))).collect();

        let artifact = build_artifact(&pg, &mongo).unwrap();
        assert_eq!(artifact["postgresql"]["total_avg_ms"], 6.0);
        assert_eq!(artifact["mongodb"]["total_avg_ms"], 12.0);
        assert!(artifact["postgresql"]["q1_select_all"]["avg"].is_number());
        assert!(artifact["mongodb"]["q6_regex_search"]["result_count"].is_number());

        let queries = artifact["queries"].as_array().unwrap();
        assert_eq!(queries.len(), 6);
        assert_eq!(queries[0]["name"], "Select All");
        assert_eq!(queries[0]["postgresql"], 1.0);
        assert_eq!(queries[0]["mongodb"], 2.0);
    }

    #[test]
    fn test_total_avg_rounds() {
        let timings: Vec<_> = BenchQuery::ALL
            .iter()
            .map(|&q| (q, timing(0.3333)))
            .collect();
        assert_eq!(total_avg(&timings), 2.0);
    }
}
