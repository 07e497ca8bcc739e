//! # setup-pg / setup-mongo
//!
//! Idempotent schema setup for each store: connect, smoke-test the server,
//! create tables/collections and indexes, then list what exists.

use tracing::info;

use storebench_mongo::MongoStore;
use storebench_pg::{schema, PgStore};

use crate::config::BenchConfig;
use crate::error::HarnessResult;

pub async fn run_pg(config: &BenchConfig) -> HarnessResult<()> {
    let pg = PgStore::connect(&config.pg_url).await?;
    let version = pg.ping().await?;
    info!(version, "PostgreSQL reachable");

    schema::create_tables(pg.pool()).await?;
    schema::create_indexes(pg.pool()).await?;

    let tables = schema::list_tables(pg.pool()).await?;
    info!(tables = ?tables, "relational schema ready");
    pg.close().await;
    Ok(())
}

pub async fn run_mongo(config: &BenchConfig) -> HarnessResult<()> {
    let mongo = MongoStore::connect(&config.mongo_uri, &config.mongo_db).await?;
    let version = mongo.server_version().await?;
    info!(version, "MongoDB reachable");

    mongo.create_collections().await?;
    mongo.create_indexes().await?;

    let collections = mongo.list_collections().await?;
    info!(collections = ?collections, "document schema ready");
    mongo.close().await;
    Ok(())
}
