//! # Client Handle
//!
//! Client creation and lifecycle for the document store. Like the relational
//! pool, the client is opened at the start of a harness subcommand and shut
//! down before it exits.

use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection, Database};
use tracing::info;

use storebench_core::EntityKind;

use crate::error::{DocError, DocResult};

/// Document store handle. Cheap to clone (client is reference-counted).
#[derive(Debug, Clone)]
pub struct MongoStore {
    client: Client,
    db: Database,
}

impl MongoStore {
    /// Connects to MongoDB and pings the target database.
    ///
    /// `Client::with_uri_str` succeeds without touching the network, so the
    /// explicit ping is what actually proves the server is reachable. A
    /// failure here is fatal for the whole run.
    pub async fn connect(uri: &str, db_name: &str) -> DocResult<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| DocError::ConnectionFailed(e.to_string()))?;
        let db = client.database(db_name);

        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| DocError::ConnectionFailed(e.to_string()))?;

        info!(database = db_name, "connected to MongoDB");
        Ok(MongoStore { client, db })
    }

    /// Round-trips a `ping` command against the target database.
    pub async fn ping(&self) -> DocResult<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Server version string, used as the connection smoke test.
    pub async fn server_version(&self) -> DocResult<String> {
        let info = self.db.run_command(doc! { "buildInfo": 1 }).await?;
        Ok(info.get_str("version").unwrap_or("unknown").to_string())
    }

    /// Underlying database handle, for operations owned by sibling modules.
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Collection handle for one entity kind.
    pub fn collection(&self, kind: EntityKind) -> Collection<Document> {
        self.db.collection::<Document>(kind.name())
    }

    /// Shuts the client down. Called on subcommand exit, including error exit.
    pub async fn close(self) {
        self.client.shutdown().await;
    }
}
