//! # Dataset Loader (Document)
//!
//! Best-effort load of the generated dataset, one collection at a time in
//! dependency order. MongoDB has no multi-document transaction on a
//! standalone server, so the rollback analog is explicit: when a batch
//! insert fails, the partially-written collection is wiped, the failure is
//! recorded, and the load continues with the next collection.

use mongodb::bson::{doc, Document};
use tracing::{info, warn};

use storebench_core::{Dataset, EntityCounts, EntityKind, LoadReport};

use crate::client::MongoStore;
use crate::documents::{
    category_doc, order_doc, order_item_doc, product_doc, review_doc, user_doc,
};
use crate::error::{DocError, DocResult};

impl MongoStore {
    /// Loads the full dataset, collection by collection.
    ///
    /// Existing documents are cleared first so the load is repeatable.
    /// Insert failures are recorded in the report rather than propagated;
    /// only infrastructure errors (connection loss) abort the load.
    pub async fn load(&self, dataset: &Dataset) -> DocResult<LoadReport> {
        self.clear_all().await?;

        let mut report = LoadReport::default();

        let batches: [(EntityKind, Vec<Document>); 6] = [
            (
                EntityKind::Categories,
                dataset.categories.iter().map(category_doc).collect(),
            ),
            (
                EntityKind::Users,
                dataset.users.iter().map(user_doc).collect(),
            ),
            (
                EntityKind::Products,
                dataset.products.iter().map(product_doc).collect(),
            ),
            (
                EntityKind::Orders,
                dataset.orders.iter().map(order_doc).collect(),
            ),
            (
                EntityKind::OrderItems,
                dataset.order_items.iter().map(order_item_doc).collect(),
            ),
            (
                EntityKind::Reviews,
                dataset.reviews.iter().map(review_doc).collect(),
            ),
        ];

        for (kind, docs) in batches {
            self.load_collection(&mut report, kind, docs).await?;
        }

        info!(
            total = report.total_inserted(),
            complete = report.is_complete(),
            "document load finished"
        );
        Ok(report)
    }

    /// Inserts one collection's batch. On failure the collection is wiped
    /// so a half-loaded batch never survives into verification.
    async fn load_collection(
        &self,
        report: &mut LoadReport,
        kind: EntityKind,
        docs: Vec<Document>,
    ) -> DocResult<()> {
        if docs.is_empty() {
            report.record_ok(kind, 0);
            return Ok(());
        }

        let collection = self.collection(kind);
        match collection.insert_many(docs).await {
            Ok(outcome) => {
                let inserted = outcome.inserted_ids.len() as u64;
                info!(collection = kind.name(), inserted, "collection loaded");
                report.record_ok(kind, inserted);
            }
            Err(e) => {
                let err = DocError::from(e);
                match err {
                    DocError::ConnectionFailed(_) => return Err(err),
                    other => {
                        warn!(collection = kind.name(), error = %other, "insert failed, wiping collection");
                        collection.delete_many(doc! {}).await?;
                        report.record_failed(kind, other.to_string());
                    }
                }
            }
        }
        Ok(())
    }

    /// Deletes every document from all six collections, children first.
    pub async fn clear_all(&self) -> DocResult<()> {
        for kind in EntityKind::REVERSED {
            let deleted = self.collection(kind).delete_many(doc! {}).await?;
            if deleted.deleted_count > 0 {
                info!(
                    collection = kind.name(),
                    deleted = deleted.deleted_count,
                    "cleared existing documents"
                );
            }
        }
        Ok(())
    }

    /// Document counts per collection, for cross-store verification.
    pub async fn counts(&self) -> DocResult<EntityCounts> {
        let mut counts = EntityCounts::default();
        for kind in EntityKind::ALL {
            let count = self.collection(kind).count_documents(doc! {}).await?;
            counts.set(kind, count);
        }
        Ok(counts)
    }
}
