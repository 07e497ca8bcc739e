//! # Collection & Index Setup
//!
//! Creates the six collections and their indexes. MongoDB would create
//! collections lazily on first insert; creating them explicitly keeps the
//! setup step symmetric with the relational DDL and makes "already exists"
//! a visible, tolerated outcome on both sides.
//!
//! ## Index Plan
//! ```text
//! UNIQUE                          SECONDARY (FK lookups)
//! ──────                          ──────────────────────
//! categories.name                 products.category_id, products.price
//! users.username                  orders.user_id, orders.status
//! users.email                     order_items.order_id
//! products.sku                    order_items.product_id
//! orders.order_number             reviews.product_id, reviews.user_id
//! ```

use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use tracing::info;

use storebench_core::EntityKind;

use crate::client::MongoStore;
use crate::error::{DocError, DocResult};

/// Unique single-field indexes: (collection, field).
const UNIQUE_INDEXES: [(EntityKind, &str); 5] = [
    (EntityKind::Categories, "name"),
    (EntityKind::Users, "username"),
    (EntityKind::Users, "email"),
    (EntityKind::Products, "sku"),
    (EntityKind::Orders, "order_number"),
];

/// Secondary single-field indexes backing the FK-style lookups plus the
/// two filter columns the battery hits (price, status).
const SECONDARY_INDEXES: [(EntityKind, &str); 8] = [
    (EntityKind::Products, "category_id"),
    (EntityKind::Products, "price"),
    (EntityKind::Orders, "user_id"),
    (EntityKind::Orders, "status"),
    (EntityKind::OrderItems, "order_id"),
    (EntityKind::OrderItems, "product_id"),
    (EntityKind::Reviews, "product_id"),
    (EntityKind::Reviews, "user_id"),
];

impl MongoStore {
    /// Creates all six collections, skipping any that already exist.
    pub async fn create_collections(&self) -> DocResult<()> {
        for kind in EntityKind::ALL {
            match self.db().create_collection(kind.name()).await {
                Ok(()) => info!(collection = kind.name(), "collection created"),
                Err(e) => {
                    let err = DocError::from(e);
                    if err.is_namespace_exists() {
                        info!(collection = kind.name(), "collection already exists");
                    } else {
                        return Err(err);
                    }
                }
            }
        }
        Ok(())
    }

    /// Creates the unique and secondary indexes. `createIndexes` is
    /// idempotent for identical specs, so re-runs pass through cleanly.
    pub async fn create_indexes(&self) -> DocResult<()> {
        for (kind, field) in UNIQUE_INDEXES {
            let model = IndexModel::builder()
                .keys(doc! { field: 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build();
            self.collection(kind).create_index(model).await?;
            info!(collection = kind.name(), field, "unique index ready");
        }

        for (kind, field) in SECONDARY_INDEXES {
            let model = IndexModel::builder().keys(doc! { field: 1 }).build();
            self.collection(kind).create_index(model).await?;
            info!(collection = kind.name(), field, "secondary index ready");
        }

        Ok(())
    }

    /// Drops all six collections. Dropping a missing collection is a no-op
    /// on the server, so this is safe on a fresh database.
    pub async fn drop_all(&self) -> DocResult<()> {
        for kind in EntityKind::REVERSED {
            self.collection(kind).drop().await?;
            info!(collection = kind.name(), "collection dropped");
        }
        Ok(())
    }

    /// Collection names currently present in the database.
    pub async fn list_collections(&self) -> DocResult<Vec<String>> {
        let mut names = self.db().list_collection_names().await?;
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_collection_has_an_index() {
        // each entity appears in at least one index spec, so no collection
        // is left to collection-scan its FK lookups
        for kind in EntityKind::ALL {
            let covered = UNIQUE_INDEXES.iter().any(|(k, _)| *k == kind)
                || SECONDARY_INDEXES.iter().any(|(k, _)| *k == kind);
            assert!(covered, "{kind} has no index");
        }
    }

    #[test]
    fn test_unique_fields_match_generated_identity() {
        let fields: Vec<&str> = UNIQUE_INDEXES.iter().map(|(_, f)| *f).collect();
        assert!(fields.contains(&"username"));
        assert!(fields.contains(&"sku"));
        assert!(fields.contains(&"order_number"));
    }
}
