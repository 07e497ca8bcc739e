//! # Query Battery (Document)
//!
//! The six timed queries in their MongoDB form: `find` for scans and
//! filters, aggregation pipelines where the relational side joins or
//! groups. Each returns the number of documents it produced; the harness
//! wraps the call in its timing loop.

use mongodb::bson::{doc, Document};
use mongodb::Cursor;

use storebench_core::{BenchQuery, EntityKind};

use crate::client::MongoStore;
use crate::error::DocResult;

/// Drains a cursor, counting documents. The battery measures full result
/// materialization, not just server-side execution, on both stores.
async fn drain(mut cursor: Cursor<Document>) -> DocResult<u64> {
    let mut count = 0u64;
    while cursor.advance().await? {
        count += 1;
    }
    Ok(count)
}

impl MongoStore {
    /// Runs one battery query, returning its result document count.
    pub async fn run_query(&self, query: BenchQuery) -> DocResult<u64> {
        match query {
            BenchQuery::SelectAll => self.find_all_products().await,
            BenchQuery::Filter => self.find_expensive_products().await,
            BenchQuery::Join => self.lookup_orders_users().await,
            BenchQuery::Aggregate => self.aggregate_orders_by_status().await,
            BenchQuery::ComplexJoin => self.complex_pipeline().await,
            BenchQuery::TextSearch => self.regex_search().await,
        }
    }

    async fn find_all_products(&self) -> DocResult<u64> {
        let cursor = self.collection(EntityKind::Products).find(doc! {}).await?;
        drain(cursor).await
    }

    async fn find_expensive_products(&self) -> DocResult<u64> {
        let cursor = self
            .collection(EntityKind::Products)
            .find(doc! { "price": { "$gt": 500 } })
            .await?;
        drain(cursor).await
    }

    async fn lookup_orders_users(&self) -> DocResult<u64> {
        let pipeline = vec![
            doc! { "$lookup": {
                "from": "users",
                "localField": "user_id",
                "foreignField": "_id",
                "as": "user",
            }},
            doc! { "$unwind": "$user" },
            doc! { "$project": {
                "order_number": 1,
                "user.username": 1,
                "user.email": 1,
                "total_amount": 1,
                "status": 1,
            }},
        ];
        let cursor = self
            .collection(EntityKind::Orders)
            .aggregate(pipeline)
            .await?;
        drain(cursor).await
    }

    async fn aggregate_orders_by_status(&self) -> DocResult<u64> {
        let pipeline = vec![doc! { "$group": {
            "_id": "$status",
            "count": { "$sum": 1 },
            "total": { "$sum": "$total_amount" },
        }}];
        let cursor = self
            .collection(EntityKind::Orders)
            .aggregate(pipeline)
            .await?;
        drain(cursor).await
    }

    /// Three chained `$lookup`s filtered on status = 'completed'. No
    /// generated order carries that status, so this measures pipeline cost
    /// with an empty result set, matching the relational side.
    async fn complex_pipeline(&self) -> DocResult<u64> {
        let pipeline = vec![
            doc! { "$match": { "status": "completed" } },
            doc! { "$lookup": {
                "from": "order_items",
                "localField": "_id",
                "foreignField": "order_id",
                "as": "items",
            }},
            doc! { "$unwind": "$items" },
            doc! { "$lookup": {
                "from": "products",
                "localField": "items.product_id",
                "foreignField": "_id",
                "as": "product",
            }},
            doc! { "$unwind": "$product" },
            doc! { "$lookup": {
                "from": "categories",
                "localField": "product.category_id",
                "foreignField": "_id",
                "as": "category",
            }},
            doc! { "$unwind": "$category" },
            doc! { "$project": {
                "order_number": 1,
                "product.name": 1,
                "items.quantity": 1,
                "items.total_price": 1,
                "category.name": 1,
            }},
        ];
        let cursor = self
            .collection(EntityKind::Orders)
            .aggregate(pipeline)
            .await?;
        drain(cursor).await
    }

    async fn regex_search(&self) -> DocResult<u64> {
        let cursor = self
            .collection(EntityKind::Products)
            .find(doc! { "name": { "$regex": "Pro", "$options": "i" } })
            .await?;
        drain(cursor).await
    }
}
