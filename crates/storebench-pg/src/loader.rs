//! # Relational Loader
//!
//! Persists the generated dataset into PostgreSQL.
//!
//! ## Load Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. DELETE existing rows in reverse dependency order                    │
//! │     (reviews → order_items → orders → products → users → categories)    │
//! │                                                                         │
//! │  2. Per table, in dependency order, inside ONE transaction:             │
//! │     insert every row with its GENERATED id (no auto-assignment).        │
//! │     A row failure rolls the table back, is recorded in the report,      │
//! │     and the load continues with the next table. No retries.             │
//! │                                                                         │
//! │  3. setval() each <table>_id_seq to max(id) so later manual inserts     │
//! │     don't collide with the explicit ids.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values are persisted verbatim; monetary fields were already rounded at
//! generation time and are never re-derived here.

use sqlx::{Postgres, Transaction};
use tracing::{info, warn};

use storebench_core::{
    Category, Dataset, EntityCounts, EntityKind, LoadReport, Order, OrderItem, Product, Review,
    User,
};

use crate::error::StoreResult;
use crate::pool::PgStore;

impl PgStore {
    /// Loads the full dataset, best-effort per table. Connection-level
    /// errors abort; constraint errors are confined to their table.
    pub async fn load(&self, dataset: &Dataset) -> StoreResult<LoadReport> {
        self.clear_all().await?;

        let mut report = LoadReport::default();

        let mut tx = self.pool().begin().await?;
        let outcome = insert_categories(&mut tx, &dataset.categories).await;
        settle(&mut report, EntityKind::Categories, tx, outcome).await?;

        let mut tx = self.pool().begin().await?;
        let outcome = insert_users(&mut tx, &dataset.users).await;
        settle(&mut report, EntityKind::Users, tx, outcome).await?;

        let mut tx = self.pool().begin().await?;
        let outcome = insert_products(&mut tx, &dataset.products).await;
        settle(&mut report, EntityKind::Products, tx, outcome).await?;

        let mut tx = self.pool().begin().await?;
        let outcome = insert_orders(&mut tx, &dataset.orders).await;
        settle(&mut report, EntityKind::Orders, tx, outcome).await?;

        let mut tx = self.pool().begin().await?;
        let outcome = insert_order_items(&mut tx, &dataset.order_items).await;
        settle(&mut report, EntityKind::OrderItems, tx, outcome).await?;

        let mut tx = self.pool().begin().await?;
        let outcome = insert_reviews(&mut tx, &dataset.reviews).await;
        settle(&mut report, EntityKind::Reviews, tx, outcome).await?;

        self.resync_sequences().await?;

        info!(
            inserted = report.total_inserted(),
            complete = report.is_complete(),
            "PostgreSQL load finished"
        );
        Ok(report)
    }

    /// Deletes all existing rows, children before parents.
    async fn clear_all(&self) -> StoreResult<()> {
        let mut tx = self.pool().begin().await?;
        for entity in EntityKind::REVERSED {
            sqlx::query(&format!("DELETE FROM {}", entity.name()))
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        info!("cleared existing rows");
        Ok(())
    }

    /// Points each SERIAL sequence at max(id) so future inserts that rely
    /// on auto-assignment don't collide with the explicit ids.
    async fn resync_sequences(&self) -> StoreResult<()> {
        for entity in EntityKind::ALL {
            let table = entity.name();
            let stmt = format!(
                "SELECT setval('{table}_id_seq', (SELECT COALESCE(MAX(id), 1) FROM {table}))"
            );
            sqlx::query(&stmt).execute(self.pool()).await?;
        }
        Ok(())
    }

    /// Per-entity row counts, for cross-store verification.
    pub async fn counts(&self) -> StoreResult<EntityCounts> {
        let mut counts = EntityCounts::default();
        for entity in EntityKind::ALL {
            let n: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", entity.name()))
                .fetch_one(self.pool())
                .await?;
            counts.set(entity, n as u64);
        }
        Ok(counts)
    }
}

/// Commits a table's transaction on success; rolls it back and records the
/// failure on error. The load then continues with the next statement type,
/// exactly once, no retry.
async fn settle(
    report: &mut LoadReport,
    entity: EntityKind,
    tx: Transaction<'_, Postgres>,
    outcome: Result<u64, sqlx::Error>,
) -> StoreResult<()> {
    match outcome {
        Ok(inserted) => {
            tx.commit().await?;
            info!(table = %entity, rows = inserted, "table loaded");
            report.record_ok(entity, inserted);
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(table = %entity, error = %rollback_err, "rollback failed");
            }
            warn!(table = %entity, error = %e, "table load failed, rolled back");
            report.record_failed(entity, e.to_string());
        }
    }
    Ok(())
}

// =============================================================================
// Per-Table Inserts
// =============================================================================

async fn insert_categories(
    tx: &mut Transaction<'_, Postgres>,
    rows: &[Category],
) -> Result<u64, sqlx::Error> {
    for cat in rows {
        sqlx::query("INSERT INTO categories (id, name, description) VALUES ($1, $2, $3)")
            .bind(cat.id)
            .bind(&cat.name)
            .bind(&cat.description)
            .execute(&mut **tx)
            .await?;
    }
    Ok(rows.len() as u64)
}

async fn insert_users(
    tx: &mut Transaction<'_, Postgres>,
    rows: &[User],
) -> Result<u64, sqlx::Error> {
    for user in rows {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, first_name, last_name,
                               phone, address, city, country, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone)
        .bind(&user.address)
        .bind(&user.city)
        .bind(&user.country)
        .bind(user.created_at)
        .execute(&mut **tx)
        .await?;
    }
    Ok(rows.len() as u64)
}

async fn insert_products(
    tx: &mut Transaction<'_, Postgres>,
    rows: &[Product],
) -> Result<u64, sqlx::Error> {
    for product in rows {
        sqlx::query(
            r#"
            INSERT INTO products (id, sku, name, description, category_id,
                                  price, stock_quantity, rating, review_count, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(product.id)
        .bind(&product.sku)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.category_id)
        .bind(product.price)
        .bind(product.stock_quantity)
        .bind(product.rating)
        .bind(product.review_count)
        .bind(product.created_at)
        .execute(&mut **tx)
        .await?;
    }
    Ok(rows.len() as u64)
}

async fn insert_orders(
    tx: &mut Transaction<'_, Postgres>,
    rows: &[Order],
) -> Result<u64, sqlx::Error> {
    for order in rows {
        sqlx::query(
            r#"
            INSERT INTO orders (id, order_number, user_id, status, total_amount,
                                shipping_address, shipping_city, shipping_country,
                                payment_method, payment_status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(order.id)
        .bind(&order.order_number)
        .bind(order.user_id)
        .bind(order.status.as_str())
        .bind(order.total_amount)
        .bind(&order.shipping_address)
        .bind(&order.shipping_city)
        .bind(&order.shipping_country)
        .bind(order.payment_method.as_str())
        .bind(order.payment_status.as_str())
        .bind(order.created_at)
        .execute(&mut **tx)
        .await?;
    }
    Ok(rows.len() as u64)
}

async fn insert_order_items(
    tx: &mut Transaction<'_, Postgres>,
    rows: &[OrderItem],
) -> Result<u64, sqlx::Error> {
    for item in rows {
        sqlx::query(
            r#"
            INSERT INTO order_items (id, order_id, product_id, quantity, unit_price, total_price)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(item.id)
        .bind(item.order_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(item.unit_price)
        .bind(item.total_price)
        .execute(&mut **tx)
        .await?;
    }
    Ok(rows.len() as u64)
}

async fn insert_reviews(
    tx: &mut Transaction<'_, Postgres>,
    rows: &[Review],
) -> Result<u64, sqlx::Error> {
    for review in rows {
        sqlx::query(
            r#"
            INSERT INTO reviews (id, product_id, user_id, rating, title,
                                 comment, is_verified, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(review.id)
        .bind(review.product_id)
        .bind(review.user_id)
        .bind(review.rating)
        .bind(&review.title)
        .bind(&review.comment)
        .bind(review.is_verified)
        .bind(review.created_at)
        .execute(&mut **tx)
        .await?;
    }
    Ok(rows.len() as u64)
}
