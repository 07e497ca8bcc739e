//! # Entity Types
//!
//! The six entity kinds shared by both target stores.
//!
//! ## Entity Graph
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Entity Dependencies                             │
//! │                                                                         │
//! │   Category ◄──── Product ◄──┬── OrderItem ──► Order ──► User           │
//! │                             │                            ▲              │
//! │                             └── Review ──────────────────┘              │
//! │                                                                         │
//! │   Generation order: categories → users → products → orders             │
//! │                     → order_items → reviews                             │
//! │   (every FK points at an already-generated collection)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity carries a dense, 1-based `id: i32`. The relational store uses
//! it as the SERIAL primary key (inserted verbatim, sequence resynced after
//! load); the document store mirrors it as the document `_id` so per-row
//! comparison across stores is direct.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Entity Kind
// =============================================================================

/// The six entity kinds, used for table/collection naming and count reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Categories,
    Users,
    Products,
    Orders,
    OrderItems,
    Reviews,
}

impl EntityKind {
    /// All kinds in dependency order (safe insert order).
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Categories,
        EntityKind::Users,
        EntityKind::Products,
        EntityKind::Orders,
        EntityKind::OrderItems,
        EntityKind::Reviews,
    ];

    /// All kinds in reverse dependency order (safe delete order).
    pub const REVERSED: [EntityKind; 6] = [
        EntityKind::Reviews,
        EntityKind::OrderItems,
        EntityKind::Orders,
        EntityKind::Products,
        EntityKind::Users,
        EntityKind::Categories,
    ];

    /// Table name (relational) / collection name (document).
    /// The two stores deliberately share naming so reports line up.
    pub const fn name(&self) -> &'static str {
        match self {
            EntityKind::Categories => "categories",
            EntityKind::Users => "users",
            EntityKind::Products => "products",
            EntityKind::Orders => "orders",
            EntityKind::OrderItems => "order_items",
            EntityKind::Reviews => "reviews",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Category
// =============================================================================

/// A product category. Fixed set of 8, hand-authored (no randomness).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    /// Unique display name ("Electronics", "Clothing", ...).
    pub name: String,
    pub description: String,
}

// =============================================================================
// User
// =============================================================================

/// A customer account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    /// Unique, derived from id: `user_0001`.
    pub username: String,
    /// Unique, derived from id: `user1@example.com`.
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    /// Unique, derived from id: `SKU-000001`.
    pub sku: String,
    pub name: String,
    pub description: String,
    /// FK → Category (1..=8).
    pub category_id: i32,
    /// Uniform 9.99–499.99, exactly 2dp at generation time.
    pub price: Decimal,
    pub stock_quantity: i32,
    /// Uniform 1.00–5.00, 2dp.
    pub rating: Decimal,
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Order
// =============================================================================

/// Fulfillment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Paypal,
    BankTransfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::Paypal,
        PaymentMethod::BankTransfer,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::DebitCard => "debit_card",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::BankTransfer => "bank_transfer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 3] = [
        PaymentStatus::Pending,
        PaymentStatus::Paid,
        PaymentStatus::Refunded,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

/// A customer order.
///
/// `total_amount` is generated independently of the order's line items and is
/// NOT their sum. This mirrors the source data model on purpose; reconciling
/// the two would change observable behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i32,
    /// Unique, derived from id: `ORD-00000001`.
    pub order_number: String,
    /// FK → User, sampled with replacement.
    pub user_id: i32,
    pub status: OrderStatus,
    /// Uniform 25.00–500.00, 2dp. Independent of line items (see above).
    pub total_amount: Decimal,
    pub shipping_address: String,
    pub shipping_city: String,
    pub shipping_country: String,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item. `unit_price` is the sampled product's price frozen at
/// generation time; loaders persist it verbatim and never re-derive it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i32,
    /// FK → Order.
    pub order_id: i32,
    /// FK → Product, sampled with replacement.
    pub product_id: i32,
    /// Uniform 1–3.
    pub quantity: i32,
    pub unit_price: Decimal,
    /// quantity × unit_price, rounded half-to-even to 2dp at generation time.
    pub total_price: Decimal,
}

// =============================================================================
// Review
// =============================================================================

/// A product review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i32,
    /// FK → Product, sampled with replacement.
    pub product_id: i32,
    /// FK → User, sampled with replacement.
    pub user_id: i32,
    /// Uniform 1–5 (CHECK-constrained in the relational schema).
    pub rating: i32,
    pub title: String,
    pub comment: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Counts
// =============================================================================

/// Per-entity record counts, as reported by a store after loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCounts {
    pub categories: u64,
    pub users: u64,
    pub products: u64,
    pub orders: u64,
    pub order_items: u64,
    pub reviews: u64,
}

impl EntityCounts {
    pub fn get(&self, kind: EntityKind) -> u64 {
        match kind {
            EntityKind::Categories => self.categories,
            EntityKind::Users => self.users,
            EntityKind::Products => self.products,
            EntityKind::Orders => self.orders,
            EntityKind::OrderItems => self.order_items,
            EntityKind::Reviews => self.reviews,
        }
    }

    pub fn set(&mut self, kind: EntityKind, count: u64) {
        match kind {
            EntityKind::Categories => self.categories = count,
            EntityKind::Users => self.users = count,
            EntityKind::Products => self.products = count,
            EntityKind::Orders => self.orders = count,
            EntityKind::OrderItems => self.order_items = count,
            EntityKind::Reviews => self.reviews = count,
        }
    }

    /// Sum across all six entities.
    pub fn total(&self) -> u64 {
        EntityKind::ALL.iter().map(|k| self.get(*k)).sum()
    }
}

// =============================================================================
// Load Report
// =============================================================================

/// Outcome of loading one entity collection into one store.
#[derive(Debug, Clone, Serialize)]
pub struct TableLoad {
    pub entity: EntityKind,
    /// Rows/documents actually persisted.
    pub inserted: u64,
    /// Error message if the collection was rolled back / skipped.
    pub error: Option<String>,
}

/// Outcome of a full best-effort load into one store.
///
/// A per-row failure rolls back the enclosing unit of work for that entity
/// and is recorded here; the load then continues with the next entity.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub tables: Vec<TableLoad>,
}

impl LoadReport {
    pub fn record_ok(&mut self, entity: EntityKind, inserted: u64) {
        self.tables.push(TableLoad {
            entity,
            inserted,
            error: None,
        });
    }

    pub fn record_failed(&mut self, entity: EntityKind, error: impl Into<String>) {
        self.tables.push(TableLoad {
            entity,
            inserted: 0,
            error: Some(error.into()),
        });
    }

    /// True when every entity loaded without a recorded failure.
    pub fn is_complete(&self) -> bool {
        self.tables.iter().all(|t| t.error.is_none())
    }

    pub fn total_inserted(&self) -> u64 {
        self.tables.iter().map(|t| t.inserted).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_ordering() {
        // REVERSED must be ALL backwards, so deletes mirror inserts.
        let mut reversed = EntityKind::ALL;
        reversed.reverse();
        assert_eq!(reversed, EntityKind::REVERSED);
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(OrderStatus::Pending.as_str(), "pending");
        assert_eq!(PaymentMethod::CreditCard.as_str(), "credit_card");
        assert_eq!(PaymentStatus::Refunded.as_str(), "refunded");

        // serde names must match as_str so JSON artifacts and SQL text agree
        let json = serde_json::to_string(&PaymentMethod::BankTransfer).unwrap();
        assert_eq!(json, "\"bank_transfer\"");
    }

    #[test]
    fn test_entity_counts_total() {
        let mut counts = EntityCounts::default();
        counts.set(EntityKind::Users, 100);
        counts.set(EntityKind::Products, 200);
        assert_eq!(counts.total(), 300);
        assert_eq!(counts.get(EntityKind::Users), 100);
    }

    #[test]
    fn test_load_report_completeness() {
        let mut report = LoadReport::default();
        report.record_ok(EntityKind::Categories, 8);
        assert!(report.is_complete());

        report.record_failed(EntityKind::Users, "duplicate username");
        assert!(!report.is_complete());
        assert_eq!(report.total_inserted(), 8);
    }
}
