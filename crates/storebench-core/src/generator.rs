//! # Deterministic Dataset Generator
//!
//! Produces the six entity collections loaded into both stores. Output is
//! fully reproducible: same seed + same counts = identical structural,
//! relational, numeric and categorical fields on every run, for both stores.
//! Only `created_at` (wall-clock-relative) is outside that guarantee.
//!
//! ## Reseed-Per-Call Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every generator function builds a FRESH StdRng from DATASET_SEED       │
//! │  on entry:                                                              │
//! │                                                                         │
//! │    generate_users(100)    ──► StdRng::seed_from_u64(42) ──► stream A   │
//! │    generate_products(200) ──► StdRng::seed_from_u64(42) ──► stream A   │
//! │                                                                         │
//! │  Consequence: generate_products(200) yields the SAME products no       │
//! │  matter how many users were generated before it. Entropy accumulated   │
//! │  by earlier calls is deliberately discarded. The RNG is a local        │
//! │  value passed down explicitly; there is no shared mutable stream.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callers still invoke the functions in dependency order (categories →
//! users → products → orders → order_items → reviews) because downstream
//! generators sample ids from the upstream collections. `Dataset::generate`
//! encodes that order.

use chrono::{DateTime, Duration, Utc};
use fake::faker::address::en::{BuildingNumber, CityName, CountryName, StreetName};
use fake::faker::company::en::CatchPhrase;
use fake::faker::lorem::en::{Sentence, Sentences};
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult};
use crate::types::{
    Category, EntityCounts, EntityKind, Order, OrderItem, OrderStatus, PaymentMethod,
    PaymentStatus, Product, Review, User,
};

/// Fixed seed for every generator function.
pub const DATASET_SEED: u64 = 42;

// =============================================================================
// Counts
// =============================================================================

/// Requested collection sizes. Signed so a malformed CLI value is caught by
/// validation instead of silently wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetCounts {
    pub users: i64,
    pub products: i64,
    pub orders: i64,
    pub reviews: i64,
}

impl Default for DatasetCounts {
    fn default() -> Self {
        DatasetCounts {
            users: 100,
            products: 200,
            orders: 150,
            reviews: 80,
        }
    }
}

/// Validates a requested count, returning it as a usable length.
///
/// Ids are `i32`, so the usable range is `0..=i32::MAX`; anything outside
/// it is rejected here, before any allocation happens.
fn validate_count(entity: EntityKind, count: i64) -> CoreResult<usize> {
    if count < 0 || count > i32::MAX as i64 {
        return Err(CoreError::InvalidCount { entity, count });
    }
    Ok(count as usize)
}

// =============================================================================
// Field Helpers
// =============================================================================

/// Clips a generated string to the column width used by the relational
/// schema. Faker output is ASCII but the boundary check keeps this safe
/// for any input.
fn clip(s: String, max: usize) -> String {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_string()
}

/// Uniform 2dp decimal in `[min_cents, max_cents]`, drawn as integer cents
/// so the value is exact and no post-hoc rounding can shift it.
fn decimal_2dp(rng: &mut StdRng, min_cents: i64, max_cents: i64) -> Decimal {
    Decimal::new(rng.gen_range(min_cents..=max_cents), 2)
}

/// Timestamp `now - [1, max_days_ago]` days. Wall-clock-relative, so this
/// field is excluded from the determinism guarantee.
fn recent_timestamp(rng: &mut StdRng, max_days_ago: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(rng.gen_range(1..=max_days_ago))
}

/// Two to four lorem sentences, clipped to `max` characters.
fn lorem_text(rng: &mut StdRng, max: usize) -> String {
    let sentences: Vec<String> = Sentences(2..4).fake_with_rng(rng);
    clip(sentences.join(" "), max)
}

// =============================================================================
// Generator Functions
// =============================================================================

/// Returns the fixed 8-entry category list. No randomness; immutable.
pub fn generate_categories() -> Vec<Category> {
    let fixed: [(&str, &str); 8] = [
        ("Electronics", "Electronic devices and gadgets"),
        ("Clothing", "Fashion and apparel"),
        ("Books", "Books and publications"),
        ("Home & Garden", "Home improvement and garden"),
        ("Sports", "Sports equipment and accessories"),
        ("Toys", "Toys and games for all ages"),
        ("Beauty", "Beauty and personal care"),
        ("Food", "Food and beverages"),
    ];

    fixed
        .iter()
        .enumerate()
        .map(|(i, (name, description))| Category {
            id: i as i32 + 1,
            name: (*name).to_string(),
            description: (*description).to_string(),
        })
        .collect()
}

/// Generates `count` users with dense ids 1..=count.
///
/// Username and email are derived from the id (`user_0001`,
/// `user1@example.com`), so they are unique by construction.
pub fn generate_users(count: i64) -> CoreResult<Vec<User>> {
    let count = validate_count(EntityKind::Users, count)?;
    let mut rng = StdRng::seed_from_u64(DATASET_SEED);

    let mut users = Vec::with_capacity(count);
    for i in 1..=count as i32 {
        users.push(User {
            id: i,
            username: format!("user_{i:04}"),
            email: format!("user{i}@example.com"),
            first_name: FirstName().fake_with_rng(&mut rng),
            last_name: LastName().fake_with_rng(&mut rng),
            phone: clip(PhoneNumber().fake_with_rng(&mut rng), 15),
            address: clip(street_address(&mut rng), 100),
            city: clip(CityName().fake_with_rng(&mut rng), 50),
            country: clip(CountryName().fake_with_rng(&mut rng), 50),
            created_at: recent_timestamp(&mut rng, 365),
        });
    }
    Ok(users)
}

fn street_address(rng: &mut StdRng) -> String {
    let number: String = BuildingNumber().fake_with_rng(rng);
    let street: String = StreetName().fake_with_rng(rng);
    format!("{number} {street}")
}

/// Generates `count` products with dense ids 1..=count.
pub fn generate_products(count: i64) -> CoreResult<Vec<Product>> {
    let count = validate_count(EntityKind::Products, count)?;
    let mut rng = StdRng::seed_from_u64(DATASET_SEED);

    let mut products = Vec::with_capacity(count);
    for i in 1..=count as i32 {
        products.push(Product {
            id: i,
            sku: format!("SKU-{i:06}"),
            name: clip(CatchPhrase().fake_with_rng(&mut rng), 100),
            description: lorem_text(&mut rng, 200),
            category_id: rng.gen_range(1..=8),
            price: decimal_2dp(&mut rng, 999, 49_999),
            stock_quantity: rng.gen_range(0..=500),
            rating: decimal_2dp(&mut rng, 100, 500),
            review_count: rng.gen_range(0..=200),
            created_at: recent_timestamp(&mut rng, 365),
        });
    }
    Ok(products)
}

/// Generates `count` orders, each referencing a user sampled with
/// replacement from `users`.
///
/// `total_amount` is drawn independently of the order's eventual line items.
/// The stated total need not match the item sum; that mismatch is part of
/// the data model and is not reconciled here.
pub fn generate_orders(users: &[User], count: i64) -> CoreResult<Vec<Order>> {
    let count = validate_count(EntityKind::Orders, count)?;
    if count > 0 && users.is_empty() {
        return Err(CoreError::EmptySource {
            origin: EntityKind::Users,
            needed: EntityKind::Orders,
        });
    }
    let mut rng = StdRng::seed_from_u64(DATASET_SEED);

    let mut orders = Vec::with_capacity(count);
    for i in 1..=count as i32 {
        let user_id = sample(users, &mut rng).id;
        orders.push(Order {
            id: i,
            order_number: format!("ORD-{i:08}"),
            user_id,
            status: *sample(&OrderStatus::ALL, &mut rng),
            total_amount: decimal_2dp(&mut rng, 2_500, 50_000),
            shipping_address: clip(street_address(&mut rng), 100),
            shipping_city: clip(CityName().fake_with_rng(&mut rng), 50),
            shipping_country: clip(CountryName().fake_with_rng(&mut rng), 50),
            payment_method: *sample(&PaymentMethod::ALL, &mut rng),
            payment_status: *sample(&PaymentStatus::ALL, &mut rng),
            created_at: recent_timestamp(&mut rng, 90),
        });
    }
    Ok(orders)
}

/// Generates 1–4 line items per order, ids dense 1..=N across all orders.
///
/// `unit_price` is copied verbatim from the sampled product; `total_price`
/// is quantity × unit_price rounded half-to-even to 2dp here, once. Loaders
/// must persist both values as-is.
pub fn generate_order_items(orders: &[Order], products: &[Product]) -> CoreResult<Vec<OrderItem>> {
    if !orders.is_empty() && products.is_empty() {
        return Err(CoreError::EmptySource {
            origin: EntityKind::Products,
            needed: EntityKind::OrderItems,
        });
    }
    let mut rng = StdRng::seed_from_u64(DATASET_SEED);

    let mut items = Vec::new();
    let mut item_id = 1i32;
    for order in orders {
        let num_items = rng.gen_range(1..=4);
        for _ in 0..num_items {
            let product = sample(products, &mut rng);
            let quantity = rng.gen_range(1..=3);
            let total_price = (Decimal::from(quantity) * product.price).round_dp(2);
            items.push(OrderItem {
                id: item_id,
                order_id: order.id,
                product_id: product.id,
                quantity,
                unit_price: product.price,
                total_price,
            });
            item_id += 1;
        }
    }
    Ok(items)
}

/// Generates `count` reviews referencing products and users sampled with
/// replacement.
pub fn generate_reviews(
    users: &[User],
    products: &[Product],
    count: i64,
) -> CoreResult<Vec<Review>> {
    let count = validate_count(EntityKind::Reviews, count)?;
    if count > 0 {
        if products.is_empty() {
            return Err(CoreError::EmptySource {
                origin: EntityKind::Products,
                needed: EntityKind::Reviews,
            });
        }
        if users.is_empty() {
            return Err(CoreError::EmptySource {
                origin: EntityKind::Users,
                needed: EntityKind::Reviews,
            });
        }
    }
    let mut rng = StdRng::seed_from_u64(DATASET_SEED);

    let mut reviews = Vec::with_capacity(count);
    for i in 1..=count as i32 {
        let sentence: String = Sentence(4..6).fake_with_rng(&mut rng);
        reviews.push(Review {
            id: i,
            product_id: sample(products, &mut rng).id,
            user_id: sample(users, &mut rng).id,
            rating: rng.gen_range(1..=5),
            title: clip(sentence, 100),
            comment: lorem_text(&mut rng, 200),
            is_verified: rng.gen(),
            created_at: recent_timestamp(&mut rng, 60),
        });
    }
    Ok(reviews)
}

/// Draw-with-replacement from a non-empty slice.
///
/// Emptiness is validated by each generator before its loop starts.
fn sample<'a, T>(collection: &'a [T], rng: &mut StdRng) -> &'a T {
    match collection.choose(rng) {
        Some(item) => item,
        None => unreachable!("sampling from empty collection"),
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// The full generated object graph, held in memory between generation and
/// the two loads.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub categories: Vec<Category>,
    pub users: Vec<User>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
    pub reviews: Vec<Review>,
}

impl Dataset {
    /// Generates all six collections in dependency order.
    pub fn generate(counts: DatasetCounts) -> CoreResult<Dataset> {
        let categories = generate_categories();
        let users = generate_users(counts.users)?;
        let products = generate_products(counts.products)?;
        let orders = generate_orders(&users, counts.orders)?;
        let order_items = generate_order_items(&orders, &products)?;
        let reviews = generate_reviews(&users, &products, counts.reviews)?;

        Ok(Dataset {
            categories,
            users,
            products,
            orders,
            order_items,
            reviews,
        })
    }

    /// Expected per-entity counts, for verification against the stores.
    pub fn counts(&self) -> EntityCounts {
        EntityCounts {
            categories: self.categories.len() as u64,
            users: self.users.len() as u64,
            products: self.products.len() as u64,
            orders: self.orders.len() as u64,
            order_items: self.order_items.len() as u64,
            reviews: self.reviews.len() as u64,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_categories_are_fixed() {
        let categories = generate_categories();
        assert_eq!(categories.len(), 8);
        assert_eq!(categories[0].id, 1);
        assert_eq!(categories[0].name, "Electronics");
        assert_eq!(categories[7].id, 8);
        assert_eq!(categories[7].name, "Food");

        // Hand-authored list: two invocations are identical in full
        assert_eq!(categories, generate_categories());
    }

    #[test]
    fn test_users_derived_identity() {
        let users = generate_users(100).unwrap();
        assert_eq!(users.len(), 100);
        assert_eq!(users[0].id, 1);
        assert_eq!(users[0].username, "user_0001");
        assert_eq!(users[0].email, "user1@example.com");
        assert_eq!(users[99].username, "user_0100");

        // dense 1-based ids, no gaps
        for (i, user) in users.iter().enumerate() {
            assert_eq!(user.id, i as i32 + 1);
        }
    }

    #[test]
    fn test_users_deterministic_across_runs() {
        let a = generate_users(50).unwrap();
        let b = generate_users(50).unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.first_name, y.first_name);
            assert_eq!(x.last_name, y.last_name);
            assert_eq!(x.phone, y.phone);
            assert_eq!(x.address, y.address);
            assert_eq!(x.city, y.city);
            assert_eq!(x.country, y.country);
            // created_at is wall-clock-relative and intentionally not compared
        }
    }

    #[test]
    fn test_products_independent_of_prior_calls() {
        // The reseed-per-call contract: products are identical whether or
        // not users were generated first.
        let fresh = generate_products(200).unwrap();
        let _users = generate_users(100).unwrap();
        let after_users = generate_products(200).unwrap();

        for (x, y) in fresh.iter().zip(&after_users) {
            assert_eq!(x.name, y.name);
            assert_eq!(x.category_id, y.category_id);
            assert_eq!(x.price, y.price);
            assert_eq!(x.stock_quantity, y.stock_quantity);
            assert_eq!(x.rating, y.rating);
            assert_eq!(x.review_count, y.review_count);
        }
    }

    #[test]
    fn test_product_field_ranges() {
        let products = generate_products(200).unwrap();
        for p in &products {
            assert!((1..=8).contains(&p.category_id));
            assert!(p.price >= Decimal::new(999, 2) && p.price <= Decimal::new(49_999, 2));
            assert_eq!(p.price.scale(), 2);
            assert!((0..=500).contains(&p.stock_quantity));
            assert!(p.rating >= Decimal::new(100, 2) && p.rating <= Decimal::new(500, 2));
            assert!((0..=200).contains(&p.review_count));
            assert!(p.name.len() <= 100);
            assert!(p.description.len() <= 200);
        }
    }

    #[test]
    fn test_orders_reference_existing_users() {
        let users = generate_users(100).unwrap();
        let orders = generate_orders(&users, 150).unwrap();
        assert_eq!(orders.len(), 150);

        let user_ids: HashSet<i32> = users.iter().map(|u| u.id).collect();
        for o in &orders {
            assert!(user_ids.contains(&o.user_id));
            assert!(o.total_amount >= Decimal::new(2_500, 2));
            assert!(o.total_amount <= Decimal::new(50_000, 2));
        }
        assert_eq!(orders[0].order_number, "ORD-00000001");
    }

    #[test]
    fn test_orders_deterministic_tuple() {
        let users = generate_users(100).unwrap();
        let a = generate_orders(&users, 150).unwrap();
        let b = generate_orders(&users, 150).unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(
                (x.user_id, x.status, x.payment_method, x.payment_status),
                (y.user_id, y.status, y.payment_method, y.payment_status)
            );
            assert_eq!(x.total_amount, y.total_amount);
        }
    }

    #[test]
    fn test_order_items_bounds_and_integrity() {
        let users = generate_users(100).unwrap();
        let products = generate_products(200).unwrap();
        let orders = generate_orders(&users, 150).unwrap();
        let items = generate_order_items(&orders, &products).unwrap();

        // 1-4 items per order
        assert!(items.len() >= 150);
        assert!(items.len() <= 600);

        let order_ids: HashSet<i32> = orders.iter().map(|o| o.id).collect();
        let product_ids: HashSet<i32> = products.iter().map(|p| p.id).collect();
        for (i, item) in items.iter().enumerate() {
            assert_eq!(item.id, i as i32 + 1, "item ids must be dense");
            assert!(order_ids.contains(&item.order_id));
            assert!(product_ids.contains(&item.product_id));
            assert!((1..=3).contains(&item.quantity));
        }
    }

    #[test]
    fn test_order_item_pricing() {
        let users = generate_users(20).unwrap();
        let products = generate_products(50).unwrap();
        let orders = generate_orders(&users, 30).unwrap();
        let items = generate_order_items(&orders, &products).unwrap();

        for item in &items {
            let product = &products[(item.product_id - 1) as usize];
            assert_eq!(item.unit_price, product.price, "unit_price copied verbatim");
            assert_eq!(
                item.total_price,
                (Decimal::from(item.quantity) * item.unit_price).round_dp(2)
            );
        }
    }

    #[test]
    fn test_reviews_reference_existing_entities() {
        let users = generate_users(100).unwrap();
        let products = generate_products(200).unwrap();
        let reviews = generate_reviews(&users, &products, 80).unwrap();
        assert_eq!(reviews.len(), 80);

        let user_ids: HashSet<i32> = users.iter().map(|u| u.id).collect();
        let product_ids: HashSet<i32> = products.iter().map(|p| p.id).collect();
        for r in &reviews {
            assert!(user_ids.contains(&r.user_id));
            assert!(product_ids.contains(&r.product_id));
            assert!((1..=5).contains(&r.rating));
        }
    }

    #[test]
    fn test_negative_count_rejected() {
        assert_eq!(
            generate_users(-1).unwrap_err(),
            CoreError::InvalidCount {
                entity: EntityKind::Users,
                count: -1
            }
        );
        assert!(generate_products(-7).is_err());
        assert!(generate_orders(&[], -1).is_err());
        assert!(generate_reviews(&[], &[], -1).is_err());
    }

    #[test]
    fn test_count_beyond_id_range_rejected() {
        // ids are i32; a count past i32::MAX must fail fast instead of
        // attempting a multi-gigabyte allocation or truncating the loop
        let too_big = (1i64 << 32) + 2;
        assert_eq!(
            generate_users(too_big).unwrap_err(),
            CoreError::InvalidCount {
                entity: EntityKind::Users,
                count: too_big
            }
        );
        assert!(generate_products(i32::MAX as i64 + 1).is_err());
        let users = generate_users(1).unwrap();
        assert!(generate_orders(&users, too_big).is_err());
        assert!(generate_reviews(&users, &[], too_big).is_err());
    }

    #[test]
    fn test_empty_source_rejected() {
        let products = generate_products(10).unwrap();
        let err = generate_orders(&[], 5).unwrap_err();
        assert_eq!(
            err,
            CoreError::EmptySource {
                origin: EntityKind::Users,
                needed: EntityKind::Orders,
            }
        );
        // zero requested from empty sources is fine
        assert!(generate_orders(&[], 0).unwrap().is_empty());
        assert!(generate_reviews(&[], &products, 0).unwrap().is_empty());
    }

    #[test]
    fn test_full_dataset_counts() {
        let dataset = Dataset::generate(DatasetCounts::default()).unwrap();
        let counts = dataset.counts();
        assert_eq!(counts.categories, 8);
        assert_eq!(counts.users, 100);
        assert_eq!(counts.products, 200);
        assert_eq!(counts.orders, 150);
        assert_eq!(counts.reviews, 80);
        assert!(counts.order_items >= 150 && counts.order_items <= 600);

        // two full runs agree on the derived item count too
        let again = Dataset::generate(DatasetCounts::default()).unwrap();
        assert_eq!(counts.order_items, again.counts().order_items);
    }

    #[test]
    fn test_clip_respects_char_boundaries() {
        assert_eq!(clip("hello".to_string(), 10), "hello");
        assert_eq!(clip("hello world".to_string(), 5), "hello");
        // multi-byte char straddling the limit is dropped whole
        assert_eq!(clip("ab€cd".to_string(), 3), "ab");
    }
}
