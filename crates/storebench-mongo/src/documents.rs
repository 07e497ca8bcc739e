//! # Document Mapping
//!
//! Explicit entity → BSON document mapping. Each generated entity's `id`
//! becomes the document `_id`, so both stores share primary keys and per-row
//! comparison across them is direct.
//!
//! Monetary `Decimal` fields are stored as `f64`. The generated values carry
//! exactly two decimal places, all of which fit an f64 without drift at the
//! magnitudes in play (< 10^6), so cross-store value comparison still holds.

use bson::{doc, DateTime, Document};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use storebench_core::{Category, Order, OrderItem, Product, Review, User};

/// Decimal → f64 for document storage. Generated values are always finite
/// and small, so lossy conversion cannot fail in practice.
fn money(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

pub fn category_doc(c: &Category) -> Document {
    doc! {
        "_id": c.id,
        "name": &c.name,
        "description": &c.description,
    }
}

pub fn user_doc(u: &User) -> Document {
    doc! {
        "_id": u.id,
        "username": &u.username,
        "email": &u.email,
        "first_name": &u.first_name,
        "last_name": &u.last_name,
        "phone": &u.phone,
        "address": &u.address,
        "city": &u.city,
        "country": &u.country,
        "created_at": DateTime::from_chrono(u.created_at),
    }
}

pub fn product_doc(p: &Product) -> Document {
    doc! {
        "_id": p.id,
        "sku": &p.sku,
        "name": &p.name,
        "description": &p.description,
        "category_id": p.category_id,
        "price": money(p.price),
        "stock_quantity": p.stock_quantity,
        "rating": money(p.rating),
        "review_count": p.review_count,
        "created_at": DateTime::from_chrono(p.created_at),
    }
}

pub fn order_doc(o: &Order) -> Document {
    doc! {
        "_id": o.id,
        "order_number": &o.order_number,
        "user_id": o.user_id,
        "status": o.status.as_str(),
        "total_amount": money(o.total_amount),
        "shipping_address": &o.shipping_address,
        "shipping_city": &o.shipping_city,
        "shipping_country": &o.shipping_country,
        "payment_method": o.payment_method.as_str(),
        "payment_status": o.payment_status.as_str(),
        "created_at": DateTime::from_chrono(o.created_at),
    }
}

pub fn order_item_doc(i: &OrderItem) -> Document {
    doc! {
        "_id": i.id,
        "order_id": i.order_id,
        "product_id": i.product_id,
        "quantity": i.quantity,
        "unit_price": money(i.unit_price),
        "total_price": money(i.total_price),
    }
}

pub fn review_doc(r: &Review) -> Document {
    doc! {
        "_id": r.id,
        "product_id": r.product_id,
        "user_id": r.user_id,
        "rating": r.rating,
        "title": &r.title,
        "comment": &r.comment,
        "is_verified": r.is_verified,
        "created_at": DateTime::from_chrono(r.created_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storebench_core::{Dataset, DatasetCounts};

    #[test]
    fn test_id_becomes_document_id() {
        let dataset = Dataset::generate(DatasetCounts::default()).unwrap();
        let first = &dataset.products[0];
        let doc = product_doc(first);
        assert_eq!(doc.get_i32("_id").unwrap(), first.id);
        assert_eq!(doc.get_str("sku").unwrap(), first.sku);
    }

    #[test]
    fn test_money_is_exact_at_2dp() {
        // 2dp decimals under a million convert to f64 without drift
        let value = Decimal::new(49_999, 2); // 499.99
        assert_eq!(money(value), 499.99);
        assert_eq!(money(Decimal::new(999, 2)), 9.99);
    }

    #[test]
    fn test_order_enums_stored_as_wire_names() {
        let dataset = Dataset::generate(DatasetCounts::default()).unwrap();
        let doc = order_doc(&dataset.orders[0]);
        let status = doc.get_str("status").unwrap();
        assert!(matches!(
            status,
            "pending" | "processing" | "shipped" | "delivered" | "cancelled"
        ));
        assert!(doc.get_str("payment_method").is_ok());
    }

    #[test]
    fn test_order_item_doc_carries_frozen_prices() {
        let dataset = Dataset::generate(DatasetCounts::default()).unwrap();
        let item = &dataset.order_items[0];
        let doc = order_item_doc(item);
        assert_eq!(doc.get_f64("unit_price").unwrap(), money(item.unit_price));
        assert_eq!(doc.get_i32("quantity").unwrap(), item.quantity);
    }
}
