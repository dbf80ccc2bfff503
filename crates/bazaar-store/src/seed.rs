//! # Development Data Set
//!
//! Fixed users, listings, orders and reviews for local development and
//! tests. Ids are short stable strings ("1", "101", ...) so they can be
//! typed by hand; entities created at runtime get UUIDs.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  Users      1 john@seller.com (SELLER)   2 jane@buyer.com (BUYER)│
//! │             3 bob@seller.com  (SELLER)   4 alice@buyer.com(BUYER)│
//! │  Products   101-108, sellers 1 and 3, all ACTIVE                 │
//! │  Orders     201 (jane, DELIVERED) 202 (alice, SHIPPED)           │
//! │             203 (jane, PENDING)                                  │
//! │  Reviews    401-404, by the two buyers                           │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Orders and reviews are historical: seeding them does not touch stock.

use chrono::{DateTime, TimeZone, Utc};

use bazaar_core::{
    Order, OrderItem, OrderStatus, Product, ProductCategory, ProductCondition, ProductStatus,
    Review, User, UserRole,
};

use crate::store::MarketStore;

/// Password every seeded account is created with.
pub const SEED_PASSWORD: &str = "password123";

/// Midnight UTC on the given day.
fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .earliest()
        .unwrap_or_default()
}

/// Fills `store` with the data set. Every account gets `password_hash`.
pub(crate) fn load(store: &mut MarketStore, password_hash: &str) {
    use ProductCategory::*;
    use ProductCondition::*;

    let users = [
        ("1", "john@seller.com", "John Doe", UserRole::Seller, "+1234567890", "123 Main St, New York, NY", day(2024, 1, 15)),
        ("2", "jane@buyer.com", "Jane Smith", UserRole::Buyer, "+1987654321", "456 Oak Ave, Los Angeles, CA", day(2024, 2, 20)),
        ("3", "bob@seller.com", "Bob Johnson", UserRole::Seller, "+1122334455", "789 Pine Rd, Chicago, IL", day(2024, 3, 10)),
        ("4", "alice@buyer.com", "Alice Williams", UserRole::Buyer, "+1555666777", "321 Elm St, Miami, FL", day(2024, 4, 5)),
    ];

    store.users = users
        .into_iter()
        .map(|(id, email, name, role, phone, address, created_at)| User {
            id: id.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            name: name.to_string(),
            role,
            phone: Some(phone.to_string()),
            address: Some(address.to_string()),
            created_at,
        })
        .collect();

    let products: [(&str, &str, &str, i64, ProductCategory, ProductCondition, &[&str], i64, &str, DateTime<Utc>); 8] = [
        ("101", "iPhone 15 Pro", "Latest iPhone with A17 Pro chip, titanium design, and amazing camera system", 99999, Electronics, New, &["https://example.com/iphone15-1.jpg", "https://example.com/iphone15-2.jpg"], 15, "1", day(2024, 5, 1)),
        ("102", "MacBook Pro 16\"", "M3 Max chip, 36GB RAM, 1TB SSD. Perfect for developers and creators", 249999, Electronics, New, &["https://example.com/macbook-1.jpg"], 8, "1", day(2024, 5, 3)),
        ("103", "Nike Air Max 2024", "Premium running shoes with advanced cushioning technology", 15999, Sports, New, &["https://example.com/nike-1.jpg", "https://example.com/nike-2.jpg"], 25, "3", day(2024, 5, 10)),
        ("104", "Leather Sofa - 3 Seater", "Genuine leather sofa in excellent condition, barely used", 49999, Home, LikeNew, &["https://example.com/sofa-1.jpg"], 3, "3", day(2024, 5, 15)),
        ("105", "The Great Gatsby - First Edition", "Rare first edition of F. Scott Fitzgerald's masterpiece", 120000, Books, Good, &["https://example.com/gatsby-1.jpg"], 1, "1", day(2024, 6, 1)),
        ("106", "Designer Handbag", "Authentic Louis Vuitton handbag with certificate", 189999, Fashion, LikeNew, &["https://example.com/bag-1.jpg", "https://example.com/bag-2.jpg"], 2, "3", day(2024, 6, 10)),
        ("107", "Gaming Mouse - RGB", "High precision gaming mouse with customizable RGB lighting", 7999, Electronics, New, &["https://example.com/mouse-1.jpg"], 30, "1", day(2024, 6, 15)),
        ("108", "Yoga Mat Premium", "Extra thick yoga mat with carrying strap", 4599, Sports, New, &["https://example.com/yoga-1.jpg"], 50, "3", day(2024, 6, 20)),
    ];

    store.products = products
        .into_iter()
        .map(
            |(id, title, description, price_cents, category, condition, images, stock, seller_id, created_at)| Product {
                id: id.to_string(),
                title: title.to_string(),
                description: description.to_string(),
                price_cents,
                category,
                condition,
                status: ProductStatus::Active,
                images: images.iter().map(|s| s.to_string()).collect(),
                stock,
                seller_id: seller_id.to_string(),
                created_at,
            },
        )
        .collect();

    let item = |id: &str, product_id: &str, quantity: i64, price_cents: i64| OrderItem {
        id: id.to_string(),
        product_id: product_id.to_string(),
        quantity,
        price_cents,
    };

    let orders = [
        ("201", "2", vec![item("301", "103", 2, 31998), item("302", "107", 1, 7999)], OrderStatus::Delivered, day(2024, 6, 25)),
        ("202", "4", vec![item("303", "101", 1, 99999)], OrderStatus::Shipped, day(2024, 7, 1)),
        ("203", "2", vec![item("304", "108", 3, 13797)], OrderStatus::Pending, day(2024, 7, 5)),
    ];

    store.orders = orders
        .into_iter()
        .map(|(id, buyer_id, items, status, created_at)| Order {
            id: id.to_string(),
            buyer_id: buyer_id.to_string(),
            total_price_cents: items.iter().map(|i| i.price_cents).sum(),
            items,
            status,
            created_at,
        })
        .collect();

    let reviews = [
        ("401", "103", "2", 5, "Amazing shoes! Very comfortable for running.", day(2024, 6, 28)),
        ("402", "107", "2", 4, "Great mouse, but a bit pricey.", day(2024, 6, 29)),
        ("403", "101", "4", 5, "Best phone I've ever owned!", day(2024, 7, 3)),
        ("404", "104", "4", 5, "Perfect sofa for my living room. Excellent quality!", day(2024, 7, 4)),
    ];

    store.reviews = reviews
        .into_iter()
        .map(|(id, product_id, user_id, rating, comment, created_at)| Review {
            id: id.to_string(),
            product_id: product_id.to_string(),
            user_id: user_id.to_string(),
            rating,
            comment: comment.to_string(),
            created_at,
        })
        .collect();
}
