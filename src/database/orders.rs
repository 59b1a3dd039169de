// ABOUTME: Order aggregate database operations
// ABOUTME: Creates an order with items, initial status history, and conditional payment/review in one transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::Database;
use crate::errors::SeedResult;
use crate::models::{OrderStatus, PaymentMethod};

/// One resolved order line, price snapshotted at seed time.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    /// Resolved dish id.
    pub dish_id: String,
    /// Cook-profile id of the dish owner.
    pub cook_id: String,
    /// Dish name as ordered.
    pub dish_name: String,
    /// Unit price in cents at order time.
    pub unit_price_cents: i64,
    /// Quantity ordered.
    pub quantity: i64,
}

/// Payment sub-record, attached only when the source order carries one.
#[derive(Debug, Clone, Copy)]
pub struct NewPayment {
    /// How the order was paid.
    pub method: PaymentMethod,
    /// Amount charged in cents.
    pub amount_cents: i64,
}

/// Review sub-record, attached only for delivered orders.
#[derive(Debug, Clone)]
pub struct NewReview {
    /// Cook the review is attributed to.
    pub cook_id: String,
    /// Star rating, 1-5.
    pub rating: i64,
    /// Free-form comment.
    pub comment: String,
}

/// A fully resolved order ready to be written.
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// Stable human-readable reference, unique across runs.
    pub reference: String,
    /// Resolved customer id.
    pub customer_id: String,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Sum of `unit_price_cents * quantity` over resolved items.
    pub total_cents: i64,
    /// Delivery address snapshot as JSON.
    pub delivery_address: String,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
    /// Resolved line items.
    pub items: Vec<NewOrderItem>,
    /// Optional payment sub-record.
    pub payment: Option<NewPayment>,
    /// Optional review sub-record.
    pub review: Option<NewReview>,
}

impl Database {
    /// Create order, item, history, payment, and review tables.
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails.
    pub(super) async fn migrate_orders(&self) -> SeedResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS orders (
                id TEXT PRIMARY KEY,
                reference TEXT UNIQUE NOT NULL,
                customer_id TEXT NOT NULL REFERENCES users(id),
                status TEXT NOT NULL,
                total_cents INTEGER NOT NULL,
                delivery_address TEXT NOT NULL,
                placed_at TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS order_items (
                id TEXT PRIMARY KEY,
                order_id TEXT NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
                dish_id TEXT NOT NULL REFERENCES dishes(id),
                cook_id TEXT NOT NULL REFERENCES cook_profiles(id),
                dish_name TEXT NOT NULL,
                unit_price_cents INTEGER NOT NULL,
                quantity INTEGER NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS order_status_history (
                id TEXT PRIMARY KEY,
                order_id TEXT NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
                status TEXT NOT NULL,
                note TEXT,
                changed_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS payments (
                id TEXT PRIMARY KEY,
                order_id TEXT UNIQUE NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
                method TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'paid',
                amount_cents INTEGER NOT NULL,
                paid_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS reviews (
                id TEXT PRIMARY KEY,
                order_id TEXT UNIQUE NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
                customer_id TEXT NOT NULL REFERENCES users(id),
                cook_id TEXT NOT NULL REFERENCES cook_profiles(id),
                rating INTEGER NOT NULL,
                comment TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_orders_customer ON orders(customer_id)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_order_items_order ON order_items(order_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Whether an order with this reference has been seeded already.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn order_reference_exists(&self, reference: &str) -> SeedResult<bool> {
        let row = sqlx::query("SELECT 1 FROM orders WHERE reference = ?")
            .bind(reference)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Write an order aggregate in one transaction: the order row, its line
    /// items, the initial status-history entry, and the conditional payment
    /// and review sub-records. Returns the order id.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement in the transaction fails.
    pub async fn create_order(&self, order: &NewOrder) -> SeedResult<String> {
        let order_id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO orders (id, reference, customer_id, status, total_cents, delivery_address, placed_at, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&order_id)
        .bind(&order.reference)
        .bind(&order.customer_id)
        .bind(order.status.as_str())
        .bind(order.total_cents)
        .bind(&order.delivery_address)
        .bind(order.placed_at.to_rfc3339())
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        for item in &order.items {
            sqlx::query(
                "INSERT INTO order_items (id, order_id, dish_id, cook_id, dish_name, unit_price_cents, quantity) \
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&order_id)
            .bind(&item.dish_id)
            .bind(&item.cook_id)
            .bind(&item.dish_name)
            .bind(item.unit_price_cents)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;
        }

        // The initial history entry is always written
        sqlx::query(
            "INSERT INTO order_status_history (id, order_id, status, note, changed_at) \
             VALUES (?, ?, ?, 'seeded', ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&order_id)
        .bind(order.status.as_str())
        .bind(order.placed_at.to_rfc3339())
        .execute(&mut *tx)
        .await?;

        if let Some(payment) = &order.payment {
            sqlx::query(
                "INSERT INTO payments (id, order_id, method, status, amount_cents, paid_at) \
                 VALUES (?, ?, ?, 'paid', ?, ?)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&order_id)
            .bind(payment.method.as_str())
            .bind(payment.amount_cents)
            .bind(order.placed_at.to_rfc3339())
            .execute(&mut *tx)
            .await?;
        }

        if let Some(review) = &order.review {
            sqlx::query(
                "INSERT INTO reviews (id, order_id, customer_id, cook_id, rating, comment, created_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&order_id)
            .bind(&order.customer_id)
            .bind(&review.cook_id)
            .bind(review.rating)
            .bind(&review.comment)
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(order_id)
    }
}
