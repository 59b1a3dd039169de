// ABOUTME: Order seeding phase building full order aggregates from literal fixtures
// ABOUTME: Drops unresolved line items, sums totals, and gates payment/review sub-records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

use chrono::{Duration, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::RecordOutcome;
use crate::database::{Database, NewOrder, NewOrderItem, NewPayment, NewReview};
use crate::errors::SeedResult;
use crate::models::{OrderStatus, PaymentMethod};
use crate::report::PhaseOutcome;
use crate::resolver::Resolver;

/// Demo order definition. The `reference` is the natural key that keeps
/// re-runs from duplicating order history.
struct OrderFixture {
    reference: &'static str,
    customer_email: &'static str,
    status: OrderStatus,
    placed_days_ago: i64,
    street: &'static str,
    city: &'static str,
    postal_code: &'static str,
    items: &'static [(&'static str, i64)],
    payment: Option<PaymentMethod>,
    review: Option<ReviewFixture>,
}

/// Review payload present in the source data; only attached when the order
/// status is DELIVERED.
struct ReviewFixture {
    rating: i64,
    comment: &'static str,
}

/// Delivery address snapshot stored as JSON on the order row.
#[derive(Debug, Clone, Copy, Serialize)]
struct DeliveryAddress<'a> {
    street: &'a str,
    city: &'a str,
    postal_code: &'a str,
}

const ORDERS: &[OrderFixture] = &[
    OrderFixture {
        reference: "ORD-1001",
        customer_email: "lena@example.com",
        status: OrderStatus::Delivered,
        placed_days_ago: 5,
        street: "Boxhagener Str. 16",
        city: "Berlin",
        postal_code: "10245",
        items: &[("Margherita Pizza", 2), ("Tonkotsu Ramen", 1)],
        payment: Some(PaymentMethod::Card),
        review: Some(ReviewFixture {
            rating: 5,
            comment: "Still warm on arrival, crust was perfect.",
        }),
    },
    OrderFixture {
        reference: "ORD-1002",
        customer_email: "david@example.com",
        status: OrderStatus::Preparing,
        placed_days_ago: 0,
        street: "Weserstr. 51",
        city: "Berlin",
        postal_code: "12045",
        items: &[("Falafel Wrap", 1), ("Hummus Mezze", 2)],
        payment: Some(PaymentMethod::Card),
        // Review data present in the source, but the order is not delivered
        // yet, so no review row may be created.
        review: Some(ReviewFixture {
            rating: 4,
            comment: "Can't wait!",
        }),
    },
    OrderFixture {
        reference: "ORD-1003",
        customer_email: "sofia@example.com",
        status: OrderStatus::Delivered,
        placed_days_ago: 12,
        street: "Schoenhauser Allee 120",
        city: "Berlin",
        postal_code: "10437",
        // The second line references a dish that never existed; it is dropped
        // from the order without failing it.
        items: &[("Salmon Nigiri Set", 1), ("Truffle Pasta Special", 1)],
        payment: Some(PaymentMethod::Wallet),
        review: Some(ReviewFixture {
            rating: 4,
            comment: "Fresh fish, generous portions.",
        }),
    },
    OrderFixture {
        reference: "ORD-1004",
        customer_email: "tom@example.com",
        status: OrderStatus::Pending,
        placed_days_ago: 0,
        street: "Torstr. 140",
        city: "Berlin",
        postal_code: "10119",
        items: &[("Chicken Shawarma Plate", 1)],
        payment: None,
        review: None,
    },
    OrderFixture {
        reference: "ORD-1005",
        customer_email: "priya@example.com",
        status: OrderStatus::Cancelled,
        placed_days_ago: 20,
        street: "Bergmannstr. 9",
        city: "Berlin",
        postal_code: "10961",
        items: &[("Vegetable Gyoza", 2)],
        payment: None,
        review: None,
    },
];

/// Seed all demo orders.
///
/// # Errors
///
/// Returns an error only for failures outside the per-record boundary.
pub async fn run(db: &Database) -> SeedResult<PhaseOutcome> {
    let resolver = Resolver::new(db);
    let mut outcome = PhaseOutcome::default();

    for fixture in ORDERS {
        match seed_order(db, &resolver, fixture).await {
            Ok(RecordOutcome::Seeded) => {
                info!("  order {} seeded", fixture.reference);
                outcome.success += 1;
            }
            Ok(RecordOutcome::Skipped) => outcome.skipped += 1,
            Err(err) => {
                warn!("  order {} failed: {err}", fixture.reference);
                outcome.failed += 1;
            }
        }
    }

    Ok(outcome)
}

async fn seed_order(
    db: &Database,
    resolver: &Resolver<'_>,
    fixture: &OrderFixture,
) -> SeedResult<RecordOutcome> {
    // Seeded order history is immutable; an existing reference converged
    if db.order_reference_exists(fixture.reference).await? {
        debug!("  order {} already seeded", fixture.reference);
        return Ok(RecordOutcome::Skipped);
    }

    let Some(customer) = resolver.user(fixture.customer_email).await? else {
        warn!(
            "  order {} skipped: customer {} not found",
            fixture.reference, fixture.customer_email
        );
        return Ok(RecordOutcome::Skipped);
    };

    let mut items = Vec::with_capacity(fixture.items.len());
    for (dish_name, quantity) in fixture.items {
        let Some(dish) = resolver.dish(dish_name).await? else {
            warn!(
                "  order {}: dropping unresolved item '{dish_name}'",
                fixture.reference
            );
            continue;
        };
        items.push(NewOrderItem {
            dish_id: dish.id,
            cook_id: dish.cook_id,
            dish_name: dish.name,
            unit_price_cents: dish.price_cents,
            quantity: *quantity,
        });
    }

    if items.is_empty() {
        warn!(
            "  order {} skipped: no line items resolved",
            fixture.reference
        );
        return Ok(RecordOutcome::Skipped);
    }

    let total_cents: i64 = items
        .iter()
        .map(|item| item.unit_price_cents * item.quantity)
        .sum();

    let payment = fixture.payment.map(|method| NewPayment {
        method,
        amount_cents: total_cents,
    });

    // Reviews require a delivered order; cook attribution uses the first
    // resolved item's cook (documented simplification for multi-cook orders).
    let review = match &fixture.review {
        Some(review) if fixture.status.is_delivered() => Some(NewReview {
            cook_id: items[0].cook_id.clone(),
            rating: review.rating,
            comment: review.comment.to_string(),
        }),
        _ => None,
    };

    let order = NewOrder {
        reference: fixture.reference.to_string(),
        customer_id: customer.id,
        status: fixture.status,
        total_cents,
        delivery_address: serde_json::to_string(&DeliveryAddress {
            street: fixture.street,
            city: fixture.city,
            postal_code: fixture.postal_code,
        })?,
        placed_at: Utc::now() - Duration::days(fixture.placed_days_ago),
        items,
        payment,
        review,
    };

    db.create_order(&order).await?;
    Ok(RecordOutcome::Seeded)
}
