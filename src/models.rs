// ABOUTME: Shared domain types for the Savora seeder
// ABOUTME: Status enumerations, resolved-reference handles, and write-side value objects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! Domain types shared between the resolver, the database layer, and the
//! per-entity seeders. Everything is stored as TEXT in SQLite, so enums carry
//! explicit string forms rather than relying on derive-level encodings.

use rand::Rng;

/// Online-status snapshot written for every seeded user on each run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnlineStatus {
    /// Currently connected.
    Online,
    /// Connected but idle.
    Away,
    /// Not connected.
    Offline,
}

impl OnlineStatus {
    /// String form stored in the `users.online_status` column.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Away => "away",
            Self::Offline => "offline",
        }
    }

    /// Pick one status uniformly at random.
    pub fn random(rng: &mut impl Rng) -> Self {
        match rng.gen_range(0..3) {
            0 => Self::Online,
            1 => Self::Away,
            _ => Self::Offline,
        }
    }
}

/// Client platform recorded alongside the online-status snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// iOS app.
    Ios,
    /// Android app.
    Android,
    /// Web client.
    Web,
}

impl Platform {
    /// String form stored in the `users.last_platform` column.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
            Self::Web => "web",
        }
    }

    /// Pick one platform uniformly at random.
    pub fn random(rng: &mut impl Rng) -> Self {
        match rng.gen_range(0..3) {
            0 => Self::Ios,
            1 => Self::Android,
            _ => Self::Web,
        }
    }
}

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// Placed, awaiting cook confirmation.
    Pending,
    /// Accepted by the cook.
    Confirmed,
    /// Being prepared.
    Preparing,
    /// Courier en route.
    OutForDelivery,
    /// Handed to the customer.
    Delivered,
    /// Cancelled before delivery.
    Cancelled,
}

impl OrderStatus {
    /// String form stored in the `orders.status` column.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Preparing => "PREPARING",
            Self::OutForDelivery => "OUT_FOR_DELIVERY",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Reviews may only be attached once the order reached this state.
    #[must_use]
    pub fn is_delivered(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// Type tag carried by every notification payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Order lifecycle update.
    OrderUpdate,
    /// Marketing promotion.
    Promotion,
    /// A subscribed cook published a new dish.
    NewDish,
    /// Platform announcement.
    System,
}

impl NotificationKind {
    /// String form stored in the `notifications.kind` column.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OrderUpdate => "order_update",
            Self::Promotion => "promotion",
            Self::NewDish => "new_dish",
            Self::System => "system",
        }
    }
}

/// Payment method recorded on seeded payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Card on file.
    Card,
    /// Cash on delivery.
    Cash,
    /// Platform wallet balance.
    Wallet,
}

impl PaymentMethod {
    /// String form stored in the `payments.method` column.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Cash => "cash",
            Self::Wallet => "wallet",
        }
    }
}

/// A user located by email, with the ownership handles dependents need.
#[derive(Debug, Clone)]
pub struct ResolvedUser {
    /// Surrogate id of the user row.
    pub id: String,
    /// Natural key the user was resolved by.
    pub email: String,
    /// Whether the user is flagged as a chef.
    pub is_chef: bool,
    /// Whether the user is flagged as an admin.
    pub is_admin: bool,
    /// Cook-profile id, when the user has one.
    pub cook_id: Option<String>,
}

/// A dish located by name, with the fields order lines snapshot.
#[derive(Debug, Clone)]
pub struct ResolvedDish {
    /// Surrogate id of the dish row.
    pub id: String,
    /// Owning cook-profile id.
    pub cook_id: String,
    /// Dish name as stored.
    pub name: String,
    /// Current price in cents.
    pub price_cents: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn order_status_strings_are_stable() {
        assert_eq!(OrderStatus::Delivered.as_str(), "DELIVERED");
        assert_eq!(OrderStatus::OutForDelivery.as_str(), "OUT_FOR_DELIVERY");
        assert!(OrderStatus::Delivered.is_delivered());
        assert!(!OrderStatus::Preparing.is_delivered());
    }

    #[test]
    fn random_pickers_cover_the_enumeration() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..100 {
            match OnlineStatus::random(&mut rng) {
                OnlineStatus::Online => seen[0] = true,
                OnlineStatus::Away => seen[1] = true,
                OnlineStatus::Offline => seen[2] = true,
            }
        }
        assert!(seen.iter().all(|s| *s));
    }
}
