// ABOUTME: User seeding phase: accounts, profiles, addresses, cook profiles, presence snapshots
// ABOUTME: Upserts keyed by email; passwords stored only as one-way bcrypt hashes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

use rand::Rng;
use tracing::{info, warn};

use super::DEMO_USER_PASSWORD;
use crate::database::{AddressUpdate, Database, ProfileUpdate};
use crate::errors::SeedResult;
use crate::models::{OnlineStatus, Platform};
use crate::random::recent_moment;
use crate::report::PhaseOutcome;

/// Demo user definition.
struct UserFixture {
    email: &'static str,
    display_name: &'static str,
    is_chef: bool,
    is_admin: bool,
    profile: Option<ProfileUpdate<'static>>,
    addresses: &'static [AddressUpdate<'static>],
    cook: Option<CookFixture>,
}

/// Cook-profile definition for chef users.
struct CookFixture {
    kitchen_name: &'static str,
    speciality: &'static str,
    rating: f64,
    delivery_fee_cents: i64,
}

fn demo_users() -> Vec<UserFixture> {
    vec![
        UserFixture {
            email: "admin@savora.app",
            display_name: "Savora Admin",
            is_chef: false,
            is_admin: true,
            profile: Some(ProfileUpdate {
                bio: "Platform operations",
                phone: "+49 30 1234000",
                avatar_url: None,
            }),
            addresses: &[],
            cook: None,
        },
        UserFixture {
            email: "marco@trattoriaroma.it",
            display_name: "Marco Bellini",
            is_chef: true,
            is_admin: false,
            profile: Some(ProfileUpdate {
                bio: "Third-generation Roman cook",
                phone: "+39 06 555 0101",
                avatar_url: Some("https://cdn.savora.app/avatars/marco.jpg"),
            }),
            addresses: &[AddressUpdate {
                label: "Kitchen",
                street: "Via del Corso 12",
                city: "Berlin",
                postal_code: "10115",
                is_default: true,
            }],
            cook: Some(CookFixture {
                kitchen_name: "Trattoria Roma",
                speciality: "Roman classics",
                rating: 4.8,
                delivery_fee_cents: 250,
            }),
        },
        UserFixture {
            email: "yuki@sakurakitchen.jp",
            display_name: "Yuki Tanaka",
            is_chef: true,
            is_admin: false,
            profile: Some(ProfileUpdate {
                bio: "Sushi and ramen, Osaka style",
                phone: "+49 30 555 0202",
                avatar_url: Some("https://cdn.savora.app/avatars/yuki.jpg"),
            }),
            addresses: &[AddressUpdate {
                label: "Kitchen",
                street: "Kantstrasse 88",
                city: "Berlin",
                postal_code: "10627",
                is_default: true,
            }],
            cook: Some(CookFixture {
                kitchen_name: "Sakura Kitchen",
                speciality: "Japanese comfort food",
                rating: 4.9,
                delivery_fee_cents: 300,
            }),
        },
        UserFixture {
            email: "amira@beirutbites.com",
            display_name: "Amira Haddad",
            is_chef: true,
            is_admin: false,
            profile: Some(ProfileUpdate {
                bio: "Levantine home cooking",
                phone: "+49 30 555 0303",
                avatar_url: None,
            }),
            addresses: &[AddressUpdate {
                label: "Kitchen",
                street: "Sonnenallee 45",
                city: "Berlin",
                postal_code: "12045",
                is_default: true,
            }],
            cook: Some(CookFixture {
                kitchen_name: "Beirut Bites",
                speciality: "Mezze and grills",
                rating: 4.7,
                delivery_fee_cents: 200,
            }),
        },
        UserFixture {
            email: "lena@example.com",
            display_name: "Lena Fischer",
            is_chef: false,
            is_admin: false,
            profile: Some(ProfileUpdate {
                bio: "Loves pasta nights",
                phone: "+49 170 555 1001",
                avatar_url: None,
            }),
            addresses: &[
                AddressUpdate {
                    label: "Home",
                    street: "Boxhagener Str. 16",
                    city: "Berlin",
                    postal_code: "10245",
                    is_default: true,
                },
                AddressUpdate {
                    label: "Work",
                    street: "Unter den Linden 5",
                    city: "Berlin",
                    postal_code: "10117",
                    is_default: false,
                },
            ],
            cook: None,
        },
        UserFixture {
            email: "david@example.com",
            display_name: "David Kim",
            is_chef: false,
            is_admin: false,
            profile: Some(ProfileUpdate {
                bio: "Ramen enthusiast",
                phone: "+49 160 555 1002",
                avatar_url: None,
            }),
            addresses: &[AddressUpdate {
                label: "Home",
                street: "Weserstr. 51",
                city: "Berlin",
                postal_code: "12045",
                is_default: true,
            }],
            cook: None,
        },
        UserFixture {
            email: "sofia@example.com",
            display_name: "Sofia Rossi",
            is_chef: false,
            is_admin: false,
            profile: None,
            addresses: &[AddressUpdate {
                label: "Home",
                street: "Schoenhauser Allee 120",
                city: "Berlin",
                postal_code: "10437",
                is_default: true,
            }],
            cook: None,
        },
        UserFixture {
            email: "tom@example.com",
            display_name: "Tom Becker",
            is_chef: false,
            is_admin: false,
            profile: None,
            addresses: &[],
            cook: None,
        },
        UserFixture {
            email: "priya@example.com",
            display_name: "Priya Sharma",
            is_chef: false,
            is_admin: false,
            profile: Some(ProfileUpdate {
                bio: "Weekend foodie",
                phone: "+49 151 555 1005",
                avatar_url: None,
            }),
            addresses: &[AddressUpdate {
                label: "Home",
                street: "Bergmannstr. 9",
                city: "Berlin",
                postal_code: "10961",
                is_default: true,
            }],
            cook: None,
        },
    ]
}

/// Seed all demo users.
///
/// # Errors
///
/// Returns an error only for failures outside the per-record boundary.
pub async fn run(db: &Database, rng: &mut impl Rng) -> SeedResult<PhaseOutcome> {
    let fixtures = demo_users();
    let mut outcome = PhaseOutcome::default();

    for fixture in &fixtures {
        match seed_user(db, rng, fixture).await {
            Ok(()) => {
                info!("  user {} seeded", fixture.email);
                outcome.success += 1;
            }
            Err(err) => {
                warn!("  user {} failed: {err}", fixture.email);
                outcome.failed += 1;
            }
        }
    }

    Ok(outcome)
}

async fn seed_user(db: &Database, rng: &mut impl Rng, fixture: &UserFixture) -> SeedResult<()> {
    let password_hash = bcrypt::hash(DEMO_USER_PASSWORD, bcrypt::DEFAULT_COST)?;

    let user_id = db
        .upsert_user(
            fixture.email,
            fixture.display_name,
            &password_hash,
            fixture.is_chef,
            fixture.is_admin,
        )
        .await?;

    // Profile and addresses are replaced wholesale to avoid partial merges
    db.replace_user_details(&user_id, fixture.profile, fixture.addresses)
        .await?;

    if let Some(cook) = &fixture.cook {
        db.upsert_cook_profile(
            &user_id,
            cook.kitchen_name,
            cook.speciality,
            cook.rating,
            cook.delivery_fee_cents,
        )
        .await?;
    }

    // Fresh presence snapshot on every run
    let now = chrono::Utc::now();
    db.update_presence(
        &user_id,
        OnlineStatus::random(rng),
        recent_moment(rng, now, 180),
        Platform::random(rng),
    )
    .await?;

    Ok(())
}
