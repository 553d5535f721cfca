//! Shared test utilities for house-share.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    config::Settings,
    core::{
        charges::{self, NewChargePeriod, NewUtilityPeriod},
        identity::{self, NewResident},
    },
    entities::{self, Month},
    errors::Result,
    handlers::AppContext,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Password given to every resident created by these helpers
pub const TEST_PASSWORD: &str = "correct-horse";

/// Parses a money literal such as `"250.00"`.
pub fn money(value: &str) -> Decimal {
    value.parse().unwrap()
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// In-memory database wrapped in an `AppContext` with default settings.
pub async fn setup_test_context() -> Result<AppContext> {
    Ok(AppContext::new(setup_test_db().await?, Settings::default()))
}

/// Registers a resident with sensible defaults.
///
/// # Defaults
/// * `name` / `surname`: "Test" / "Resident"
/// * `email`: `"{username}@example.com"`
/// * `password`: [`TEST_PASSWORD`]
pub async fn create_test_resident(
    db: &DatabaseConnection,
    username: &str,
) -> Result<entities::resident::Model> {
    create_custom_resident(db, username, "Test", "Resident").await
}

/// Registers a resident with a chosen name and surname.
pub async fn create_custom_resident(
    db: &DatabaseConnection,
    username: &str,
    name: &str,
    surname: &str,
) -> Result<entities::resident::Model> {
    identity::register(
        db,
        NewResident {
            username: username.to_string(),
            name: name.to_string(),
            surname: surname.to_string(),
            email: format!("{username}@example.com"),
            password: TEST_PASSWORD.to_string(),
        },
    )
    .await
}

/// Registers a resident and grants the administrator role.
pub async fn create_test_admin(
    db: &DatabaseConnection,
    username: &str,
) -> Result<entities::resident::Model> {
    let resident = create_test_resident(db, username).await?;
    identity::promote_to_admin(db, resident.id).await
}

/// Records an internet entry due on the 15th with no penalty.
pub async fn create_test_charge_period(
    db: &DatabaseConnection,
    month: Month,
    year: i32,
    amount: Decimal,
) -> Result<entities::charge_period::Model> {
    charges::create_charge_period(
        db,
        NewChargePeriod {
            month,
            year,
            amount,
            due_date: NaiveDate::from_ymd_opt(year, month.number(), 15).unwrap(),
            penalty: Decimal::ZERO,
        },
    )
    .await
}

/// Records a utilities entry with zeroed meter readings.
pub async fn create_test_utility_period(
    db: &DatabaseConnection,
    month: Month,
    year: i32,
    amount: Decimal,
    electricity_refund: Decimal,
) -> Result<entities::utility_period::Model> {
    charges::create_utility_period(
        db,
        NewUtilityPeriod {
            month,
            year,
            amount,
            cold_water_kitchen: Decimal::ZERO,
            warm_water_kitchen: Decimal::ZERO,
            cold_water_bathroom: Decimal::ZERO,
            warm_water_bathroom: Decimal::ZERO,
            electricity: Decimal::ZERO,
            gas: Decimal::ZERO,
            electricity_refund,
        },
    )
    .await
}
