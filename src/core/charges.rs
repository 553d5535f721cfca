//! Charge period business logic - monthly internet and utility bills.
//!
//! Each category keeps at most one entry per (month, year). Creation checks for an
//! existing entry first and falls back on the unique index when two administrators
//! race. "Latest" means greatest year, then greatest month in calendar order.

use super::allocation::MONEY_SCALE;
use crate::{
    entities::{ChargePeriod, Month, UtilityPeriod, charge_period, utility_period},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use std::fmt;
use tracing::info;

/// The two independent kinds of shared monthly bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChargeCategory {
    /// Network access fee
    Network,
    /// Combined utilities (water, electricity, gas)
    Utility,
}

impl fmt::Display for ChargeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => f.write_str("internet"),
            Self::Utility => f.write_str("utilities"),
        }
    }
}

/// Input for [`create_charge_period`]
#[derive(Debug, Clone)]
pub struct NewChargePeriod {
    /// Billing month
    pub month: Month,
    /// Billing year
    pub year: i32,
    /// Total amount billed to the household
    pub amount: Decimal,
    /// Date by which the bill must be paid
    pub due_date: NaiveDate,
    /// Late-payment penalty
    pub penalty: Decimal,
}

/// Input for [`create_utility_period`]
#[derive(Debug, Clone)]
pub struct NewUtilityPeriod {
    /// Billing month
    pub month: Month,
    /// Billing year
    pub year: i32,
    /// Total amount billed to the household
    pub amount: Decimal,
    /// Cold water, kitchen meter
    pub cold_water_kitchen: Decimal,
    /// Warm water, kitchen meter
    pub warm_water_kitchen: Decimal,
    /// Cold water, bathroom meter
    pub cold_water_bathroom: Decimal,
    /// Warm water, bathroom meter
    pub warm_water_bathroom: Decimal,
    /// Electricity charge
    pub electricity: Decimal,
    /// Gas charge
    pub gas: Decimal,
    /// Electricity refund deducted before splitting
    pub electricity_refund: Decimal,
}

const PERIOD_FIELD: &str = "month and year";

/// Records the internet bill for one month.
///
/// # Errors
/// * `Error::InvalidAmount` if the amount or penalty is negative, finer than a cent or too large
/// * `Error::Duplicate` if this month already has an internet entry
pub async fn create_charge_period(
    db: &DatabaseConnection,
    new_period: NewChargePeriod,
) -> Result<charge_period::Model> {
    ensure_money(&[new_period.amount, new_period.penalty])?;

    let existing = ChargePeriod::find()
        .filter(charge_period::Column::Month.eq(new_period.month))
        .filter(charge_period::Column::Year.eq(new_period.year))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::Duplicate {
            entity: "internet entry",
            field: PERIOD_FIELD,
        });
    }

    let period = charge_period::ActiveModel {
        month: Set(new_period.month),
        year: Set(new_period.year),
        amount: Set(new_period.amount),
        due_date: Set(new_period.due_date),
        penalty: Set(new_period.penalty),
        ..Default::default()
    };

    let created = period
        .insert(db)
        .await
        .map_err(|err| Error::from_insert(err, "internet entry", PERIOD_FIELD))?;

    info!(
        period_id = created.id,
        month = %created.month,
        year = created.year,
        "Recorded internet entry"
    );
    Ok(created)
}

/// Records the utility bill for one month.
///
/// # Errors
/// * `Error::InvalidAmount` if any amount is negative, finer than a cent or too large
/// * `Error::Duplicate` if this month already has a utility entry
pub async fn create_utility_period(
    db: &DatabaseConnection,
    new_period: NewUtilityPeriod,
) -> Result<utility_period::Model> {
    ensure_money(&[
        new_period.amount,
        new_period.cold_water_kitchen,
        new_period.warm_water_kitchen,
        new_period.cold_water_bathroom,
        new_period.warm_water_bathroom,
        new_period.electricity,
        new_period.gas,
        new_period.electricity_refund,
    ])?;

    let existing = UtilityPeriod::find()
        .filter(utility_period::Column::Month.eq(new_period.month))
        .filter(utility_period::Column::Year.eq(new_period.year))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::Duplicate {
            entity: "utilities entry",
            field: PERIOD_FIELD,
        });
    }

    let period = utility_period::ActiveModel {
        month: Set(new_period.month),
        year: Set(new_period.year),
        amount: Set(new_period.amount),
        cold_water_kitchen: Set(new_period.cold_water_kitchen),
        warm_water_kitchen: Set(new_period.warm_water_kitchen),
        cold_water_bathroom: Set(new_period.cold_water_bathroom),
        warm_water_bathroom: Set(new_period.warm_water_bathroom),
        electricity: Set(new_period.electricity),
        gas: Set(new_period.gas),
        electricity_refund: Set(new_period.electricity_refund),
        ..Default::default()
    };

    let created = period
        .insert(db)
        .await
        .map_err(|err| Error::from_insert(err, "utilities entry", PERIOD_FIELD))?;

    info!(
        period_id = created.id,
        month = %created.month,
        year = created.year,
        "Recorded utilities entry"
    );
    Ok(created)
}

/// The most recent internet entry.
///
/// # Errors
/// * `Error::Empty` if no internet entry exists
pub async fn latest_charge_period(db: &DatabaseConnection) -> Result<charge_period::Model> {
    ChargePeriod::find()
        .order_by_desc(charge_period::Column::Year)
        .order_by_desc(charge_period::Column::Month)
        .one(db)
        .await?
        .ok_or(Error::Empty {
            category: ChargeCategory::Network,
        })
}

/// The most recent utility entry.
///
/// # Errors
/// * `Error::Empty` if no utility entry exists
pub async fn latest_utility_period(db: &DatabaseConnection) -> Result<utility_period::Model> {
    UtilityPeriod::find()
        .order_by_desc(utility_period::Column::Year)
        .order_by_desc(utility_period::Column::Month)
        .one(db)
        .await?
        .ok_or(Error::Empty {
            category: ChargeCategory::Utility,
        })
}

/// All internet entries, newest first.
pub async fn list_charge_periods(db: &DatabaseConnection) -> Result<Vec<charge_period::Model>> {
    ChargePeriod::find()
        .order_by_desc(charge_period::Column::Year)
        .order_by_desc(charge_period::Column::Month)
        .all(db)
        .await
        .map_err(Into::into)
}

/// All utility entries, newest first.
pub async fn list_utility_periods(db: &DatabaseConnection) -> Result<Vec<utility_period::Model>> {
    UtilityPeriod::find()
        .order_by_desc(utility_period::Column::Year)
        .order_by_desc(utility_period::Column::Month)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Loads an internet entry by id.
pub async fn get_charge_period(
    db: &DatabaseConnection,
    period_id: i64,
) -> Result<charge_period::Model> {
    ChargePeriod::find_by_id(period_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("internet entry", period_id))
}

/// Loads a utility entry by id.
pub async fn get_utility_period(
    db: &DatabaseConnection,
    period_id: i64,
) -> Result<utility_period::Model> {
    UtilityPeriod::find_by_id(period_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("utilities entry", period_id))
}

/// Exclusive upper bound of a `Decimal(10, 2)` money column
const MONEY_LIMIT: i64 = 100_000_000;

/// Accepts amounts that are non-negative, in whole cents and small enough for the
/// money columns. Anything else would be stored inexactly.
pub(crate) fn ensure_money(amounts: &[Decimal]) -> Result<()> {
    let limit = Decimal::from(MONEY_LIMIT);
    let invalid = |amount: &&Decimal| {
        **amount < Decimal::ZERO
            || **amount >= limit
            || amount.normalize().scale() > MONEY_SCALE
    };
    match amounts.iter().find(invalid) {
        Some(&amount) => Err(Error::InvalidAmount { amount }),
        None => Ok(()),
    }
}
