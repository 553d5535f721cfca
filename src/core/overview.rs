//! Period overview generation.
//!
//! Bundles a charge period with its per-capita share and the payments made against it,
//! ready for the presentation layer. All functions are framework-agnostic.

use super::{
    allocation::{Allocatable, per_capita_share},
    charges,
    ledger::{self, PeriodRef},
};
use crate::{
    config::HouseholdSettings,
    entities::{charge_period, payment, utility_period},
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// A charge period together with how it is split and paid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodOverview<M> {
    /// The period itself
    pub period: M,
    /// Each resident's share, rounded to cents
    pub per_capita: Decimal,
    /// Payments recorded against the period
    pub payments: Vec<payment::Model>,
    /// Sum of the payments' paid amounts
    pub total_paid: Decimal,
    /// Sum of the payments' remaining amounts
    pub total_remaining: Decimal,
}

impl<M> PeriodOverview<M>
where
    M: Allocatable,
{
    /// Builds an overview from a period and its already-loaded payments.
    #[must_use]
    pub fn new(period: M, payments: Vec<payment::Model>, household: &HouseholdSettings) -> Self {
        let per_capita = per_capita_share(&period, household);
        let total_paid = payments.iter().map(|p| p.paid_amount).sum();
        let total_remaining = payments.iter().map(|p| p.remaining_amount).sum();

        Self {
            period,
            per_capita,
            payments,
            total_paid,
            total_remaining,
        }
    }
}

/// Overview of the internet entry with the given id.
pub async fn charge_period_overview(
    db: &DatabaseConnection,
    period_id: i64,
    household: &HouseholdSettings,
) -> Result<PeriodOverview<charge_period::Model>> {
    let period = charges::get_charge_period(db, period_id).await?;
    network_overview(db, period, household).await
}

/// Overview of the utilities entry with the given id.
pub async fn utility_period_overview(
    db: &DatabaseConnection,
    period_id: i64,
    household: &HouseholdSettings,
) -> Result<PeriodOverview<utility_period::Model>> {
    let period = charges::get_utility_period(db, period_id).await?;
    utilities_overview(db, period, household).await
}

/// Overview of the most recent internet entry.
///
/// # Errors
/// * `Error::Empty` if no internet entry exists
pub async fn current_charge_overview(
    db: &DatabaseConnection,
    household: &HouseholdSettings,
) -> Result<PeriodOverview<charge_period::Model>> {
    let period = charges::latest_charge_period(db).await?;
    network_overview(db, period, household).await
}

/// Overview of the most recent utilities entry.
///
/// # Errors
/// * `Error::Empty` if no utilities entry exists
pub async fn current_utility_overview(
    db: &DatabaseConnection,
    household: &HouseholdSettings,
) -> Result<PeriodOverview<utility_period::Model>> {
    let period = charges::latest_utility_period(db).await?;
    utilities_overview(db, period, household).await
}

async fn network_overview(
    db: &DatabaseConnection,
    period: charge_period::Model,
    household: &HouseholdSettings,
) -> Result<PeriodOverview<charge_period::Model>> {
    let payments = ledger::payments_for(db, PeriodRef::from(&period)).await?;
    Ok(PeriodOverview::new(period, payments, household))
}

async fn utilities_overview(
    db: &DatabaseConnection,
    period: utility_period::Model,
    household: &HouseholdSettings,
) -> Result<PeriodOverview<utility_period::Model>> {
    let payments = ledger::payments_for(db, PeriodRef::from(&period)).await?;
    Ok(PeriodOverview::new(period, payments, household))
}
