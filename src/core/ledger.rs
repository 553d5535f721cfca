//! Payment ledger business logic - residents' payments against charge periods.
//!
//! A payment points at exactly one internet or utilities entry. Amounts are recorded
//! as given; nothing reconciles them against the per-capita share.

use super::charges::{ChargeCategory, ensure_money};
use crate::{
    entities::{
        ChargePeriod, Payment, Resident, UtilityPeriod, charge_period, payment, utility_period,
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// The charge period a payment is made against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodRef {
    /// Internet entry id
    Network(i64),
    /// Utilities entry id
    Utility(i64),
}

impl PeriodRef {
    /// Category of the referenced period.
    #[must_use]
    pub const fn category(self) -> ChargeCategory {
        match self {
            Self::Network(_) => ChargeCategory::Network,
            Self::Utility(_) => ChargeCategory::Utility,
        }
    }
}

impl From<&charge_period::Model> for PeriodRef {
    fn from(period: &charge_period::Model) -> Self {
        Self::Network(period.id)
    }
}

impl From<&utility_period::Model> for PeriodRef {
    fn from(period: &utility_period::Model) -> Self {
        Self::Utility(period.id)
    }
}

/// Input for [`record_payment`]
#[derive(Debug, Clone)]
pub struct NewPayment {
    /// Resident who owes or paid
    pub resident_id: i64,
    /// Period the payment belongs to
    pub period: PeriodRef,
    /// Amount still owed
    pub remaining_amount: Decimal,
    /// Amount already paid
    pub paid_amount: Decimal,
}

/// Inserts a payment after checking that the resident and period exist.
///
/// # Errors
/// * `Error::InvalidAmount` if either amount is negative, finer than a cent or too large
/// * `Error::NotFound` if the resident or the period does not exist
pub async fn record_payment(
    db: &DatabaseConnection,
    new_payment: NewPayment,
) -> Result<payment::Model> {
    ensure_money(&[new_payment.remaining_amount, new_payment.paid_amount])?;

    let txn = db.begin().await?;

    Resident::find_by_id(new_payment.resident_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::not_found("resident", new_payment.resident_id))?;

    let (charge_period_id, utility_period_id) = match new_payment.period {
        PeriodRef::Network(id) => {
            ChargePeriod::find_by_id(id)
                .one(&txn)
                .await?
                .ok_or_else(|| Error::not_found("internet entry", id))?;
            (Some(id), None)
        }
        PeriodRef::Utility(id) => {
            UtilityPeriod::find_by_id(id)
                .one(&txn)
                .await?
                .ok_or_else(|| Error::not_found("utilities entry", id))?;
            (None, Some(id))
        }
    };

    let payment = payment::ActiveModel {
        remaining_amount: Set(new_payment.remaining_amount),
        paid_amount: Set(new_payment.paid_amount),
        accepted_on: Set(None),
        resident_id: Set(new_payment.resident_id),
        charge_period_id: Set(charge_period_id),
        utility_period_id: Set(utility_period_id),
        ..Default::default()
    };

    let created = payment.insert(&txn).await?;
    txn.commit().await?;

    info!(
        payment_id = created.id,
        resident_id = created.resident_id,
        category = %new_payment.period.category(),
        "Recorded payment"
    );
    Ok(created)
}

/// All payments made against one period, in the order they were recorded.
pub async fn payments_for(
    db: &DatabaseConnection,
    period: PeriodRef,
) -> Result<Vec<payment::Model>> {
    let filter = match period {
        PeriodRef::Network(id) => payment::Column::ChargePeriodId.eq(id),
        PeriodRef::Utility(id) => payment::Column::UtilityPeriodId.eq(id),
    };

    Payment::find()
        .filter(filter)
        .order_by_asc(payment::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// All payments by one resident, in the order they were recorded.
pub async fn payments_of_resident(
    db: &DatabaseConnection,
    resident_id: i64,
) -> Result<Vec<payment::Model>> {
    Payment::find()
        .filter(payment::Column::ResidentId.eq(resident_id))
        .order_by_asc(payment::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Marks a payment as accepted on `accepted_on`.
///
/// # Errors
/// * `Error::NotFound` if no payment has this id
pub async fn confirm_payment(
    db: &DatabaseConnection,
    payment_id: i64,
    accepted_on: NaiveDate,
) -> Result<payment::Model> {
    let payment = Payment::find_by_id(payment_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("payment", payment_id))?;

    let mut active_model: payment::ActiveModel = payment.into();
    active_model.accepted_on = Set(Some(accepted_on));
    let updated = active_model.update(db).await?;

    info!(payment_id = updated.id, %accepted_on, "Confirmed payment");
    Ok(updated)
}

/// Which period a stored payment belongs to.
///
/// # Errors
/// * `Error::InvalidPeriodReference` if the row references no period or both
pub fn period_of(payment: &payment::Model) -> Result<PeriodRef> {
    match (payment.charge_period_id, payment.utility_period_id) {
        (Some(id), None) => Ok(PeriodRef::Network(id)),
        (None, Some(id)) => Ok(PeriodRef::Utility(id)),
        _ => Err(Error::InvalidPeriodReference {
            payment_id: payment.id,
        }),
    }
}
