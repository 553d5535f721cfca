//! Per-capita allocation of shared monthly bills.
//!
//! Every bill is split evenly across the configured household. The share is rounded
//! to whole cents, half away from zero, so 100.00 over three residents is 33.33 each.

use crate::{
    config::HouseholdSettings,
    entities::{charge_period, utility_period},
};
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept for money amounts
pub const MONEY_SCALE: u32 = 2;

/// A bill that can be divided among residents.
pub trait Allocatable {
    /// Amount to split across the household.
    fn shared_amount(&self) -> Decimal;
}

impl Allocatable for charge_period::Model {
    fn shared_amount(&self) -> Decimal {
        self.amount
    }
}

impl Allocatable for utility_period::Model {
    /// The electricity refund is returned to the household before splitting.
    fn shared_amount(&self) -> Decimal {
        self.amount - self.electricity_refund
    }
}

/// Each resident's equal share of `entry`, rounded to cents.
#[must_use]
pub fn per_capita_share<A>(entry: &A, household: &HouseholdSettings) -> Decimal
where
    A: Allocatable + ?Sized,
{
    round_money(entry.shared_amount() / Decimal::from(household.size()))
}

/// Rounds to cents, half away from zero. The result always carries two decimal
/// places, even when `amount` was loaded without them.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{entities::Month, test_utils::money};
    use chrono::NaiveDate;
    use std::num::NonZeroU32;

    fn network(amount: &str) -> charge_period::Model {
        charge_period::Model {
            id: 1,
            month: Month::Jan,
            year: 2020,
            amount: money(amount),
            due_date: NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
            penalty: Decimal::ZERO,
        }
    }

    fn utilities(amount: &str, refund: &str) -> utility_period::Model {
        utility_period::Model {
            id: 1,
            month: Month::Jan,
            year: 2020,
            amount: money(amount),
            cold_water_kitchen: Decimal::ZERO,
            warm_water_kitchen: Decimal::ZERO,
            cold_water_bathroom: Decimal::ZERO,
            warm_water_bathroom: Decimal::ZERO,
            electricity: Decimal::ZERO,
            gas: Decimal::ZERO,
            electricity_refund: money(refund),
        }
    }

    fn household(size: u32) -> HouseholdSettings {
        HouseholdSettings::new(NonZeroU32::new(size).unwrap())
    }

    #[test]
    fn test_network_share_divides_by_household() {
        let share = per_capita_share(&network("250.00"), &HouseholdSettings::default());
        assert_eq!(share, money("50.00"));
    }

    #[test]
    fn test_utility_share_subtracts_refund() {
        let share = per_capita_share(&utilities("300.00", "50.00"), &HouseholdSettings::default());
        assert_eq!(share, money("50.00"));
    }

    #[test]
    fn test_share_rounds_to_cents() {
        assert_eq!(
            per_capita_share(&network("100.00"), &household(3)),
            money("33.33")
        );
        assert_eq!(
            per_capita_share(&network("200.00"), &household(3)),
            money("66.67")
        );
        assert_eq!(per_capita_share(&network("0.05"), &household(2)), money("0.03"));
    }

    #[test]
    fn test_share_scale_is_two_places() {
        let share = per_capita_share(&network("10.00"), &household(3));
        assert_eq!(share.scale(), MONEY_SCALE);
    }

    #[test]
    fn test_whole_amount_gains_cents() {
        let share = per_capita_share(&network("250"), &HouseholdSettings::default());
        assert_eq!(share.scale(), MONEY_SCALE);
        assert_eq!(share.to_string(), "50.00");
    }

    #[test]
    fn test_single_resident_pays_everything() {
        assert_eq!(
            per_capita_share(&utilities("123.45", "0.45"), &household(1)),
            money("123.00")
        );
    }
}
