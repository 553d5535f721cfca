//! Validated input forms.
//!
//! Each form carries the field rules checked before any store is touched: required
//! fields, lengths, email shape and password confirmation. Conversions into the core
//! input structs are provided where the shapes line up.

use crate::{
    config::YearRange,
    core::{
        charges::{NewChargePeriod, NewUtilityPeriod},
        identity::NewResident,
    },
    entities::Month,
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

/// New account sign-up
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegistrationForm {
    /// Login name
    #[validate(length(min = 2, max = 20))]
    pub username: String,
    /// Given name
    #[validate(length(min = 2, max = 30))]
    pub name: String,
    /// Family name
    #[validate(length(min = 2, max = 30))]
    pub surname: String,
    /// Contact email
    #[validate(email)]
    pub email: String,
    /// Chosen password
    #[validate(length(min = 2, max = 20))]
    pub password: String,
    /// Must repeat `password`
    #[validate(
        length(min = 2, max = 20),
        must_match(other = "password", code = "password_mismatch")
    )]
    pub confirm_password: String,
}

impl From<RegistrationForm> for NewResident {
    fn from(form: RegistrationForm) -> Self {
        Self {
            username: form.username,
            name: form.name,
            surname: form.surname,
            email: form.email,
            password: form.password,
        }
    }
}

/// Login credentials
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginForm {
    /// Login name
    #[validate(length(min = 2, max = 20))]
    pub username: String,
    /// Password
    #[validate(length(min = 2, max = 20))]
    pub password: String,
    /// Keep the session after the browser closes
    #[serde(default)]
    pub remember: bool,
}

/// New or edited bulletin post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostForm {
    /// Headline
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    /// Body text
    #[validate(length(min = 1))]
    pub content: String,
}

/// New monthly internet entry
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChargePeriodForm {
    /// Billing month
    pub month: Month,
    /// Billing year
    pub year: i32,
    /// Total amount
    pub amount: Decimal,
    /// Payment due date
    pub due_date: NaiveDate,
    /// Late-payment penalty
    pub penalty: Decimal,
}

impl ChargePeriodForm {
    /// Field validation plus the configured year range.
    pub fn validate_for(&self, years: &YearRange) -> Result<()> {
        self.validate()?;
        check_year(self.year, years)
    }
}

impl From<ChargePeriodForm> for NewChargePeriod {
    fn from(form: ChargePeriodForm) -> Self {
        Self {
            month: form.month,
            year: form.year,
            amount: form.amount,
            due_date: form.due_date,
            penalty: form.penalty,
        }
    }
}

/// New monthly utilities entry
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UtilityPeriodForm {
    /// Billing month
    pub month: Month,
    /// Billing year
    pub year: i32,
    /// Total amount
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
    /// Electricity refund
    pub electricity_refund: Decimal,
}

impl UtilityPeriodForm {
    /// Field validation plus the configured year range.
    pub fn validate_for(&self, years: &YearRange) -> Result<()> {
        self.validate()?;
        check_year(self.year, years)
    }
}

impl From<UtilityPeriodForm> for NewUtilityPeriod {
    fn from(form: UtilityPeriodForm) -> Self {
        Self {
            month: form.month,
            year: form.year,
            amount: form.amount,
            cold_water_kitchen: form.cold_water_kitchen,
            warm_water_kitchen: form.warm_water_kitchen,
            cold_water_bathroom: form.cold_water_bathroom,
            warm_water_bathroom: form.warm_water_bathroom,
            electricity: form.electricity,
            gas: form.gas,
            electricity_refund: form.electricity_refund,
        }
    }
}

fn check_year(year: i32, years: &YearRange) -> Result<()> {
    if years.contains(year) {
        return Ok(());
    }
    let mut errors = ValidationErrors::new();
    errors.add("year", ValidationError::new("year_out_of_range"));
    Err(Error::Validation(errors))
}
