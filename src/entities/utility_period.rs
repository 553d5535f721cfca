//! Utility period entity - one month's combined media bill.
//!
//! Carries the water meter readings, electricity and gas amounts, and the
//! electricity refund that is subtracted before the bill is split.

use super::month::Month;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Utility period database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "utility_periods")]
pub struct Model {
    /// Unique identifier for the period
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Billing month
    pub month: Month,
    /// Billing year
    pub year: i32,
    /// Total amount billed to the household
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,
    /// Cold water, kitchen meter
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub cold_water_kitchen: Decimal,
    /// Warm water, kitchen meter
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub warm_water_kitchen: Decimal,
    /// Cold water, bathroom meter
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub cold_water_bathroom: Decimal,
    /// Warm water, bathroom meter
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub warm_water_bathroom: Decimal,
    /// Electricity charge
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub electricity: Decimal,
    /// Gas charge
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub gas: Decimal,
    /// Electricity refund deducted from the shared amount
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub electricity_refund: Decimal,
}

/// Defines relationships between `UtilityPeriod` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One period has many payments
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
