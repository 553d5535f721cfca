//! Charge period entity - one month's network-access (internet) bill.
//!
//! At most one row exists per (month, year); the unique index is created
//! alongside the table in `config::database::create_tables`.

use super::month::Month;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Network charge period database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "charge_periods")]
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
    /// Date by which the bill must be paid
    pub due_date: Date,
    /// Late-payment penalty
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub penalty: Decimal,
}

/// Defines relationships between `ChargePeriod` and other entities
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
