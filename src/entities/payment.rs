//! Payment entity - a resident's (possibly partial) payment against one period.
//!
//! Exactly one of `charge_period_id` / `utility_period_id` is set. Neither
//! amount is reconciled against the period's per-capita share automatically.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    /// Unique identifier for the payment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Amount the resident still owes
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub remaining_amount: Decimal,
    /// Amount the resident has already paid
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub paid_amount: Decimal,
    /// Date the administrator confirmed the payment
    pub accepted_on: Option<Date>,
    /// Resident who owes or paid
    pub resident_id: i64,
    /// Network period this payment is for
    pub charge_period_id: Option<i64>,
    /// Utility period this payment is for
    pub utility_period_id: Option<i64>,
}

/// Defines relationships between Payment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each payment belongs to one resident
    #[sea_orm(
        belongs_to = "super::resident::Entity",
        from = "Column::ResidentId",
        to = "super::resident::Column::Id",
        on_delete = "Restrict"
    )]
    Resident,
    /// Payment against a network period
    #[sea_orm(
        belongs_to = "super::charge_period::Entity",
        from = "Column::ChargePeriodId",
        to = "super::charge_period::Column::Id",
        on_delete = "Restrict"
    )]
    ChargePeriod,
    /// Payment against a utility period
    #[sea_orm(
        belongs_to = "super::utility_period::Entity",
        from = "Column::UtilityPeriodId",
        to = "super::utility_period::Column::Id",
        on_delete = "Restrict"
    )]
    UtilityPeriod,
}

impl Related<super::resident::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Resident.def()
    }
}

impl Related<super::charge_period::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChargePeriod.def()
    }
}

impl Related<super::utility_period::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UtilityPeriod.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
