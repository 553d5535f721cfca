//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod charge_period;
pub mod month;
pub mod payment;
pub mod post;
pub mod resident;
pub mod utility_period;

// Re-export specific types to avoid conflicts
pub use charge_period::{
    Column as ChargePeriodColumn, Entity as ChargePeriod, Model as ChargePeriodModel,
};
pub use month::Month;
pub use payment::{Column as PaymentColumn, Entity as Payment, Model as PaymentModel};
pub use post::{Column as PostColumn, Entity as Post, Model as PostModel};
pub use resident::{Column as ResidentColumn, Entity as Resident, Model as ResidentModel, Role};
pub use utility_period::{
    Column as UtilityPeriodColumn, Entity as UtilityPeriod, Model as UtilityPeriodModel,
};
