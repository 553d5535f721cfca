//! Resident entity - a registered member of the household.
//!
//! Usernames and emails are stored lowercase and are unique at the schema level.
//! Passwords are kept only as Argon2id PHC strings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Profile picture assigned at registration
pub const DEFAULT_IMAGE_FILE: &str = "default.jpg";

/// Access level of a resident
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Regular resident
    #[sea_orm(string_value = "USER")]
    User,
    /// Administrator who records monthly charges
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

/// Resident database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "residents")]
pub struct Model {
    /// Unique identifier for the resident
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name, lowercase
    #[sea_orm(unique)]
    pub username: String,
    /// Given name, capitalized
    pub name: String,
    /// Family name, capitalized
    pub surname: String,
    /// Contact email, lowercase
    #[sea_orm(unique)]
    pub email: String,
    /// Profile picture file name
    pub image_file: String,
    /// Salted password hash in PHC string format
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Set when an administrator has approved the account (stored, not enforced)
    pub accepted: bool,
    /// Whether the account is active
    pub active: bool,
    /// Access level
    pub role: Role,
    /// Time of the last successful login
    pub last_login: Option<DateTimeUtc>,
}

/// Defines relationships between Resident and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One resident authors many posts
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
    /// One resident makes many payments
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
