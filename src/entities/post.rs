//! Post entity - a bulletin-board entry written by a resident.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Post database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    /// Unique identifier for the post
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Headline
    pub title: String,
    /// Body text
    #[sea_orm(column_type = "Text")]
    pub content: String,
    /// When the post was created; never changes afterwards
    pub date_posted: DateTimeUtc,
    /// Resident who wrote the post
    pub author_id: i64,
}

/// Defines relationships between Post and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each post belongs to one resident
    #[sea_orm(
        belongs_to = "super::resident::Entity",
        from = "Column::AuthorId",
        to = "super::resident::Column::Id",
        on_delete = "Restrict"
    )]
    Author,
}

impl Related<super::resident::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
