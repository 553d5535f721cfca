//! Database configuration module for house-share.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs. The composite (month, year) uniqueness of
//! charge periods cannot be expressed on a single column and gets its own unique index.

use crate::entities::{
    ChargePeriod, Payment, Post, Resident, UtilityPeriod, charge_period, utility_period,
};
use crate::errors::Result;
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema, sea_query::Index,
};
use tracing::debug;

const DEFAULT_DATABASE_DIR: &str = "data";
const DEFAULT_DATABASE_URL: &str = "sqlite://data/house_share.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// Falls back to a local `SQLite` file if no environment variable is set, creating its
/// directory when needed.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    if database_url == DEFAULT_DATABASE_URL {
        std::fs::create_dir_all(DEFAULT_DATABASE_DIR)?;
    }
    debug!("Connecting to database at {database_url}");
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all tables (if missing) plus the unique (month, year) indexes.
///
/// Tables are created parents first so foreign keys resolve:
/// residents, posts, charge periods, utility periods, payments.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    create_table(db, &schema, Resident).await?;
    create_table(db, &schema, Post).await?;
    create_table(db, &schema, ChargePeriod).await?;
    create_table(db, &schema, UtilityPeriod).await?;
    create_table(db, &schema, Payment).await?;

    let charge_index = Index::create()
        .name("idx_charge_periods_month_year")
        .table(ChargePeriod)
        .col(charge_period::Column::Month)
        .col(charge_period::Column::Year)
        .unique()
        .if_not_exists()
        .to_owned();
    let utility_index = Index::create()
        .name("idx_utility_periods_month_year")
        .table(UtilityPeriod)
        .col(utility_period::Column::Month)
        .col(utility_period::Column::Year)
        .unique()
        .if_not_exists()
        .to_owned();

    db.execute(builder.build(&charge_index)).await?;
    db.execute(builder.build(&utility_index)).await?;

    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut table = schema.create_table_from_entity(entity);
    table.if_not_exists();
    db.execute(builder.build(&table)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        ChargePeriodModel, PaymentModel, PostModel, ResidentModel, UtilityPeriodModel,
    };
    use sea_orm::QuerySelect;

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<ResidentModel> = Resident::find().limit(1).all(&db).await?;
        let _: Vec<PostModel> = Post::find().limit(1).all(&db).await?;
        let _: Vec<ChargePeriodModel> = ChargePeriod::find().limit(1).all(&db).await?;
        let _: Vec<UtilityPeriodModel> = UtilityPeriod::find().limit(1).all(&db).await?;
        let _: Vec<PaymentModel> = Payment::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_repeatable() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
