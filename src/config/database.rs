//! Database configuration module.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust models. The month-scoped indexes are added on top:
//! a unique index on limits (`owner_id`, `period`) that enforces one limit per user per
//! month, and a plain index on expenses for month lookups.

use crate::entities::{Expense, ExpenseColumn, Limit, LimitColumn};
use crate::errors::Result;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info, instrument};

/// Default connection string when neither the environment nor `config.toml` names one.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://spending_tracker.sqlite?mode=rwc";

/// Establishes a connection to the database at `database_url`.
#[instrument]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database");
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates the `expenses` and `limits` tables and their indexes if they are missing.
///
/// Safe to run on every start-up.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut expense_table = schema.create_table_from_entity(Expense);
    let mut limit_table = schema.create_table_from_entity(Limit);
    db.execute(builder.build(expense_table.if_not_exists())).await?;
    db.execute(builder.build(limit_table.if_not_exists())).await?;

    let expense_period_index = Index::create()
        .name("idx_expenses_owner_period")
        .table(Expense)
        .col(ExpenseColumn::OwnerId)
        .col(ExpenseColumn::Period)
        .if_not_exists()
        .to_owned();
    let limit_period_index = Index::create()
        .name("idx_limits_owner_period_unique")
        .table(Limit)
        .col(LimitColumn::OwnerId)
        .col(LimitColumn::Period)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(builder.build(&expense_period_index)).await?;
    db.execute(builder.build(&limit_period_index)).await?;

    info!("Database tables and indexes ensured");
    Ok(())
}
