//! Shared test utilities.
//!
//! Helpers for setting up an in-memory database, a clock frozen in June 2024 and
//! rows inserted directly through the store, bypassing the past-month guard so tests
//! can seed history.

use crate::{
    core::{clock::FixedClock, expense::NewExpense, limit::NewLimit},
    entities::{expense, limit},
    errors::{Error, Result},
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tracing_subscriber::EnvFilter;

pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Mid-June 2024, the "now" used throughout the tests.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// A clock whose current period is 2024-06.
pub fn june_2024_clock() -> FixedClock {
    FixedClock(test_now())
}

pub fn new_expense(description: &str, amount: f64, period: &str) -> NewExpense {
    NewExpense {
        description: description.to_string(),
        amount,
        period: period.to_string(),
    }
}

pub fn new_limit(amount: f64, period: &str) -> NewLimit {
    NewLimit {
        amount,
        period: period.to_string(),
    }
}

fn parse_day(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| Error::Config {
        message: format!("bad test date {date}: {e}"),
    })
}

/// Inserts an expense dated `date` (`YYYY-MM-DD`) as-is, with no validation.
pub async fn insert_expense_row(
    db: &DatabaseConnection,
    owner_id: i64,
    description: &str,
    amount: f64,
    date: &str,
) -> Result<expense::Model> {
    let row = expense::ActiveModel {
        description: Set(description.to_string()),
        amount: Set(amount),
        period: Set(parse_day(date)?),
        owner_id: Set(owner_id),
        created_at: Set(test_now()),
        updated_at: Set(test_now()),
        ..Default::default()
    };
    row.insert(db).await.map_err(Into::into)
}

/// Inserts a limit dated `date` (`YYYY-MM-DD`) as-is, with no validation.
pub async fn insert_limit_row(
    db: &DatabaseConnection,
    owner_id: i64,
    amount: f64,
    date: &str,
) -> Result<limit::Model> {
    let row = limit::ActiveModel {
        amount: Set(amount),
        period: Set(parse_day(date)?),
        owner_id: Set(owner_id),
        created_at: Set(test_now()),
        updated_at: Set(test_now()),
        ..Default::default()
    };
    row.insert(db).await.map_err(Into::into)
}
