//! Monthly limit business logic.
//!
//! Same lifecycle as expenses, plus one rule: a user has at most one limit per
//! month. Creation checks for an existing limit before inserting, and the unique
//! index on (`owner_id`, `period`) catches concurrent creations that both pass the
//! check.

use crate::{
    core::{
        clock::Clock,
        ensure_positive_amount,
        guard::{Mutation, RecordKind, ensure_mutable},
        period::PeriodKey,
    },
    entities::limit,
    errors::{Error, Result},
    store::limits,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Fields accepted when setting a month's limit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLimit {
    pub amount: f64,
    /// Month in `"YYYY-MM"` form
    pub period: String,
}

/// Fields accepted when editing a limit. Only the amount can change.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitUpdate {
    pub amount: f64,
}

/// Limit projection returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitResponse {
    pub id: i64,
    pub amount: f64,
    pub period: PeriodKey,
}

impl From<limit::Model> for LimitResponse {
    fn from(model: limit::Model) -> Self {
        Self {
            id: model.id,
            amount: model.amount,
            period: PeriodKey::from_date(model.period),
        }
    }
}

/// Sets the limit for a current or future month.
///
/// The amount must be positive and the month must not have passed according to
/// `clock`. An owner has at most one limit per month: if one already exists this
/// fails with [`Error::DuplicatePeriod`] and nothing is written. Two concurrent
/// creations for the same month are settled by the unique index, and the loser gets
/// the same error.
///
/// # Arguments
/// * `db` - Database connection
/// * `clock` - Source of "now" for the month check and the timestamps
/// * `owner_id` - The authenticated user the limit belongs to
/// * `request` - Amount and `"YYYY-MM"` month
#[instrument(skip(db, clock, request))]
pub async fn create_limit(
    db: &DatabaseConnection,
    clock: &impl Clock,
    owner_id: i64,
    request: NewLimit,
) -> Result<LimitResponse> {
    ensure_positive_amount(request.amount)?;
    let period = PeriodKey::parse(&request.period)?;
    ensure_mutable(period, clock, Mutation::Create, RecordKind::Limit)?;

    if limits::count_by_owner_and_period(db, owner_id, period).await? > 0 {
        warn!(%period, "limit already exists for month");
        return Err(Error::DuplicatePeriod { period });
    }

    let stored = limits::insert(db, owner_id, request.amount, period, clock.now()).await?;
    info!(limit_id = stored.id, %period, amount = stored.amount, "created limit");
    Ok(stored.into())
}

/// The owner's limit for one month.
///
/// A month without a limit yields [`Error::NoLimitForPeriod`], which callers usually
/// treat as "no content" rather than a failure.
#[instrument(skip(db))]
pub async fn get_limit_by_month(
    db: &DatabaseConnection,
    owner_id: i64,
    period: &str,
) -> Result<LimitResponse> {
    let period = PeriodKey::parse(period)?;
    limits::find_by_owner_and_period(db, owner_id, period)
        .await?
        .map(Into::into)
        .ok_or(Error::NoLimitForPeriod { period })
}

/// Lists all of the owner's limits, most recent month first.
#[instrument(skip(db))]
pub async fn list_limits(db: &DatabaseConnection, owner_id: i64) -> Result<Vec<LimitResponse>> {
    let rows = limits::find_all_by_owner(db, owner_id).await?;
    debug!(count = rows.len(), "listed limits");
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Changes the amount of a limit whose month has not passed.
///
/// The limit is looked up by id and owner together; a limit owned by someone else is
/// reported as [`Error::LimitNotFound`], the same as a missing one. The month cannot
/// be changed, so moving a limit means deleting it and creating a new one.
///
/// # Arguments
/// * `db` - Database connection
/// * `clock` - Source of "now" for the month check and `updated_at`
/// * `owner_id` - The authenticated user
/// * `limit_id` - The limit to edit
/// * `update` - The new amount
#[instrument(skip(db, clock, update))]
pub async fn update_limit(
    db: &DatabaseConnection,
    clock: &impl Clock,
    owner_id: i64,
    limit_id: i64,
    update: LimitUpdate,
) -> Result<LimitResponse> {
    ensure_positive_amount(update.amount)?;

    let mut existing = limits::find_by_owner_and_id(db, limit_id, owner_id)
        .await?
        .ok_or(Error::LimitNotFound { id: limit_id })?;

    ensure_mutable(
        PeriodKey::from_date(existing.period),
        clock,
        Mutation::Update,
        RecordKind::Limit,
    )?;

    existing.amount = update.amount;
    existing.updated_at = clock.now();

    let saved = limits::save(db, existing).await?;
    info!(limit_id, amount = saved.amount, "updated limit");
    Ok(saved.into())
}

/// Permanently removes a limit whose month has not passed.
///
/// Deleting frees the month, so a new limit can be created for it afterwards.
#[instrument(skip(db, clock))]
pub async fn delete_limit(
    db: &DatabaseConnection,
    clock: &impl Clock,
    owner_id: i64,
    limit_id: i64,
) -> Result<()> {
    let existing = limits::find_by_owner_and_id(db, limit_id, owner_id)
        .await?
        .ok_or(Error::LimitNotFound { id: limit_id })?;

    ensure_mutable(
        PeriodKey::from_date(existing.period),
        clock,
        Mutation::Delete,
        RecordKind::Limit,
    )?;

    if limits::delete_by_owner_and_id(db, limit_id, owner_id).await? == 0 {
        return Err(Error::LimitNotFound { id: limit_id });
    }

    info!(limit_id, "deleted limit");
    Ok(())
}
