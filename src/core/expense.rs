//! Expense business logic - Creates, lists, edits and deletes monthly expenses.
//!
//! Every mutation goes through the temporal guard: an expense can only be created
//! for the current or a future month, and an existing expense can only be edited or
//! deleted while its stored month has not passed. Lookups by id always filter on the
//! owner, so another user's expense is reported exactly like a missing one.

use crate::{
    core::{
        clock::Clock,
        ensure_positive_amount,
        guard::{Mutation, RecordKind, ensure_mutable},
        normalize_description,
        period::PeriodKey,
    },
    entities::expense,
    errors::{Error, Result},
    store::expenses,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Fields accepted when recording an expense.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    /// Month in `"YYYY-MM"` form
    pub period: String,
}

/// Fields accepted when editing an expense. The month cannot be changed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseUpdate {
    pub description: String,
    pub amount: f64,
}

/// Expense projection returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
    pub id: i64,
    pub description: String,
    pub amount: f64,
    pub period: PeriodKey,
}

impl From<expense::Model> for ExpenseResponse {
    fn from(model: expense::Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
            amount: model.amount,
            period: PeriodKey::from_date(model.period),
        }
    }
}

/// Records a new expense for `owner_id`.
///
/// The description is trimmed and must not be blank, and the amount must be a
/// positive number. The month must be the current one or later according to
/// `clock`. All of this is checked before anything is written.
///
/// # Arguments
/// * `db` - Database connection
/// * `clock` - Source of "now" for the month check and the timestamps
/// * `owner_id` - The authenticated user the expense belongs to
/// * `request` - Description, amount and `"YYYY-MM"` month
///
/// # Errors
/// Returns a validation error for a bad payload or month string,
/// [`Error::PastPeriod`] for a month that has already passed, and
/// [`Error::Database`] if the insert fails.
#[instrument(skip(db, clock, request))]
pub async fn create_expense(
    db: &DatabaseConnection,
    clock: &impl Clock,
    owner_id: i64,
    request: NewExpense,
) -> Result<ExpenseResponse> {
    let description = normalize_description(&request.description)?;
    ensure_positive_amount(request.amount)?;
    let period = PeriodKey::parse(&request.period)?;
    ensure_mutable(period, clock, Mutation::Create, RecordKind::Expense)?;

    let stored = expenses::insert(
        db,
        owner_id,
        description,
        request.amount,
        period,
        clock.now(),
    )
    .await?;

    info!(expense_id = stored.id, %period, amount = stored.amount, "created expense");
    Ok(stored.into())
}

/// Lists the owner's expenses for one month, in insertion order.
///
/// Every expense whose stored date falls between the first and last day of the month
/// is returned. Past months can be read freely, and an empty month is not an error.
#[instrument(skip(db))]
pub async fn list_expenses_by_month(
    db: &DatabaseConnection,
    owner_id: i64,
    period: &str,
) -> Result<Vec<ExpenseResponse>> {
    let period = PeriodKey::parse(period)?;
    let rows =
        expenses::find_by_owner_and_period_range(db, owner_id, period.first_day(), period.last_day())
            .await?;

    debug!(count = rows.len(), %period, "listed expenses for month");
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Lists all of the owner's expenses, most recent month first.
///
/// Expenses within the same month keep their insertion order.
#[instrument(skip(db))]
pub async fn list_expenses(db: &DatabaseConnection, owner_id: i64) -> Result<Vec<ExpenseResponse>> {
    let rows = expenses::find_all_by_owner(db, owner_id).await?;
    debug!(count = rows.len(), "listed expenses");
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Replaces the description and amount of an expense whose month has not passed.
///
/// The expense is looked up by id and owner together, so an expense owned by someone
/// else is reported exactly like a missing one. The month itself never changes; the
/// past-month check uses the stored month and the clock at the time of the call.
///
/// # Arguments
/// * `db` - Database connection
/// * `clock` - Source of "now" for the month check and `updated_at`
/// * `owner_id` - The authenticated user
/// * `expense_id` - The expense to edit
/// * `update` - New description and amount
#[instrument(skip(db, clock, update))]
pub async fn update_expense(
    db: &DatabaseConnection,
    clock: &impl Clock,
    owner_id: i64,
    expense_id: i64,
    update: ExpenseUpdate,
) -> Result<ExpenseResponse> {
    let description = normalize_description(&update.description)?;
    ensure_positive_amount(update.amount)?;

    let mut existing = expenses::find_by_owner_and_id(db, expense_id, owner_id)
        .await?
        .ok_or(Error::ExpenseNotFound { id: expense_id })?;

    ensure_mutable(
        PeriodKey::from_date(existing.period),
        clock,
        Mutation::Update,
        RecordKind::Expense,
    )?;

    existing.description = description;
    existing.amount = update.amount;
    existing.updated_at = clock.now();

    let saved = expenses::save(db, existing).await?;
    info!(expense_id, amount = saved.amount, "updated expense");
    Ok(saved.into())
}

/// Permanently removes an expense whose month has not passed.
///
/// Fails with [`Error::ExpenseNotFound`] when the expense does not exist or is not
/// owned by `owner_id`, and with [`Error::PastPeriod`] when its month is over.
#[instrument(skip(db, clock))]
pub async fn delete_expense(
    db: &DatabaseConnection,
    clock: &impl Clock,
    owner_id: i64,
    expense_id: i64,
) -> Result<()> {
    let existing = expenses::find_by_owner_and_id(db, expense_id, owner_id)
        .await?
        .ok_or(Error::ExpenseNotFound { id: expense_id })?;

    ensure_mutable(
        PeriodKey::from_date(existing.period),
        clock,
        Mutation::Delete,
        RecordKind::Expense,
    )?;

    // The row can vanish between the lookup and the delete.
    if expenses::delete_by_owner_and_id(db, expense_id, owner_id).await? == 0 {
        return Err(Error::ExpenseNotFound { id: expense_id });
    }

    info!(expense_id, "deleted expense");
    Ok(())
}
