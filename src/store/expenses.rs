use crate::{
    core::period::PeriodKey,
    entities::{Expense, expense},
    errors::Result,
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue::Unchanged, QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

/// Inserts a new expense and returns the stored row, including its generated id.
#[instrument(skip(db, description))]
pub async fn insert<C>(
    db: &C,
    owner_id: i64,
    description: String,
    amount: f64,
    period: PeriodKey,
    now: DateTime<Utc>,
) -> Result<expense::Model>
where
    C: ConnectionTrait,
{
    let row = expense::ActiveModel {
        description: Set(description),
        amount: Set(amount),
        period: Set(period.first_day()),
        owner_id: Set(owner_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let stored = row.insert(db).await?;
    debug!(expense_id = stored.id, "inserted expense");
    Ok(stored)
}

pub async fn find_by_owner_and_id<C>(
    db: &C,
    id: i64,
    owner_id: i64,
) -> Result<Option<expense::Model>>
where
    C: ConnectionTrait,
{
    Expense::find()
        .filter(expense::Column::Id.eq(id))
        .filter(expense::Column::OwnerId.eq(owner_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Expenses whose period lies within `[start, end]`, both inclusive, in insertion order.
pub async fn find_by_owner_and_period_range<C>(
    db: &C,
    owner_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<expense::Model>>
where
    C: ConnectionTrait,
{
    Expense::find()
        .filter(expense::Column::OwnerId.eq(owner_id))
        .filter(expense::Column::Period.gte(start))
        .filter(expense::Column::Period.lte(end))
        .order_by_asc(expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// All expenses of an owner, most recent month first.
///
/// Rows sharing a month keep their insertion order.
pub async fn find_all_by_owner<C>(db: &C, owner_id: i64) -> Result<Vec<expense::Model>>
where
    C: ConnectionTrait,
{
    Expense::find()
        .filter(expense::Column::OwnerId.eq(owner_id))
        .order_by_desc(expense::Column::Period)
        .order_by_asc(expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Overwrites every column of an existing row with the values in `model`.
pub async fn save<C>(db: &C, model: expense::Model) -> Result<expense::Model>
where
    C: ConnectionTrait,
{
    let row = expense::ActiveModel {
        id: Unchanged(model.id),
        description: Set(model.description),
        amount: Set(model.amount),
        period: Set(model.period),
        owner_id: Set(model.owner_id),
        created_at: Set(model.created_at),
        updated_at: Set(model.updated_at),
    };
    row.update(db).await.map_err(Into::into)
}

/// Hard-deletes an expense; returns the number of rows removed (0 or 1).
pub async fn delete_by_owner_and_id<C>(db: &C, id: i64, owner_id: i64) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = Expense::delete_many()
        .filter(expense::Column::Id.eq(id))
        .filter(expense::Column::OwnerId.eq(owner_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
