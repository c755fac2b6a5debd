use crate::{
    core::period::PeriodKey,
    entities::{Limit, limit},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue::Unchanged, PaginatorTrait, QueryOrder, Set, SqlErr, prelude::*};
use tracing::{debug, instrument, warn};

/// Inserts a new limit.
///
/// A unique-index violation on (`owner_id`, `period`) means another request stored a
/// limit for the same month first; it is reported as [`Error::DuplicatePeriod`].
#[instrument(skip(db))]
pub async fn insert<C>(
    db: &C,
    owner_id: i64,
    amount: f64,
    period: PeriodKey,
    now: DateTime<Utc>,
) -> Result<limit::Model>
where
    C: ConnectionTrait,
{
    let row = limit::ActiveModel {
        amount: Set(amount),
        period: Set(period.first_day()),
        owner_id: Set(owner_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    match row.insert(db).await {
        Ok(stored) => {
            debug!(limit_id = stored.id, "inserted limit");
            Ok(stored)
        }
        Err(err) => match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                warn!(owner_id, %period, %detail, "limit insert lost uniqueness race");
                Err(Error::DuplicatePeriod { period })
            }
            _ => Err(err.into()),
        },
    }
}

pub async fn find_by_owner_and_id<C>(
    db: &C,
    id: i64,
    owner_id: i64,
) -> Result<Option<limit::Model>>
where
    C: ConnectionTrait,
{
    Limit::find()
        .filter(limit::Column::Id.eq(id))
        .filter(limit::Column::OwnerId.eq(owner_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// The limit stored for exactly this month, if any.
pub async fn find_by_owner_and_period<C>(
    db: &C,
    owner_id: i64,
    period: PeriodKey,
) -> Result<Option<limit::Model>>
where
    C: ConnectionTrait,
{
    Limit::find()
        .filter(limit::Column::OwnerId.eq(owner_id))
        .filter(limit::Column::Period.eq(period.first_day()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// All limits of an owner, most recent month first.
pub async fn find_all_by_owner<C>(db: &C, owner_id: i64) -> Result<Vec<limit::Model>>
where
    C: ConnectionTrait,
{
    Limit::find()
        .filter(limit::Column::OwnerId.eq(owner_id))
        .order_by_desc(limit::Column::Period)
        .order_by_asc(limit::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

pub async fn count_by_owner_and_period<C>(db: &C, owner_id: i64, period: PeriodKey) -> Result<u64>
where
    C: ConnectionTrait,
{
    Limit::find()
        .filter(limit::Column::OwnerId.eq(owner_id))
        .filter(limit::Column::Period.eq(period.first_day()))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Overwrites every column of an existing row with the values in `model`.
pub async fn save<C>(db: &C, model: limit::Model) -> Result<limit::Model>
where
    C: ConnectionTrait,
{
    let row = limit::ActiveModel {
        id: Unchanged(model.id),
        amount: Set(model.amount),
        period: Set(model.period),
        owner_id: Set(model.owner_id),
        created_at: Set(model.created_at),
        updated_at: Set(model.updated_at),
    };
    row.update(db).await.map_err(Into::into)
}

/// Hard-deletes a limit; returns the number of rows removed (0 or 1).
pub async fn delete_by_owner_and_id<C>(db: &C, id: i64, owner_id: i64) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = Limit::delete_many()
        .filter(limit::Column::Id.eq(id))
        .filter(limit::Column::OwnerId.eq(owner_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_exact_period_lookup_and_count() -> Result<()> {
        let db = setup_test_db().await?;
        let june = PeriodKey::parse("2024-06")?;
        let july = PeriodKey::parse("2024-07")?;
        let stored = insert(&db, 1, 500.0, june, test_now()).await?;

        assert_eq!(find_by_owner_and_period(&db, 1, june).await?, Some(stored));
        assert!(find_by_owner_and_period(&db, 1, july).await?.is_none());
        assert!(find_by_owner_and_period(&db, 2, june).await?.is_none());

        assert_eq!(count_by_owner_and_period(&db, 1, june).await?, 1);
        assert_eq!(count_by_owner_and_period(&db, 1, july).await?, 0);
        assert_eq!(count_by_owner_and_period(&db, 2, june).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_unique_index_rejects_second_limit_for_month() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let june = PeriodKey::parse("2024-06")?;
        insert(&db, 1, 500.0, june, test_now()).await?;

        let err = insert(&db, 1, 750.0, june, test_now()).await.unwrap_err();
        assert!(matches!(err, Error::DuplicatePeriod { period } if period == june));

        // Another owner may use the same month.
        insert(&db, 2, 750.0, june, test_now()).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_find_all_orders_by_period_desc() -> Result<()> {
        let db = setup_test_db().await?;
        let may = insert(&db, 1, 100.0, PeriodKey::parse("2024-05")?, test_now()).await?;
        let july = insert(&db, 1, 300.0, PeriodKey::parse("2024-07")?, test_now()).await?;
        let june = insert(&db, 1, 200.0, PeriodKey::parse("2024-06")?, test_now()).await?;

        let all = find_all_by_owner(&db, 1).await?;
        assert_eq!(all, vec![july, june, may]);
        Ok(())
    }

    #[tokio::test]
    async fn test_save_and_delete() -> Result<()> {
        let db = setup_test_db().await?;
        let mut stored = insert(&db, 1, 100.0, PeriodKey::parse("2024-06")?, test_now()).await?;

        stored.amount = 250.0;
        save(&db, stored.clone()).await?;
        let reloaded = find_by_owner_and_id(&db, stored.id, 1).await?.unwrap();
        assert_eq!(reloaded, stored);

        assert_eq!(delete_by_owner_and_id(&db, stored.id, 2).await?, 0);
        assert_eq!(delete_by_owner_and_id(&db, stored.id, 1).await?, 1);
        assert!(find_by_owner_and_id(&db, stored.id, 1).await?.is_none());
        Ok(())
    }
}
