//! Monthly spending summary.
//!
//! Combines a month's expenses with its limit into the figures a dashboard shows:
//! how much was spent, how much of the limit is left and whether it was exceeded.
//! Read-only, so past months can always be summarized.

use crate::{
    core::period::PeriodKey,
    errors::Result,
    store::{expenses, limits},
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{debug, instrument};

/// How a month's spending compares to its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SpendingStatus {
    /// No expenses and no limit recorded
    NoActivity,
    /// Expenses recorded but no limit set
    NoLimit,
    /// Total spending is at or below the limit
    WithinLimit,
    /// Total spending exceeds the limit
    OverLimit,
}

/// Spending figures for one owner and month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub period: PeriodKey,
    /// Sum of all expense amounts in the month
    pub total_spent: f64,
    pub expense_count: usize,
    /// The month's limit, if one is set
    pub limit: Option<f64>,
    /// Limit minus spending; negative when over the limit
    pub remaining: Option<f64>,
    /// Spending as a percentage of the limit (can exceed 100)
    pub progress_percent: Option<f64>,
    pub status: SpendingStatus,
}

/// Builds the summary for `owner_id` and the `"YYYY-MM"` month `period`.
#[instrument(skip(db))]
pub async fn monthly_summary(
    db: &DatabaseConnection,
    owner_id: i64,
    period: &str,
) -> Result<MonthlySummary> {
    let period = PeriodKey::parse(period)?;
    let rows =
        expenses::find_by_owner_and_period_range(db, owner_id, period.first_day(), period.last_day())
            .await?;
    let limit = limits::find_by_owner_and_period(db, owner_id, period)
        .await?
        .map(|l| l.amount);

    let total_spent: f64 = rows.iter().map(|e| e.amount).sum();
    let summary = summarize(period, total_spent, rows.len(), limit);
    debug!(status = ?summary.status, total_spent, "built monthly summary");
    Ok(summary)
}

/// Pure summary computation, separated from the queries.
#[must_use]
pub fn summarize(
    period: PeriodKey,
    total_spent: f64,
    expense_count: usize,
    limit: Option<f64>,
) -> MonthlySummary {
    let status = match limit {
        None if expense_count == 0 => SpendingStatus::NoActivity,
        None => SpendingStatus::NoLimit,
        Some(cap) if total_spent > cap => SpendingStatus::OverLimit,
        Some(_) => SpendingStatus::WithinLimit,
    };

    MonthlySummary {
        period,
        total_spent,
        expense_count,
        limit,
        remaining: limit.map(|cap| cap - total_spent),
        progress_percent: limit.map(|cap| calculate_progress(total_spent, cap)),
        status,
    }
}

/// Spending as a percentage of the limit. A zero limit reports 0%.
#[must_use]
pub fn calculate_progress(spent: f64, limit: f64) -> f64 {
    if limit == 0.0 {
        return 0.0;
    }

    (spent / limit) * 100.0
}
