//! Unified error type for the spending tracker.
//!
//! Validation and policy errors carry enough context to render a message for the
//! caller; persistence failures wrap the underlying `DbErr` unchanged.

use crate::core::guard::{Mutation, RecordKind};
use crate::core::period::PeriodKey;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The period string is not exactly two `-`-separated parts
    #[error("invalid month format '{input}', use YYYY-MM")]
    InvalidPeriodFormat { input: String },

    /// The year part is not an integer or not a representable calendar year
    #[error("invalid year '{input}'")]
    InvalidYear { input: String },

    /// The month part is not an integer
    #[error("invalid month '{input}'")]
    InvalidMonth { input: String },

    #[error("month must be between 1 and 12, got {month}")]
    MonthOutOfRange { month: i64 },

    /// A create, update or delete targeted a month before the current one
    #[error("cannot {action} {kind} for {period}: month is before the current month")]
    PastPeriod {
        action: Mutation,
        kind: RecordKind,
        period: PeriodKey,
    },

    #[error("a limit already exists for {period}")]
    DuplicatePeriod { period: PeriodKey },

    #[error("expense {id} not found")]
    ExpenseNotFound { id: i64 },

    #[error("limit {id} not found")]
    LimitNotFound { id: i64 },

    #[error("no limit found for {period}")]
    NoLimitForPeriod { period: PeriodKey },

    #[error("description is required")]
    EmptyDescription,

    #[error("amount must be greater than zero, got {amount}")]
    InvalidAmount { amount: f64 },

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("configuration error: {message}")]
    Config { message: String },
}

impl Error {
    /// True for the "missing or not owned" family of errors.
    ///
    /// A month lookup that finds no limit is reported this way too, so a transport
    /// can answer it with an empty response instead of a failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ExpenseNotFound { .. } | Self::LimitNotFound { .. } | Self::NoLimitForPeriod { .. }
        )
    }

    /// True when the caller can fix the request; false for persistence and setup failures.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Database(_) | Self::Config { .. })
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
