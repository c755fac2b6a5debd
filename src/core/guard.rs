//! Temporal guard for month-scoped records.
//!
//! A record may be created, edited or deleted only while its month is the current
//! month or later. Mutability is never stored: it is recomputed from the record's
//! period and the clock on every call, so a record silently becomes read-only once
//! its month has passed.

use crate::{
    core::{clock::Clock, period::PeriodKey},
    errors::{Error, Result},
};
use std::fmt;

/// The kind of month-scoped record being guarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Expense,
    Limit,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Expense => "expense",
            Self::Limit => "limit",
        })
    }
}

/// A write operation subject to the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}

/// Derived lifecycle state of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// The period is the current month or later
    Mutable,
    /// The period is before the current month
    Immutable,
}

/// The month containing the clock's current UTC instant.
pub fn current_period(clock: &impl Clock) -> PeriodKey {
    PeriodKey::from_instant(clock.now())
}

/// True iff `period` is strictly before the current month.
pub fn is_past_period(period: PeriodKey, clock: &impl Clock) -> bool {
    period < current_period(clock)
}

/// Whether a record stored under `period` can still be changed.
///
/// Derived on every call from the period and the clock; a record moves from
/// `Mutable` to `Immutable` when its month ends and never back.
pub fn record_state(period: PeriodKey, clock: &impl Clock) -> RecordState {
    if is_past_period(period, clock) {
        RecordState::Immutable
    } else {
        RecordState::Mutable
    }
}

/// Rejects `action` on a `kind` record whose period has passed.
pub fn ensure_mutable(
    period: PeriodKey,
    clock: &impl Clock,
    action: Mutation,
    kind: RecordKind,
) -> Result<()> {
    match record_state(period, clock) {
        RecordState::Mutable => Ok(()),
        RecordState::Immutable => {
            tracing::debug!(%period, %action, %kind, "rejected mutation on past period");
            Err(Error::PastPeriod {
                action,
                kind,
                period,
            })
        }
    }
}
