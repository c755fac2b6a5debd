//! Persistence for month-scoped records.
//!
//! Thin SeaORM query functions used by the services in [`crate::core`]. Every lookup
//! that targets a single record filters on the owner in the same predicate as the
//! id, so a record owned by someone else is indistinguishable from a missing one.
//! "Not found" is reported as `Ok(None)`; any other failure is a database error.

/// Queries over the `expenses` table
pub mod expenses;
/// Queries over the `limits` table
pub mod limits;
