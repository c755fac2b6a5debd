//! `spending-tracker` - Business rules for month-scoped personal finance records
//!
//! Users record expenses and a spending limit per calendar month. This crate owns the
//! rules around those records: the `"YYYY-MM"` period format, the policy that only the
//! current or a future month may be changed, and the one-limit-per-user-per-month
//! constraint. HTTP routing and authentication are left to the caller, which passes an
//! already-authenticated owner id into the services in [`crate::core`].

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    unsafe_code,
    unreachable_code,
    unreachable_patterns,
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    future_incompatible,
    rust_2018_idioms,
)]
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Every service returns the crate `Error`
)]

/// Configuration management for database and application settings
pub mod config;
/// Core business logic - period codec, temporal guard and record services
pub mod core;
/// SeaORM entity definitions for database tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;
/// SeaORM queries backing the services
pub mod store;

#[cfg(test)]
pub mod test_utils;
