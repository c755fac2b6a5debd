//! Expense entity - A single spending record within a month.
//!
//! Each expense has a description, a positive amount, the month it counts against
//! (`period`, always the first day of the month) and the `owner_id` of the user who
//! recorded it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier assigned on insert
    #[sea_orm(primary_key)]
    pub id: i64,
    /// What the money was spent on
    pub description: String,
    /// Amount spent, always positive
    pub amount: f64,
    /// First day of the month this expense belongs to
    pub period: Date,
    /// User who owns the expense
    pub owner_id: i64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

/// Expenses have no relationships with other entities in this crate
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
