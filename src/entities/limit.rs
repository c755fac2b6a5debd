//! Limit entity - The spending cap a user sets for one month.
//!
//! At most one row exists per (`owner_id`, `period`); the schema backs this with a
//! unique index.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Monthly limit database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "limits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Spending cap for the month, always positive
    pub amount: f64,
    /// First day of the month the limit applies to
    pub period: Date,
    pub owner_id: i64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
