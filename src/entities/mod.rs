//! Entity module - Contains all SeaORM entity definitions for the database.
//! Both tables are month-scoped: every row carries the first day of its month in `period`.

pub mod expense;
pub mod limit;

// Re-export specific types to avoid conflicts
pub use expense::{Column as ExpenseColumn, Entity as Expense, Model as ExpenseModel};
pub use limit::{Column as LimitColumn, Entity as Limit, Model as LimitModel};
