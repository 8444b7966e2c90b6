//! Expense records and the endpoints for managing them.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::create_expense_endpoint;
pub use db::{create_expense, create_expense_table, get_all_expenses, get_expense};
pub use delete::delete_expense_endpoint;
pub use domain::{Expense, ExpenseData, ExpenseId, format_amount};
pub use edit::update_expense_endpoint;
pub use list::list_expenses_endpoint;
