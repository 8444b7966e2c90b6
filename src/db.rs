//! Database setup for the application.

use rusqlite::Connection;

use crate::{Error, expense::create_expense_table};

/// Create all of the application's tables if they do not already exist.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_expense_table(connection)?;

    Ok(())
}
