//! Expense update endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    expense::{
        ExpenseData, ExpenseId,
        db::update_expense,
        domain::{ValidJson, ValidPath},
    },
};

/// The state needed for updating an expense.
#[derive(Debug, Clone)]
pub struct UpdateExpenseState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Replace every field of an existing expense and respond with the updated expense.
pub async fn update_expense_endpoint(
    ValidPath(expense_id): ValidPath<ExpenseId>,
    State(state): State<UpdateExpenseState>,
    ValidJson(data): ValidJson<ExpenseData>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match update_expense(expense_id, data, &connection) {
        Ok(expense) => Json(expense).into_response(),
        Err(Error::UpdateMissingExpense) => Error::UpdateMissingExpense.into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating expense {expense_id}: {error}"
            );
            error.into_response()
        }
    }
}
