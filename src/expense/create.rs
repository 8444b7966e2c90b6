//! Expense creation endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    expense::{ExpenseData, create_expense, domain::ValidJson},
};

/// The state needed for creating an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Store a new expense and respond with it, including its new ID.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    ValidJson(data): ValidJson<ExpenseData>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match create_expense(data, &connection) {
        Ok(expense) => {
            tracing::debug!("created expense {}", expense.id);
            Json(expense).into_response()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating an expense: {error}");
            error.into_response()
        }
    }
}

#[cfg(test)]
mod create_expense_endpoint_tests {
    use axum::{Router, http::StatusCode, routing::post};
    use axum_test::TestServer;
    use serde_json::json;
    use time::macros::date;

    use crate::{
        endpoints,
        expense::{Expense, ExpenseData, create_expense_endpoint, get_expense},
        test_utils::get_test_app_state,
    };

    fn get_test_server() -> (TestServer, crate::AppState) {
        let state = get_test_app_state();
        let app = Router::new()
            .route(endpoints::EXPENSES, post(create_expense_endpoint))
            .with_state(state.clone());

        (
            TestServer::new(app),
            state,
        )
    }

    #[tokio::test]
    async fn can_create_expense() {
        let (server, state) = get_test_server();
        let data = ExpenseData {
            title: "Coffee".to_owned(),
            amount: 4.5,
            category: "Food".to_owned(),
            date: date!(2024 - 01 - 01),
        };

        let response = server.post(endpoints::EXPENSES).json(&data).await;

        response.assert_status_ok();
        let got = response.json::<Expense>();
        let want = Expense::new(1, data);
        assert_eq!(got, want);
        assert_eq!(
            get_expense(1, &state.db_connection.lock().unwrap()),
            Ok(want)
        );
    }

    #[tokio::test]
    async fn ids_are_unique() {
        let (server, _) = get_test_server();
        let body = json!({
            "title": "Lunch",
            "amount": 12,
            "category": "Food",
            "date": "2024-01-02"
        });

        let first = server.post(endpoints::EXPENSES).json(&body).await;
        let second = server.post(endpoints::EXPENSES).json(&body).await;

        assert_ne!(first.json::<Expense>().id, second.json::<Expense>().id);
    }

    #[tokio::test]
    async fn non_numeric_amount_is_rejected() {
        let (server, state) = get_test_server();

        let response = server
            .post(endpoints::EXPENSES)
            .json(&json!({
                "title": "Coffee",
                "amount": "four fifty",
                "category": "Food",
                "date": "2024-01-01"
            }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let detail = response.json::<serde_json::Value>()["detail"]
            .as_str()
            .expect("detail should be a string")
            .to_owned();
        assert!(detail.contains("amount"), "got detail {detail:?}");
        assert_no_expenses(&state);
    }

    #[tokio::test]
    async fn numeric_string_amount_is_accepted() {
        let (server, _) = get_test_server();

        let response = server
            .post(endpoints::EXPENSES)
            .json(&json!({
                "title": "Coffee",
                "amount": "4.5",
                "category": "Food",
                "date": "2024-01-01"
            }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "id": 1,
            "title": "Coffee",
            "amount": 4.5,
            "category": "Food",
            "date": "2024-01-01"
        }));
    }

    #[tokio::test]
    async fn invalid_date_is_rejected() {
        let (server, state) = get_test_server();

        let response = server
            .post(endpoints::EXPENSES)
            .json(&json!({
                "title": "Coffee",
                "amount": 4.5,
                "category": "Food",
                "date": "yesterday"
            }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_no_expenses(&state);
    }

    #[tokio::test]
    async fn missing_field_is_rejected() {
        let (server, state) = get_test_server();

        let response = server
            .post(endpoints::EXPENSES)
            .json(&json!({
                "title": "Coffee",
                "amount": 4.5,
                "date": "2024-01-01"
            }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_no_expenses(&state);
    }

    #[track_caller]
    fn assert_no_expenses(state: &crate::AppState) {
        let count: i64 = state
            .db_connection
            .lock()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM expense", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
