//! The PDF report of all expenses.

mod encode;
mod font;
mod layout;

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    expense::{Expense, get_all_expenses},
    summary::{TextGenerator, summarize_expenses},
};

use self::{encode::encode_pdf, layout::layout_document};

/// The file name suggested to clients downloading the report.
pub const PDF_FILENAME: &str = "expense_summary.pdf";

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// The state needed for exporting the PDF report.
#[derive(Clone)]
pub struct ExportState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub text_generator: Arc<dyn TextGenerator>,
}

impl FromRef<AppState> for ExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            text_generator: state.text_generator.clone(),
        }
    }
}

/// Respond with a PDF report of every expense as a file attachment.
///
/// Any failure, whether reading the expenses, generating the summary or
/// encoding the document, is reported as [Error::ExportFailed].
pub async fn export_pdf_endpoint(State(state): State<ExportState>) -> Response {
    match export_pdf(&state).await {
        Ok(bytes) => (
            [
                (CONTENT_TYPE, PDF_CONTENT_TYPE.to_owned()),
                (
                    CONTENT_DISPOSITION,
                    format!("attachment; filename={PDF_FILENAME}"),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(Error::ExportFailed(cause)) => Error::ExportFailed(cause).into_response(),
        Err(error) => Error::ExportFailed(error.to_string()).into_response(),
    }
}

async fn export_pdf(state: &ExportState) -> Result<Vec<u8>, Error> {
    let expenses = load_expenses(&state.db_connection)?;
    tracing::debug!("exporting {} expenses", expenses.len());

    let summary = summarize_expenses(&expenses, state.text_generator.as_ref()).await?;
    let pages = layout_document(&summary, &expenses);

    encode_pdf(&pages)
}

/// Read every expense, releasing the database lock before returning.
fn load_expenses(db_connection: &Mutex<Connection>) -> Result<Vec<Expense>, Error> {
    let connection = db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_all_expenses(&connection)
}

#[cfg(test)]
mod export_pdf_endpoint_tests {
    use std::sync::Arc;

    use axum::{Router, http::StatusCode, routing::get};
    use axum_test::TestServer;
    use serde_json::json;
    use time::macros::date;

    use crate::{
        AppState, TextGenerator, endpoints,
        expense::{ExpenseData, create_expense},
        test_utils::{
            FailingTextGenerator, FakeTextGenerator, get_test_app_state_with, pdf_text_lines,
        },
    };

    use super::export_pdf_endpoint;

    fn get_test_server(generator: Arc<dyn TextGenerator>) -> (TestServer, AppState) {
        let state = get_test_app_state_with(generator);
        let app = Router::new()
            .route(endpoints::EXPENSES_PDF, get(export_pdf_endpoint))
            .with_state(state.clone());

        (
            TestServer::new(app),
            state,
        )
    }

    fn insert_expense(state: &AppState, title: &str, amount: f64) {
        create_expense(
            ExpenseData {
                title: title.to_owned(),
                amount,
                category: "Food".to_owned(),
                date: date!(2024 - 01 - 01),
            },
            &state.db_connection.lock().unwrap(),
        )
        .expect("Could not create test expense");
    }

    #[tokio::test]
    async fn empty_export_skips_summary() {
        let generator = Arc::new(FakeTextGenerator::new("should not be used"));
        let (server, _) = get_test_server(generator.clone());

        let response = server.get(endpoints::EXPENSES_PDF).await;

        response.assert_status_ok();
        assert_eq!(response.header("content-type"), "application/pdf");
        assert_eq!(
            response.header("content-disposition"),
            "attachment; filename=expense_summary.pdf"
        );
        assert!(response.as_bytes().starts_with(b"%PDF-"));
        assert_eq!(
            pdf_text_lines(response.as_bytes()),
            vec!["Expense Summary", "No expenses found."]
        );
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn export_lists_every_expense() {
        let generator = Arc::new(FakeTextGenerator::new(
            "  You spent the most on groceries. The total expense is ₹3,204.5 across 2 items.\n",
        ));
        let (server, state) = get_test_server(generator.clone());
        insert_expense(&state, "Groceries", 3200.0);
        insert_expense(&state, "Coffee", 4.5);

        let response = server.get(endpoints::EXPENSES_PDF).await;

        response.assert_status_ok();
        assert_eq!(
            pdf_text_lines(response.as_bytes()),
            vec![
                "Expense Summary",
                "You spent the most on groceries. The total expense is Rs.3,204.5 across 2 items.",
                "Expense Details:",
                "Groceries - Rs.3200.0 on 2024-01-01",
                "Coffee - Rs.4.5 on 2024-01-01",
            ]
        );
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn summary_failure_returns_500() {
        let (server, state) = get_test_server(Arc::new(FailingTextGenerator));
        insert_expense(&state, "Coffee", 4.5);

        let response = server.get(endpoints::EXPENSES_PDF).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "detail": "Failed to generate PDF" }));
    }

    #[tokio::test]
    async fn unencodable_title_returns_500() {
        let generator = Arc::new(FakeTextGenerator::new("You bought tea."));
        let (server, state) = get_test_server(generator);
        insert_expense(&state, "Chai ☕", 1.2);

        let response = server.get(endpoints::EXPENSES_PDF).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "detail": "Failed to generate PDF" }));
    }
}
