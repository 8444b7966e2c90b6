//! Expense Tracker is a small web backend for recording personal expenses.
//!
//! This library provides a JSON REST API for managing expenses and an export
//! endpoint that renders a PDF report with a generated one-line summary.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod config;
mod db;
mod endpoints;
mod export;
mod expense;
mod logging;
mod routing;
mod summary;
#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use config::Config;
pub use db::initialize as initialize_db;
pub use expense::{
    Expense, ExpenseData, ExpenseId, create_expense, get_all_expenses, get_expense,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use summary::{GeminiClient, TextGenerator};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request body or path did not match the expected shape, e.g. a
    /// missing field, an amount that is not a number or an invalid date.
    ///
    /// The string holds a description of the offending field and is safe to
    /// show to the client.
    #[error("{0}")]
    Validation(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update an expense that does not exist
    #[error("tried to update an expense that is not in the database")]
    UpdateMissingExpense,

    /// Tried to delete an expense that does not exist
    #[error("tried to delete an expense that is not in the database")]
    DeleteMissingExpense,

    /// The text generation service could not produce a summary.
    ///
    /// The error string should only be logged on the server.
    #[error("could not generate the expense summary: {0}")]
    SummaryGenerationFailed(String),

    /// The PDF export failed, either while summarizing or while encoding
    /// the document.
    ///
    /// The error string should only be logged on the server.
    #[error("could not export the expense report: {0}")]
    ExportFailed(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An allowed CORS origin is not a valid header value.
    #[error("invalid allowed origin {0:?}")]
    InvalidOrigin(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Validation(detail) => error_response(StatusCode::UNPROCESSABLE_ENTITY, &detail),
            Error::NotFound | Error::UpdateMissingExpense | Error::DeleteMissingExpense => {
                error_response(StatusCode::NOT_FOUND, EXPENSE_NOT_FOUND)
            }
            Error::SummaryGenerationFailed(_) | Error::ExportFailed(_) => {
                tracing::error!("PDF generation failed: {self}");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, EXPORT_FAILED)
            }
            Error::DatabaseLockError => {
                error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
            }
        }
    }
}

const EXPENSE_NOT_FOUND: &str = "Expense not found";
const EXPORT_FAILED: &str = "Failed to generate PDF";
const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Build the JSON error body shared by every failing route, `{"detail": ...}`.
pub(crate) fn error_response(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}
