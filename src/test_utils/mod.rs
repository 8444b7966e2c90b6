#![allow(missing_docs)]

pub(crate) mod http;
pub(crate) mod pdf;
pub(crate) mod text_generator;

use std::sync::Arc;

use rusqlite::Connection;

use crate::{AppState, TextGenerator};

pub(crate) use http::parse_json_body;
pub(crate) use pdf::pdf_text_lines;
pub(crate) use text_generator::{FailingTextGenerator, FakeTextGenerator};

/// An [AppState] backed by an empty in-memory database.
pub(crate) fn get_test_app_state() -> AppState {
    get_test_app_state_with(Arc::new(FakeTextGenerator::new("A summary.")))
}

/// An [AppState] backed by an empty in-memory database that summarizes with `text_generator`.
pub(crate) fn get_test_app_state_with(text_generator: Arc<dyn TextGenerator>) -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");

    AppState::new(connection, text_generator).expect("Could not create app state")
}
