//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes, HttpBody},
    extract::Request,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    middleware::Next,
    response::Response,
};

use crate::error_response;

/// The maximum number of bytes of a body to log at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// The largest body that is buffered for logging, the same as axum's default body limit.
///
/// Larger requests are rejected. Larger responses are passed through unread.
pub const MAX_BUFFERED_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
/// Binary bodies, such as PDF exports, and text responses larger than
/// [MAX_BUFFERED_BODY_SIZE] are passed through unread and logged by size only.
///
/// Requests with a body larger than [MAX_BUFFERED_BODY_SIZE] are rejected with
/// `413 Payload Too Large`.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();

    if body.size_hint().lower() > MAX_BUFFERED_BODY_SIZE as u64 {
        tracing::warn!(
            "rejecting {} {} with a body of {} bytes",
            parts.method,
            parts.uri,
            body.size_hint().lower()
        );
        return error_response(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large");
    }

    let body_bytes = match axum::body::to_bytes(body, MAX_BUFFERED_BODY_SIZE).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("could not read request body: {error}");
            return error_response(StatusCode::BAD_REQUEST, "Could not read request body");
        }
    };

    log_body(
        "Received request",
        &format!("{} {}", parts.method, parts.uri),
        &parts.headers,
        &body_bytes,
    );

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();

    let fits_in_buffer = body
        .size_hint()
        .upper()
        .is_some_and(|upper| upper <= MAX_BUFFERED_BODY_SIZE as u64);
    if !is_text(&parts.headers) || !fits_in_buffer {
        match body.size_hint().exact() {
            Some(length) => {
                tracing::info!("Sending response: {}\nbody: <{length} bytes>", parts.status)
            }
            None => tracing::info!("Sending response: {}\nbody: <streamed>", parts.status),
        }
        return Response::from_parts(parts, body);
    }

    let body_bytes = match axum::body::to_bytes(body, MAX_BUFFERED_BODY_SIZE).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("could not read response body: {error}");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
        }
    };

    log_body(
        "Sending response",
        parts.status.as_str(),
        &parts.headers,
        &body_bytes,
    );

    Response::from_parts(parts, Body::from(body_bytes))
}

fn is_text(headers: &HeaderMap) -> bool {
    match headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    {
        Some(content_type) => {
            content_type.starts_with("application/json") || content_type.starts_with("text/")
        }
        // Requests without a body have no content type.
        None => true,
    }
}

fn log_body(message: &str, summary: &str, headers: &HeaderMap, body: &Bytes) {
    if !is_text(headers) {
        tracing::info!("{message}: {summary}\nbody: <{} bytes>", body.len());
        return;
    }

    let body = String::from_utf8_lossy(body);

    if body.len() > LOG_BODY_LENGTH_LIMIT {
        let truncated: String = body.chars().take(LOG_BODY_LENGTH_LIMIT).collect();
        tracing::info!("{message}: {summary}\nbody: {truncated}...");
        tracing::debug!("Full body: {body:?}");
    } else {
        tracing::info!("{message}: {summary}\nbody: {body:?}");
    }
}
