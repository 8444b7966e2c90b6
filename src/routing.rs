//! Application router configuration.

use axum::{
    Router,
    http::{HeaderValue, StatusCode},
    middleware,
    response::Response,
    routing::{get, put},
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::{
    AppState, Error, endpoints, error_response,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, list_expenses_endpoint,
        update_expense_endpoint,
    },
    export::export_pdf_endpoint,
    logging::logging_middleware,
};

/// The origin that allows requests from any site.
const ANY_ORIGIN: &str = "*";

/// Return a router with all the app's routes.
///
/// Cross-origin requests are accepted from `allowed_origins`. If any entry is
/// `*`, requests from every origin are accepted, but without credentials.
///
/// # Errors
/// Returns [Error::InvalidOrigin] if an origin is not a valid header value.
pub fn build_router(state: AppState, allowed_origins: &[String]) -> Result<Router, Error> {
    let router = Router::new()
        .route(
            endpoints::EXPENSES,
            get(list_expenses_endpoint).post(create_expense_endpoint),
        )
        // Static segments take priority over `{expense_id}`, so this route is never shadowed.
        .route(endpoints::EXPENSES_PDF, get(export_pdf_endpoint))
        .route(
            endpoints::EXPENSE,
            put(update_expense_endpoint).delete(delete_expense_endpoint),
        )
        .fallback(get_404_not_found)
        .method_not_allowed_fallback(get_405_method_not_allowed)
        .layer(middleware::from_fn(logging_middleware))
        .layer(cors_layer(allowed_origins)?)
        .with_state(state);

    Ok(router)
}

fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer, Error> {
    if allowed_origins.iter().any(|origin| origin == ANY_ORIGIN) {
        return Ok(CorsLayer::new()
            .allow_origin(AllowOrigin::any())
            .allow_methods(AllowMethods::any())
            .allow_headers(AllowHeaders::any()));
    }

    let origins = allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| Error::InvalidOrigin(origin.to_owned()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Wildcards cannot be combined with credentials, so methods and headers
    // are mirrored from the preflight request instead.
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

async fn get_404_not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not Found")
}

/// Requests whose path matches a route but whose method does not, e.g.
/// `DELETE /expenses/pdf`, which matches the export route rather than the expense route.
async fn get_405_method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}
