//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{OriginalUri, Path, Query, State, rejection::QueryRejection},
    http::{HeaderMap, StatusCode, Uri, header},
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;
use url::Url;

use crate::domain::{ComparisonResult, GeoNameId, PageResult, PlaceRecord};
use crate::query::{self, PlaceComparator, PrefixSearch, QueryError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/items", get(list_items))
        .route("/items/:id", get(get_item))
        .route("/cities", get(compare_cities))
        .route("/help", get(help_cities))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Fetch a single place by GeoNames id.
async fn get_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<PlaceRecord>, AppError> {
    let id = GeoNameId::parse(&raw_id).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let place = query::get_by_id(&*state.store, id).await?;
    Ok(Json(place))
}

/// List places page by page.
async fn list_items(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    req: Result<Query<ItemsRequest>, QueryRejection>,
) -> Result<Json<PageResult>, AppError> {
    let Query(req) = req?;

    let max = state.config.max_page_limit;
    if !(1..=max).contains(&req.limit) {
        return Err(AppError::BadRequest {
            message: format!("limit must be between 1 and {max}, got {}", req.limit),
        });
    }

    let url = request_url(&headers, &uri, &state.config.bind_address())?;
    let page = query::list_page(&*state.store, req.page, req.limit, &url).await?;
    Ok(Json(page))
}

/// Compare two places by name.
async fn compare_cities(
    State(state): State<AppState>,
    req: Result<Query<CitiesRequest>, QueryRejection>,
) -> Result<Json<ComparisonResult>, AppError> {
    let Query(req) = req?;

    let result = PlaceComparator::new(&*state.store)
        .compare(&req.first_city, &req.second_city)
        .await?;
    Ok(Json(result))
}

/// Suggest place names starting with a prefix.
async fn help_cities(
    State(state): State<AppState>,
    req: Result<Query<HelpRequest>, QueryRejection>,
) -> Result<Json<HelpResponse>, AppError> {
    let Query(req) = req?;

    let cities = PrefixSearch::new(&*state.store).search(&req.city).await?;
    Ok(Json(HelpResponse { cities }))
}

/// Absolute URL of the current request, used to build page markers.
///
/// The host comes from the `Host` header, or `fallback_host` when the
/// client sent none.
fn request_url(headers: &HeaderMap, uri: &Uri, fallback_host: &str) -> Result<Url, AppError> {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(fallback_host);
    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    Url::parse(&format!("http://{host}{path}")).map_err(|e| AppError::BadRequest {
        message: format!("Invalid request URL: {e}"),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::NotFound(message) => AppError::NotFound { message },
            QueryError::DataIntegrity(_) | QueryError::Store(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            tracing::error!(%status, "{message}");
        } else {
            tracing::warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
