use axum::{
    Router,
    body::Body,
    extract::{Query, Request, State},
    http::{Method, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json,
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::api::models::{Endpoints, FetchQuery, HealthResponse, ServiceInfo};
use crate::api::response;
use crate::error::{AppError, Result};
use crate::store::{JsonRecord, DEFAULT_LIST_LIMIT};
use crate::validator::{is_json_content_type, validate_json_body, validate_url};

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
        .route("/api/v1/fetch-json", get(fetch_json_handler))
        .route("/api/v1/records", get(records_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(middleware::from_fn(options_no_content))
        .with_state(app_state)
}

/// Every OPTIONS request ends as an empty 204, keeping the CORS headers.
async fn options_no_content(req: Request, next: Next) -> Response {
    if req.method() != Method::OPTIONS {
        return next.run(req).await;
    }

    let (mut parts, _) = next.run(req).await.into_parts();
    parts.status = StatusCode::NO_CONTENT;
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.remove(header::CONTENT_TYPE);
    Response::from_parts(parts, Body::empty())
}

async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        description: "A simple JSON fetcher API",
        endpoints: Endpoints {
            health: "GET /health",
            fetch_json: "GET /api/v1/fetch-json?link=<url>",
            records: "GET /api/v1/records",
        },
    })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "API server is running",
    })
}

async fn fetch_json_handler(
    State(state): State<AppState>,
    Query(query): Query<FetchQuery>,
) -> Result<impl IntoResponse> {
    let link = query
        .link
        .filter(|link| !link.is_empty())
        .ok_or(AppError::MissingLink)?;

    let record = fetch_and_save(&state, &link).await?;
    tracing::info!(id = record.id, url = %link, "saved JSON record");
    Ok(response::saved(record))
}

/// Validate the link, fetch it, validate what came back, persist it.
async fn fetch_and_save(state: &AppState, link: &str) -> Result<JsonRecord> {
    validate_url(link).map_err(AppError::InvalidUrl)?;

    tracing::debug!(url = %link, "fetching JSON");
    let fetched = state.fetcher.fetch(link).await.inspect_err(|e| {
        tracing::warn!(url = %link, error = %e, "failed to fetch URL");
    })?;

    if fetched.is_error_status() {
        tracing::warn!(url = %link, status = fetched.status, "upstream returned an error status");
        return Err(AppError::UpstreamHttp {
            status: fetched.status,
            status_line: fetched.status_line,
        });
    }

    if !is_json_content_type(&fetched.content_type) {
        tracing::warn!(url = %link, content_type = %fetched.content_type, "response is not JSON");
        return Err(AppError::NotJsonContentType(fetched.content_type));
    }

    validate_json_body(&fetched.body).map_err(AppError::InvalidJson)?;

    state
        .store
        .save_record(link, &fetched.body)
        .await
        .map_err(AppError::Save)
}

async fn records_handler(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let records = state
        .store
        .list_recent_records(DEFAULT_LIST_LIMIT)
        .await
        .map_err(AppError::List)?;

    Ok(response::records(records))
}
