// GET handlers: pages, version, usage APIs

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use super::AppState;
use crate::error::UsageError;
use crate::models::{ContainerUsageRow, UsageReport};
use crate::version::{NAME, VERSION};

#[derive(Debug, Deserialize)]
pub(super) struct DataParams {
    timeframe: Option<String>,
}

/// GET /api/data?timeframe={current|all} — `current` (the default) captures
/// and persists a live reading, blocking for the CPU sampling window; `all`
/// reduces the stored history. Both respond with the same shape.
pub(super) async fn api_data_handler(
    State(state): State<AppState>,
    Query(params): Query<DataParams>,
) -> Response {
    let result = match params.timeframe.as_deref() {
        Some("all") => state
            .usage_service
            .get_historical()
            .await
            .map(UsageReport::from),
        _ => state
            .usage_service
            .get_current()
            .await
            .map(UsageReport::from),
    };
    match result {
        Ok(report) => axum::Json(report).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET /api/high-usage — live per-container usage, formatted for display.
pub(super) async fn api_high_usage_handler(State(state): State<AppState>) -> Response {
    match state.docker_repo.list_container_usage().await {
        Ok(usages) => {
            let rows: Vec<ContainerUsageRow> =
                usages.into_iter().map(ContainerUsageRow::from).collect();
            axum::Json(rows).into_response()
        }
        Err(e) => error_response(&e),
    }
}

fn error_response(e: &UsageError) -> Response {
    tracing::error!(error = %e, "request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(serde_json::json!({ "error": e.to_string() })),
    )
        .into_response()
}

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET / — dashboard page; the data lives at /api/data.
pub(super) async fn index_handler() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// GET /high-usage — container table page; the data lives at /api/high-usage.
pub(super) async fn high_usage_page_handler() -> Html<&'static str> {
    Html(HIGH_USAGE_PAGE)
}

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Host Usage</title></head>
<body>
<h1>Host Usage</h1>
<p>Live reading: <a href="/api/data">/api/data</a> &middot;
All-time aggregate: <a href="/api/data?timeframe=all">/api/data?timeframe=all</a></p>
</body>
</html>
"#;

const HIGH_USAGE_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Container Usage</title></head>
<body>
<h1>Container Usage</h1>
<p>Per-container snapshot: <a href="/api/high-usage">/api/high-usage</a></p>
</body>
</html>
"#;
