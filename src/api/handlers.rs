use std::collections::HashMap;
use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::{Navigation, Params, ResolvedRoute, RouteDescriptor};

#[derive(Serialize)]
pub struct HealthStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub routes: usize,
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HrefResponse {
    pub href: String,
}

pub async fn get_health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "ok",
        routes: state.router.table().len(),
    })
}

pub async fn list_routes(State(state): State<AppState>) -> Json<Vec<RouteDescriptor>> {
    let start = Instant::now();
    let routes: Vec<RouteDescriptor> = state.router.table().routes().cloned().collect();
    metrics::record_request("routes", 200, start);
    Json(routes)
}

pub async fn resolve_path(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Result<Json<ResolvedRoute>, ApiError> {
    let start = Instant::now();
    let result = resolve(&state, query);
    let status = match &result {
        Ok(_) => 200,
        Err(e) => e.status().as_u16(),
    };
    metrics::record_request("resolve", status, start);
    result.map(Json)
}

fn resolve(state: &AppState, query: ResolveQuery) -> Result<ResolvedRoute, ApiError> {
    let path = query.path.ok_or(ApiError::MissingPath)?;
    if !path.starts_with('/') {
        return Err(ApiError::InvalidPath(path));
    }

    let navigation = state.router.navigate(&path);
    metrics::record_navigation(navigation.outcome());
    match navigation {
        Navigation::Resolved(route) => {
            tracing::debug!(path = %path, view = %route.view, "Resolved");
            Ok(route)
        }
        Navigation::NotFound { path } => {
            tracing::debug!(path = %path, "No route matched");
            Err(ApiError::NotFound(path))
        }
    }
}

pub async fn build_href(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<HrefResponse>, ApiError> {
    let start = Instant::now();
    let params: Params = query.into_iter().collect();
    let result = state.router.href(&name, &params).map_err(ApiError::from);
    let status = match &result {
        Ok(_) => 200,
        Err(e) => e.status().as_u16(),
    };
    metrics::record_request("href", status, start);
    result.map(|href| Json(HrefResponse { href }))
}
