//! Navigation JSON API.
//!
//! | Method | Path                 | Purpose                               |
//! |--------|----------------------|---------------------------------------|
//! | GET    | `/healthz`           | Liveness and version                  |
//! | GET    | `/api/routes`        | Route table, in match order           |
//! | GET    | `/api/resolve?path=` | Resolve a path, following redirects   |
//! | GET    | `/api/href/{name}`   | Build a path from a route name        |

pub mod handlers;

use axum::{routing::get, Router};

use crate::http::server::AppState;
use self::handlers::*;

pub fn setup_api_router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(get_health))
        .route("/api/routes", get(list_routes))
        .route("/api/resolve", get(resolve_path))
        .route("/api/href/{name}", get(build_href))
}
