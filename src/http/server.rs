//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the API and the dashboard shell
//! - Wire up middleware (request ID, tracing, timeout, limits, headers)
//! - Bind server to listener (plain TCP or TLS)
//! - Dispatch page requests to the navigation router

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::api::setup_api_router;
use crate::config::RouterConfig;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::response::{not_found_page, shell_page};
use crate::observability::metrics;
use crate::routing::{Navigation, Router as NavRouter};
use crate::security;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: NavRouter,
    pub app_title: Arc<str>,
}

/// HTTP server for the dashboard router.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server serving `nav` with the given configuration.
    pub fn new(config: &RouterConfig, nav: NavRouter) -> Self {
        let state = AppState {
            router: nav,
            app_title: Arc::from(config.navigation.app_title.as_str()),
        };

        Self {
            router: Self::build_router(config, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &RouterConfig, state: AppState) -> Router {
        let mut app = setup_api_router()
            .fallback(shell_handler)
            .with_state(state);

        if config.security.enable_headers {
            app = security::headers::apply(app);
        }

        app.layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        method = %req.method(),
                        uri = %req.uri(),
                        request_id = %request_id(req),
                    )
                }))
                .layer(propagate_request_id_layer())
                .layer(security::limits::body_limit_layer(&config.security))
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
        )
    }

    /// Run the server on `listener` until a shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Run the server over TLS on `addr` until a shutdown signal arrives.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: RustlsConfig,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        tracing::info!(address = %addr, "HTTPS server starting");

        let handle = axum_server::Handle::new();
        let shutdown_handle = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            tracing::info!("Shutdown signal received");
            shutdown_handle.graceful_shutdown(Some(Duration::from_secs(10)));
        });

        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }

    /// The assembled Axum router.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Dashboard shell handler.
/// Resolves the page path and serves the shell, a redirect or a 404 page.
async fn shell_handler(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let start = Instant::now();

    if method != Method::GET && method != Method::HEAD {
        metrics::record_request("page", 405, start);
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let navigation = state.router.navigate(uri.path());
    metrics::record_navigation(navigation.outcome());

    let response = match navigation {
        Navigation::Resolved(route) => match &route.redirected_from {
            Some(from) => {
                // Jump straight to the final path, skipping intermediate hops.
                let location = match uri.query() {
                    Some(query) => format!("{}?{}", route.path, query),
                    None => route.path.clone(),
                };
                tracing::debug!(from = %from, to = %location, "Redirecting");
                Redirect::temporary(&location).into_response()
            }
            None => shell_page(&route, &state.app_title).into_response(),
        },
        Navigation::NotFound { path } => {
            tracing::debug!(path = %path, "No route matched");
            not_found_page(&path, &state.app_title)
        }
    };

    metrics::record_request("page", response.status().as_u16(), start);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;
    use tower::ServiceExt;

    fn app() -> Router {
        let mut config = RouterConfig::default();
        config.navigation.app_title = "Ops".into();
        HttpServer::new(&config, NavRouter::builtin()).into_router()
    }

    async fn get(uri: &str) -> Response {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_shell_page_has_route_title() {
        let response = get("/monitor").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");

        let body = body_text(response).await;
        assert!(body.contains("<title>消息监控大屏 - Ops</title>"));
        assert!(body.contains("data-view=\"MessageMonitor\""));
    }

    #[tokio::test]
    async fn test_settings_page_redirects_to_config() {
        let response = get("/settings?tab=mail").await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/config?tab=mail");
    }

    #[tokio::test]
    async fn test_unknown_page_is_404() {
        let response = get("/does-not-exist").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("/does-not-exist"));
    }

    #[tokio::test]
    async fn test_keeps_client_request_id() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/healthz")
                    .header("x-request-id", "client-id-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()["x-request-id"], "client-id-1");
    }

    #[tokio::test]
    async fn test_post_to_page_is_rejected() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/reports")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
