//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router
//! service. All types derive Serde traits for deserialization from config files.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::routing::{
    table, ComponentView, RouteDescriptor, RouteMeta, RouteTable, RouteTarget, Router, TableError,
    ViewId, ViewRegistry,
};

/// Root configuration for the router service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address, TLS).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Security hardening settings.
    pub security: SecurityConfig,

    /// Route table and view bindings.
    pub navigation: NavigationConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Optional TLS configuration.
    pub tls: Option<TlsConfig>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            tls: None,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter directive (trace, debug, info, warn, error, or an EnvFilter string).
    pub log_level: String,

    /// Log output format: "pretty", "compact" or "json".
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable security response headers.
    pub enable_headers: bool,
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            max_body_size: 64 * 1024, // 64KB, the API takes no bodies
        }
    }
}

/// Navigation configuration.
///
/// With no `routes`, the builtin dashboard table is used.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Application title, used as the document title suffix.
    pub app_title: String,

    /// Route definitions, in match order.
    pub routes: Vec<RouteConfig>,

    /// Component overrides for views.
    pub views: Vec<ViewConfig>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            app_title: "客户服务系统".to_string(),
            routes: Vec::new(),
            views: Vec::new(),
        }
    }
}

/// A route definition. Exactly one of `view` and `redirect` must be set.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path pattern, e.g. "/project/:id".
    pub path: String,

    /// Route name for programmatic navigation.
    #[serde(default)]
    pub name: Option<String>,

    /// View rendered by this route.
    #[serde(default)]
    pub view: Option<ViewId>,

    /// Path to redirect to instead of rendering a view.
    #[serde(default)]
    pub redirect: Option<String>,

    /// Display title.
    #[serde(default)]
    pub title: Option<String>,
}

impl RouteConfig {
    /// Convert to a descriptor. Returns `None` unless exactly one of
    /// `view` and `redirect` is set.
    pub fn to_descriptor(&self) -> Option<RouteDescriptor> {
        let target = match (&self.view, &self.redirect) {
            (Some(view), None) => RouteTarget::View(*view),
            (None, Some(to)) => RouteTarget::Redirect(to.clone()),
            _ => return None,
        };
        Some(RouteDescriptor {
            path: self.path.clone(),
            name: self.name.clone(),
            target,
            meta: RouteMeta {
                title: self.title.clone(),
            },
        })
    }
}

/// Binds a view to a component asset.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ViewConfig {
    pub view: ViewId,
    pub component: String,
}

impl NavigationConfig {
    /// Route descriptors this configuration describes.
    ///
    /// Route entries with an invalid target are skipped; validation reports them.
    pub fn descriptors(&self) -> Vec<RouteDescriptor> {
        if self.routes.is_empty() {
            return table::builtin_routes();
        }
        self.routes.iter().filter_map(RouteConfig::to_descriptor).collect()
    }

    /// View registry with defaults plus configured overrides.
    pub fn view_registry(&self) -> ViewRegistry {
        let mut registry = ViewRegistry::with_defaults();
        for view in &self.views {
            registry.register(Arc::new(ComponentView::new(view.view, view.component.clone())));
        }
        registry
    }

    /// Compile the route table and view registry into a router.
    pub fn build_router(&self) -> Result<Router, TableError> {
        let table = RouteTable::new(self.descriptors())?;
        Router::new(table, self.view_registry())
    }
}
