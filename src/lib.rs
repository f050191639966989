//! Navigation router for the customer-service admin dashboard.
//!
//! Maps dashboard URL paths to page views, resolves redirects and path
//! parameters, and serves the result over HTTP.

pub mod api;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::schema::RouterConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Navigation, RouteTable, Router};
