//! Response construction.
//!
//! # Responsibilities
//! - Map API errors to status codes and JSON bodies
//! - Render the dashboard shell page for a resolved navigation
//!
//! # Design Decisions
//! - Every API error body carries a stable machine-readable `error` code
//! - Shell pages embed route data; the client never re-resolves the path

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::routing::{NavigateError, ResolvedRoute};

/// Errors returned by the JSON API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("query parameter `path` is required")]
    MissingPath,

    #[error("path must start with '/': {0:?}")]
    InvalidPath(String),

    #[error("no route matches {0:?}")]
    NotFound(String),

    #[error(transparent)]
    Navigate(#[from] NavigateError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingPath | ApiError::InvalidPath(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Navigate(NavigateError::UnknownRoute(_)) => StatusCode::NOT_FOUND,
            ApiError::Navigate(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MissingPath => "missing_path",
            ApiError::InvalidPath(_) => "invalid_path",
            ApiError::NotFound(_) => "not_found",
            ApiError::Navigate(NavigateError::UnknownRoute(_)) => "unknown_route",
            ApiError::Navigate(NavigateError::MissingParam { .. }) => "missing_param",
            ApiError::Navigate(NavigateError::InvalidParam { .. }) => "invalid_param",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let path = match &self {
            ApiError::InvalidPath(p) | ApiError::NotFound(p) => Some(p.clone()),
            _ => None,
        };
        let body = ErrorBody {
            error: self.code(),
            message: self.to_string(),
            path,
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Escape text for inclusion in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Document title for a route: `"<route title> - <app title>"`.
pub fn document_title(route_title: Option<&str>, app_title: &str) -> String {
    match route_title {
        Some(title) if !app_title.is_empty() => format!("{} - {}", title, app_title),
        Some(title) => title.to_string(),
        None => app_title.to_string(),
    }
}

/// Render the shell page for a resolved route.
pub fn shell_page(route: &ResolvedRoute, app_title: &str) -> Html<String> {
    // `<` is escaped so the JSON cannot close the script element.
    let route_json = serde_json::to_string(route)
        .unwrap_or_else(|_| "{}".to_string())
        .replace('<', "\\u003c");

    Html(format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"zh-CN\">\n",
            "<head><meta charset=\"utf-8\"><title>{title}</title></head>\n",
            "<body>\n",
            "<div id=\"app\" data-view=\"{view}\" data-component=\"{component}\"></div>\n",
            "<script id=\"route\" type=\"application/json\">{route}</script>\n",
            "</body>\n",
            "</html>\n"
        ),
        title = escape_html(&document_title(route.title.as_deref(), app_title)),
        view = route.view,
        component = escape_html(&route.component),
        route = route_json,
    ))
}

/// Render the not-found shell page.
pub fn not_found_page(path: &str, app_title: &str) -> Response {
    let body = format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"zh-CN\">\n",
            "<head><meta charset=\"utf-8\"><title>{title}</title></head>\n",
            "<body>\n",
            "<div id=\"app\" data-view=\"\"><p>No page at <code>{path}</code></p></div>\n",
            "</body>\n",
            "</html>\n"
        ),
        title = escape_html(&document_title(Some("404"), app_title)),
        path = escape_html(path),
    );
    (StatusCode::NOT_FOUND, Html(body)).into_response()
}
