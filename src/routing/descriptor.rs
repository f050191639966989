//! Route descriptors.

use serde::Serialize;

use crate::routing::view::ViewId;

/// What a route leads to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteTarget {
    /// Render a view.
    View(ViewId),
    /// Navigate to another path instead.
    Redirect(String),
}

/// Display metadata attached to a route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A single path binding in the route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    pub path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub target: RouteTarget,

    pub meta: RouteMeta,
}

impl RouteDescriptor {
    /// A route rendering `view`, named after the view.
    pub fn view(path: impl Into<String>, view: ViewId) -> Self {
        Self {
            path: path.into(),
            name: Some(view.as_str().to_string()),
            target: RouteTarget::View(view),
            meta: RouteMeta::default(),
        }
    }

    /// An unnamed route redirecting to `to`.
    pub fn redirect(path: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
            target: RouteTarget::Redirect(to.into()),
            meta: RouteMeta::default(),
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.meta.title = Some(title.into());
        self
    }

    pub fn view_id(&self) -> Option<ViewId> {
        match self.target {
            RouteTarget::View(id) => Some(id),
            RouteTarget::Redirect(_) => None,
        }
    }

    pub fn redirect_to(&self) -> Option<&str> {
        match &self.target {
            RouteTarget::Redirect(to) => Some(to),
            RouteTarget::View(_) => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.meta.title.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_view_route() {
        let route = RouteDescriptor::view("/templates", ViewId::TemplateManager).titled("模板管理");
        let json = serde_json::to_value(&route).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "path": "/templates",
                "name": "TemplateManager",
                "view": "TemplateManager",
                "meta": { "title": "模板管理" },
            })
        );
    }

    #[test]
    fn test_serializes_redirect_route() {
        let route = RouteDescriptor::redirect("/settings", "/config");
        let json = serde_json::to_value(&route).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "path": "/settings",
                "redirect": "/config",
                "meta": {},
            })
        );
        assert_eq!(route.view_id(), None);
    }
}
