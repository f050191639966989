//! Route lookup and navigation.
//!
//! # Responsibilities
//! - Resolve a path against the route table
//! - Follow redirects to their final view
//! - Build paths from route names (programmatic navigation)
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Redirects are followed internally; callers only see the final view
//! - Explicit `NotFound` rather than a silent default view

use std::sync::Arc;

use serde::Serialize;

use crate::routing::descriptor::RouteTarget;
use crate::routing::matcher::{encode_segment, Params, Segment};
use crate::routing::table::RouteTable;
use crate::routing::view::{View, ViewId, ViewRegistry};
use crate::routing::{NavigateError, TableError};

/// A path resolved to a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
    /// Path that was finally matched (after redirects).
    pub path: String,
    /// Pattern of the matched route.
    pub route: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub view: ViewId,
    pub component: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub params: std::collections::BTreeMap<String, String>,
    /// Requested path when one or more redirects were followed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirected_from: Option<String>,
}

impl ResolvedRoute {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Outcome of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Resolved(ResolvedRoute),
    NotFound { path: String },
}

impl Navigation {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Navigation::Resolved(_))
    }

    pub fn resolved(&self) -> Option<&ResolvedRoute> {
        match self {
            Navigation::Resolved(r) => Some(r),
            Navigation::NotFound { .. } => None,
        }
    }

    pub fn outcome(&self) -> &'static str {
        match self {
            Navigation::Resolved(r) if r.redirected_from.is_some() => "redirected",
            Navigation::Resolved(_) => "resolved",
            Navigation::NotFound { .. } => "not_found",
        }
    }
}

/// Strip query string and fragment from a navigation target.
pub fn strip_path(target: &str) -> &str {
    let end = target.find(['?', '#']).unwrap_or(target.len());
    &target[..end]
}

/// Router engine over an immutable route table and view registry.
#[derive(Debug, Clone)]
pub struct Router {
    table: Arc<RouteTable>,
    views: Arc<ViewRegistry>,
}

impl Router {
    /// Create a router. Every view the table references must be registered.
    pub fn new(table: RouteTable, views: ViewRegistry) -> Result<Self, TableError> {
        for (route, view) in table.views() {
            if !views.contains(view) {
                return Err(TableError::UnregisteredView {
                    path: route.path.clone(),
                    view,
                });
            }
        }

        Ok(Self {
            table: Arc::new(table),
            views: Arc::new(views),
        })
    }

    /// Router over the builtin dashboard table and default views.
    pub fn builtin() -> Self {
        Self {
            table: Arc::new(RouteTable::builtin()),
            views: Arc::new(ViewRegistry::with_defaults()),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// The registered view for `id`.
    pub fn view(&self, id: ViewId) -> Option<Arc<dyn View>> {
        self.views.resolve(id)
    }

    /// Resolve `target` to a view, following redirects.
    pub fn navigate(&self, target: &str) -> Navigation {
        let requested = strip_path(target);
        let mut path = requested.to_string();

        // Table construction rejects cycles, the bound only guards the loop.
        for _ in 0..=self.table.len() {
            let Some(matched) = self.table.match_path(&path) else {
                break;
            };

            match &matched.route.target {
                RouteTarget::Redirect(to) => {
                    tracing::trace!(from = %path, to = %to, "Following redirect");
                    path = to.clone();
                }
                RouteTarget::View(view) => {
                    let Some(resolved) = self.view(*view) else {
                        break;
                    };
                    let redirected_from = (path != requested).then(|| requested.to_string());
                    return Navigation::Resolved(ResolvedRoute {
                        path,
                        route: matched.route.path.clone(),
                        name: matched.route.name.clone(),
                        view: *view,
                        component: resolved.component().to_string(),
                        title: matched.route.meta.title.clone(),
                        params: matched
                            .params
                            .iter()
                            .map(|(k, v)| (k.to_string(), v.to_string()))
                            .collect(),
                        redirected_from,
                    });
                }
            }
        }

        Navigation::NotFound {
            path: requested.to_string(),
        }
    }

    /// Build the path of the route called `name`, filling in `params`.
    ///
    /// Parameter values are percent-encoded, so `navigate(href(..))`
    /// captures the original values.
    pub fn href(&self, name: &str, params: &Params) -> Result<String, NavigateError> {
        let pattern = self
            .table
            .pattern_by_name(name)
            .ok_or_else(|| NavigateError::UnknownRoute(name.to_string()))?;

        if pattern.segments().is_empty() {
            return Ok("/".to_string());
        }

        let mut out = String::new();
        for segment in pattern.segments() {
            out.push('/');
            match segment {
                Segment::Static(s) => out.push_str(s),
                Segment::Param(param) => {
                    let value = params.get(param).ok_or_else(|| NavigateError::MissingParam {
                        route: name.to_string(),
                        param: param.clone(),
                    })?;
                    if value.is_empty() {
                        return Err(NavigateError::InvalidParam { param: param.clone() });
                    }
                    out.push_str(&encode_segment(value));
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::descriptor::RouteDescriptor;
    use crate::routing::view::ComponentView;

    fn resolve(router: &Router, path: &str) -> ResolvedRoute {
        match router.navigate(path) {
            Navigation::Resolved(r) => r,
            other => panic!("{path} did not resolve: {other:?}"),
        }
    }

    #[test]
    fn test_literal_paths_resolve_to_declared_views() {
        let router = Router::builtin();
        let cases = [
            ("/", ViewId::Dashboard, None),
            ("/reports", ViewId::Reports, None),
            ("/config", ViewId::ConfigCenter, None),
            ("/monitor", ViewId::MessageMonitor, Some("消息监控大屏")),
            ("/messages", ViewId::MessageManager, Some("消息管理（旧版）")),
            ("/template-messages", ViewId::TemplateMessageManager, Some("消息系统（模板版）")),
            ("/templates", ViewId::TemplateManager, Some("模板管理")),
            ("/ai-models", ViewId::AIModelManager, Some("AI模型配置")),
        ];

        for (path, view, title) in cases {
            let r = resolve(&router, path);
            assert_eq!(r.view, view, "{path}");
            assert_eq!(r.title.as_deref(), title, "{path}");
            assert_eq!(r.name.as_deref(), Some(view.as_str()));
            assert!(r.params.is_empty());
            assert_eq!(r.redirected_from, None);
        }
    }

    #[test]
    fn test_settings_redirects_to_config() {
        let router = Router::builtin();
        let direct = resolve(&router, "/config");
        let redirected = resolve(&router, "/settings");

        assert_eq!(redirected.view, direct.view);
        assert_eq!(redirected.title, direct.title);
        assert_eq!(redirected.name, direct.name);
        assert_eq!(redirected.path, "/config");
        assert_eq!(redirected.redirected_from.as_deref(), Some("/settings"));
        assert_eq!(router.navigate("/settings").outcome(), "redirected");
    }

    #[test]
    fn test_project_detail_captures_id() {
        let router = Router::builtin();

        let r = resolve(&router, "/project/42");
        assert_eq!(r.view, ViewId::ProjectDetail);
        assert_eq!(r.param("id"), Some("42"));
        assert_eq!(r.title.as_deref(), Some("工单详情"));

        let r = resolve(&router, "/project/abc-1");
        assert_eq!(r.param("id"), Some("abc-1"));
        assert_eq!(r.route, "/project/:id");
    }

    #[test]
    fn test_project_without_id_is_not_found() {
        let router = Router::builtin();
        assert!(!router.navigate("/project/").is_resolved());
        assert!(!router.navigate("/project").is_resolved());
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        let router = Router::builtin();
        assert_eq!(
            router.navigate("/does-not-exist"),
            Navigation::NotFound {
                path: "/does-not-exist".into()
            }
        );
    }

    #[test]
    fn test_query_and_fragment_are_ignored() {
        let router = Router::builtin();
        let r = resolve(&router, "/project/9?tab=logs#top");
        assert_eq!(r.param("id"), Some("9"));
        assert_eq!(r.path, "/project/9");
        assert_eq!(resolve(&router, "/reports#summary").view, ViewId::Reports);
    }

    #[test]
    fn test_href_builds_paths_by_name() {
        let router = Router::builtin();
        let params: Params = [("id", "42")].into_iter().collect();

        assert_eq!(router.href("Dashboard", &Params::new()).unwrap(), "/");
        assert_eq!(router.href("AIModelManager", &Params::new()).unwrap(), "/ai-models");
        assert_eq!(router.href("ProjectDetail", &params).unwrap(), "/project/42");
    }

    #[test]
    fn test_href_errors() {
        let router = Router::builtin();

        assert_eq!(
            router.href("Settings", &Params::new()),
            Err(NavigateError::UnknownRoute("Settings".into()))
        );
        assert_eq!(
            router.href("ProjectDetail", &Params::new()),
            Err(NavigateError::MissingParam {
                route: "ProjectDetail".into(),
                param: "id".into(),
            })
        );
        let empty: Params = [("id", "")].into_iter().collect();
        assert_eq!(
            router.href("ProjectDetail", &empty),
            Err(NavigateError::InvalidParam { param: "id".into() })
        );
    }

    #[test]
    fn test_href_round_trips_through_navigate() {
        let router = Router::builtin();

        for id in ["42", "a?b", "x#y", "with space", "工单", "a/b", "100%"] {
            let params: Params = [("id", id)].into_iter().collect();
            let path = router.href("ProjectDetail", &params).unwrap();
            assert!(!path.contains(['?', '#', ' ']), "{path}");

            let r = resolve(&router, &path);
            assert_eq!(r.view, ViewId::ProjectDetail, "{path}");
            assert_eq!(r.param("id"), Some(id), "{path}");
        }
    }

    #[test]
    fn test_new_requires_registered_views() {
        let table = RouteTable::new(vec![RouteDescriptor::view("/", ViewId::Dashboard)]).unwrap();
        let err = Router::new(table, ViewRegistry::new()).unwrap_err();
        assert_eq!(
            err,
            TableError::UnregisteredView {
                path: "/".into(),
                view: ViewId::Dashboard,
            }
        );

        let mut views = ViewRegistry::new();
        views.register(Arc::new(ComponentView::new(ViewId::Dashboard, "views/Home.vue")));
        let table = RouteTable::new(vec![RouteDescriptor::view("/", ViewId::Dashboard)]).unwrap();
        let router = Router::new(table, views).unwrap();
        assert_eq!(resolve(&router, "/").component, "views/Home.vue");
        assert_eq!(router.view(ViewId::Dashboard).unwrap().component(), "views/Home.vue");
        assert!(router.view(ViewId::Reports).is_none());
    }
}
