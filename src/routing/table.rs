//! The route table.
//!
//! # Responsibilities
//! - Hold the ordered list of route descriptors
//! - Validate table invariants once, at construction
//! - Match a path to the first descriptor that accepts it
//!
//! # Design Decisions
//! - Immutable after construction (shared via `Arc`, read without locks)
//! - First match wins, in insertion order
//! - Construction fails fast on authoring defects

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::routing::descriptor::{RouteDescriptor, RouteTarget};
use crate::routing::matcher::{Matcher, Params, PathPattern};
use crate::routing::view::ViewId;
use crate::routing::TableError;

/// A descriptor that matched a path, with the captured parameters.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    pub route: &'a RouteDescriptor,
    pub params: Params,
}

struct CompiledRoute {
    descriptor: RouteDescriptor,
    pattern: PathPattern,
    matcher: Box<dyn Matcher>,
}

/// Ordered, validated, immutable set of route descriptors.
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
    by_name: HashMap<String, usize>,
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.routes.iter().map(|r| &r.descriptor))
            .finish()
    }
}

impl RouteTable {
    /// Build and validate a table from descriptors, in order.
    pub fn new(descriptors: Vec<RouteDescriptor>) -> Result<Self, TableError> {
        let mut routes = Vec::with_capacity(descriptors.len());
        let mut by_name = HashMap::new();
        let mut seen_paths: HashMap<String, String> = HashMap::new();

        for (index, descriptor) in descriptors.into_iter().enumerate() {
            let pattern = PathPattern::parse(&descriptor.path)?;

            if let Some(existing) = seen_paths.insert(pattern.normalized(), descriptor.path.clone()) {
                return Err(TableError::DuplicatePath {
                    path: descriptor.path,
                    existing,
                });
            }

            if let Some(name) = &descriptor.name {
                if by_name.insert(name.clone(), index).is_some() {
                    return Err(TableError::DuplicateName(name.clone()));
                }
            }

            if let RouteTarget::Redirect(to) = &descriptor.target {
                let target = PathPattern::parse(to).map_err(|_| TableError::InvalidPath {
                    path: to.clone(),
                    reason: format!("redirect target of {:?} must be an absolute path", descriptor.path),
                })?;
                if target.is_parameterized() {
                    return Err(TableError::InvalidPath {
                        path: to.clone(),
                        reason: format!(
                            "redirect target of {:?} must be a literal path without parameters",
                            descriptor.path
                        ),
                    });
                }
            }

            let matcher = pattern.compile();
            routes.push(CompiledRoute {
                descriptor,
                pattern,
                matcher,
            });
        }

        let table = Self { routes, by_name };
        table.check_redirects()?;
        Ok(table)
    }

    /// The builtin dashboard route table.
    pub fn builtin() -> Self {
        build()
    }

    /// Every redirect must land on a view after a finite number of hops.
    fn check_redirects(&self) -> Result<(), TableError> {
        for route in &self.routes {
            let RouteTarget::Redirect(first) = &route.descriptor.target else {
                continue;
            };

            let mut visited = HashSet::from([route.descriptor.path.as_str()]);
            let mut from = route.descriptor.path.as_str();
            let mut to = first.as_str();
            loop {
                let next = self
                    .match_path(to)
                    .ok_or_else(|| TableError::UnknownRedirectTarget {
                        from: from.to_string(),
                        to: to.to_string(),
                    })?;
                if !visited.insert(next.route.path.as_str()) {
                    return Err(TableError::RedirectCycle(route.descriptor.path.clone()));
                }
                match &next.route.target {
                    RouteTarget::View(_) => break,
                    RouteTarget::Redirect(target) => {
                        from = next.route.path.as_str();
                        to = target.as_str();
                    }
                }
            }
        }
        Ok(())
    }

    /// First descriptor, in table order, whose pattern accepts `path`.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_>> {
        self.routes.iter().find_map(|r| {
            r.matcher.capture(path).map(|params| RouteMatch {
                route: &r.descriptor,
                params,
            })
        })
    }

    pub fn get_by_name(&self, name: &str) -> Option<&RouteDescriptor> {
        self.by_name.get(name).map(|&i| &self.routes[i].descriptor)
    }

    pub(crate) fn pattern_by_name(&self, name: &str) -> Option<&PathPattern> {
        self.by_name.get(name).map(|&i| &self.routes[i].pattern)
    }

    pub fn routes(&self) -> impl ExactSizeIterator<Item = &RouteDescriptor> {
        self.routes.iter().map(|r| &r.descriptor)
    }

    /// View routes with the view each one renders.
    pub fn views(&self) -> impl Iterator<Item = (&RouteDescriptor, ViewId)> {
        self.routes
            .iter()
            .filter_map(|r| r.descriptor.view_id().map(|id| (&r.descriptor, id)))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Build the dashboard route table.
pub fn build() -> RouteTable {
    RouteTable::new(builtin_routes()).unwrap_or_else(|e| unreachable!("builtin route table is invalid: {e}"))
}

/// Descriptors of the dashboard, in table order.
pub fn builtin_routes() -> Vec<RouteDescriptor> {
    vec![
        RouteDescriptor::view("/", ViewId::Dashboard),
        RouteDescriptor::redirect("/settings", "/config"),
        RouteDescriptor::view("/reports", ViewId::Reports),
        RouteDescriptor::view("/config", ViewId::ConfigCenter),
        RouteDescriptor::view("/monitor", ViewId::MessageMonitor).titled("消息监控大屏"),
        RouteDescriptor::view("/messages", ViewId::MessageManager).titled("消息管理（旧版）"),
        RouteDescriptor::view("/template-messages", ViewId::TemplateMessageManager).titled("消息系统（模板版）"),
        RouteDescriptor::view("/templates", ViewId::TemplateManager).titled("模板管理"),
        RouteDescriptor::view("/ai-models", ViewId::AIModelManager).titled("AI模型配置"),
        RouteDescriptor::view("/project/:id", ViewId::ProjectDetail).titled("工单详情"),
    ]
}
