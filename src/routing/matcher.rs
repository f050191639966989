//! Path pattern matching.
//!
//! # Responsibilities
//! - Parse route path patterns (`/reports`, `/project/:id`)
//! - Match incoming paths segment by segment
//! - Capture named positional parameters
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - No trailing-slash tolerance: `/reports/` is not `/reports`
//! - A parameter segment matches exactly one non-empty segment
//! - Captured values are percent-decoded; invalid UTF-8 is no match
//! - No regex, patterns are compiled to a segment list at startup

use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::routing::TableError;

/// Characters escaped in a path segment: everything but RFC 3986 unreserved.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode `value` for use as a single path segment.
pub fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Percent-decode a raw path segment.
pub fn decode_segment(raw: &str) -> Option<String> {
    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}

/// Parameters captured from a matched path, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Get a captured value by parameter name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Trait for matching paths against a compiled route pattern.
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Returns the captured parameters if the path matches.
    fn capture(&self, path: &str) -> Option<Params>;

    /// Returns true if the path matches this pattern.
    fn matches(&self, path: &str) -> bool {
        self.capture(path).is_some()
    }
}

/// One segment of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Static(String),
    Param(String),
}

/// Matches a literal path exactly.
#[derive(Debug, Clone)]
pub struct ExactMatcher {
    path: String,
}

impl ExactMatcher {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Matcher for ExactMatcher {
    fn capture(&self, path: &str) -> Option<Params> {
        (path == self.path).then(Params::new)
    }
}

/// Matches a pattern containing named positional segments.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    segments: Vec<Segment>,
}

impl PatternMatcher {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl Matcher for PatternMatcher {
    fn capture(&self, path: &str) -> Option<Params> {
        let rest = path.strip_prefix('/')?;
        let parts: Vec<&str> = rest.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(s) if s == part => {}
                Segment::Static(_) => return None,
                Segment::Param(_) if part.is_empty() => return None,
                Segment::Param(name) => params.insert(name.as_str(), decode_segment(part)?),
            }
        }
        Some(params)
    }
}

/// A parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern such as `/project/:id`.
    ///
    /// The root pattern `/` has no segments. Interior empty segments,
    /// unnamed or repeated parameters and more than one parameter are rejected.
    pub fn parse(pattern: &str) -> Result<Self, TableError> {
        let invalid = |reason: &str| TableError::InvalidPath {
            path: pattern.to_string(),
            reason: reason.to_string(),
        };

        let rest = pattern
            .strip_prefix('/')
            .ok_or_else(|| invalid("must start with '/'"))?;
        if rest.is_empty() {
            return Ok(Self { segments: Vec::new() });
        }

        let mut segments = Vec::new();
        for part in rest.split('/') {
            if part.is_empty() {
                return Err(invalid("empty segment"));
            }
            match part.strip_prefix(':') {
                Some("") => return Err(invalid("parameter without a name")),
                Some(name) => {
                    if segments.iter().any(|s| matches!(s, Segment::Param(_))) {
                        return Err(invalid("at most one parameter segment is allowed"));
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Static(part.to_string())),
            }
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_parameterized(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Param(_)))
    }

    /// Pattern with parameter names erased, used for duplicate detection.
    ///
    /// `/project/:id` and `/project/:pid` both normalize to `/project/:`.
    pub fn normalized(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            match segment {
                Segment::Static(s) => out.push_str(s),
                Segment::Param(_) => out.push(':'),
            }
        }
        out
    }

    /// Compile into a matcher. Literal patterns use the exact matcher.
    pub fn compile(&self) -> Box<dyn Matcher> {
        if self.is_parameterized() {
            Box::new(PatternMatcher::new(self.segments.clone()))
        } else {
            Box::new(ExactMatcher::new(self.normalized()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_matcher() {
        let matcher = PathPattern::parse("/reports").unwrap().compile();

        assert!(matcher.matches("/reports"));
        assert!(!matcher.matches("/reports/"));
        assert!(!matcher.matches("/Reports")); // Case sensitive
        assert!(!matcher.matches("/reports/2024"));
    }

    #[test]
    fn test_root_matches_only_root() {
        let matcher = PathPattern::parse("/").unwrap().compile();

        assert!(matcher.matches("/"));
        assert!(!matcher.matches(""));
        assert!(!matcher.matches("/x"));
    }

    #[test]
    fn test_param_capture() {
        let matcher = PathPattern::parse("/project/:id").unwrap().compile();

        let params = matcher.capture("/project/42").unwrap();
        assert_eq!(params.get("id"), Some("42"));

        let params = matcher.capture("/project/abc-1").unwrap();
        assert_eq!(params.get("id"), Some("abc-1"));
    }

    #[test]
    fn test_param_requires_non_empty_segment() {
        let matcher = PathPattern::parse("/project/:id").unwrap().compile();

        assert!(!matcher.matches("/project/"));
        assert!(!matcher.matches("/project"));
        assert!(!matcher.matches("/project/42/extra"));
        assert!(!matcher.matches("/projects/42"));
    }

    #[test]
    fn test_param_is_percent_decoded() {
        let matcher = PathPattern::parse("/project/:id").unwrap().compile();

        let params = matcher.capture("/project/%E5%B7%A5%E5%8D%95").unwrap();
        assert_eq!(params.get("id"), Some("工单"));

        let params = matcher.capture("/project/a%2Fb%20c").unwrap();
        assert_eq!(params.get("id"), Some("a/b c"));

        // Not valid UTF-8 once decoded.
        assert!(!matcher.matches("/project/%FF"));
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("abc-1_x.y~z"), "abc-1_x.y~z");
        assert_eq!(encode_segment("a?b#c d/e"), "a%3Fb%23c%20d%2Fe");
        assert_eq!(encode_segment("工单"), "%E5%B7%A5%E5%8D%95");
        assert_eq!(decode_segment(&encode_segment("a?b#c d/工单")).as_deref(), Some("a?b#c d/工单"));
    }

    #[test]
    fn test_parse_rejects_malformed_patterns() {
        assert!(PathPattern::parse("reports").is_err());
        assert!(PathPattern::parse("/a//b").is_err());
        assert!(PathPattern::parse("/a/").is_err());
        assert!(PathPattern::parse("/project/:").is_err());
        assert!(PathPattern::parse("/:a/:b").is_err());
    }

    #[test]
    fn test_normalized_erases_param_names() {
        let a = PathPattern::parse("/project/:id").unwrap();
        let b = PathPattern::parse("/project/:pid").unwrap();
        assert_eq!(a.normalized(), b.normalized());
        assert_eq!(PathPattern::parse("/").unwrap().normalized(), "/");
    }
}
