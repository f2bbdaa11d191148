//! Segment-based route patterns.
//!
//! A pattern is either `*` (matches every path) or a `/`-separated list of
//! segments, each a literal or a `:name` capture. Matching is exact: the path
//! must have as many segments as the pattern. Empty segments are ignored on
//! both sides, so `/home/` and `//home` match `/:page` just like `/home`.
//!
//! Captured values are percent-decoded. Literals are compared against the raw
//! segment.
//!
//! ```
//! use gpui_talks_shell::RoutePattern;
//!
//! let pattern = RoutePattern::parse("/talk/:id");
//! let params = pattern.captures("/talk/42").unwrap();
//! assert_eq!(params.get("id"), Some("42"));
//! assert!(pattern.captures("/talk/42/extra").is_none());
//! ```

use crate::params::RouteParams;
use percent_encoding::percent_decode_str;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    kind: PatternKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternKind {
    Any,
    Segments(Vec<Segment>),
}

impl RoutePattern {
    /// Parse a pattern string. `*` is universal; `/` is the root.
    pub fn parse(pattern: &str) -> Self {
        let kind = if pattern == "*" {
            PatternKind::Any
        } else {
            PatternKind::Segments(
                split_path(pattern)
                    .into_iter()
                    .map(|seg| match extract_param_name(seg) {
                        Some(name) => Segment::Param(name.to_string()),
                        None => Segment::Literal(seg.to_string()),
                    })
                    .collect(),
            )
        };

        Self {
            source: pattern.to_string(),
            kind,
        }
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// `true` for the `*` pattern.
    pub fn is_universal(&self) -> bool {
        matches!(self.kind, PatternKind::Any)
    }

    /// Match a path (no query string) and return the captured parameters.
    pub fn captures(&self, path: &str) -> Option<RouteParams> {
        let segments = match &self.kind {
            PatternKind::Any => return Some(RouteParams::new()),
            PatternKind::Segments(segments) => segments,
        };

        let path_segments = split_path(path);
        if path_segments.len() != segments.len() {
            return None;
        }

        let mut params = RouteParams::new();
        for (pattern_seg, path_seg) in segments.iter().zip(path_segments) {
            match pattern_seg {
                Segment::Param(name) => {
                    let value = percent_decode_str(path_seg).decode_utf8_lossy();
                    params.set(name.clone(), value.into_owned());
                }
                Segment::Literal(literal) if literal == path_seg => {}
                Segment::Literal(_) => return None,
            }
        }

        Some(params)
    }

    pub fn matches(&self, path: &str) -> bool {
        self.captures(path).is_some()
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Split a path into its non-empty segments.
///
/// ```ignore
/// assert_eq!(split_path("/talk/123"), vec!["talk", "123"]);
/// assert_eq!(split_path("/"), Vec::<&str>::new());
/// ```
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Name of a `:param` segment, or `None` for a literal.
pub fn extract_param_name(segment: &str) -> Option<&str> {
    segment.strip_prefix(':').filter(|name| !name.is_empty())
}
