//! Route matching logic.
//!
//! # Responsibilities
//! - Match host header (exact match, case-insensitive)
//! - Match upstream path templates and extract placeholders
//!
//! # Design Decisions
//! - Host matching is case-insensitive (RFC 9110)
//! - Literal path segments match case-insensitively
//! - Absent host condition = always matches (wildcard)
//! - No regex: templates compile to segment lists matched in O(n)

use crate::routing::model::Placeholder;

/// Matches the Host header.
#[derive(Debug, Clone)]
pub struct HostMatcher {
    expected_host: Option<String>,
}

impl HostMatcher {
    /// The host is normalized to lowercase for case-insensitive matching.
    pub fn new(host: Option<&str>) -> Self {
        Self {
            expected_host: host.filter(|h| !h.is_empty()).map(str::to_lowercase),
        }
    }

    pub fn matches(&self, host: &str) -> bool {
        match &self.expected_host {
            Some(expected) => host.eq_ignore_ascii_case(expected),
            None => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A compiled upstream path template such as `/orders/{id}/{everything}`.
///
/// A placeholder in the final segment also captures every segment after it,
/// including none at all.
#[derive(Debug, Clone)]
pub struct PathTemplateMatcher {
    segments: Vec<Segment>,
    catch_all: bool,
}

impl PathTemplateMatcher {
    pub fn new(template: &str) -> Self {
        let segments: Vec<Segment> = template
            .trim_start_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                if s.len() > 2 && s.starts_with('{') && s.ends_with('}') {
                    Segment::Placeholder(s.to_string())
                } else {
                    Segment::Literal(s.to_string())
                }
            })
            .collect();
        let catch_all = matches!(segments.last(), Some(Segment::Placeholder(_)));

        Self {
            segments,
            catch_all,
        }
    }

    /// Match `path` and return the extracted placeholders.
    pub fn matches(&self, path: &str) -> Option<Vec<Placeholder>> {
        let parts: Vec<&str> = path
            .trim_start_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        let mut placeholders = Vec::new();

        for (i, segment) in self.segments.iter().enumerate() {
            let is_last = i + 1 == self.segments.len();
            match segment {
                Segment::Literal(literal) => {
                    if !parts.get(i)?.eq_ignore_ascii_case(literal) {
                        return None;
                    }
                }
                Segment::Placeholder(name) if is_last && self.catch_all => {
                    placeholders.push(Placeholder {
                        name: name.clone(),
                        value: parts.get(i..).map(|rest| rest.join("/")).unwrap_or_default(),
                    });
                    return Some(placeholders);
                }
                Segment::Placeholder(name) => {
                    placeholders.push(Placeholder {
                        name: name.clone(),
                        value: parts.get(i)?.to_string(),
                    });
                }
            }
        }

        (parts.len() == self.segments.len()).then_some(placeholders)
    }
}
