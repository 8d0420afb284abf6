//! Upstream path splitting.
//!
//! The first path segment names the downstream service; the remainder is the
//! downstream path. Query strings never take part in routing identity.

/// Result of splitting an upstream path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPath<'a> {
    pub service_name: &'a str,
    pub downstream_path: &'a str,
    /// False when the path was exactly `/<segment>` and the downstream path
    /// is the implied root.
    pub has_remainder: bool,
}

impl SplitPath<'_> {
    /// The path used for cache keys and QoS scoping.
    pub fn qualified_path(&self) -> String {
        if self.has_remainder {
            format!("/{}{}", self.service_name, self.downstream_path)
        } else {
            format!("/{}", self.service_name)
        }
    }
}

/// Drop a `?...` suffix.
pub fn strip_query(path: &str) -> &str {
    match path.find('?') {
        Some(idx) => &path[..idx],
        None => path,
    }
}

/// Split `path` into service name and downstream path.
///
/// Returns `None` when the path is empty or lacks a leading `/`.
pub fn split(path: &str) -> Option<SplitPath<'_>> {
    let rest = path.strip_prefix('/')?;

    match rest.find('/') {
        Some(idx) => Some(SplitPath {
            service_name: &rest[..idx],
            downstream_path: &rest[idx..],
            has_remainder: true,
        }),
        None => Some(SplitPath {
            service_name: rest,
            downstream_path: "/",
            has_remainder: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_service_and_rest() {
        let split = split("/orders/123/items").unwrap();
        assert_eq!(split.service_name, "orders");
        assert_eq!(split.downstream_path, "/123/items");
        assert_eq!(split.qualified_path(), "/orders/123/items");
    }

    #[test]
    fn test_split_single_segment() {
        let split = split("/orders").unwrap();
        assert_eq!(split.service_name, "orders");
        assert_eq!(split.downstream_path, "/");
        assert_eq!(split.qualified_path(), "/orders");
    }

    #[test]
    fn test_split_trailing_slash() {
        let split = split("/orders/").unwrap();
        assert_eq!(split.service_name, "orders");
        assert_eq!(split.downstream_path, "/");
        assert_eq!(split.qualified_path(), "/orders/");
    }

    #[test]
    fn test_split_rejects_malformed() {
        assert!(split("").is_none());
        assert!(split("orders/123").is_none());
    }

    #[test]
    fn test_strip_query() {
        assert_eq!(strip_query("/orders/123?x=1"), "/orders/123");
        assert_eq!(strip_query("/orders?next=/a/b"), "/orders");
        assert_eq!(strip_query("/orders"), "/orders");
    }

    #[test]
    fn test_split_law_over_samples() {
        for (svc, rest) in [("a", "b"), ("orders", "1/2/3"), ("x-y", "z.json")] {
            let path = format!("/{}/{}", svc, rest);
            let split = split(&path).unwrap();
            assert_eq!(split.service_name, svc);
            assert_eq!(split.downstream_path, format!("/{}", rest));
        }
    }
}
