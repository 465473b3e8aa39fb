//! Route Rules
//!
//! Ordered `{pattern, kind}` table deciding how the guard treats a path.
//! Exact rules are evaluated before prefix rules; the first match wins.

/// How a matched path is protected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// No session needed
    Public,
    /// Protected path without a user segment; always sent to the login page
    ProtectedExact,
    /// Protected prefix followed by `<user_name>/...`
    ProtectedPrefixed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    pub pattern: String,
    pub kind: RouteKind,
}

impl RouteRule {
    pub fn new(pattern: impl Into<String>, kind: RouteKind) -> Self {
        Self {
            pattern: pattern.into(),
            kind,
        }
    }

    fn is_exact(&self) -> bool {
        matches!(self.kind, RouteKind::ProtectedExact)
    }
}

/// Result of classifying one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch<'a> {
    /// Static asset; never intercepted
    StaticAsset,
    /// No rule, or a `Public` rule
    Public,
    /// Matched an exact protected rule
    ProtectedExact,
    /// Matched a protected prefix with a well-formed user segment
    Protected { user_name: &'a str },
    /// Matched a protected prefix but the user segment is missing or
    /// malformed; the request passes through unauthenticated
    MalformedUser { segment: &'a str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(vec![
            RouteRule::new("/", RouteKind::ProtectedExact),
            RouteRule::new("/dashboard/", RouteKind::ProtectedPrefixed),
            RouteRule::new("/setting/", RouteKind::ProtectedPrefixed),
            RouteRule::new("/api/router/dashboard/", RouteKind::ProtectedPrefixed),
            RouteRule::new("/api/router/setting/", RouteKind::ProtectedPrefixed),
        ])
    }
}

impl RouteTable {
    pub fn new(rules: Vec<RouteRule>) -> Self {
        Self { rules }
    }

    /// Protected rules are matched before the static-asset exclusion, so
    /// a dotted last segment never skips session validation under a
    /// protected prefix.
    pub fn classify<'a>(&self, path: &'a str) -> RouteMatch<'a> {
        let exact = self
            .rules
            .iter()
            .filter(|rule| rule.is_exact())
            .find(|rule| rule.pattern == path);
        if exact.is_some() {
            return RouteMatch::ProtectedExact;
        }

        let prefixed = self
            .rules
            .iter()
            .filter(|rule| !rule.is_exact())
            .find(|rule| path.starts_with(rule.pattern.as_str()));

        match prefixed {
            Some(rule) if rule.kind == RouteKind::ProtectedPrefixed => {
                let rest = &path[rule.pattern.len()..];
                let segment = rest.split('/').next().unwrap_or_default();
                if is_valid_url_user_name(segment) {
                    RouteMatch::Protected { user_name: segment }
                } else {
                    RouteMatch::MalformedUser { segment }
                }
            }
            _ if is_static_asset(path) => RouteMatch::StaticAsset,
            _ => RouteMatch::Public,
        }
    }
}

/// `^[a-zA-Z0-9_-]{3,32}$`
pub fn is_valid_url_user_name(segment: &str) -> bool {
    (3..=32).contains(&segment.len())
        && segment
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Build output and files with an extension are served without a session
pub fn is_static_asset(path: &str) -> bool {
    if path.starts_with("/_next/static") || path.starts_with("/_next/image") {
        return true;
    }
    if path == "/favicon.ico" {
        return true;
    }

    path.rsplit('/').next().is_some_and(|last| last.contains('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_exact() {
        let table = RouteTable::default();
        assert_eq!(table.classify("/"), RouteMatch::ProtectedExact);
    }

    #[test]
    fn test_prefixed_extracts_user() {
        let table = RouteTable::default();
        assert_eq!(
            table.classify("/dashboard/alice123"),
            RouteMatch::Protected {
                user_name: "alice123"
            }
        );
        assert_eq!(
            table.classify("/setting/alice123/channels"),
            RouteMatch::Protected {
                user_name: "alice123"
            }
        );
        assert_eq!(
            table.classify("/api/router/dashboard/alice123/movies"),
            RouteMatch::Protected {
                user_name: "alice123"
            }
        );
        assert_eq!(
            table.classify("/api/router/setting/Bob_01"),
            RouteMatch::Protected {
                user_name: "Bob_01"
            }
        );
    }

    #[test]
    fn test_malformed_user_segment() {
        let table = RouteTable::default();
        assert_eq!(
            table.classify("/dashboard/ab"),
            RouteMatch::MalformedUser { segment: "ab" }
        );
        assert_eq!(
            table.classify("/dashboard/"),
            RouteMatch::MalformedUser { segment: "" }
        );
        assert_eq!(
            table.classify("/dashboard/a%20b/x"),
            RouteMatch::MalformedUser { segment: "a%20b" }
        );
        let long = format!("/setting/{}", "a".repeat(33));
        assert!(matches!(
            table.classify(&long),
            RouteMatch::MalformedUser { .. }
        ));
    }

    #[test]
    fn test_public_paths() {
        let table = RouteTable::default();
        for path in ["/login", "/signup", "/auth/login", "/api/router/videos", "/file", "/dashboard"] {
            assert_eq!(table.classify(path), RouteMatch::Public, "{path}");
        }
    }

    #[test]
    fn test_static_assets_are_skipped() {
        let table = RouteTable::default();
        for path in [
            "/_next/static/chunks/main.js",
            "/_next/image",
            "/favicon.ico",
            "/logo.png",
            "/images/poster.jpg",
        ] {
            assert_eq!(table.classify(path), RouteMatch::StaticAsset, "{path}");
        }
    }

    #[test]
    fn test_dotted_segment_under_protected_prefix_stays_protected() {
        let table = RouteTable::default();
        for (path, user_name) in [
            ("/dashboard/alice123/report.csv", "alice123"),
            ("/api/router/setting/bob123/delete/a/b.c", "bob123"),
            ("/api/router/dashboard/alice123/favicon.ico", "alice123"),
        ] {
            assert_eq!(
                table.classify(path),
                RouteMatch::Protected { user_name },
                "{path}"
            );
        }
    }

    #[test]
    fn test_exact_rules_win_over_prefix_rules() {
        let table = RouteTable::new(vec![
            RouteRule::new("/dashboard/", RouteKind::ProtectedPrefixed),
            RouteRule::new("/dashboard/", RouteKind::ProtectedExact),
        ]);
        assert_eq!(table.classify("/dashboard/"), RouteMatch::ProtectedExact);
    }

    #[test]
    fn test_public_rule_short_circuits() {
        let table = RouteTable::new(vec![
            RouteRule::new("/dashboard/demo", RouteKind::Public),
            RouteRule::new("/dashboard/", RouteKind::ProtectedPrefixed),
        ]);
        assert_eq!(table.classify("/dashboard/demo/feed"), RouteMatch::Public);
        assert!(matches!(
            table.classify("/dashboard/alice123"),
            RouteMatch::Protected { .. }
        ));
    }

    #[test]
    fn test_url_user_name_rule() {
        assert!(is_valid_url_user_name("abc"));
        assert!(is_valid_url_user_name("a-b_c"));
        assert!(is_valid_url_user_name(&"z".repeat(32)));
        assert!(!is_valid_url_user_name("ab"));
        assert!(!is_valid_url_user_name(&"z".repeat(33)));
        assert!(!is_valid_url_user_name("alice.b"));
    }
}
