//! Path-based access filter: inclusion/exclusion patterns with wildcard
//! prefixes, exclusions winning.

/// A single path-matching rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathPattern {
    /// Matches the request path exactly.
    Exact(String),
    /// Matches any request path starting with this literal prefix.
    PrefixWildcard(String),
}

impl PathPattern {
    /// Parse a configured pattern string.
    ///
    /// A pattern containing `*` is a wildcard: the text before the first `*`
    /// is the literal prefix, the rest is ignored. Anything else matches
    /// exactly.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.find('*') {
            Some(index) => Self::PrefixWildcard(raw[..index].to_string()),
            None => Self::Exact(raw.to_string()),
        }
    }

    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(exact) => path == exact,
            Self::PrefixWildcard(prefix) => path.starts_with(prefix),
        }
    }
}

/// The decision for one request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Request proceeds; the authenticated flag passes through unchanged.
    Allow,
    /// Authentication is required and missing; the request must not reach
    /// downstream logic.
    Reject,
}

/// Immutable authorization configuration: ordered inclusion and exclusion
/// patterns, supplied at startup.
#[derive(Clone, Debug, Default)]
pub struct AccessPolicy {
    inclusions: Vec<PathPattern>,
    exclusions: Vec<PathPattern>,
}

impl AccessPolicy {
    #[must_use]
    pub fn new(inclusions: &[String], exclusions: &[String]) -> Self {
        Self {
            inclusions: inclusions.iter().map(|raw| PathPattern::parse(raw)).collect(),
            exclusions: exclusions.iter().map(|raw| PathPattern::parse(raw)).collect(),
        }
    }

    /// Whether authentication must be enforced for this path.
    ///
    /// Inclusions are evaluated first, exclusions strictly after, so an
    /// exclusion always wins regardless of declaration order — even when a
    /// path matches both an inclusion wildcard and an exclusion wildcard.
    /// Callers rely on exclusions as an override, not a competing rule of
    /// equal priority.
    #[must_use]
    pub fn requires_auth(&self, path: &str) -> bool {
        let mut requires_auth = false;
        for pattern in &self.inclusions {
            if pattern.matches(path) {
                requires_auth = true;
            }
        }
        for pattern in &self.exclusions {
            if pattern.matches(path) {
                requires_auth = false;
            }
        }
        requires_auth
    }

    #[must_use]
    pub fn decide(&self, path: &str, is_authenticated: bool) -> Decision {
        if self.requires_auth(path) && !is_authenticated {
            Decision::Reject
        } else {
            Decision::Allow
        }
    }
}
