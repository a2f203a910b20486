//! Search request parameters
//!
//! A [`SearchParameters`] value describes one search request: what is being
//! searched for, where to look, and whether access restrictions apply. The
//! [`Origin`] field records whether the request was issued directly or
//! forwarded by a bridge from another framework.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Where a request was issued from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Issued directly by a caller of the framework
    #[default]
    Native,
    /// Dispatched by a bridge on behalf of a request in another framework
    Bridged,
}

/// The set of locations a search is restricted to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// No restriction
    Everything,
    /// Project sources only, excluding libraries
    Project,
    /// An explicit set of file paths
    Files(BTreeSet<String>),
}

impl SearchScope {
    /// Builds a file scope from any collection of paths
    pub fn files<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Files(paths.into_iter().map(Into::into).collect())
    }

    /// Returns true if `path` lies within this scope
    ///
    /// `in_project` tells whether the path belongs to project sources.
    pub fn contains(&self, path: &str, in_project: bool) -> bool {
        match self {
            Self::Everything => true,
            Self::Project => in_project,
            Self::Files(files) => files.contains(path),
        }
    }

    /// Narrows two scopes to the locations both accept
    ///
    /// Intersecting `Project` with a file set keeps the file set; the
    /// project check is left to [`SearchScope::contains`] at match time.
    pub fn intersect(&self, other: &SearchScope) -> SearchScope {
        match (self, other) {
            (Self::Everything, s) | (s, Self::Everything) => s.clone(),
            (Self::Project, Self::Project) => Self::Project,
            (Self::Project, files @ Self::Files(_)) | (files @ Self::Files(_), Self::Project) => {
                files.clone()
            }
            (Self::Files(a), Self::Files(b)) => Self::Files(a.intersection(b).cloned().collect()),
        }
    }

    /// Returns true if no location can ever match
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Files(files) if files.is_empty())
    }
}

/// Parameters of a reference search request
///
/// `T` is the framework-specific representation of the searched element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchParameters<T> {
    /// Element whose references are searched for
    pub target: T,
    /// Locations the search is restricted to
    pub scope: SearchScope,
    /// Report references even where the target is not accessible
    pub ignore_access_scope: bool,
    /// Whether the request was forwarded by a bridge
    pub origin: Origin,
}

impl<T> SearchParameters<T> {
    /// Creates native parameters with access restrictions honored
    pub fn new(target: T, scope: SearchScope) -> Self {
        Self {
            target,
            scope,
            ignore_access_scope: false,
            origin: Origin::Native,
        }
    }

    /// Sets the access-scope flag
    pub fn with_ignore_access_scope(mut self, ignore: bool) -> Self {
        self.ignore_access_scope = ignore;
        self
    }

    /// Returns true if a bridge dispatched this request
    pub fn is_bridged(&self) -> bool {
        self.origin == Origin::Bridged
    }

    /// Builds the request a bridge dispatches into another framework
    ///
    /// Scope and access-scope flag are copied unchanged; the result is
    /// always marked [`Origin::Bridged`].
    pub fn forwarded<U>(&self, target: U) -> SearchParameters<U> {
        SearchParameters {
            target,
            scope: self.scope.clone(),
            ignore_access_scope: self.ignore_access_scope,
            origin: Origin::Bridged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_parameters_are_native() {
        let params = SearchParameters::new("foo", SearchScope::Project);
        assert_eq!(params.origin, Origin::Native);
        assert!(!params.is_bridged());
        assert!(!params.ignore_access_scope);
    }

    #[test]
    fn test_forwarded_copies_scope_and_flag() {
        let scope = SearchScope::files(["src/a.rs", "src/b.rs"]);
        let params = SearchParameters::new(42u32, scope.clone()).with_ignore_access_scope(true);

        let forwarded = params.forwarded("answer".to_string());

        assert_eq!(forwarded.target, "answer");
        assert_eq!(forwarded.scope, scope);
        assert!(forwarded.ignore_access_scope);
        assert!(forwarded.is_bridged());
    }

    #[test]
    fn test_scope_contains() {
        let files = SearchScope::files(["a.kt"]);
        assert!(files.contains("a.kt", false));
        assert!(!files.contains("b.kt", true));
        assert!(SearchScope::Project.contains("lib/x.kt", true));
        assert!(!SearchScope::Project.contains("lib/x.kt", false));
        assert!(SearchScope::Everything.contains("anything", false));
    }

    #[test]
    fn test_scope_intersect() {
        let a = SearchScope::files(["a", "b", "c"]);
        let b = SearchScope::files(["b", "c", "d"]);
        assert_eq!(a.intersect(&b), SearchScope::files(["b", "c"]));
        assert_eq!(SearchScope::Everything.intersect(&a), a);
        assert_eq!(
            SearchScope::Project.intersect(&SearchScope::Everything),
            SearchScope::Project
        );
        assert_eq!(SearchScope::Project.intersect(&b), b);
        assert!(SearchScope::files(["x"])
            .intersect(&SearchScope::files(["y"]))
            .is_empty());
    }

    #[test]
    fn test_origin_serializes_snake_case() {
        let json = serde_json::to_string(&Origin::Bridged).unwrap();
        assert_eq!(json, "\"bridged\"");
    }
}
