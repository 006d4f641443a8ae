//! Active REST resource of a grid session.
//!
//! The resource name is explicit session state. The display title is derived
//! from it and never parsed back.

#[cfg(test)]
#[path = "endpoint_test.rs"]
mod endpoint_test;

use std::fmt;

use crate::record::RecordId;

/// REST resource name (the collection path segment, e.g. `usuarios`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Endpoint(String);

impl Endpoint {
    /// Resource named by the last non-empty path segment of `url`.
    ///
    /// Query string, fragment and trailing slashes are ignored. Returns `None`
    /// when the URL has no path segment at all.
    #[must_use]
    pub fn from_url(url: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let path = path.split_once("://").map_or(path, |(_, rest)| rest.split_once('/').map_or("", |(_, p)| p));
        path.split('/').rev().find(|s| !s.is_empty()).map(|s| Self(s.to_owned()))
    }

    /// Resource from a bare name; empty names and names containing `/` are rejected.
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        let name = name.trim();
        (!name.is_empty() && !name.contains('/')).then(|| Self(name.to_owned()))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Display title: the resource name with its first letter capitalized.
    #[must_use]
    pub fn title(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// `{api_base}/{resource}`
    #[must_use]
    pub fn collection_url(&self, api_base: &str) -> String {
        format!("{}/{}", api_base.trim_end_matches('/'), self.0)
    }

    /// `{api_base}/{resource}/{id}`
    #[must_use]
    pub fn record_url(&self, api_base: &str, id: &RecordId) -> String {
        format!("{}/{id}", self.collection_url(api_base))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
