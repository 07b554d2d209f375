//! Purpose: Ordered query-string parameters for Bento API calls.
//! Exports: `Query`.
//! Role: Per-call parameter bag built by operations and merged with `site_uuid` at send time.
//! Invariants: Names are unique; `set` replaces any existing value for a name.
//! Invariants: Absent or empty optional values are never emitted.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Query::set`].
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Builder form of [`Query::set_opt`].
    pub fn with_opt(mut self, name: &str, value: Option<&str>) -> Self {
        self.set_opt(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.pairs.retain(|(existing, _)| existing != name);
        self.pairs.push((name.to_string(), value.into()));
    }

    pub fn set_opt(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|value| !value.is_empty()) {
            self.set(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
