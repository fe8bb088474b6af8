use crate::dependency::Dependencies;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Insertion-ordered set of accepted names.
///
/// Names are kept in a `Vec` for reproducible order and mirrored in a
/// `HashSet` for constant-time membership. Append-only: names are never
/// removed once accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct AcceptedNames {
    order: Vec<String>,
    index: HashSet<String>,
}

impl AcceptedNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a name. Returns `false` if it was already present, in which
    /// case nothing changes.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.index.contains(name) {
            return false;
        }
        self.index.insert(name.to_string());
        self.order.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    /// True when every token of `deps` has been accepted.
    pub fn contains_all(&self, deps: &Dependencies) -> bool {
        deps.iter().all(|token| self.contains(token))
    }

    /// Tokens of `deps` that have not been accepted, in declaration order.
    pub fn missing<'a>(&self, deps: &'a Dependencies) -> impl Iterator<Item = &'a str> {
        deps.iter().filter(|token| !self.contains(token))
    }

    /// Accepted names in acceptance order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl From<Vec<String>> for AcceptedNames {
    fn from(names: Vec<String>) -> Self {
        let mut set = Self::new();
        for name in &names {
            set.insert(name);
        }
        set
    }
}

impl From<AcceptedNames> for Vec<String> {
    fn from(set: AcceptedNames) -> Self {
        set.order
    }
}

impl PartialEq for AcceptedNames {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for AcceptedNames {}
