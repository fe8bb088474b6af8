//! Content items and downstream requirements.
//!
//! The resolver only ever looks at an item's name and its dependency lists.
//! Callers can resolve their own types by implementing [`PrimaryItem`] or
//! [`SecondaryItem`], or use the serde-ready [`PrimaryRecord`] and
//! [`SecondaryRecord`] which carry an opaque payload alongside.

use crate::dependency::{Dependencies, deserialize_present};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Anything with a roster name.
pub trait ContentItem {
    fn name(&self) -> &str;
}

/// An item of the primary category. Its dependencies name other primary items.
pub trait PrimaryItem: ContentItem {
    fn dependencies(&self) -> &Dependencies;
}

/// An item of the secondary category.
pub trait SecondaryItem: ContentItem {
    /// Required secondary items.
    fn dependencies(&self) -> &Dependencies;

    /// Required primary items.
    fn primary_dependencies(&self) -> &Dependencies;
}

impl<T: ContentItem + ?Sized> ContentItem for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: PrimaryItem + ?Sized> PrimaryItem for &T {
    fn dependencies(&self) -> &Dependencies {
        (**self).dependencies()
    }
}

impl<T: SecondaryItem + ?Sized> SecondaryItem for &T {
    fn dependencies(&self) -> &Dependencies {
        (**self).dependencies()
    }

    fn primary_dependencies(&self) -> &Dependencies {
        (**self).primary_dependencies()
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A primary roster entry with an opaque payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryRecord<T = ()> {
    pub name: String,

    /// Comma-separated primary names on disk; missing or null means none.
    #[serde(default)]
    pub dependencies: Dependencies,

    /// Caller data. Never inspected by the resolver.
    #[serde(default)]
    pub data: T,
}

impl PrimaryRecord<()> {
    /// A record with no payload.
    pub fn new(name: impl Into<String>, dependencies: &str) -> Self {
        Self::with_data(name, dependencies, ())
    }
}

impl<T> PrimaryRecord<T> {
    pub fn with_data(name: impl Into<String>, dependencies: &str, data: T) -> Self {
        Self {
            name: name.into(),
            dependencies: Dependencies::parse(dependencies),
            data,
        }
    }
}

impl<T> ContentItem for PrimaryRecord<T> {
    fn name(&self) -> &str {
        &self.name
    }
}

impl<T> PrimaryItem for PrimaryRecord<T> {
    fn dependencies(&self) -> &Dependencies {
        &self.dependencies
    }
}

/// A secondary roster entry with an opaque payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryRecord<T = ()> {
    pub name: String,

    /// Required secondary items.
    #[serde(default)]
    pub dependencies: Dependencies,

    /// Required primary items.
    #[serde(default)]
    pub primary_dependencies: Dependencies,

    #[serde(default)]
    pub data: T,
}

impl SecondaryRecord<()> {
    pub fn new(name: impl Into<String>, dependencies: &str, primary_dependencies: &str) -> Self {
        Self::with_data(name, dependencies, primary_dependencies, ())
    }
}

impl<T> SecondaryRecord<T> {
    pub fn with_data(
        name: impl Into<String>,
        dependencies: &str,
        primary_dependencies: &str,
        data: T,
    ) -> Self {
        Self {
            name: name.into(),
            dependencies: Dependencies::parse(dependencies),
            primary_dependencies: Dependencies::parse(primary_dependencies),
            data,
        }
    }
}

impl<T> ContentItem for SecondaryRecord<T> {
    fn name(&self) -> &str {
        &self.name
    }
}

impl<T> SecondaryItem for SecondaryRecord<T> {
    fn dependencies(&self) -> &Dependencies {
        &self.dependencies
    }

    fn primary_dependencies(&self) -> &Dependencies {
        &self.primary_dependencies
    }
}

// ---------------------------------------------------------------------------
// Downstream requirements
// ---------------------------------------------------------------------------

/// Prerequisites declared by something outside both rosters, such as a
/// stage that should stay locked until its content is available.
///
/// An absent list is vacuously satisfied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    #[serde(default, deserialize_with = "deserialize_present")]
    pub primary_dependencies: Option<Dependencies>,

    #[serde(default, deserialize_with = "deserialize_present")]
    pub secondary_dependencies: Option<Dependencies>,
}

impl Requirements {
    /// Requirements with both lists absent.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primary(mut self, dependencies: &str) -> Self {
        self.primary_dependencies = Some(Dependencies::parse(dependencies));
        self
    }

    pub fn secondary(mut self, dependencies: &str) -> Self {
        self.secondary_dependencies = Some(Dependencies::parse(dependencies));
        self
    }
}
