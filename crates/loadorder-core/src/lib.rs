//! Staged load-order resolution for named content.
//!
//! Content comes in two categories. Primary items (for example levels) may
//! depend on other primary items. Secondary items (for example add-ons)
//! may depend on other secondary items and on primary items, never the
//! reverse. The [`Resolver`] orders each roster so every item follows its
//! prerequisites, drops items whose prerequisites can never be met, and
//! answers whether an arbitrary set of [`Requirements`] is satisfied.
//!
//! # Usage
//!
//! ```rust
//! use loadorder_core::{PrimaryRecord, Requirements, Resolver, SecondaryRecord};
//!
//! let mut resolver = Resolver::with_sink(Vec::<String>::new());
//!
//! let levels = resolver.resolve_primary(vec![
//!     PrimaryRecord::new("Factory", "Harbor"),
//!     PrimaryRecord::new("Harbor", ""),
//! ]);
//! assert_eq!(levels[0].name, "Harbor");
//!
//! let addons = resolver
//!     .resolve_secondary(vec![SecondaryRecord::new("Night Mode", "", "Factory")])
//!     .unwrap();
//! assert_eq!(addons.len(), 1);
//!
//! let gate = Requirements::new().primary("Harbor").secondary("Night Mode");
//! assert!(resolver.is_satisfied(&gate));
//! ```
//!
//! Unresolvable items are reported through a [`DiagnosticSink`]; the
//! default [`TracingSink`] logs them with `tracing::warn!`.

pub mod dependency;
pub mod diagnostic;
pub mod item;
pub mod registry;
pub mod resolver;

pub use dependency::Dependencies;
pub use diagnostic::{DiagnosticSink, TracingSink};
pub use item::{ContentItem, PrimaryItem, PrimaryRecord, Requirements, SecondaryItem, SecondaryRecord};
pub use registry::AcceptedNames;
pub use resolver::{MissingDependency, Phase, ResolveError, Resolver};
