//! Two-phase load-order resolution.
//!
//! Primary items are resolved first against the primary registry. Secondary
//! items are resolved afterwards against the secondary registry for their
//! own dependencies and the (now frozen) primary registry for their
//! cross-category dependencies. Both phases use the same fixed-point
//! relaxation: repeated passes over the roster in input order, accepting
//! every item whose dependencies are all accepted, until a pass accepts
//! nothing.

use crate::diagnostic::{DiagnosticSink, TracingSink, unmet_dependencies_message};
use crate::item::{ContentItem, PrimaryItem, Requirements, SecondaryItem};
use crate::registry::AcceptedNames;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// Phases
// ---------------------------------------------------------------------------

/// The two dependency categories, in resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Primary,
    Secondary,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Primary => f.write_str("primary"),
            Phase::Secondary => f.write_str("secondary"),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Call-order violations. Unresolvable items are not errors; they are
/// reported through the diagnostic sink and dropped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("secondary resolution requested before primary resolution completed")]
    PrimaryPhaseIncomplete,
}

/// A dependency token that is not in its registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingDependency {
    pub phase: Phase,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Holds the accepted-name registries for both categories.
///
/// Construct one per engine run and hand out `&Resolver` to anything that
/// needs [`Resolver::is_satisfied`]. Resolution takes `&mut self`, so queries
/// cannot overlap an in-progress resolve.
#[derive(Debug)]
pub struct Resolver<S = TracingSink> {
    primary: AcceptedNames,
    secondary: AcceptedNames,
    primary_complete: bool,
    secondary_complete: bool,
    /// Names dropped by the most recent call of each phase.
    rejected_primary: Vec<String>,
    rejected_secondary: Vec<String>,
    sink: S,
}

impl Resolver<TracingSink> {
    /// A resolver that reports unmet dependencies through `tracing`.
    pub fn new() -> Self {
        Self::with_sink(TracingSink)
    }
}

impl Default for Resolver<TracingSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Resolver<S> {
    /// A resolver that reports unmet dependencies to `sink`.
    pub fn with_sink(sink: S) -> Self {
        Self {
            primary: AcceptedNames::new(),
            secondary: AcceptedNames::new(),
            primary_complete: false,
            secondary_complete: false,
            rejected_primary: Vec::new(),
            rejected_secondary: Vec::new(),
            sink,
        }
    }

    // -- Query API --

    /// Whether every dependency declared by `requirements` has been accepted.
    ///
    /// An absent list is vacuously satisfied. Before resolution both
    /// registries are empty, so any non-empty list fails.
    pub fn is_satisfied(&self, requirements: &Requirements) -> bool {
        let primary_met = requirements
            .primary_dependencies
            .as_ref()
            .is_none_or(|deps| self.primary.contains_all(deps));
        if !primary_met {
            return false;
        }
        requirements
            .secondary_dependencies
            .as_ref()
            .is_none_or(|deps| self.secondary.contains_all(deps))
    }

    /// Every dependency of `requirements` that has not been accepted, primary
    /// first. Empty exactly when [`Resolver::is_satisfied`] is true.
    pub fn missing(&self, requirements: &Requirements) -> Vec<MissingDependency> {
        let lists = [
            (Phase::Primary, &self.primary, &requirements.primary_dependencies),
            (Phase::Secondary, &self.secondary, &requirements.secondary_dependencies),
        ];

        let mut missing = Vec::new();
        for (phase, registry, deps) in lists {
            if let Some(deps) = deps {
                missing.extend(registry.missing(deps).map(|name| MissingDependency {
                    phase,
                    name: name.to_string(),
                }));
            }
        }
        missing
    }

    /// Whether the given phase has finished at least once.
    pub fn is_complete(&self, phase: Phase) -> bool {
        match phase {
            Phase::Primary => self.primary_complete,
            Phase::Secondary => self.secondary_complete,
        }
    }

    /// The accepted-name registry of a phase.
    pub fn accepted(&self, phase: Phase) -> &AcceptedNames {
        match phase {
            Phase::Primary => &self.primary,
            Phase::Secondary => &self.secondary,
        }
    }

    /// Accepted primary names in acceptance order.
    pub fn primary_names(&self) -> &[String] {
        self.primary.names()
    }

    /// Accepted secondary names in acceptance order.
    pub fn secondary_names(&self) -> &[String] {
        self.secondary.names()
    }

    pub fn is_primary_accepted(&self, name: &str) -> bool {
        self.primary.contains(name)
    }

    pub fn is_secondary_accepted(&self, name: &str) -> bool {
        self.secondary.contains(name)
    }

    /// Names dropped by the most recent resolve call of `phase`.
    pub fn rejected(&self, phase: Phase) -> &[String] {
        match phase {
            Phase::Primary => &self.rejected_primary,
            Phase::Secondary => &self.rejected_secondary,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: DiagnosticSink> Resolver<S> {
    // -- Resolution --

    /// Order the primary roster so that every item follows its dependencies.
    ///
    /// Items whose dependencies never become available (missing names,
    /// cycles, self-references) are dropped with one warning each. Marks the
    /// primary phase complete whatever the outcome.
    pub fn resolve_primary<T: PrimaryItem>(&mut self, items: Vec<T>) -> Vec<T> {
        let outcome = relax(items, &mut self.primary, |accepted, item| {
            accepted.contains_all(item.dependencies())
        });

        self.rejected_primary = self.report(Phase::Primary, &outcome);
        self.primary_complete = true;
        outcome.loaded
    }

    /// Order the secondary roster. Requires a completed primary phase.
    ///
    /// An item is ready once its secondary dependencies are accepted and its
    /// primary dependencies are in the primary registry. The primary
    /// registry is only read.
    pub fn resolve_secondary<T: SecondaryItem>(
        &mut self,
        items: Vec<T>,
    ) -> Result<Vec<T>, ResolveError> {
        if !self.primary_complete {
            return Err(ResolveError::PrimaryPhaseIncomplete);
        }

        let primary = &self.primary;
        let outcome = relax(items, &mut self.secondary, |accepted, item| {
            accepted.contains_all(item.dependencies())
                && primary.contains_all(item.primary_dependencies())
        });

        self.rejected_secondary = self.report(Phase::Secondary, &outcome);
        self.secondary_complete = true;
        Ok(outcome.loaded)
    }

    /// Warn about every rejected item and return their names.
    fn report<T: ContentItem>(&mut self, phase: Phase, outcome: &Relaxation<T>) -> Vec<String> {
        let mut names = Vec::with_capacity(outcome.rejected.len());
        for item in &outcome.rejected {
            self.sink.warn(&unmet_dependencies_message(item.name()));
            names.push(item.name().to_string());
        }

        info!(
            %phase,
            loaded = outcome.loaded.len(),
            rejected = names.len(),
            passes = outcome.passes,
            "resolution finished"
        );
        names
    }
}

// ---------------------------------------------------------------------------
// Fixed-point relaxation
// ---------------------------------------------------------------------------

struct Relaxation<T> {
    /// Items in the order they became ready.
    loaded: Vec<T>,
    /// Items that never became ready, in input order.
    rejected: Vec<T>,
    passes: usize,
}

/// Repeatedly sweep `items` in input order, moving every ready item into the
/// result and accepting its name immediately, so later items in the same
/// sweep can depend on it. Stops after the first sweep that moves nothing,
/// which bounds the sweeps by `items.len() + 1`.
fn relax<T, F>(items: Vec<T>, accepted: &mut AcceptedNames, is_ready: F) -> Relaxation<T>
where
    T: ContentItem,
    F: Fn(&AcceptedNames, &T) -> bool,
{
    let mut pending: Vec<Option<T>> = items.into_iter().map(Some).collect();
    let mut loaded = Vec::with_capacity(pending.len());
    let mut passes = 0;

    loop {
        passes += 1;
        let mut progressed = false;

        for slot in pending.iter_mut() {
            let ready = slot.as_ref().is_some_and(|item| is_ready(accepted, item));
            if !ready {
                continue;
            }
            if let Some(item) = slot.take() {
                accepted.insert(item.name());
                debug!(item = item.name(), pass = passes, "accepted");
                loaded.push(item);
                progressed = true;
            }
        }

        if !progressed {
            break;
        }
    }

    Relaxation {
        loaded,
        rejected: pending.into_iter().flatten().collect(),
        passes,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
