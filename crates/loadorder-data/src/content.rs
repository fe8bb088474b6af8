//! Content directory loading and activation.
//!
//! [`load_content`] reads the rosters of a content directory;
//! [`ContentSet::activate`] runs both resolution phases in order and hands
//! back the load order together with the resolver for later gate checks.

use loadorder_core::{
    DiagnosticSink, PrimaryRecord, Resolver, SecondaryRecord, TracingSink,
};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::info;

use crate::loader::{DataLoadError, check_names, deserialize_list, find_data_file, require_data_file};
use crate::schema::{GateData, RosterFile};

// ===========================================================================
// Loaded rosters
// ===========================================================================

/// The raw rosters of a content directory, in file order.
#[derive(Debug, Clone)]
pub struct ContentSet<P, S> {
    pub primary: Vec<PrimaryRecord<P>>,
    pub secondary: Vec<SecondaryRecord<S>>,
    pub gates: Vec<GateData>,
}

/// Read the rosters of `dir`.
///
/// `primary.{ron,toml,json}` must exist; `secondary` and `gates` are
/// optional. Names must be unique and non-empty within each file.
pub fn load_content<P, S>(dir: &Path) -> Result<ContentSet<P, S>, DataLoadError>
where
    P: DeserializeOwned + Default,
    S: DeserializeOwned + Default,
{
    let primary_path = require_data_file(dir, RosterFile::Primary.base_name())?;
    let primary: Vec<PrimaryRecord<P>> =
        deserialize_list(&primary_path, RosterFile::Primary.toml_key())?;
    check_names(primary.iter().map(|item| item.name.as_str()), &primary_path)?;

    let secondary: Vec<SecondaryRecord<S>> = match find_data_file(dir, RosterFile::Secondary.base_name())? {
        Some(path) => {
            let items: Vec<SecondaryRecord<S>> =
                deserialize_list(&path, RosterFile::Secondary.toml_key())?;
            check_names(items.iter().map(|item| item.name.as_str()), &path)?;
            items
        }
        None => Vec::new(),
    };

    let gates: Vec<GateData> = match find_data_file(dir, RosterFile::Gates.base_name())? {
        Some(path) => {
            let gates: Vec<GateData> = deserialize_list(&path, RosterFile::Gates.toml_key())?;
            check_names(gates.iter().map(|gate| gate.name.as_str()), &path)?;
            gates
        }
        None => Vec::new(),
    };

    info!(
        dir = %dir.display(),
        primary = primary.len(),
        secondary = secondary.len(),
        gates = gates.len(),
        "content loaded"
    );

    Ok(ContentSet {
        primary,
        secondary,
        gates,
    })
}

impl<P, S> ContentSet<P, S> {
    /// Resolve both rosters with a resolver that logs through `tracing`.
    pub fn activate(self) -> Result<LoadedContent<P, S>, DataLoadError> {
        self.activate_with(Resolver::new())
    }

    /// Resolve both rosters, primary first, with the given resolver.
    pub fn activate_with<K: DiagnosticSink>(
        self,
        mut resolver: Resolver<K>,
    ) -> Result<LoadedContent<P, S, K>, DataLoadError> {
        let primary = resolver.resolve_primary(self.primary);
        let secondary = resolver.resolve_secondary(self.secondary)?;

        Ok(LoadedContent {
            primary,
            secondary,
            gates: self.gates,
            resolver,
        })
    }
}

// ===========================================================================
// Activated content
// ===========================================================================

/// Rosters in load order, plus the resolver that produced them.
#[derive(Debug)]
pub struct LoadedContent<P, S, K = TracingSink> {
    pub primary: Vec<PrimaryRecord<P>>,
    pub secondary: Vec<SecondaryRecord<S>>,
    pub gates: Vec<GateData>,
    pub resolver: Resolver<K>,
}

impl<P, S, K> LoadedContent<P, S, K> {
    pub fn is_open(&self, gate: &GateData) -> bool {
        self.resolver.is_satisfied(&gate.requirements())
    }

    /// Gates whose prerequisites are all loaded, in file order.
    pub fn open_gates(&self) -> Vec<&GateData> {
        self.gates.iter().filter(|gate| self.is_open(gate)).collect()
    }

    /// Gates that stay locked, in file order.
    pub fn closed_gates(&self) -> Vec<&GateData> {
        self.gates.iter().filter(|gate| !self.is_open(gate)).collect()
    }
}
