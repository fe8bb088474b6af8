//! On-disk layout of a content directory.
//!
//! Rosters use the record types from `loadorder-core` directly. This module
//! adds the gate format and the file naming conventions.

use loadorder_core::dependency::deserialize_present;
use loadorder_core::{Dependencies, Requirements};
use serde::Deserialize;

// ===========================================================================
// Files
// ===========================================================================

/// The data files a content directory may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterFile {
    /// Primary roster. Required.
    Primary,
    /// Secondary roster. Optional; an absent file is an empty roster.
    Secondary,
    /// Downstream gates. Optional.
    Gates,
}

impl RosterFile {
    /// File name without extension.
    pub fn base_name(self) -> &'static str {
        match self {
            RosterFile::Primary => "primary",
            RosterFile::Secondary => "secondary",
            RosterFile::Gates => "gates",
        }
    }

    /// Key of the array-of-tables holding the entries in TOML files.
    pub fn toml_key(self) -> &'static str {
        self.base_name()
    }
}

// ===========================================================================
// Gates
// ===========================================================================

/// A downstream entity (for example a stage select entry) that unlocks once
/// its prerequisites have been loaded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GateData {
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub primary_dependencies: Option<Dependencies>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub secondary_dependencies: Option<Dependencies>,
}

impl GateData {
    /// The requirements to check against a resolver.
    pub fn requirements(&self) -> Requirements {
        Requirements {
            primary_dependencies: self.primary_dependencies.clone(),
            secondary_dependencies: self.secondary_dependencies.clone(),
        }
    }
}
