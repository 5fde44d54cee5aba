//! Opaque domain symbols and the symbol table.
//!
//! Wavefunctions, densities, and potentials are identities with decidable
//! equality and no other structure. The table interns names per kind and
//! records optional closed-form profiles for synthetic potentials.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;
use crate::profile::PotentialProfile;

/// A wavefunction symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId(pub u32);

/// A density symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DensityId(pub u32);

/// A potential symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PotentialId(pub u32);

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "psi{}", self.0)
    }
}

impl fmt::Display for DensityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl fmt::Display for PotentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Interning table for domain symbols.
///
/// Names are unique per kind. Potentials may carry a [`PotentialProfile`]:
/// an exact closed form used to decide constant-shift equivalence for
/// synthetic potentials. Opaque potentials have no profile and rely on
/// hypotheses instead.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    states: Vec<String>,
    densities: Vec<String>,
    potentials: Vec<String>,
    profiles: HashMap<PotentialId, PotentialProfile>,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a new wavefunction symbol. Rejects duplicate names.
    pub fn state(&mut self, name: impl Into<String>) -> Result<StateId, CoreError> {
        let name = name.into();
        if self.states.iter().any(|n| n == &name) {
            return Err(CoreError::DuplicateSymbol(name));
        }
        self.states.push(name);
        Ok(StateId(self.states.len() as u32 - 1))
    }

    /// Declare a new density symbol. Rejects duplicate names.
    pub fn density(&mut self, name: impl Into<String>) -> Result<DensityId, CoreError> {
        let name = name.into();
        if self.densities.iter().any(|n| n == &name) {
            return Err(CoreError::DuplicateSymbol(name));
        }
        self.densities.push(name);
        Ok(DensityId(self.densities.len() as u32 - 1))
    }

    /// Declare a new opaque potential symbol. Rejects duplicate names.
    pub fn potential(&mut self, name: impl Into<String>) -> Result<PotentialId, CoreError> {
        let name = name.into();
        if self.potentials.iter().any(|n| n == &name) {
            return Err(CoreError::DuplicateSymbol(name));
        }
        self.potentials.push(name);
        Ok(PotentialId(self.potentials.len() as u32 - 1))
    }

    /// Declare a potential with a closed-form profile.
    pub fn potential_with_profile(
        &mut self,
        name: impl Into<String>,
        profile: PotentialProfile,
    ) -> Result<PotentialId, CoreError> {
        let id = self.potential(name)?;
        self.profiles.insert(id, profile);
        Ok(id)
    }

    /// Get or create a wavefunction symbol by name. Used for derived
    /// symbols (ground states) whose names are generated, not declared.
    pub(crate) fn intern_state(&mut self, name: &str) -> StateId {
        if let Some(idx) = self.states.iter().position(|n| n == name) {
            return StateId(idx as u32);
        }
        self.states.push(name.to_string());
        StateId(self.states.len() as u32 - 1)
    }

    /// Get or create a density symbol by name.
    pub(crate) fn intern_density(&mut self, name: &str) -> DensityId {
        if let Some(idx) = self.densities.iter().position(|n| n == name) {
            return DensityId(idx as u32);
        }
        self.densities.push(name.to_string());
        DensityId(self.densities.len() as u32 - 1)
    }

    /// Get or create a potential symbol by name.
    pub(crate) fn intern_potential(&mut self, name: &str) -> PotentialId {
        if let Some(idx) = self.potentials.iter().position(|n| n == name) {
            return PotentialId(idx as u32);
        }
        self.potentials.push(name.to_string());
        PotentialId(self.potentials.len() as u32 - 1)
    }

    pub(crate) fn set_profile(&mut self, id: PotentialId, profile: PotentialProfile) {
        self.profiles.insert(id, profile);
    }

    /// The display name of a wavefunction symbol.
    pub fn state_name(&self, id: StateId) -> Option<&str> {
        self.states.get(id.0 as usize).map(String::as_str)
    }

    /// The display name of a density symbol.
    pub fn density_name(&self, id: DensityId) -> Option<&str> {
        self.densities.get(id.0 as usize).map(String::as_str)
    }

    /// The display name of a potential symbol.
    pub fn potential_name(&self, id: PotentialId) -> Option<&str> {
        self.potentials.get(id.0 as usize).map(String::as_str)
    }

    /// The closed-form profile of a potential, if it has one.
    pub fn profile(&self, id: PotentialId) -> Option<&PotentialProfile> {
        self.profiles.get(&id)
    }
}
