//! The environment: symbols, derived-state bindings, and hypotheses.

use hashbrown::HashMap;

use crate::error::CoreError;
use crate::fact::{Fact, Justification};
use crate::profile::PotentialProfile;
use crate::prop::Prop;
use crate::symbol::{DensityId, PotentialId, StateId, SymbolTable};

/// The ambient context of a derivation.
///
/// Owns the symbol table, the bindings produced by the total operations
/// `ground_state(v)` and `density_of(ψ)` (memoized, so repeated calls
/// return the same symbol), and the hypotheses currently assumed.
///
/// Hypothesis admission is checked where the domain model has evidence:
/// a reflexive wavefunction distinctness is never admissible, and a
/// non-equivalence hypothesis about two potentials whose profiles provably
/// differ by a constant is refused. Density equalities are admitted
/// unchecked; they are genuine hypotheses, and showing them untenable is
/// the derivation engine's job.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    symbols: SymbolTable,
    ground_states: HashMap<PotentialId, StateId>,
    densities: HashMap<StateId, DensityId>,
    differences: HashMap<(PotentialId, PotentialId), PotentialId>,
    hypotheses: Vec<Fact>,
    scopes: Vec<usize>,
}

impl Environment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// The symbol table.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Declare a wavefunction symbol.
    pub fn declare_state(&mut self, name: impl Into<String>) -> Result<StateId, CoreError> {
        self.symbols.state(name)
    }

    /// Declare a density symbol.
    pub fn declare_density(&mut self, name: impl Into<String>) -> Result<DensityId, CoreError> {
        self.symbols.density(name)
    }

    /// Declare an opaque potential symbol.
    pub fn declare_potential(&mut self, name: impl Into<String>) -> Result<PotentialId, CoreError> {
        self.symbols.potential(name)
    }

    /// Declare a potential with a closed-form profile.
    pub fn declare_potential_with_profile(
        &mut self,
        name: impl Into<String>,
        profile: PotentialProfile,
    ) -> Result<PotentialId, CoreError> {
        self.symbols.potential_with_profile(name, profile)
    }

    /// The chosen energy minimizer for a potential. Total and memoized:
    /// the first call binds a fresh wavefunction symbol, later calls
    /// return it.
    pub fn ground_state(&mut self, v: PotentialId) -> StateId {
        if let Some(&psi) = self.ground_states.get(&v) {
            return psi;
        }
        let base = self
            .symbols
            .potential_name(v)
            .map(str::to_owned)
            .unwrap_or_else(|| v.to_string());
        let psi = self.symbols.intern_state(&format!("gs({base})"));
        self.ground_states.insert(v, psi);
        psi
    }

    /// The ground state of `v` if it has already been bound.
    pub fn ground_state_bound(&self, v: PotentialId) -> Option<StateId> {
        self.ground_states.get(&v).copied()
    }

    /// The density derived from a wavefunction. Total and memoized.
    pub fn density_of(&mut self, psi: StateId) -> DensityId {
        if let Some(&n) = self.densities.get(&psi) {
            return n;
        }
        let base = self
            .symbols
            .state_name(psi)
            .map(str::to_owned)
            .unwrap_or_else(|| psi.to_string());
        let n = self.symbols.intern_density(&format!("rho({base})"));
        self.densities.insert(psi, n);
        n
    }

    /// The density of `ψ` if it has already been bound.
    pub fn density_bound(&self, psi: StateId) -> Option<DensityId> {
        self.densities.get(&psi).copied()
    }

    /// The pointwise-difference potential `v1 - v2`. Memoized; when both
    /// operands carry profiles the difference carries theirs.
    pub fn difference_potential(&mut self, v1: PotentialId, v2: PotentialId) -> PotentialId {
        if let Some(&d) = self.differences.get(&(v1, v2)) {
            return d;
        }
        let name = {
            let a = self
                .symbols
                .potential_name(v1)
                .map(str::to_owned)
                .unwrap_or_else(|| v1.to_string());
            let b = self
                .symbols
                .potential_name(v2)
                .map(str::to_owned)
                .unwrap_or_else(|| v2.to_string());
            format!("diff({a},{b})")
        };
        let d = self.symbols.intern_potential(&name);
        if let (Some(p1), Some(p2)) = (self.symbols.profile(v1), self.symbols.profile(v2)) {
            let diff = p1.difference(p2);
            self.symbols.set_profile(d, diff);
        }
        self.differences.insert((v1, v2), d);
        d
    }

    /// The closed-form profile of a potential, if any.
    pub fn profile(&self, v: PotentialId) -> Option<&PotentialProfile> {
        self.symbols.profile(v)
    }

    /// Assume a proposition as a hypothesis.
    ///
    /// Refuses assumptions the domain model can already rule out:
    /// - `StateNe(ψ, ψ)` is never admissible;
    /// - `NotShiftEquivalent(v1, v2)` is refused when `v1 = v2` or when
    ///   both profiles witness constant-shift equivalence.
    pub fn assume(&mut self, prop: Prop) -> Result<Fact, CoreError> {
        match &prop {
            Prop::StateNe(a, b) if a == b => {
                return Err(CoreError::ReflexiveDistinctness(*a));
            }
            Prop::NotShiftEquivalent(v1, v2) => {
                if v1 == v2 {
                    return Err(CoreError::ProfilesShiftEquivalent { v1: *v1, v2: *v2 });
                }
                if let (Some(p1), Some(p2)) =
                    (self.symbols.profile(*v1), self.symbols.profile(*v2))
                {
                    if p1.shift_equivalent(p2) {
                        return Err(CoreError::ProfilesShiftEquivalent { v1: *v1, v2: *v2 });
                    }
                }
            }
            _ => {}
        }
        let fact = Fact::new(prop, Justification::Hypothesis);
        self.hypotheses.push(fact.clone());
        Ok(fact)
    }

    /// All hypotheses currently in scope.
    pub fn hypotheses(&self) -> &[Fact] {
        &self.hypotheses
    }

    /// Whether a proposition is among the current hypotheses.
    pub fn has_hypothesis(&self, prop: &Prop) -> bool {
        self.hypotheses.iter().any(|f| &f.prop == prop)
    }

    /// Open a hypothesis scope.
    pub fn push_scope(&mut self) {
        self.scopes.push(self.hypotheses.len());
    }

    /// Close the innermost scope, discarding hypotheses assumed inside it.
    pub fn pop_scope(&mut self) {
        if let Some(mark) = self.scopes.pop() {
            self.hypotheses.truncate(mark);
        }
    }
}
