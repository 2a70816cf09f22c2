//! The surfaces a circuit can act on.
//!
//! Gates and measurements are applied through the [`Target`] trait, so the
//! same circuit drives a stabilizer state forward, conjugates a single
//! Pauli or a whole Hamiltonian, or runs backward over any of them.
//! Operator targets reject measurement instead of faking it.

use rand::RngCore;

use braid_pauli::{CliffordMap, Pauli, PauliPolynomial, QubitMask, StabilizerState};

use crate::error::{CircuitError, CircuitResult};

/// Outcome summary of running a circuit over a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Applied {
    /// Total log₂ probability of the measurement record produced or
    /// postselected along the way.
    pub log2prob: f64,
    /// False when a backward pass postselected an impossible outcome.
    pub consistent: bool,
}

impl Applied {
    /// The neutral record: no measurements, probability 1.
    pub fn unit() -> Self {
        Self {
            log2prob: 0.0,
            consistent: true,
        }
    }

    /// Fold in the record of a later operation.
    pub fn absorb(&mut self, other: Applied) {
        self.log2prob += other.log2prob;
        self.consistent &= other.consistent;
    }
}

impl Default for Applied {
    fn default() -> Self {
        Self::unit()
    }
}

/// Anything a circuit can be applied to.
///
/// `mask` scopes an operation that is written on a gate's local qubits to
/// the matching positions of the full register; `None` means the operation
/// is already register-sized.
pub trait Target {
    /// Register size of the target.
    fn num_qubits(&self) -> usize;

    /// Conjugate by the π/4 rotation `exp(i·π/4·g)`.
    fn rotate_by(&mut self, g: &Pauli, mask: Option<&QubitMask>);

    /// Conjugate by a Clifford map.
    fn transform_by(&mut self, map: &CliffordMap, mask: Option<&QubitMask>);

    /// Measure a sequence of Hermitian observables, sampling outcomes.
    ///
    /// Targets without measurement semantics return
    /// [`CircuitError::UnsupportedTarget`].
    fn measure(
        &mut self,
        observables: &[Pauli],
        rng: &mut dyn RngCore,
    ) -> CircuitResult<(Vec<u8>, f64)> {
        let _ = (observables, rng);
        Err(CircuitError::UnsupportedTarget { op: "measurement" })
    }

    /// Project onto fixed outcomes of a sequence of Hermitian observables.
    fn postselect(&mut self, observables: &[Pauli], outcomes: &[u8]) -> CircuitResult<f64> {
        let _ = (observables, outcomes);
        Err(CircuitError::UnsupportedTarget { op: "postselection" })
    }
}

impl Target for Pauli {
    fn num_qubits(&self) -> usize {
        Pauli::num_qubits(self)
    }

    fn rotate_by(&mut self, g: &Pauli, mask: Option<&QubitMask>) {
        match mask {
            Some(m) => self.apply_rotation(&g.embedded(Pauli::num_qubits(self), m)),
            None => self.apply_rotation(g),
        }
    }

    fn transform_by(&mut self, map: &CliffordMap, mask: Option<&QubitMask>) {
        *self = match mask {
            Some(m) => map.embedded(Pauli::num_qubits(self), m).transform(self),
            None => map.transform(self),
        };
    }
}

impl Target for PauliPolynomial {
    fn num_qubits(&self) -> usize {
        PauliPolynomial::num_qubits(self)
    }

    fn rotate_by(&mut self, g: &Pauli, mask: Option<&QubitMask>) {
        let g = match mask {
            Some(m) => g.embedded(PauliPolynomial::num_qubits(self), m),
            None => g.clone(),
        };
        self.map_terms(|p| p.apply_rotation(&g));
    }

    fn transform_by(&mut self, map: &CliffordMap, mask: Option<&QubitMask>) {
        let full;
        let map = match mask {
            Some(m) => {
                full = map.embedded(PauliPolynomial::num_qubits(self), m);
                &full
            }
            None => map,
        };
        self.map_terms(|p| *p = map.transform(p));
    }
}

impl Target for StabilizerState {
    fn num_qubits(&self) -> usize {
        StabilizerState::num_qubits(self)
    }

    fn rotate_by(&mut self, g: &Pauli, mask: Option<&QubitMask>) {
        match mask {
            Some(m) => {
                StabilizerState::rotate_by(self, &g.embedded(StabilizerState::num_qubits(self), m))
            }
            None => StabilizerState::rotate_by(self, g),
        }
    }

    fn transform_by(&mut self, map: &CliffordMap, mask: Option<&QubitMask>) {
        let full;
        let map = match mask {
            Some(m) => {
                full = map.embedded(StabilizerState::num_qubits(self), m);
                &full
            }
            None => map,
        };
        StabilizerState::transform_by(self, map);
    }

    fn measure(
        &mut self,
        observables: &[Pauli],
        rng: &mut dyn RngCore,
    ) -> CircuitResult<(Vec<u8>, f64)> {
        Ok(StabilizerState::measure(self, observables, rng))
    }

    fn postselect(&mut self, observables: &[Pauli], outcomes: &[u8]) -> CircuitResult<f64> {
        Ok(StabilizerState::postselect(self, observables, outcomes))
    }
}
