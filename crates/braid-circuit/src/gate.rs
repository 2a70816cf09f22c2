//! Clifford gates on a tuple of qubits.
//!
//! A gate is one of three things, decided by what has been set on it:
//! a π/4 rotation (a generator), an explicit Clifford map (forward,
//! backward, or both), or — with nothing set — a *random* gate.  A random
//! gate samples a uniform Clifford the first time it is applied and pins
//! the sample, so running the circuit backward undoes exactly the unitary
//! the forward pass drew.

use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use braid_pauli::{CliffordMap, Pauli, QubitMask};

use crate::error::{CircuitError, CircuitResult};
use crate::target::Target;

/// A Clifford unitary acting on an ordered tuple of qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliffordGate {
    qubits: Vec<usize>,
    generator: Option<Pauli>,
    forward_map: Option<CliffordMap>,
    backward_map: Option<CliffordMap>,
    // true for gates created without a generator or map, even after a
    // sample has been pinned; reset() uses it to tell a pinned sample
    // from an explicitly set map
    random: bool,
}

impl CliffordGate {
    /// A gate on the given qubits with nothing set yet (a random gate).
    pub fn new(qubits: &[usize]) -> Self {
        Self {
            qubits: qubits.to_vec(),
            generator: None,
            forward_map: None,
            backward_map: None,
            random: true,
        }
    }

    /// Gate with a known forward map; sizes are the caller's contract.
    pub(crate) fn from_map(qubits: &[usize], map: CliffordMap) -> Self {
        debug_assert_eq!(map.num_qubits(), qubits.len());
        Self {
            qubits: qubits.to_vec(),
            generator: None,
            forward_map: Some(map),
            backward_map: None,
            random: false,
        }
    }

    /// The qubits this gate acts on, in local order.
    pub fn qubits(&self) -> &[usize] {
        &self.qubits
    }

    /// Number of qubits the gate acts on.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// The rotation generator, if this gate is a π/4 rotation.
    pub fn generator(&self) -> Option<&Pauli> {
        self.generator.as_ref()
    }

    /// True while the gate has neither a generator nor a map.
    pub fn is_random(&self) -> bool {
        self.generator.is_none() && self.forward_map.is_none() && self.backward_map.is_none()
    }

    /// Forget the pinned sample of a random gate, so the next application
    /// draws a fresh Clifford.  Gates with an explicit generator or map
    /// are left unchanged.
    pub fn reset(&mut self) {
        if self.random {
            self.forward_map = None;
            self.backward_map = None;
        }
    }

    /// Turn this gate into the rotation `exp(i·π/4·g)` on its qubits.
    ///
    /// `g` is written on the gate's local qubits.
    pub fn set_generator(&mut self, g: Pauli) -> CircuitResult<()> {
        if g.num_qubits() != self.qubits.len() {
            return Err(CircuitError::GeneratorSizeMismatch {
                expected: self.qubits.len(),
                got: g.num_qubits(),
            });
        }
        self.generator = Some(g);
        self.forward_map = None;
        self.backward_map = None;
        self.random = false;
        Ok(())
    }

    /// Fix the forward Clifford map; the backward map becomes its inverse.
    pub fn set_forward_map(&mut self, map: CliffordMap) -> CircuitResult<()> {
        if map.num_qubits() != self.qubits.len() {
            return Err(CircuitError::MapSizeMismatch {
                expected: self.qubits.len(),
                got: map.num_qubits(),
            });
        }
        self.generator = None;
        self.forward_map = Some(map);
        self.backward_map = None;
        self.random = false;
        Ok(())
    }

    /// Fix the backward Clifford map; the forward map becomes its inverse.
    pub fn set_backward_map(&mut self, map: CliffordMap) -> CircuitResult<()> {
        if map.num_qubits() != self.qubits.len() {
            return Err(CircuitError::MapSizeMismatch {
                expected: self.qubits.len(),
                got: map.num_qubits(),
            });
        }
        self.generator = None;
        self.forward_map = None;
        self.backward_map = Some(map);
        self.random = false;
        Ok(())
    }

    /// Apply the gate to a target.
    pub fn forward<T: Target + ?Sized>(
        &mut self,
        target: &mut T,
        rng: &mut dyn RngCore,
    ) -> CircuitResult<()> {
        let mask = QubitMask::new(&self.qubits, target.num_qubits())?;
        if let Some(g) = &self.generator {
            target.rotate_by(g, Some(&mask));
            return Ok(());
        }
        if self.forward_map.is_none() {
            let map = match &self.backward_map {
                Some(b) => b.inverse(),
                None => {
                    tracing::debug!(qubits = ?self.qubits, "sampling random Clifford for unset gate");
                    CliffordMap::random(self.qubits.len(), rng)
                }
            };
            self.forward_map = Some(map);
        }
        if let Some(map) = &self.forward_map {
            target.transform_by(map, Some(&mask));
        }
        Ok(())
    }

    /// Apply the inverse of the gate to a target.
    ///
    /// A still-unset random gate samples here too, and the sample is
    /// pinned for any later pass in either direction.
    pub fn backward<T: Target + ?Sized>(
        &mut self,
        target: &mut T,
        rng: &mut dyn RngCore,
    ) -> CircuitResult<()> {
        let mask = QubitMask::new(&self.qubits, target.num_qubits())?;
        if let Some(g) = &self.generator {
            target.rotate_by(&-g.clone(), Some(&mask));
            return Ok(());
        }
        if self.backward_map.is_none() {
            let map = match &self.forward_map {
                Some(f) => f.inverse(),
                None => {
                    tracing::debug!(qubits = ?self.qubits, "sampling random Clifford for unset gate");
                    CliffordMap::random(self.qubits.len(), rng)
                }
            };
            self.backward_map = Some(map);
        }
        if let Some(map) = &self.backward_map {
            target.transform_by(map, Some(&mask));
        }
        Ok(())
    }

    /// Materialize both Clifford maps of this gate.
    ///
    /// A random gate that has never been applied has no fixed unitary and
    /// cannot compile.
    pub fn compile(&mut self) -> CircuitResult<(&CliffordMap, &CliffordMap)> {
        if self.forward_map.is_none() && self.backward_map.is_none() {
            match &self.generator {
                Some(g) => self.forward_map = Some(CliffordMap::rotation(g)),
                None => {
                    return Err(CircuitError::UncompilableRandomGate {
                        qubits: self.qubits.clone(),
                    });
                }
            }
        }
        if self.forward_map.is_none() {
            self.forward_map = self.backward_map.as_ref().map(CliffordMap::inverse);
        }
        if self.backward_map.is_none() {
            self.backward_map = self.forward_map.as_ref().map(CliffordMap::inverse);
        }
        match (&self.forward_map, &self.backward_map) {
            (Some(f), Some(b)) => Ok((f, b)),
            _ => unreachable!("both maps were just filled in"),
        }
    }
}

impl fmt::Display for CliffordGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, q) in self.qubits.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{q}")?;
        }
        write!(f, "]")
    }
}
