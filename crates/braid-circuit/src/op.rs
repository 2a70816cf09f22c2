//! The two kinds of circuit element.

use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::CircuitResult;
use crate::gate::CliffordGate;
use crate::measurement::Measurement;
use crate::target::{Applied, Target};

/// A circuit element: a Clifford gate or a measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Op {
    /// A Clifford unitary.
    Gate(CliffordGate),
    /// A Z-basis measurement.
    Measure(Measurement),
}

impl Op {
    /// The qubits this element touches.
    pub fn qubits(&self) -> &[usize] {
        match self {
            Op::Gate(g) => g.qubits(),
            Op::Measure(m) => m.qubits(),
        }
    }

    /// True for gates, false for measurements.
    pub fn is_unitary(&self) -> bool {
        matches!(self, Op::Gate(_))
    }

    /// True when the two elements act on disjoint qubits.
    pub fn independent_from(&self, other: &Op) -> bool {
        self.qubits().iter().all(|q| !other.qubits().contains(q))
    }

    /// Clear recorded state: a measurement's outcome, or the pinned
    /// sample of a random gate.
    pub fn reset(&mut self) {
        match self {
            Op::Gate(g) => g.reset(),
            Op::Measure(m) => m.clear_out(),
        }
    }

    /// Apply the element in circuit order.
    pub fn forward<T: Target + ?Sized>(
        &mut self,
        target: &mut T,
        rng: &mut dyn RngCore,
    ) -> CircuitResult<Applied> {
        match self {
            Op::Gate(g) => {
                g.forward(target, rng)?;
                Ok(Applied::unit())
            }
            Op::Measure(m) => m.forward(target, rng),
        }
    }

    /// Apply the element in reverse circuit order.
    pub fn backward<T: Target + ?Sized>(
        &mut self,
        target: &mut T,
        rng: &mut dyn RngCore,
    ) -> CircuitResult<Applied> {
        match self {
            Op::Gate(g) => {
                g.backward(target, rng)?;
                Ok(Applied::unit())
            }
            Op::Measure(m) => m.backward(target),
        }
    }
}

impl From<CliffordGate> for Op {
    fn from(g: CliffordGate) -> Self {
        Op::Gate(g)
    }
}

impl From<Measurement> for Op {
    fn from(m: Measurement) -> Self {
        Op::Measure(m)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Gate(g) => g.fmt(f),
            Op::Measure(m) => m.fmt(f),
        }
    }
}
