//! Computational-basis measurements inside a circuit.
//!
//! A measurement records the outcome bits its forward pass sampled.  The
//! backward pass replays the record as a postselection, so a forward run
//! followed by a backward run over the inverse circuit reconstructs the
//! pre-measurement state.  Backward before any forward is an error: there
//! is nothing to postselect on.

use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use braid_pauli::{Pauli, QubitMask};

use crate::error::{CircuitError, CircuitResult};
use crate::target::{Applied, Target};

/// A Z-basis measurement of an ordered tuple of qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    qubits: Vec<usize>,
    outcome: Option<Vec<u8>>,
}

impl Measurement {
    /// A measurement of the given qubits with no outcome recorded yet.
    pub fn new(qubits: &[usize]) -> Self {
        Self {
            qubits: qubits.to_vec(),
            outcome: None,
        }
    }

    /// The measured qubits, in readout order.
    pub fn qubits(&self) -> &[usize] {
        &self.qubits
    }

    /// Number of outcome bits this measurement produces.
    pub fn n_out(&self) -> usize {
        self.qubits.len()
    }

    /// The recorded outcome bits, if a forward pass has run.
    pub fn out(&self) -> Option<&[u8]> {
        self.outcome.as_deref()
    }

    /// Overwrite the outcome record (one bit per measured qubit).
    pub fn set_out(&mut self, outcome: Vec<u8>) -> CircuitResult<()> {
        if outcome.len() != self.qubits.len() {
            return Err(CircuitError::OutcomeLengthMismatch {
                expected: self.qubits.len(),
                got: outcome.len(),
            });
        }
        self.outcome = Some(outcome);
        Ok(())
    }

    /// Drop the recorded outcome.
    pub fn clear_out(&mut self) {
        self.outcome = None;
    }

    fn observables(&self, n: usize) -> CircuitResult<Vec<Pauli>> {
        // mask construction validates range and uniqueness
        let mask = QubitMask::new(&self.qubits, n)?;
        Ok(mask.qubits().iter().map(|&q| Pauli::z_at(q, n)).collect())
    }

    /// Measure the qubits, sampling and recording fresh outcomes.
    pub fn forward<T: Target + ?Sized>(
        &mut self,
        target: &mut T,
        rng: &mut dyn RngCore,
    ) -> CircuitResult<Applied> {
        let obs = self.observables(target.num_qubits())?;
        let (bits, log2prob) = target.measure(&obs, rng)?;
        self.outcome = Some(bits);
        Ok(Applied {
            log2prob,
            consistent: true,
        })
    }

    /// Postselect the recorded outcomes on the target.
    ///
    /// An impossible record is reported through [`Applied::consistent`]
    /// rather than an error; the target is left in an unspecified state in
    /// that case.
    pub fn backward<T: Target + ?Sized>(&mut self, target: &mut T) -> CircuitResult<Applied> {
        let obs = self.observables(target.num_qubits())?;
        let Some(outcome) = &self.outcome else {
            return Err(CircuitError::OutcomeNotSampled {
                qubits: self.qubits.clone(),
            });
        };
        let log2prob = target.postselect(&obs, outcome)?;
        if log2prob == f64::NEG_INFINITY {
            tracing::warn!(
                qubits = ?self.qubits,
                ?outcome,
                "postselected outcome is impossible for this state"
            );
            return Ok(Applied {
                log2prob,
                consistent: false,
            });
        }
        Ok(Applied {
            log2prob,
            consistent: true,
        })
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<")?;
        for (i, q) in self.qubits.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{q}")?;
        }
        write!(f, ">")
    }
}
