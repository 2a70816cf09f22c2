//! Qubit-subset masks.
//!
//! A [`QubitMask`] translates the local qubit labels of a small operator
//! (a gate's qubit tuple) into positions of a larger register.  It is an
//! *ordered* index list rather than a boolean mask, so local qubit 0 always
//! maps to the first listed global qubit — a two-qubit gate table never
//! needs transposing when its qubit pair is given in descending order.

use serde::{Deserialize, Serialize};

use crate::error::{PauliError, PauliResult};

/// An ordered subset of a larger qubit register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QubitMask {
    qubits: Vec<usize>,
    total: usize,
}

impl QubitMask {
    /// Build a mask sending local qubit `i` to global qubit `qubits[i]`
    /// of a `total`-qubit register.
    ///
    /// Fails if an index is out of range or repeated.
    pub fn new(qubits: &[usize], total: usize) -> PauliResult<Self> {
        for (i, &q) in qubits.iter().enumerate() {
            if q >= total {
                return Err(PauliError::QubitOutOfRange {
                    qubit: q,
                    n_qubits: total,
                });
            }
            if qubits[..i].contains(&q) {
                return Err(PauliError::DuplicateQubit { qubit: q });
            }
        }
        Ok(Self {
            qubits: qubits.to_vec(),
            total,
        })
    }

    /// Number of qubits in the subset.
    pub fn len(&self) -> usize {
        self.qubits.len()
    }

    /// True if the subset is empty.
    pub fn is_empty(&self) -> bool {
        self.qubits.is_empty()
    }

    /// Size of the full register.
    pub fn total(&self) -> usize {
        self.total
    }

    /// The global qubit indices, in local order.
    pub fn qubits(&self) -> &[usize] {
        &self.qubits
    }
}
