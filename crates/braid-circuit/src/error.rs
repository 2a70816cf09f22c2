//! Error types for circuit construction and execution.

use thiserror::Error;

use braid_pauli::PauliError;

/// Errors raised while building, compiling, or applying circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CircuitError {
    /// The target type does not support this operation.
    #[error("target does not support {op}")]
    UnsupportedTarget {
        /// Name of the unsupported operation.
        op: &'static str,
    },

    /// A measurement outcome was requested before any forward pass sampled one.
    #[error("no outcome recorded for measurement on qubits {qubits:?}")]
    OutcomeNotSampled {
        /// Qubits of the measurement in question.
        qubits: Vec<usize>,
    },

    /// A supplied outcome record has the wrong length.
    #[error("outcome record has {got} bits, expected {expected}")]
    OutcomeLengthMismatch {
        /// Bits the circuit's measurements require.
        expected: usize,
        /// Bits actually supplied.
        got: usize,
    },

    /// A random gate cannot be compiled to a fixed map.
    #[error("random gate on qubits {qubits:?} has no fixed Clifford map")]
    UncompilableRandomGate {
        /// Qubits of the gate in question.
        qubits: Vec<usize>,
    },

    /// Compilation was requested for a layer containing measurements.
    #[error("layer contains measurements and has no unitary map")]
    NonUnitaryLayer,

    /// A rotation generator does not match the gate's qubit count.
    #[error("generator acts on {got} qubits, gate has {expected}")]
    GeneratorSizeMismatch {
        /// Qubit count of the gate.
        expected: usize,
        /// Qubit count of the generator.
        got: usize,
    },

    /// A Clifford map does not match the gate's qubit count.
    #[error("map acts on {got} qubits, gate has {expected}")]
    MapSizeMismatch {
        /// Qubit count of the gate.
        expected: usize,
        /// Qubit count of the map.
        got: usize,
    },

    /// A single-qubit Clifford index outside `0..24`.
    #[error("invalid single-qubit Clifford index {0} (valid range 0..24)")]
    InvalidCliffordIndex(usize),

    /// An error from the underlying Pauli algebra.
    #[error(transparent)]
    Pauli(#[from] PauliError),
}

/// Convenience alias used throughout the crate.
pub type CircuitResult<T> = Result<T, CircuitError>;
