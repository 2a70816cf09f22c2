//! Error types for the Pauli algebra crate.

use thiserror::Error;

/// Errors that can occur in Pauli algebra operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PauliError {
    /// A qubit index exceeds the register size.
    #[error("qubit {qubit} is out of range for a {n_qubits}-qubit register")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: usize,
        /// Number of qubits in the register.
        n_qubits: usize,
    },

    /// The same qubit appears twice in an index tuple.
    #[error("duplicate qubit {qubit} in index tuple")]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: usize,
    },

    /// A Pauli string contains a character other than I, X, Y, Z.
    #[error("invalid Pauli character '{0}' (expected I, X, Y or Z)")]
    InvalidCharacter(char),
}

/// Result type for Pauli algebra operations.
pub type PauliResult<T> = Result<T, PauliError>;
