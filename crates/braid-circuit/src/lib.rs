//! `braid-circuit` — layered Clifford circuits over pluggable targets.
//!
//! A [`Circuit`] is a sequence of [`Layer`]s of qubit-disjoint elements:
//! Clifford gates (π/4 rotations, explicit maps, or pinned random
//! unitaries) and Z-basis measurements.  Circuits run forward or backward
//! over anything implementing [`Target`] — a stabilizer state, a single
//! Pauli, or a whole Hamiltonian — and purely unitary circuits compile to
//! a single cached Clifford map per direction.
//!
//! # Quick start
//!
//! ```rust
//! use braid_circuit::{Circuit, gates};
//! use braid_pauli::StabilizerState;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! // Prepare a Bell pair and read it out.
//! let mut circ = Circuit::new();
//! circ.append(gates::h(0));
//! circ.append(gates::cnot(0, 1));
//! circ.measure(&[0, 1]);
//!
//! let mut state = StabilizerState::zero_state(2);
//! let mut rng = StdRng::seed_from_u64(1);
//! let applied = circ.forward(&mut state, &mut rng).unwrap();
//! assert_eq!(applied.log2prob, -1.0);
//! let out = circ.out().unwrap();
//! assert_eq!(out[0], out[1]);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod gates;
pub mod layer;
pub mod measurement;
pub mod op;
pub mod target;

pub use circuit::{Circuit, Fragment};
pub use error::{CircuitError, CircuitResult};
pub use gate::CliffordGate;
pub use layer::Layer;
pub use measurement::Measurement;
pub use op::Op;
pub use target::{Applied, Target};
