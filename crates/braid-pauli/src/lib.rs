//! `braid-pauli` — symplectic Pauli algebra for Clifford simulation.
//!
//! Paulis are held in the binary symplectic representation: a bit pair
//! `(x_i, z_i)` per qubit plus a power of `i`, so that multiplication,
//! commutation checks, and Clifford conjugation are all bit arithmetic.
//! On top of that sit:
//!
//! - [`Pauli`] — a signed Pauli string
//! - [`PauliPolynomial`] — real-weighted sums of Paulis (Hamiltonians)
//! - [`CliffordMap`] — a Clifford unitary as its action on `X_i`/`Z_i`
//! - [`StabilizerState`] — a pure stabilizer state with destabilizers,
//!   supporting sampled and postselected measurement
//!
//! # Quick start
//!
//! ```rust
//! use braid_pauli::{CliffordMap, Pauli, StabilizerState};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! // Conjugate X by the phase-gate map: X ↦ Y.
//! let s = CliffordMap::from_images(vec![
//!     Pauli::parse("Y").unwrap(),
//!     Pauli::parse("Z").unwrap(),
//! ]);
//! assert_eq!(s.transform(&Pauli::parse("X").unwrap()), Pauli::parse("Y").unwrap());
//!
//! // Measure Z on |0⟩: deterministic outcome 0.
//! let mut state = StabilizerState::zero_state(1);
//! let mut rng = StdRng::seed_from_u64(7);
//! let (outcomes, log2prob) = state.measure(&[Pauli::parse("Z").unwrap()], &mut rng);
//! assert_eq!((outcomes, log2prob), (vec![0], 0.0));
//! ```

pub mod diag;
pub mod error;
pub mod map;
pub mod mask;
pub mod pauli;
pub mod polynomial;
pub mod tableau;

pub use diag::diagonalizing_rotations;
pub use error::{PauliError, PauliResult};
pub use map::CliffordMap;
pub use mask::QubitMask;
pub use pauli::{Pauli, PauliOp};
pub use polynomial::{PauliPolynomial, PauliTerm};
pub use tableau::StabilizerState;
