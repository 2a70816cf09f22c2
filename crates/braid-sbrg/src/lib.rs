//! `braid-sbrg` — spectrum bifurcation renormalization group.
//!
//! Approximately diagonalizes a Pauli-sum Hamiltonian with a Clifford
//! circuit: qubit by qubit, the strongest term is rotated onto a `Z`
//! axis, off-diagonal terms are folded back at second order, and the
//! frozen terms accumulate into an effective Hamiltonian of commuting
//! `Z`-products (the emergent conserved quantities of strongly
//! disordered spin chains).
//!
//! # Quick start
//!
//! ```rust
//! use braid_pauli::{Pauli, PauliPolynomial};
//! use braid_sbrg::Sbrg;
//!
//! // Transverse-field Ising chain on 3 sites.
//! let h = PauliPolynomial::from_terms(3, [
//!     (Pauli::parse("ZZI").unwrap(), -1.0),
//!     (Pauli::parse("IZZ").unwrap(), -1.0),
//!     (Pauli::parse("XII").unwrap(), -0.3),
//!     (Pauli::parse("IXI").unwrap(), -0.3),
//!     (Pauli::parse("IIX").unwrap(), -0.3),
//! ]);
//! let out = Sbrg::new(h).run().unwrap();
//! // every effective term is a Z-product
//! assert!(out.effective.terms().iter().all(|t| (0..3).all(|i| !t.pauli.x(i))));
//! ```

pub mod diagonalize;
pub mod error;
pub mod sbrg;

pub use diagonalize::{diagonalize_pauli, diagonalize_state};
pub use error::{SbrgError, SbrgResult};
pub use sbrg::{Sbrg, SbrgOutput};
