//! Spectrum bifurcation renormalization group.
//!
//! SBRG approximately diagonalizes a Pauli-sum Hamiltonian one qubit at a
//! time.  At pivot `i0` the strongest remaining term is rotated onto
//! `Z_{i0}` by at most two causal π/4 rotations, terms anticommuting with
//! the new axis are folded back at second order of perturbation theory
//! (Schrieffer-Wolff), and everything now supported entirely at or before
//! the pivot is frozen into the effective Hamiltonian.  After `N` pivots
//! the effective Hamiltonian commutes with every `Z_{i0}` and the
//! accumulated circuit is the approximate diagonalizing Clifford.

use braid_circuit::Circuit;
use braid_pauli::{PauliPolynomial, PauliTerm};

use crate::diagonalize::diagonalize_pauli;
use crate::error::{SbrgError, SbrgResult};

/// Output of a renormalization run.
#[derive(Debug, Clone)]
pub struct SbrgOutput {
    /// The effective Hamiltonian: every term is a product of `Z`s in the
    /// rotated frame.
    pub effective: PauliPolynomial,
    /// The accumulated diagonalizing circuit (forward maps the input
    /// frame to the effective frame).
    pub circuit: Circuit,
}

/// Configured SBRG driver.
#[derive(Debug, Clone)]
pub struct Sbrg {
    hamiltonian: PauliPolynomial,
    max_rate: f64,
    tol: f64,
}

impl Sbrg {
    /// Driver for the given Hamiltonian with default truncation settings
    /// (`max_rate = 2.0`, `tol = 1e-8`).
    pub fn new(hamiltonian: PauliPolynomial) -> Self {
        Self {
            hamiltonian,
            max_rate: 2.0,
            tol: 1e-8,
        }
    }

    /// Cap the second-order correction at `max_rate` new terms per
    /// off-diagonal term folded in.
    pub fn with_max_rate(mut self, max_rate: f64) -> SbrgResult<Self> {
        if !(max_rate.is_finite() && max_rate > 0.0) {
            return Err(SbrgError::InvalidMaxRate(max_rate));
        }
        self.max_rate = max_rate;
        Ok(self)
    }

    /// Drop terms whose |coefficient| falls to `tol` or below.
    pub fn with_tol(mut self, tol: f64) -> SbrgResult<Self> {
        if !(tol.is_finite() && tol >= 0.0) {
            return Err(SbrgError::InvalidTol(tol));
        }
        self.tol = tol;
        Ok(self)
    }

    /// Run the renormalization to completion.
    pub fn run(&self) -> SbrgResult<SbrgOutput> {
        let n = self.hamiltonian.num_qubits();
        let mut rng = rand::thread_rng();
        let mut htmp = self.hamiltonian.clone();
        htmp.reduce(self.tol);
        let mut heff = PauliPolynomial::new(n);
        let mut circuit = Circuit::new();

        for i0 in 0..n {
            if htmp.is_empty() {
                break;
            }
            let Some(lead_idx) = htmp.leading() else {
                break;
            };
            let lead = htmp.term(lead_idx).clone();
            tracing::debug!(
                pivot = i0,
                terms = htmp.len(),
                lead_coeff = lead.coeff,
                "sbrg pivot"
            );

            // Rotate the strongest term onto Z of the pivot qubit without
            // touching earlier qubits.
            let mut step = diagonalize_pauli(&lead.pauli, i0, true)?;
            let mut lead_pauli = lead.pauli.clone();
            step.forward(&mut lead_pauli, &mut rng)?;
            step.forward(&mut htmp, &mut rng)?;
            htmp.reduce(self.tol);
            circuit.append(step);

            // Rotation preserves the coefficient up to the sign folded out
            // of the rotated string's phase.
            let h0 = PauliTerm::new(lead_pauli, lead.coeff);

            let diag = htmp.filter(|t| !t.pauli.x(i0));
            let offdiag = htmp.filter(|t| t.pauli.x(i0));

            // Second-order Schrieffer-Wolff: Δ ≈ (Σ)² / (2 h0), truncated
            // to the strongest corrections.
            let mut prod = offdiag.self_product();
            prod.reduce(self.tol);
            let keep = (self.max_rate * offdiag.len() as f64).round() as usize;
            prod.truncate(keep);

            htmp = diag;
            if !prod.is_empty() {
                htmp += &prod.mul_monomial(&h0.inverse()).scaled(0.5);
                htmp.reduce(self.tol);
            }

            // Terms living entirely at or before the pivot are fixed for
            // the rest of the flow: freeze them.
            let frozen = htmp.filter(|t| t.pauli.max_support().is_none_or(|m| m <= i0));
            htmp = htmp.filter(|t| t.pauli.max_support().is_some_and(|m| m > i0));
            heff += &frozen;
        }

        heff.reduce(self.tol);
        tracing::debug!(terms = heff.len(), lambda = heff.lambda(), "sbrg done");
        Ok(SbrgOutput {
            effective: heff,
            circuit,
        })
    }
}
