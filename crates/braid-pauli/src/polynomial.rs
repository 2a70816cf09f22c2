//! Weighted sums of Pauli operators.
//!
//! A polynomial holds Hermitian terms with real coefficients:
//!
//!   H = Σ_k  c_k · P_k
//!
//! Every stored Pauli is normalized to its positive Hermitian string
//! (canonical phase), with the sign folded into the coefficient, so
//! coefficients stay real through multiplication and Clifford conjugation.

use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::pauli::Pauli;

/// A single weighted Pauli term: `coeff · pauli`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliTerm {
    /// The Pauli string, in canonical (positive Hermitian) phase.
    pub pauli: Pauli,
    /// Real coefficient.
    pub coeff: f64,
}

impl PauliTerm {
    /// Create a term, folding any sign carried by the Pauli's phase into
    /// the coefficient.
    ///
    /// # Panics
    /// Panics if the Pauli is not Hermitian.
    pub fn new(pauli: Pauli, coeff: f64) -> Self {
        let (pauli, sign) = canonicalize(pauli);
        Self {
            pauli,
            coeff: coeff * sign,
        }
    }

    /// The multiplicative inverse `(c·P)⁻¹ = P/c` (canonical `P` squares
    /// to the identity).
    pub fn inverse(&self) -> Self {
        Self {
            pauli: self.pauli.clone(),
            coeff: 1.0 / self.coeff,
        }
    }
}

/// Rephase to the canonical Hermitian string, returning the real sign that
/// was absorbed.
fn canonicalize(p: Pauli) -> (Pauli, f64) {
    let sign = p.sign();
    if sign == 1.0 && p.phase() == p.canonical_phase() {
        return (p, 1.0);
    }
    let canon = Pauli::from_bits_unchecked(p.bits().to_vec(), p.canonical_phase());
    (canon, sign)
}

/// A Hamiltonian-like sum of weighted Pauli terms on a fixed register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliPolynomial {
    n: usize,
    terms: Vec<PauliTerm>,
}

impl PauliPolynomial {
    /// The empty polynomial on `n` qubits.
    pub fn new(n: usize) -> Self {
        Self { n, terms: vec![] }
    }

    /// Build from terms, merging repeated Pauli strings.
    pub fn from_terms(n: usize, terms: impl IntoIterator<Item = (Pauli, f64)>) -> Self {
        let mut poly = Self::new(n);
        for (p, c) in terms {
            poly.add_term(p, c);
        }
        poly
    }

    /// Register size.
    pub fn num_qubits(&self) -> usize {
        self.n
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True if there are no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The terms, in insertion order.
    pub fn terms(&self) -> &[PauliTerm] {
        &self.terms
    }

    /// The `i`-th term.
    pub fn term(&self, i: usize) -> &PauliTerm {
        &self.terms[i]
    }

    /// Add `coeff · pauli`, merging with an existing term when the Pauli
    /// string is already present.
    ///
    /// # Panics
    /// Panics if the Pauli lives on a different register size or is not
    /// Hermitian.
    pub fn add_term(&mut self, pauli: Pauli, coeff: f64) {
        assert_eq!(pauli.num_qubits(), self.n);
        let term = PauliTerm::new(pauli, coeff);
        if let Some(existing) = self
            .terms
            .iter_mut()
            .find(|t| t.pauli.bits() == term.pauli.bits())
        {
            existing.coeff += term.coeff;
        } else {
            self.terms.push(term);
        }
    }

    /// Index of the term with the largest |coefficient|.
    pub fn leading(&self) -> Option<usize> {
        self.terms
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.coeff.abs().total_cmp(&b.coeff.abs()))
            .map(|(i, _)| i)
    }

    /// Sum of |coefficients| (a spectral-norm upper bound).
    pub fn lambda(&self) -> f64 {
        self.terms.iter().map(|t| t.coeff.abs()).sum()
    }

    /// The sub-polynomial of terms satisfying a predicate.
    pub fn filter(&self, pred: impl Fn(&PauliTerm) -> bool) -> Self {
        Self {
            n: self.n,
            terms: self.terms.iter().filter(|t| pred(t)).cloned().collect(),
        }
    }

    /// Multiply every coefficient by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for t in &mut self.terms {
            t.coeff *= factor;
        }
    }

    /// Scaled copy.
    #[must_use]
    pub fn scaled(mut self, factor: f64) -> Self {
        self.scale(factor);
        self
    }

    /// The square `H·H` as a polynomial.
    ///
    /// Cross terms of anticommuting Paulis cancel (`PQ + QP = 0`),
    /// commuting cross terms double, and squares contribute the identity —
    /// so the result stays real without tracking complex phases.
    pub fn self_product(&self) -> Self {
        let mut out = Self::new(self.n);
        let square: f64 = self.terms.iter().map(|t| t.coeff * t.coeff).sum();
        if square != 0.0 {
            out.add_term(Pauli::identity(self.n), square);
        }
        for i in 0..self.terms.len() {
            for j in i + 1..self.terms.len() {
                let (a, b) = (&self.terms[i], &self.terms[j]);
                if a.pauli.commutes_with(&b.pauli) {
                    out.add_term(&a.pauli * &b.pauli, 2.0 * a.coeff * b.coeff);
                }
            }
        }
        out
    }

    /// Left-multiply every term by a monomial.
    ///
    /// The monomial must commute with every term, so that the products
    /// remain Hermitian.
    #[must_use]
    pub fn mul_monomial(&self, m: &PauliTerm) -> Self {
        let mut out = Self::new(self.n);
        for t in &self.terms {
            out.add_term(&m.pauli * &t.pauli, m.coeff * t.coeff);
        }
        out
    }

    /// Merge repeated strings, drop |coefficients| ≤ `tol`, and sort by
    /// descending |coefficient|.
    pub fn reduce(&mut self, tol: f64) {
        let mut index: HashMap<Vec<u8>, usize> = HashMap::new();
        let mut merged: Vec<PauliTerm> = Vec::with_capacity(self.terms.len());
        for t in self.terms.drain(..) {
            match index.get(t.pauli.bits()) {
                Some(&i) => merged[i].coeff += t.coeff,
                None => {
                    index.insert(t.pauli.bits().to_vec(), merged.len());
                    merged.push(t);
                }
            }
        }
        merged.retain(|t| t.coeff.abs() > tol);
        merged.sort_by(|a, b| b.coeff.abs().total_cmp(&a.coeff.abs()));
        self.terms = merged;
    }

    /// Keep at most the first `k` terms.
    pub fn truncate(&mut self, k: usize) {
        self.terms.truncate(k);
    }

    /// Apply a Pauli-to-Pauli transformation to every term, renormalizing
    /// phases into coefficient signs.  Used for in-place Clifford
    /// conjugation of the whole polynomial.
    pub fn map_terms(&mut self, mut f: impl FnMut(&mut Pauli)) {
        for t in &mut self.terms {
            let mut p = t.pauli.clone();
            f(&mut p);
            let (canon, sign) = canonicalize(p);
            t.pauli = canon;
            t.coeff *= sign;
        }
    }
}

impl AddAssign<&PauliPolynomial> for PauliPolynomial {
    fn add_assign(&mut self, rhs: &PauliPolynomial) {
        assert_eq!(self.n, rhs.n);
        for t in &rhs.terms {
            self.add_term(t.pauli.clone(), t.coeff);
        }
    }
}

impl Add for PauliPolynomial {
    type Output = PauliPolynomial;

    fn add(mut self, rhs: PauliPolynomial) -> PauliPolynomial {
        self += &rhs;
        self
    }
}

impl fmt::Display for PauliPolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, t) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:+.4}·{}", t.coeff, t.pauli.to_string().trim_start_matches('+'))?;
        }
        Ok(())
    }
}
