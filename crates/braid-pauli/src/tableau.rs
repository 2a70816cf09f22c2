//! Stabilizer states as full tableaux.
//!
//! A state is held as `n` stabilizer rows (signed Paulis that fix the
//! state) together with `n` destabilizer rows.  Destabilizer `i`
//! anticommutes with stabilizer `i` and commutes with every other row;
//! this pairing is what lets deterministic measurement outcomes be read
//! off without Gaussian elimination.
//!
//! Probabilities are tracked in log₂: every random measurement bit costs
//! exactly one bit of probability, deterministic outcomes cost nothing,
//! and an impossible postselection reports `-inf`.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::map::CliffordMap;
use crate::pauli::Pauli;

/// A pure stabilizer state on `n` qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilizerState {
    stabilizers: Vec<Pauli>,
    destabilizers: Vec<Pauli>,
}

impl StabilizerState {
    /// The all-zero computational basis state `|0…0⟩`.
    pub fn zero_state(n: usize) -> Self {
        Self {
            stabilizers: (0..n).map(|i| Pauli::z_at(i, n)).collect(),
            destabilizers: (0..n).map(|i| Pauli::x_at(i, n)).collect(),
        }
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.stabilizers.len()
    }

    /// The stabilizer rows.
    pub fn stabilizers(&self) -> &[Pauli] {
        &self.stabilizers
    }

    /// Conjugate every row by the rotation `exp(i·π/4·g)` in place.
    pub fn rotate_by(&mut self, g: &Pauli) {
        for row in self.rows_mut() {
            row.apply_rotation(g);
        }
    }

    /// Transform every row by a Clifford map in place.
    pub fn transform_by(&mut self, map: &CliffordMap) {
        for row in self.rows_mut() {
            *row = map.transform(row);
        }
    }

    /// Measure a sequence of Hermitian observables, in order.
    ///
    /// Returns one outcome bit per observable (`0` → eigenvalue +1,
    /// `1` → eigenvalue −1) and the total log₂ probability of the record.
    /// The state is updated after each observable, so later outcomes are
    /// conditioned on earlier ones.
    pub fn measure(&mut self, observables: &[Pauli], rng: &mut dyn RngCore) -> (Vec<u8>, f64) {
        let mut outcomes = Vec::with_capacity(observables.len());
        let mut log2prob = 0.0;
        for obs in observables {
            let (bit, lp) = self.collapse(obs, None, rng);
            outcomes.push(bit);
            log2prob += lp;
        }
        (outcomes, log2prob)
    }

    /// Project onto fixed outcomes of a sequence of Hermitian observables.
    ///
    /// Returns the log₂ probability of the record under the current state;
    /// `-inf` if any forced outcome is impossible, in which case the final
    /// state is not meaningful.
    pub fn postselect(&mut self, observables: &[Pauli], outcomes: &[u8]) -> f64 {
        assert_eq!(observables.len(), outcomes.len());
        let mut log2prob = 0.0;
        let mut rng = NullRng;
        for (obs, &bit) in observables.iter().zip(outcomes) {
            let (_, lp) = self.collapse(obs, Some(bit), &mut rng);
            log2prob += lp;
        }
        log2prob
    }

    /// Expectation value of a Hermitian Pauli: +1, −1, or 0.
    pub fn expect(&self, obs: &Pauli) -> f64 {
        if self.stabilizers.iter().any(|s| !s.commutes_with(obs)) {
            return 0.0;
        }
        let group = self.stabilizer_combination(obs);
        obs.sign() * group.sign()
    }

    /// The encoding Clifford map of this state: it sends `Z_i` to
    /// stabilizer `i` and `X_i` to destabilizer `i`, so it prepares the
    /// state from `|0…0⟩` and its inverse diagonalizes the state.
    pub fn to_map(&self) -> CliffordMap {
        let mut rows = Vec::with_capacity(2 * self.num_qubits());
        for i in 0..self.num_qubits() {
            rows.push(self.destabilizers[i].clone());
            rows.push(self.stabilizers[i].clone());
        }
        CliffordMap::from_images(rows)
    }

    fn rows_mut(&mut self) -> impl Iterator<Item = &mut Pauli> {
        self.stabilizers.iter_mut().chain(self.destabilizers.iter_mut())
    }

    /// The element of the stabilizer group with the same bits as `obs`
    /// (valid only when `obs` commutes with every stabilizer).
    fn stabilizer_combination(&self, obs: &Pauli) -> Pauli {
        let mut prod = Pauli::identity(self.num_qubits());
        for i in 0..self.num_qubits() {
            if !self.destabilizers[i].commutes_with(obs) {
                prod = &prod * &self.stabilizers[i];
            }
        }
        debug_assert_eq!(prod.bits(), obs.bits());
        prod
    }

    /// Measure or postselect one observable.  `forced` fixes the outcome
    /// bit; for an impossible forced outcome the contribution is `-inf`.
    fn collapse(&mut self, obs: &Pauli, forced: Option<u8>, rng: &mut dyn RngCore) -> (u8, f64) {
        assert_eq!(obs.num_qubits(), self.num_qubits());
        let pivot = (0..self.num_qubits()).find(|&i| !self.stabilizers[i].commutes_with(obs));
        match pivot {
            Some(k) => {
                // Random outcome: half a chance either way.
                let anchor = self.stabilizers[k].clone();
                for i in 0..self.num_qubits() {
                    if i != k && !self.stabilizers[i].commutes_with(obs) {
                        self.stabilizers[i] = &self.stabilizers[i] * &anchor;
                    }
                    if i != k && !self.destabilizers[i].commutes_with(obs) {
                        self.destabilizers[i] = &self.destabilizers[i] * &anchor;
                    }
                }
                let bit = forced.unwrap_or_else(|| (rng.next_u32() & 1) as u8);
                self.destabilizers[k] = anchor;
                self.stabilizers[k] = if bit == 1 { -obs.clone() } else { obs.clone() };
                (bit, -1.0)
            }
            None => {
                // Deterministic outcome fixed by the stabilizer group.
                let group = self.stabilizer_combination(obs);
                let bit = ((group.phase() + 4 - obs.phase()) % 4) / 2;
                debug_assert!((group.phase() + 4 - obs.phase()) % 2 == 0);
                match forced {
                    Some(f) if f != bit => (f, f64::NEG_INFINITY),
                    _ => (bit, 0.0),
                }
            }
        }
    }
}

/// Placeholder RNG for code paths that never draw randomness.
struct NullRng;

impl RngCore for NullRng {
    fn next_u32(&mut self) -> u32 {
        unreachable!("postselection never samples")
    }

    fn next_u64(&mut self) -> u64 {
        unreachable!("postselection never samples")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        unreachable!("postselection never samples")
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        unreachable!("postselection never samples")
    }
}
