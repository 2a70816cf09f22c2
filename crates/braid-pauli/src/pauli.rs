//! Pauli operators in the symplectic bit-vector representation.
//!
//! An `n`-qubit Pauli operator is stored as
//!
//!   i^p · Π_j X_j^{x_j} Z_j^{z_j}
//!
//! with an interleaved bit vector `bits` of length `2n`
//! (`bits[2i] = x_i`, `bits[2i+1] = z_i`) and a phase `p ∈ Z₄` counting
//! powers of the imaginary unit.  Under this convention `Y = i·XZ` is bits
//! `(1,1)` with phase 1, and an operator is Hermitian iff
//! `p ≡ Σ_j x_j z_j (mod 2)`.
//!
//! Multiplication XORs the bit vectors and adds phases, picking up a factor
//! `(-1)^{z₁·x₂}` from reordering `Z` factors past `X` factors.  Two Paulis
//! commute iff their symplectic product `Σ_j (x₁z₂ + z₁x₂)` vanishes mod 2.

use std::fmt;
use std::ops::{Mul, Neg};

use serde::{Deserialize, Serialize};

use crate::error::{PauliError, PauliResult};
use crate::mask::QubitMask;

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    /// The (x, z) bit pattern of this operator.
    pub fn bits(self) -> (u8, u8) {
        match self {
            PauliOp::I => (0, 0),
            PauliOp::X => (1, 0),
            PauliOp::Y => (1, 1),
            PauliOp::Z => (0, 1),
        }
    }

    fn from_bits(x: u8, z: u8) -> Self {
        match (x, z) {
            (0, 0) => PauliOp::I,
            (1, 0) => PauliOp::X,
            (1, 1) => PauliOp::Y,
            _ => PauliOp::Z,
        }
    }

    fn letter(self) -> char {
        match self {
            PauliOp::I => 'I',
            PauliOp::X => 'X',
            PauliOp::Y => 'Y',
            PauliOp::Z => 'Z',
        }
    }
}

/// A multi-qubit Pauli operator with a Z₄ phase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pauli {
    /// Interleaved x/z bits, length `2n`.
    bits: Vec<u8>,
    /// Power of i, mod 4.
    phase: u8,
}

impl Pauli {
    /// The identity operator on `n` qubits.
    pub fn identity(n: usize) -> Self {
        Self {
            bits: vec![0; 2 * n],
            phase: 0,
        }
    }

    /// Build a Pauli from (qubit, operator) pairs on an `n`-qubit register.
    ///
    /// Identity entries are ignored.  Each `Y` contributes a phase factor
    /// `i` so that the result is the positive Hermitian string.
    ///
    /// # Panics
    /// Panics if a qubit index is out of range or listed twice.
    pub fn from_ops(n: usize, ops: &[(usize, PauliOp)]) -> Self {
        let mut p = Self::identity(n);
        for &(q, op) in ops {
            assert!(q < n, "qubit {q} out of range for {n} qubits");
            let (x, z) = op.bits();
            if x == 0 && z == 0 {
                continue;
            }
            assert!(
                p.bits[2 * q] == 0 && p.bits[2 * q + 1] == 0,
                "duplicate qubit {q} in operator list"
            );
            p.bits[2 * q] = x;
            p.bits[2 * q + 1] = z;
            p.phase = (p.phase + (x & z)) % 4;
        }
        p
    }

    /// The single-qubit `X` operator at position `i` of an `n`-qubit register.
    pub fn x_at(i: usize, n: usize) -> Self {
        Self::from_ops(n, &[(i, PauliOp::X)])
    }

    /// The single-qubit `Z` operator at position `i` of an `n`-qubit register.
    pub fn z_at(i: usize, n: usize) -> Self {
        Self::from_ops(n, &[(i, PauliOp::Z)])
    }

    /// Parse a Pauli string such as `"XIZY"` or `"-ZZ"`.
    ///
    /// An optional leading `+` or `-` fixes the sign; the remaining
    /// characters must be drawn from `I`, `X`, `Y`, `Z` (one per qubit).
    pub fn parse(s: &str) -> PauliResult<Self> {
        let (sign, body) = match s.strip_prefix('-') {
            Some(rest) => (2u8, rest),
            None => (0u8, s.strip_prefix('+').unwrap_or(s)),
        };
        let mut ops = Vec::with_capacity(body.len());
        for (i, c) in body.chars().enumerate() {
            let op = match c {
                'I' => PauliOp::I,
                'X' => PauliOp::X,
                'Y' => PauliOp::Y,
                'Z' => PauliOp::Z,
                _ => return Err(PauliError::InvalidCharacter(c)),
            };
            ops.push((i, op));
        }
        let mut p = Self::from_ops(body.chars().count(), &ops);
        p.phase = (p.phase + sign) % 4;
        Ok(p)
    }

    pub(crate) fn from_bits_unchecked(bits: Vec<u8>, phase: u8) -> Self {
        debug_assert!(bits.len() % 2 == 0);
        debug_assert!(bits.iter().all(|&b| b <= 1));
        Self {
            bits,
            phase: phase % 4,
        }
    }

    /// Number of qubits in the register this operator lives on.
    pub fn num_qubits(&self) -> usize {
        self.bits.len() / 2
    }

    /// The phase exponent `p` of the `i^p` prefactor.
    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// The interleaved symplectic bit vector.
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// The x bit at qubit `i`.
    pub fn x(&self, i: usize) -> bool {
        self.bits[2 * i] == 1
    }

    /// The z bit at qubit `i`.
    pub fn z(&self, i: usize) -> bool {
        self.bits[2 * i + 1] == 1
    }

    /// The single-qubit operator at position `i`.
    pub fn op_at(&self, i: usize) -> PauliOp {
        PauliOp::from_bits(self.bits[2 * i], self.bits[2 * i + 1])
    }

    /// Phase of the positive Hermitian string with the same bits
    /// (one factor of `i` per `Y`).
    pub fn canonical_phase(&self) -> u8 {
        let mut xz = 0u32;
        for i in 0..self.num_qubits() {
            xz += u32::from(self.bits[2 * i] & self.bits[2 * i + 1]);
        }
        (xz % 4) as u8
    }

    /// True iff the operator is Hermitian (its prefactor is ±1).
    pub fn is_hermitian(&self) -> bool {
        (self.phase + self.canonical_phase()) % 2 == 0
    }

    /// The real sign of a Hermitian operator (+1.0 or −1.0).
    pub fn sign(&self) -> f64 {
        debug_assert!(self.is_hermitian());
        if (self.phase + 4 - self.canonical_phase()) % 4 == 0 {
            1.0
        } else {
            -1.0
        }
    }

    /// True iff `self` and `other` commute (symplectic product is even).
    ///
    /// # Panics
    /// Panics if the operators act on registers of different sizes.
    pub fn commutes_with(&self, other: &Pauli) -> bool {
        assert_eq!(self.bits.len(), other.bits.len());
        symplectic_dot(&self.bits, &other.bits) == 0
    }

    /// Conjugate in place by the π/4 rotation `exp(i·π/4·g)`.
    ///
    /// Commuting operators are left alone; anticommuting ones map to
    /// `i·g·self`.  Rotating by `-g` runs the rotation backward.
    pub fn apply_rotation(&mut self, g: &Pauli) {
        if self.commutes_with(g) {
            return;
        }
        let mut rotated = g * &*self;
        rotated.phase = (rotated.phase + 1) % 4;
        *self = rotated;
    }

    /// Drop identity sites, returning the condensed operator and its support.
    pub fn condense(&self) -> (Pauli, Vec<usize>) {
        let support: Vec<usize> = (0..self.num_qubits())
            .filter(|&i| self.x(i) || self.z(i))
            .collect();
        let mut bits = Vec::with_capacity(2 * support.len());
        for &i in &support {
            bits.push(self.bits[2 * i]);
            bits.push(self.bits[2 * i + 1]);
        }
        (Pauli::from_bits_unchecked(bits, self.phase), support)
    }

    /// The restriction to qubits `i0..n`, as an operator on `n - i0` qubits.
    pub fn tail(&self, i0: usize) -> Pauli {
        Pauli::from_bits_unchecked(self.bits[2 * i0..].to_vec(), self.phase)
    }

    /// Embed into an `n`-qubit register, sending local qubit `i` to
    /// `mask[i]` and acting as identity elsewhere.
    ///
    /// # Panics
    /// Panics if the mask length differs from this operator's qubit count
    /// or the mask targets a different register size.
    pub fn embedded(&self, n: usize, mask: &QubitMask) -> Pauli {
        assert_eq!(mask.len(), self.num_qubits());
        assert_eq!(mask.total(), n);
        let mut bits = vec![0u8; 2 * n];
        for (i, &q) in mask.qubits().iter().enumerate() {
            bits[2 * q] = self.bits[2 * i];
            bits[2 * q + 1] = self.bits[2 * i + 1];
        }
        Pauli::from_bits_unchecked(bits, self.phase)
    }

    /// The largest qubit index with non-identity support, if any.
    pub fn max_support(&self) -> Option<usize> {
        (0..self.num_qubits()).rev().find(|&i| self.x(i) || self.z(i))
    }

    /// True iff the operator is the identity (any phase).
    pub fn is_identity(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }
}

/// Symplectic product of two interleaved bit vectors, mod 2.
pub(crate) fn symplectic_dot(a: &[u8], b: &[u8]) -> u8 {
    let mut acc = 0u8;
    for i in (0..a.len()).step_by(2) {
        acc ^= (a[i] & b[i + 1]) ^ (a[i + 1] & b[i]);
    }
    acc
}

impl Mul for &Pauli {
    type Output = Pauli;

    /// Operator product `self · rhs` (self on the left).
    fn mul(self, rhs: &Pauli) -> Pauli {
        assert_eq!(self.bits.len(), rhs.bits.len());
        let mut reorder = 0u8;
        for i in (0..self.bits.len()).step_by(2) {
            reorder ^= self.bits[i + 1] & rhs.bits[i];
        }
        let bits = self
            .bits
            .iter()
            .zip(&rhs.bits)
            .map(|(a, b)| a ^ b)
            .collect();
        Pauli::from_bits_unchecked(bits, (self.phase + rhs.phase + 2 * reorder) % 4)
    }
}

impl Mul for Pauli {
    type Output = Pauli;

    fn mul(self, rhs: Pauli) -> Pauli {
        &self * &rhs
    }
}

impl Neg for &Pauli {
    type Output = Pauli;

    fn neg(self) -> Pauli {
        Pauli::from_bits_unchecked(self.bits.clone(), (self.phase + 2) % 4)
    }
}

impl Neg for Pauli {
    type Output = Pauli;

    fn neg(mut self) -> Pauli {
        self.phase = (self.phase + 2) % 4;
        self
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match (self.phase + 4 - self.canonical_phase()) % 4 {
            0 => "+",
            1 => "+i",
            2 => "-",
            _ => "-i",
        };
        write!(f, "{prefix}")?;
        for i in 0..self.num_qubits() {
            write!(f, "{}", self.op_at(i).letter())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_ops_y_phase() {
        let y = Pauli::from_ops(1, &[(0, PauliOp::Y)]);
        assert_eq!(y.bits(), &[1, 1]);
        assert_eq!(y.phase(), 1);
        assert!(y.is_hermitian());
        assert_eq!(y.sign(), 1.0);
    }

    #[test]
    fn parse_and_display_roundtrip() {
        for s in ["+XIZY", "-ZZ", "+IIII", "-YXI"] {
            let p = Pauli::parse(s).unwrap();
            assert_eq!(p.to_string(), s);
        }
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            Pauli::parse("XQ"),
            Err(PauliError::InvalidCharacter('Q'))
        ));
    }

    #[test]
    fn multiplication_table() {
        let x = Pauli::parse("X").unwrap();
        let y = Pauli::parse("Y").unwrap();
        let z = Pauli::parse("Z").unwrap();
        // XY = iZ, YX = -iZ, ZX = iY, XZ = -iY, YZ = iX
        assert_eq!((&x * &y).to_string(), "+iZ");
        assert_eq!((&y * &x).to_string(), "-iZ");
        assert_eq!((&z * &x).to_string(), "+iY");
        assert_eq!((&x * &z).to_string(), "-iY");
        assert_eq!((&y * &z).to_string(), "+iX");
        // X² = I
        assert_eq!((&x * &x).to_string(), "+I");
    }

    #[test]
    fn commutation() {
        let xx = Pauli::parse("XX").unwrap();
        let zz = Pauli::parse("ZZ").unwrap();
        let zi = Pauli::parse("ZI").unwrap();
        assert!(xx.commutes_with(&zz));
        assert!(!xx.commutes_with(&zi));
    }

    #[test]
    fn rotation_fixed_point_and_flip() {
        // exp(iπ/4·Z) leaves Z alone and maps X → i·Z·X = -Y
        let z = Pauli::parse("Z").unwrap();
        let mut p = Pauli::parse("Z").unwrap();
        p.apply_rotation(&z);
        assert_eq!(p.to_string(), "+Z");
        let mut x = Pauli::parse("X").unwrap();
        x.apply_rotation(&z);
        assert_eq!(x.to_string(), "-Y");
        // rotating back with -Z restores X
        x.apply_rotation(&(-z));
        assert_eq!(x.to_string(), "+X");
    }

    #[test]
    fn condense_and_embed() {
        let p = Pauli::parse("IXIZ").unwrap();
        let (cond, support) = p.condense();
        assert_eq!(support, vec![1, 3]);
        assert_eq!(cond.to_string(), "+XZ");
        let mask = QubitMask::new(&[1, 3], 4).unwrap();
        assert_eq!(cond.embedded(4, &mask), p);
    }

    #[test]
    fn tail_and_max_support() {
        let p = Pauli::parse("ZIXY").unwrap();
        assert_eq!(p.tail(2).to_string(), "+XY");
        assert_eq!(p.max_support(), Some(3));
        assert_eq!(Pauli::identity(3).max_support(), None);
    }
}
