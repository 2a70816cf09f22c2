//! Rotations that bring a single Pauli onto a `Z` axis.
//!
//! Conjugation by the π/4 rotation generated by `g` sends an
//! anticommuting Pauli `P` to `i·g·P`, whose bits are `g ⊕ P`.  Working
//! backwards from that XOR rule, at most two generators suffice to carry
//! any non-identity Pauli onto `Z` of a chosen qubit.

use crate::pauli::Pauli;

/// Generators of π/4 rotations that map `p` onto `±Z` of qubit `i0`.
///
/// Applying the returned rotations in order turns `p` into a Pauli whose
/// bits are exactly `Z_{i0}` (the sign rides along separately).  Returns
/// an empty list when `p` is already on axis, or when `p` is the identity
/// (which no Clifford can move).
///
/// # Panics
/// Panics if `i0` is out of range.
pub fn diagonalizing_rotations(p: &Pauli, i0: usize) -> Vec<Pauli> {
    let n = p.num_qubits();
    assert!(i0 < n);
    let mut target = vec![0u8; 2 * n];
    target[2 * i0 + 1] = 1;
    if p.bits() == target.as_slice() || p.is_identity() {
        return vec![];
    }
    if p.x(i0) {
        // Anticommutes with the target axis: g ⊕ p = target in one step.
        return vec![hermitian(xor(p.bits(), &target))];
    }
    // Commuting case: first rotate onto an intermediate that anticommutes
    // with Z_{i0}, then fall through to the one-step rule.
    let m = if p.z(i0) {
        let mut bits = p.bits().to_vec();
        bits[2 * i0] ^= 1;
        bits
    } else {
        let j = (0..n)
            .find(|&j| p.x(j) || p.z(j))
            .unwrap_or_else(|| unreachable!("non-identity Pauli has support"));
        let mut bits = vec![0u8; 2 * n];
        bits[2 * i0] = 1;
        if p.z(j) {
            bits[2 * j] = 1;
        } else {
            bits[2 * j + 1] = 1;
        }
        bits
    };
    let intermediate = xor(&m, p.bits());
    let h = xor(&intermediate, &target);
    vec![hermitian(m), hermitian(h)]
}

fn xor(a: &[u8], b: &[u8]) -> Vec<u8> {
    a.iter().zip(b).map(|(x, y)| x ^ y).collect()
}

/// The Hermitian Pauli with the given bits.
fn hermitian(bits: Vec<u8>) -> Pauli {
    let raw = Pauli::from_bits_unchecked(bits, 0);
    let phase = raw.canonical_phase();
    Pauli::from_bits_unchecked(raw.bits().to_vec(), phase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(p: &str, i0: usize, expected_len: usize) {
        let mut p = Pauli::parse(p).unwrap();
        let rotations = diagonalizing_rotations(&p, i0);
        assert_eq!(rotations.len(), expected_len);
        for g in &rotations {
            assert!(g.is_hermitian());
            p.apply_rotation(g);
        }
        let n = p.num_qubits();
        for i in 0..n {
            assert!(!p.x(i));
            assert_eq!(p.z(i), i == i0);
        }
    }

    #[test]
    fn already_on_axis_needs_nothing() {
        check("IZI", 1, 0);
    }

    #[test]
    fn anticommuting_case_takes_one_rotation() {
        check("XII", 0, 1);
        check("YZI", 0, 1);
        check("XXY", 2, 1);
    }

    #[test]
    fn commuting_case_with_z_support_takes_two() {
        check("ZZI", 0, 2);
        check("IZZ", 2, 2);
    }

    #[test]
    fn commuting_case_off_support_takes_two() {
        check("IXZ", 0, 2);
        check("ZII", 1, 2);
    }

    #[test]
    fn identity_is_left_alone() {
        let p = Pauli::identity(3);
        assert!(diagonalizing_rotations(&p, 0).is_empty());
    }
}
