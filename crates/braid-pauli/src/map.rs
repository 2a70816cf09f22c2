//! Clifford maps: tableau representations of Clifford unitaries.
//!
//! A Clifford transformation is fixed by the images of the `2n` Pauli
//! generators.  Row `2i` holds the image of `X_i`, row `2i+1` the image of
//! `Z_i`; each image is a signed Pauli.  The bit rows form a symplectic
//! matrix over GF(2), which is what makes inversion cheap: for a symplectic
//! `M`, `M⁻¹ = J Mᵀ J` where `J` swaps the x/z bit within every site.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::mask::QubitMask;
use crate::pauli::{Pauli, symplectic_dot};

/// A Clifford transformation as a table of generator images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliffordMap {
    /// Images of `X_0, Z_0, X_1, Z_1, …`.
    rows: Vec<Pauli>,
}

impl CliffordMap {
    /// The identity map on `n` qubits.
    pub fn identity(n: usize) -> Self {
        let mut rows = Vec::with_capacity(2 * n);
        for i in 0..n {
            rows.push(Pauli::x_at(i, n));
            rows.push(Pauli::z_at(i, n));
        }
        Self { rows }
    }

    /// The map of the π/4 rotation `exp(i·π/4·g)`.
    pub fn rotation(g: &Pauli) -> Self {
        let mut map = Self::identity(g.num_qubits());
        for row in &mut map.rows {
            row.apply_rotation(g);
        }
        map
    }

    /// Build a map from explicit generator images.
    ///
    /// The images must preserve the commutation relations of the basis;
    /// this invariant is checked in debug builds (see [`Self::is_valid`]).
    pub fn from_images(images: Vec<Pauli>) -> Self {
        let map = Self { rows: images };
        debug_assert!(map.is_valid());
        map
    }

    /// A uniformly random `n`-qubit Clifford map.
    ///
    /// Samples the symplectic bit matrix by completing hyperbolic pairs one
    /// at a time (each image drawn uniformly from the symplectic complement
    /// of the pairs fixed so far), then assigns uniform signs.
    pub fn random(n: usize, rng: &mut dyn RngCore) -> Self {
        let dim = 2 * n;
        let mut constraints: Vec<(Vec<u8>, u8)> = Vec::with_capacity(dim);
        let mut vectors: Vec<Vec<u8>> = Vec::with_capacity(dim);
        for _ in 0..n {
            let a = loop {
                // The homogeneous system is always consistent.
                let Some(v) = sample_affine(&constraints, dim, rng) else {
                    unreachable!("homogeneous system is consistent");
                };
                if v.iter().any(|&b| b == 1) {
                    break v;
                }
            };
            let mut with_partner = constraints.clone();
            with_partner.push((twisted(&a), 1));
            let Some(b) = sample_affine(&with_partner, dim, rng) else {
                unreachable!("symplectic form is non-degenerate on the complement");
            };
            constraints.push((twisted(&a), 0));
            constraints.push((twisted(&b), 0));
            vectors.push(a);
            vectors.push(b);
        }
        let rows = vectors
            .into_iter()
            .map(|bits| {
                let xz: u32 = (0..n).map(|i| u32::from(bits[2 * i] & bits[2 * i + 1])).sum();
                let sign = 2 * (rng.next_u32() & 1) as u8;
                Pauli::from_bits_unchecked(bits, ((xz % 2) as u8 + sign) % 4)
            })
            .collect();
        Self { rows }
    }

    /// Number of qubits the map acts on.
    pub fn num_qubits(&self) -> usize {
        self.rows.len() / 2
    }

    /// The generator images.
    pub fn rows(&self) -> &[Pauli] {
        &self.rows
    }

    /// Check the symplectic condition: images must commute exactly like the
    /// basis generators they replace.
    pub fn is_valid(&self) -> bool {
        let dim = self.rows.len();
        if self.rows.iter().any(|r| 2 * r.num_qubits() != dim) {
            return false;
        }
        for r in 0..dim {
            if !self.rows[r].is_hermitian() {
                return false;
            }
            for s in r + 1..dim {
                // X_i/Z_i anticommute within a site, commute across sites.
                let expected = u8::from(r / 2 == s / 2);
                if symplectic_dot(self.rows[r].bits(), self.rows[s].bits()) != expected {
                    return false;
                }
            }
        }
        true
    }

    /// The image of `p` under this map.
    ///
    /// # Panics
    /// Panics if `p` lives on a different register size.
    pub fn transform(&self, p: &Pauli) -> Pauli {
        let n = self.num_qubits();
        assert_eq!(p.num_qubits(), n);
        let mut acc = Pauli::identity(n);
        for i in 0..n {
            if p.x(i) {
                acc = &acc * &self.rows[2 * i];
            }
        }
        for i in 0..n {
            if p.z(i) {
                acc = &acc * &self.rows[2 * i + 1];
            }
        }
        Pauli::from_bits_unchecked(acc.bits().to_vec(), (acc.phase() + p.phase()) % 4)
    }

    /// The composition "apply `self`, then `other`".
    pub fn compose(&self, other: &CliffordMap) -> CliffordMap {
        CliffordMap {
            rows: self.rows.iter().map(|r| other.transform(r)).collect(),
        }
    }

    /// The inverse map.
    pub fn inverse(&self) -> CliffordMap {
        let dim = self.rows.len();
        let flip = |r: usize| r ^ 1;
        let mut rows = Vec::with_capacity(dim);
        for r in 0..dim {
            let bits: Vec<u8> = (0..dim).map(|c| self.rows[flip(c)].bits()[flip(r)]).collect();
            rows.push(Pauli::from_bits_unchecked(bits, 0));
        }
        // Fix phases so that self ∘ inverse sends every basis Pauli to
        // exactly itself, not just up to sign.
        for (r, row) in rows.iter_mut().enumerate() {
            let image = self.transform(row);
            debug_assert!({
                let mut basis = vec![0u8; dim];
                basis[r] = 1;
                image.bits() == basis.as_slice()
            });
            *row = Pauli::from_bits_unchecked(row.bits().to_vec(), (4 - image.phase()) % 4);
        }
        CliffordMap { rows }
    }

    /// Block-update with a smaller map at the masked qubit positions.
    ///
    /// The masked rows take their masked-column bits and phases from
    /// `small`; unmasked rows and columns are left untouched.  Intended for
    /// maps that act as the identity on the masked block (layer
    /// compilation starts from the identity map).
    pub fn embed(&mut self, small: &CliffordMap, mask: &QubitMask) {
        assert_eq!(small.num_qubits(), mask.len());
        assert_eq!(self.num_qubits(), mask.total());
        for (i, &q) in mask.qubits().iter().enumerate() {
            for local_half in 0..2 {
                let small_row = &small.rows[2 * i + local_half];
                let row = &self.rows[2 * q + local_half];
                let mut bits = row.bits().to_vec();
                for (j, &p) in mask.qubits().iter().enumerate() {
                    bits[2 * p] = small_row.bits()[2 * j];
                    bits[2 * p + 1] = small_row.bits()[2 * j + 1];
                }
                self.rows[2 * q + local_half] =
                    Pauli::from_bits_unchecked(bits, small_row.phase());
            }
        }
    }

    /// The `n`-qubit map acting as `self` on the masked qubits and as the
    /// identity elsewhere.
    pub fn embedded(&self, n: usize, mask: &QubitMask) -> CliffordMap {
        let mut map = CliffordMap::identity(n);
        map.embed(self, mask);
        map
    }
}

/// Coefficient vector of the linear functional `v ↦ ⟨v, w⟩`: the symplectic
/// product against `w` is the plain dot product against `w` with x/z bits
/// swapped per site.
fn twisted(w: &[u8]) -> Vec<u8> {
    let mut t = vec![0u8; w.len()];
    for i in (0..w.len()).step_by(2) {
        t[i] = w[i + 1];
        t[i + 1] = w[i];
    }
    t
}

/// Draw a uniform solution of the GF(2) affine system `C·v = t`, or `None`
/// if the system is inconsistent.  Free coordinates are sampled uniformly.
fn sample_affine(
    constraints: &[(Vec<u8>, u8)],
    dim: usize,
    rng: &mut dyn RngCore,
) -> Option<Vec<u8>> {
    let mut rows: Vec<(Vec<u8>, u8)> = constraints.to_vec();
    let mut pivots: Vec<(usize, usize)> = Vec::new();
    let mut rank = 0;
    for col in 0..dim {
        let Some(pr) = (rank..rows.len()).find(|&i| rows[i].0[col] == 1) else {
            continue;
        };
        rows.swap(rank, pr);
        let (pivot_bits, pivot_rhs) = rows[rank].clone();
        for (i, row) in rows.iter_mut().enumerate() {
            if i != rank && row.0[col] == 1 {
                for k in 0..dim {
                    row.0[k] ^= pivot_bits[k];
                }
                row.1 ^= pivot_rhs;
            }
        }
        pivots.push((rank, col));
        rank += 1;
    }
    if rows[rank..].iter().any(|(_, rhs)| *rhs == 1) {
        return None;
    }
    let pivot_cols: Vec<bool> = {
        let mut v = vec![false; dim];
        for &(_, c) in &pivots {
            v[c] = true;
        }
        v
    };
    let mut sol = vec![0u8; dim];
    for c in 0..dim {
        if !pivot_cols[c] {
            sol[c] = (rng.next_u32() & 1) as u8;
        }
    }
    for &(r, c) in pivots.iter().rev() {
        let mut v = rows[r].1;
        for k in 0..dim {
            if k != c && rows[r].0[k] == 1 {
                v ^= rows[r].0[k] & sol[k];
            }
        }
        sol[c] = v;
    }
    Some(sol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn identity_fixes_everything() {
        let id = CliffordMap::identity(3);
        let p = Pauli::parse("XYZ").unwrap();
        assert_eq!(id.transform(&p), p);
    }

    #[test]
    fn rotation_map_matches_direct_rotation() {
        let g = Pauli::parse("XY").unwrap();
        let map = CliffordMap::rotation(&g);
        let mut direct = Pauli::parse("ZI").unwrap();
        let via_map = map.transform(&direct);
        direct.apply_rotation(&g);
        assert_eq!(via_map, direct);
    }

    #[test]
    fn rotation_inverse_composes_to_identity() {
        let g = Pauli::parse("YZX").unwrap();
        let map = CliffordMap::rotation(&g);
        assert_eq!(map.compose(&map.inverse()), CliffordMap::identity(3));
        assert_eq!(map.inverse().compose(&map), CliffordMap::identity(3));
    }

    #[test]
    fn random_map_is_symplectic_and_invertible() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 1..=5 {
            let map = CliffordMap::random(n, &mut rng);
            assert!(map.is_valid());
            assert_eq!(map.compose(&map.inverse()), CliffordMap::identity(n));
        }
    }

    #[test]
    fn random_maps_differ_across_seeds() {
        let a = CliffordMap::random(4, &mut StdRng::seed_from_u64(1));
        let b = CliffordMap::random(4, &mut StdRng::seed_from_u64(2));
        assert_ne!(a, b);
    }

    #[test]
    fn compose_order() {
        // rotation about Z then about X, applied to Z.
        let rz = CliffordMap::rotation(&Pauli::parse("Z").unwrap());
        let rx = CliffordMap::rotation(&Pauli::parse("X").unwrap());
        let both = rz.compose(&rx);
        let mut p = Pauli::parse("Z").unwrap();
        p.apply_rotation(&Pauli::parse("Z").unwrap());
        p.apply_rotation(&Pauli::parse("X").unwrap());
        assert_eq!(both.transform(&Pauli::parse("Z").unwrap()), p);
    }

    #[test]
    fn embed_into_identity() {
        // Embed a single-qubit Hadamard-like map (X↔Z) at qubit 2 of 4.
        let h = CliffordMap::from_images(vec![
            Pauli::parse("Z").unwrap(),
            Pauli::parse("X").unwrap(),
        ]);
        let mask = QubitMask::new(&[2], 4).unwrap();
        let big = h.embedded(4, &mask);
        assert!(big.is_valid());
        let x2 = Pauli::x_at(2, 4);
        let z2 = Pauli::z_at(2, 4);
        assert_eq!(big.transform(&x2), z2);
        assert_eq!(big.transform(&z2), x2);
        // untouched qubit
        let x0 = Pauli::x_at(0, 4);
        assert_eq!(big.transform(&x0), x0);
    }
}
