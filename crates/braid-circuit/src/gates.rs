//! Named gates and stock circuit templates.
//!
//! Gate tables are written as generator images `(X, Z)` per local qubit.
//! Because gates carry an *ordered* qubit tuple, one table serves every
//! orientation: `cnot(3, 1)` is the same table as `cnot(1, 3)` with the
//! roles read off the tuple.

use braid_pauli::{CliffordMap, Pauli};

use crate::circuit::Circuit;
use crate::error::{CircuitError, CircuitResult};
use crate::gate::CliffordGate;
use crate::measurement::Measurement;

fn map_gate(qubits: &[usize], images: &[&str]) -> CliffordGate {
    let rows = images
        .iter()
        .map(|s| match Pauli::parse(s) {
            Ok(p) => p,
            Err(_) => unreachable!("gate tables hold valid Pauli strings"),
        })
        .collect();
    CliffordGate::from_map(qubits, CliffordMap::from_images(rows))
}

/// Hadamard: swaps the `X` and `Z` axes.
pub fn h(q: usize) -> CliffordGate {
    map_gate(&[q], &["Z", "X"])
}

/// Phase gate: `X ↦ Y`, `Z` fixed.
pub fn s(q: usize) -> CliffordGate {
    map_gate(&[q], &["Y", "Z"])
}

/// Pauli-X as a gate: flips the sign of `Z`.
pub fn x(q: usize) -> CliffordGate {
    map_gate(&[q], &["X", "-Z"])
}

/// Pauli-Y as a gate: flips the sign of both axes.
pub fn y(q: usize) -> CliffordGate {
    map_gate(&[q], &["-X", "-Z"])
}

/// Pauli-Z as a gate: flips the sign of `X`.
pub fn z(q: usize) -> CliffordGate {
    map_gate(&[q], &["-X", "Z"])
}

/// Controlled-NOT with control `ctrl` and target `tgt`.
pub fn cnot(ctrl: usize, tgt: usize) -> CliffordGate {
    map_gate(&[ctrl, tgt], &["XX", "ZI", "IX", "ZZ"])
}

/// Alias for [`cnot`].
pub fn cx(ctrl: usize, tgt: usize) -> CliffordGate {
    cnot(ctrl, tgt)
}

/// Controlled-Z (symmetric in its qubits).
pub fn cz(a: usize, b: usize) -> CliffordGate {
    map_gate(&[a, b], &["XZ", "ZI", "ZX", "IZ"])
}

/// Swap two qubits.
pub fn swap(a: usize, b: usize) -> CliffordGate {
    map_gate(&[a, b], &["IX", "IZ", "XI", "ZI"])
}

/// Image pairs `(X ↦ ·, Z ↦ ·)` of the six single-qubit axis permutations.
const AXIS_PAIRS: [(&str, &str); 6] = [
    ("X", "Z"),
    ("X", "Y"),
    ("Y", "X"),
    ("Y", "Z"),
    ("Z", "X"),
    ("Z", "Y"),
];

/// The `num`-th element of the 24-element single-qubit Clifford group.
///
/// The index is decomposed as an axis permutation (`num / 4`, see
/// [`AXIS_PAIRS`]) and a pair of sign bits (`num % 4`: bit 0 negates the
/// `X` image, bit 1 the `Z` image).  Every index names a distinct unitary.
pub fn c(num: usize, q: usize) -> CircuitResult<CliffordGate> {
    if num >= 24 {
        return Err(CircuitError::InvalidCliffordIndex(num));
    }
    let (xi, zi) = AXIS_PAIRS[num / 4];
    let mut x_img = match Pauli::parse(xi) {
        Ok(p) => p,
        Err(_) => unreachable!("axis table holds valid Pauli strings"),
    };
    let mut z_img = match Pauli::parse(zi) {
        Ok(p) => p,
        Err(_) => unreachable!("axis table holds valid Pauli strings"),
    };
    if num & 1 == 1 {
        x_img = -x_img;
    }
    if num & 2 == 2 {
        z_img = -z_img;
    }
    Ok(CliffordGate::from_map(
        &[q],
        CliffordMap::from_images(vec![x_img, z_img]),
    ))
}

/// The rotation `exp(i·π/4·g)` as a gate.
///
/// With `qubits: None` the generator is register-sized and the gate is
/// condensed onto its support.  With `qubits: Some(qs)` the generator is
/// written on the listed qubits directly (one local site per entry).
pub fn clifford_rotation_gate(g: &Pauli, qubits: Option<&[usize]>) -> CircuitResult<CliffordGate> {
    match qubits {
        Some(qs) => {
            let mut gate = CliffordGate::new(qs);
            gate.set_generator(g.clone())?;
            Ok(gate)
        }
        None => {
            let (small, support) = g.condense();
            let mut gate = CliffordGate::new(&support);
            gate.set_generator(small)?;
            Ok(gate)
        }
    }
}

/// Brickwall random Clifford circuit: `depth` alternating layers of
/// random two-qubit gates on nearest-neighbour pairs.
pub fn brickwall_rcc(n: usize, depth: usize) -> Circuit {
    let mut circ = Circuit::new();
    for l in 0..depth {
        let mut i = l % 2;
        while i + 1 < n {
            circ.gate(&[i, i + 1]);
            i += 2;
        }
    }
    circ
}

/// One layer of independent random single-qubit gates.
pub fn onsite_rcc(n: usize) -> Circuit {
    let mut circ = Circuit::new();
    for q in 0..n {
        circ.gate(&[q]);
    }
    circ
}

/// A single random Clifford gate over the whole register.
pub fn global_rcc(n: usize) -> Circuit {
    let mut circ = Circuit::new();
    circ.gate(&(0..n).collect::<Vec<_>>());
    circ
}

/// One layer of independent single-qubit Z measurements.
pub fn measurement_layer(qubits: &[usize]) -> Circuit {
    let mut circ = Circuit::new();
    for &q in qubits {
        circ.append(Measurement::new(&[q]));
    }
    circ
}
