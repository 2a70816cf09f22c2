//! Circuits that diagonalize a Pauli operator or a stabilizer state.

use braid_circuit::{Circuit, CliffordGate, gates};
use braid_pauli::{Pauli, StabilizerState, diagonalizing_rotations};

use crate::error::SbrgResult;

/// A circuit of at most two π/4 rotations whose forward pass maps `p`
/// onto `±Z` of qubit `i0`.
///
/// With `causal: true` the rotations are computed on the restriction of
/// `p` to qubits `i0..n`, so they act as the identity on every qubit
/// before the pivot; support of `p` before `i0` is left untouched.  With
/// `causal: false` the rotations may use the full register and clear all
/// off-pivot support.
pub fn diagonalize_pauli(p: &Pauli, i0: usize, causal: bool) -> SbrgResult<Circuit> {
    let mut circ = Circuit::new();
    if causal {
        for g in diagonalizing_rotations(&p.tail(i0), 0) {
            circ.append(shifted_rotation(&g, i0)?);
        }
    } else {
        for g in diagonalizing_rotations(p, i0) {
            circ.append(gates::clifford_rotation_gate(&g, None)?);
        }
    }
    Ok(circ)
}

/// A rotation gate for a generator written on qubits `offset..`, placed
/// at its global positions.
fn shifted_rotation(g: &Pauli, offset: usize) -> SbrgResult<CliffordGate> {
    let (small, support) = g.condense();
    let qubits: Vec<usize> = support.iter().map(|&q| q + offset).collect();
    Ok(gates::clifford_rotation_gate(&small, Some(&qubits))?)
}

/// A circuit whose forward pass maps `state` to `|0…0⟩`.
///
/// The state's encoding map prepares it from the all-zero state, so a
/// single whole-register gate with that map as its *backward* map
/// disentangles the state going forward and re-prepares it going
/// backward.
pub fn diagonalize_state(state: &StabilizerState) -> SbrgResult<Circuit> {
    let n = state.num_qubits();
    let qubits: Vec<usize> = (0..n).collect();
    let mut gate = CliffordGate::new(&qubits);
    gate.set_backward_map(state.to_map())?;
    let mut circ = Circuit::new();
    circ.append(gate);
    Ok(circ)
}
