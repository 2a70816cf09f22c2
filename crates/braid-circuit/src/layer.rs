//! Layers of mutually independent circuit elements.
//!
//! A layer holds elements acting on pairwise disjoint qubits, so their
//! order within the layer is irrelevant and a purely unitary layer has a
//! single register-wide Clifford map.  That map is compiled lazily and
//! cached; any mutation drops the cache.
//!
//! [`Circuit::append`](crate::circuit::Circuit::append) is responsible for
//! only ever pushing independent elements into one layer.

use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use braid_pauli::{CliffordMap, QubitMask};

use crate::error::{CircuitError, CircuitResult};
use crate::op::Op;
use crate::target::{Applied, Target};

/// One time slice of a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    ops: Vec<Op>,
    #[serde(skip)]
    forward_map: Option<CliffordMap>,
    #[serde(skip)]
    backward_map: Option<CliffordMap>,
}

impl Layer {
    /// An empty layer.
    pub fn new() -> Self {
        Self {
            ops: vec![],
            forward_map: None,
            backward_map: None,
        }
    }

    /// The elements of the layer.
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// True if the layer has no elements.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// True if the layer contains no measurements.
    pub fn is_unitary(&self) -> bool {
        self.ops.iter().all(Op::is_unitary)
    }

    /// True when `op` shares no qubit with any element of this layer.
    pub fn independent_from(&self, op: &Op) -> bool {
        self.ops.iter().all(|o| o.independent_from(op))
    }

    /// Reset every element (outcomes, pinned random samples) and drop
    /// any compiled map.
    pub fn reset(&mut self) {
        self.forward_map = None;
        self.backward_map = None;
        for op in &mut self.ops {
            op.reset();
        }
    }

    /// Add an element, dropping any compiled map.
    pub fn push(&mut self, op: Op) {
        self.forward_map = None;
        self.backward_map = None;
        self.ops.push(op);
    }

    /// Number of outcome bits the layer's measurements produce.
    pub fn n_out(&self) -> usize {
        self.ops
            .iter()
            .map(|op| match op {
                Op::Measure(m) => m.n_out(),
                Op::Gate(_) => 0,
            })
            .sum()
    }

    /// Concatenated outcome bits of the layer's measurements, if all have
    /// been sampled.
    pub fn out(&self) -> Option<Vec<u8>> {
        let mut bits = Vec::with_capacity(self.n_out());
        for op in &self.ops {
            if let Op::Measure(m) = op {
                bits.extend_from_slice(m.out()?);
            }
        }
        Some(bits)
    }

    /// Distribute an outcome record over the layer's measurements, in
    /// element order.
    pub fn set_out(&mut self, bits: &[u8]) -> CircuitResult<()> {
        if bits.len() != self.n_out() {
            return Err(CircuitError::OutcomeLengthMismatch {
                expected: self.n_out(),
                got: bits.len(),
            });
        }
        let mut offset = 0;
        for op in &mut self.ops {
            if let Op::Measure(m) = op {
                m.set_out(bits[offset..offset + m.n_out()].to_vec())?;
                offset += m.n_out();
            }
        }
        Ok(())
    }

    /// Apply the layer in circuit order, using the compiled map when one
    /// is cached for this register size.
    pub fn forward<T: Target + ?Sized>(
        &mut self,
        target: &mut T,
        rng: &mut dyn RngCore,
    ) -> CircuitResult<Applied> {
        if let Some(map) = &self.forward_map {
            if map.num_qubits() == target.num_qubits() {
                target.transform_by(map, None);
                return Ok(Applied::unit());
            }
        }
        let mut applied = Applied::unit();
        for op in &mut self.ops {
            applied.absorb(op.forward(target, rng)?);
        }
        Ok(applied)
    }

    /// Apply the layer in reverse circuit order.
    pub fn backward<T: Target + ?Sized>(
        &mut self,
        target: &mut T,
        rng: &mut dyn RngCore,
    ) -> CircuitResult<Applied> {
        if let Some(map) = &self.backward_map {
            if map.num_qubits() == target.num_qubits() {
                target.transform_by(map, None);
                return Ok(Applied::unit());
            }
        }
        let mut applied = Applied::unit();
        for op in &mut self.ops {
            applied.absorb(op.backward(target, rng)?);
        }
        Ok(applied)
    }

    /// Compile the layer into register-wide forward and backward maps.
    ///
    /// Fails on layers containing measurements, and on random gates that
    /// have never been applied.
    pub fn compile(&mut self, n: usize) -> CircuitResult<(&CliffordMap, &CliffordMap)> {
        if !self.is_unitary() {
            return Err(CircuitError::NonUnitaryLayer);
        }
        let cached = matches!(&self.forward_map, Some(m) if m.num_qubits() == n)
            && matches!(&self.backward_map, Some(m) if m.num_qubits() == n);
        if !cached {
            let mut forward = CliffordMap::identity(n);
            let mut backward = CliffordMap::identity(n);
            for op in &mut self.ops {
                if let Op::Gate(gate) = op {
                    let mask = QubitMask::new(gate.qubits(), n)?;
                    let (f, b) = gate.compile()?;
                    forward.embed(f, &mask);
                    backward.embed(b, &mask);
                }
            }
            self.forward_map = Some(forward);
            self.backward_map = Some(backward);
        }
        match (&self.forward_map, &self.backward_map) {
            (Some(f), Some(b)) => Ok((f, b)),
            _ => unreachable!("both maps were just cached"),
        }
    }
}

impl Default for Layer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|")?;
        for op in &self.ops {
            write!(f, "{op}|")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::CliffordGate;
    use crate::measurement::Measurement;
    use braid_pauli::Pauli;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rotation_gate(qubits: &[usize], s: &str) -> Op {
        let mut g = CliffordGate::new(qubits);
        g.set_generator(Pauli::parse(s).unwrap()).unwrap();
        g.into()
    }

    #[test]
    fn compiled_layer_matches_elementwise_application() {
        let mut layer = Layer::new();
        layer.push(rotation_gate(&[0], "Z"));
        layer.push(rotation_gate(&[2, 1], "XY"));
        let mut rng = StdRng::seed_from_u64(0);
        let mut elementwise = Pauli::parse("XYZ").unwrap();
        layer.clone().forward(&mut elementwise, &mut rng).unwrap();
        let (f, _) = layer.compile(3).map(|(f, b)| (f.clone(), b.clone())).unwrap();
        assert_eq!(f.transform(&Pauli::parse("XYZ").unwrap()), elementwise);
    }

    #[test]
    fn mutation_invalidates_the_cache_result() {
        let mut layer = Layer::new();
        layer.push(rotation_gate(&[0], "Z"));
        let first = layer.compile(2).map(|(f, _)| f.clone()).unwrap();
        layer.push(rotation_gate(&[1], "X"));
        let second = layer.compile(2).map(|(f, _)| f.clone()).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn measured_layer_has_no_map() {
        let mut layer = Layer::new();
        layer.push(Measurement::new(&[0]).into());
        assert!(matches!(layer.compile(1), Err(CircuitError::NonUnitaryLayer)));
    }

    #[test]
    fn out_roundtrip_over_measurements() {
        let mut layer = Layer::new();
        layer.push(Measurement::new(&[0]).into());
        layer.push(rotation_gate(&[1], "Z"));
        layer.push(Measurement::new(&[2, 3]).into());
        assert_eq!(layer.n_out(), 3);
        assert_eq!(layer.out(), None);
        layer.set_out(&[1, 0, 1]).unwrap();
        assert_eq!(layer.out(), Some(vec![1, 0, 1]));
    }
}
