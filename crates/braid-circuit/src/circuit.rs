//! Clifford circuits: layered sequences of gates and measurements.
//!
//! Appending an element walks existing layers from the back and drops the
//! element into the earliest layer it is independent from, so circuits
//! stay as shallow as the qubit conflicts allow.  A circuit always holds
//! at least one (possibly empty) layer.
//!
//! Purely unitary circuits compile to a single register-wide Clifford map
//! per direction; the maps are cached and reused by `forward`/`backward`
//! until the circuit is mutated.

use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use braid_pauli::CliffordMap;

use crate::error::{CircuitError, CircuitResult};
use crate::gate::CliffordGate;
use crate::layer::Layer;
use crate::measurement::Measurement;
use crate::op::Op;
use crate::target::{Applied, Target};

/// Anything that can be appended to a circuit.
#[derive(Debug, Clone)]
pub enum Fragment {
    /// A single gate.
    Gate(CliffordGate),
    /// A single measurement.
    Measure(Measurement),
    /// A pre-assembled layer, appended as its own time slice.
    Layer(Layer),
    /// A whole circuit, appended layer by layer.
    Circuit(Circuit),
}

impl From<CliffordGate> for Fragment {
    fn from(g: CliffordGate) -> Self {
        Fragment::Gate(g)
    }
}

impl From<Measurement> for Fragment {
    fn from(m: Measurement) -> Self {
        Fragment::Measure(m)
    }
}

impl From<Op> for Fragment {
    fn from(op: Op) -> Self {
        match op {
            Op::Gate(g) => Fragment::Gate(g),
            Op::Measure(m) => Fragment::Measure(m),
        }
    }
}

impl From<Layer> for Fragment {
    fn from(l: Layer) -> Self {
        Fragment::Layer(l)
    }
}

impl From<Circuit> for Fragment {
    fn from(c: Circuit) -> Self {
        Fragment::Circuit(c)
    }
}

/// A layered Clifford circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    layers: Vec<Layer>,
    #[serde(skip)]
    forward_map: Option<CliffordMap>,
    #[serde(skip)]
    backward_map: Option<CliffordMap>,
}

impl Circuit {
    /// An empty circuit.
    pub fn new() -> Self {
        Self {
            layers: vec![Layer::new()],
            forward_map: None,
            backward_map: None,
        }
    }

    /// The layers, in application order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Number of layers (the circuit depth).
    pub fn depth(&self) -> usize {
        self.layers.iter().filter(|l| !l.is_empty()).count()
    }

    /// Smallest register this circuit fits on (largest touched qubit + 1).
    pub fn num_qubits(&self) -> usize {
        self.layers
            .iter()
            .flat_map(|l| l.ops())
            .flat_map(|op| op.qubits())
            .map(|&q| q + 1)
            .max()
            .unwrap_or(0)
    }

    /// True if the circuit contains no measurements.
    pub fn is_unitary(&self) -> bool {
        self.layers.iter().all(Layer::is_unitary)
    }

    /// Append a gate, measurement, layer, or whole circuit.
    pub fn append(&mut self, fragment: impl Into<Fragment>) -> &mut Self {
        self.forward_map = None;
        self.backward_map = None;
        match fragment.into() {
            Fragment::Gate(g) => self.append_op(Op::Gate(g)),
            Fragment::Measure(m) => self.append_op(Op::Measure(m)),
            Fragment::Layer(l) => self.append_layer(l),
            Fragment::Circuit(c) => {
                for layer in c.layers {
                    self.append_layer(layer);
                }
            }
        }
        self
    }

    /// Append a random gate on the given qubits.
    pub fn gate(&mut self, qubits: &[usize]) -> &mut Self {
        self.append(CliffordGate::new(qubits))
    }

    /// Append a measurement of the given qubits.
    pub fn measure(&mut self, qubits: &[usize]) -> &mut Self {
        self.append(Measurement::new(qubits))
    }

    /// Greedy backward insertion: slide past every trailing layer the
    /// element is independent from, opening a new layer only when even the
    /// last one conflicts.  Sliding is sound because disjoint elements
    /// commute, measurements included.
    fn append_op(&mut self, op: Op) {
        let len = self.layers.len();
        let mut k = len;
        while k > 0 && self.layers[k - 1].independent_from(&op) {
            k -= 1;
        }
        if k == len {
            let mut layer = Layer::new();
            layer.push(op);
            self.layers.push(layer);
        } else {
            self.layers[k].push(op);
        }
    }

    fn append_layer(&mut self, layer: Layer) {
        match self.layers.last() {
            Some(last) if last.is_empty() => {
                self.layers.pop();
            }
            _ => {}
        }
        self.layers.push(layer);
    }

    /// Total number of outcome bits the circuit's measurements produce.
    pub fn n_out(&self) -> usize {
        self.layers.iter().map(Layer::n_out).sum()
    }

    /// Concatenated outcome record over all measurements, in temporal
    /// order, if every measurement has been sampled.
    pub fn out(&self) -> Option<Vec<u8>> {
        let mut bits = Vec::with_capacity(self.n_out());
        for layer in &self.layers {
            bits.extend(layer.out()?);
        }
        Some(bits)
    }

    /// Distribute an outcome record over the circuit's measurements.
    pub fn set_out(&mut self, bits: &[u8]) -> CircuitResult<()> {
        if bits.len() != self.n_out() {
            return Err(CircuitError::OutcomeLengthMismatch {
                expected: self.n_out(),
                got: bits.len(),
            });
        }
        let mut offset = 0;
        for layer in &mut self.layers {
            let take = layer.n_out();
            layer.set_out(&bits[offset..offset + take])?;
            offset += take;
        }
        Ok(())
    }

    /// Forget everything the circuit has recorded: measurement outcomes
    /// and the pinned samples of random gates.  The next forward pass
    /// samples both afresh.  Compiled maps are dropped with them.
    pub fn reset(&mut self) {
        self.forward_map = None;
        self.backward_map = None;
        for layer in &mut self.layers {
            layer.reset();
        }
    }

    /// Run the circuit over a target, first layer first.
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
        for layer in &mut self.layers {
            applied.absorb(layer.forward(target, rng)?);
        }
        Ok(applied)
    }

    /// Run the inverse circuit over a target, last layer first.
    /// Measurements replay their recorded outcomes as postselections.
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
        for layer in self.layers.iter_mut().rev() {
            applied.absorb(layer.backward(target, rng)?);
        }
        Ok(applied)
    }

    /// Compile and cache register-wide forward and backward maps.
    ///
    /// A circuit containing measurements has no unitary map; compilation
    /// is then a no-op and `forward`/`backward` keep running element by
    /// element.
    pub fn compile(&mut self, n: usize) -> CircuitResult<()> {
        if !self.is_unitary() {
            tracing::debug!("circuit contains measurements, skipping map compilation");
            return Ok(());
        }
        let mut forward = CliffordMap::identity(n);
        let mut backward = CliffordMap::identity(n);
        for layer in &mut self.layers {
            if layer.is_empty() {
                continue;
            }
            let (f, b) = layer.compile(n)?;
            forward = forward.compose(f);
            backward = b.compose(&backward);
        }
        self.forward_map = Some(forward);
        self.backward_map = Some(backward);
        Ok(())
    }

    /// The compiled forward map, if [`Self::compile`] has produced one.
    pub fn forward_map(&self) -> Option<&CliffordMap> {
        self.forward_map.as_ref()
    }

    /// The compiled backward map, if [`Self::compile`] has produced one.
    pub fn backward_map(&self) -> Option<&CliffordMap> {
        self.backward_map.as_ref()
    }
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Circuit {
    /// Layers are printed last first, like a product of operators acting
    /// on a ket to the right.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for layer in self.layers.iter().rev() {
            if layer.is_empty() {
                continue;
            }
            if !first {
                writeln!(f)?;
            }
            write!(f, "{layer}")?;
            first = false;
        }
        if first {
            write!(f, "||")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use braid_pauli::{Pauli, StabilizerState};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rotation_gate(qubits: &[usize], s: &str) -> CliffordGate {
        let mut g = CliffordGate::new(qubits);
        g.set_generator(Pauli::parse(s).unwrap()).unwrap();
        g
    }

    #[test]
    fn independent_gates_share_a_layer() {
        let mut circ = Circuit::new();
        circ.append(rotation_gate(&[0], "Z"));
        circ.append(rotation_gate(&[1], "X"));
        assert_eq!(circ.depth(), 1);
    }

    #[test]
    fn conflicting_gates_stack_in_depth() {
        let mut circ = Circuit::new();
        circ.append(rotation_gate(&[0, 1], "XX"));
        circ.append(rotation_gate(&[1, 2], "ZZ"));
        // slides past [1,2] but conflicts with [0,1]: second layer
        circ.append(rotation_gate(&[0], "Y"));
        assert_eq!(circ.depth(), 2);
        assert_eq!(circ.layers()[1].ops().len(), 2);
    }

    #[test]
    fn gate_slides_past_independent_layers() {
        let mut circ = Circuit::new();
        circ.append(rotation_gate(&[0], "Z"));
        circ.append(rotation_gate(&[1], "X"));
        circ.append(rotation_gate(&[2], "Y"));
        assert_eq!(circ.depth(), 1);
        assert_eq!(circ.layers()[0].ops().len(), 3);
    }

    #[test]
    fn dependent_measurement_opens_a_new_layer() {
        let mut circ = Circuit::new();
        circ.measure(&[0]);
        circ.append(rotation_gate(&[1], "X"));
        assert_eq!(circ.depth(), 1);
        circ.measure(&[1]);
        assert_eq!(circ.depth(), 2);
    }

    #[test]
    fn compiled_forward_matches_layer_by_layer() {
        let mut circ = Circuit::new();
        circ.append(rotation_gate(&[0, 1], "XX"));
        circ.append(rotation_gate(&[1, 2], "ZZ"));
        circ.append(rotation_gate(&[0], "Y"));
        let mut rng = StdRng::seed_from_u64(0);
        let mut slow = Pauli::parse("ZIX").unwrap();
        circ.clone().forward(&mut slow, &mut rng).unwrap();
        circ.compile(3).unwrap();
        let mut fast = Pauli::parse("ZIX").unwrap();
        circ.forward(&mut fast, &mut rng).unwrap();
        assert_eq!(fast, slow);
    }

    #[test]
    fn unitary_forward_then_backward_restores_the_state() {
        let mut circ = Circuit::new();
        circ.append(rotation_gate(&[0, 1], "XY"));
        circ.gate(&[1, 2]);
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = StabilizerState::zero_state(3);
        let reference = state.clone();
        circ.forward(&mut state, &mut rng).unwrap();
        circ.backward(&mut state, &mut rng).unwrap();
        assert_eq!(state, reference);
    }

    #[test]
    fn backward_replays_the_measurement_record() {
        let mut circ = Circuit::new();
        circ.gate(&[0, 1]);
        circ.measure(&[0, 1]);
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = StabilizerState::zero_state(2);
        let fwd = circ.forward(&mut state, &mut rng).unwrap();
        assert!(fwd.consistent);
        assert_eq!(circ.out().map(|o| o.len()), Some(2));
        // the collapsed state satisfies its own record deterministically
        let bwd = circ.backward(&mut state, &mut rng).unwrap();
        assert!(bwd.consistent);
        assert_eq!(bwd.log2prob, 0.0);
    }

    #[test]
    fn outcome_record_roundtrip() {
        let mut circ = Circuit::new();
        circ.measure(&[0]);
        circ.measure(&[1, 2]);
        assert_eq!(circ.n_out(), 3);
        assert_eq!(circ.out(), None);
        circ.set_out(&[1, 0, 1]).unwrap();
        assert_eq!(circ.out(), Some(vec![1, 0, 1]));
        circ.reset();
        assert_eq!(circ.out(), None);
    }

    #[test]
    fn append_circuit_concatenates_layers() {
        let mut a = Circuit::new();
        a.append(rotation_gate(&[0], "Z"));
        let mut b = Circuit::new();
        b.append(rotation_gate(&[0], "X"));
        b.append(rotation_gate(&[1], "Y"));
        a.append(b);
        assert_eq!(a.depth(), 2);
    }

    #[test]
    fn display_prints_last_layer_first() {
        let mut circ = Circuit::new();
        circ.append(rotation_gate(&[0], "Z"));
        circ.append(rotation_gate(&[0], "X"));
        assert_eq!(circ.to_string(), "|[0]|\n|[0]|");
        assert_eq!(Circuit::new().to_string(), "||");
    }
}
