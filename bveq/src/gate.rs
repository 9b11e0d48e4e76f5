// bveq - static and dynamic Bernstein-Vazirani circuits and their
//        equivalence, checked with the ZX-calculus and decision diagrams
// Copyright (C) 2021 - Aleks Kissinger
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::circuit::Circuit;
use crate::graph::*;
use crate::phase::Phase;
use itertools::Itertools;
use num::Zero;

#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum GType {
    XPhase,
    NOT,
    ZPhase,
    Z,
    S,
    T,
    Sdg,
    Tdg,
    CNOT,
    CZ,
    SWAP,
    HAD,
    TOFF,
    CCZ,
    Barrier,
    Measure,
    Reset,
    UnknownGate,
}

pub use GType::*;

impl GType {
    pub fn from_qasm_name(s: &str) -> GType {
        match s {
            "rz" => ZPhase,
            "rx" => XPhase,
            "x" => NOT,
            "z" => Z,
            "s" => S,
            "t" => T,
            "sdg" => Sdg,
            "tdg" => Tdg,
            "h" => HAD,
            "cx" => CNOT,
            "CX" => CNOT,
            "cz" => CZ,
            "ccx" => TOFF,
            "ccz" => CCZ,
            "swap" => SWAP,
            "barrier" => Barrier,
            "measure" => Measure,
            "reset" => Reset,
            _ => UnknownGate,
        }
    }

    pub fn qasm_name(&self) -> &'static str {
        match self {
            ZPhase => "rz",
            NOT => "x",
            XPhase => "rx",
            Z => "z",
            S => "s",
            T => "t",
            Sdg => "sdg",
            Tdg => "tdg",
            HAD => "h",
            CNOT => "cx",
            CZ => "cz",
            TOFF => "ccx",
            CCZ => "ccz",
            SWAP => "swap",
            Barrier => "barrier",
            Measure => "measure",
            Reset => "reset",
            UnknownGate => "UNKNOWN",
        }
    }

    /// number of qubits the gate acts on
    ///
    /// If the gate type requires a fixed number of qubits, return it,
    /// otherwise None.
    pub fn num_qubits(&self) -> Option<usize> {
        match self {
            CNOT | CZ | SWAP => Some(2),
            TOFF | CCZ => Some(3),
            Barrier | UnknownGate => None,
            _ => Some(1),
        }
    }

    /// Gates that act as a linear map on the qubits
    ///
    /// Barriers count as unitary (they are the identity), measurements and
    /// resets do not.
    pub fn is_unitary(&self) -> bool {
        !matches!(self, Measure | Reset | UnknownGate)
    }

    pub fn is_clifford(&self) -> bool {
        matches!(self, NOT | Z | S | Sdg | CNOT | CZ | SWAP | HAD)
    }
}

#[derive(PartialEq, Eq, Clone, Debug, Hash)]
pub struct Gate {
    pub t: GType,
    pub qs: Vec<usize>,
    /// classical bits written by the gate, only used by measurements
    pub cs: Vec<usize>,
    pub phase: Phase,
}

impl Default for Gate {
    fn default() -> Self {
        Gate {
            t: UnknownGate,
            qs: vec![],
            cs: vec![],
            phase: Phase::zero(),
        }
    }
}

impl Gate {
    pub fn new(t: GType, qs: Vec<usize>) -> Gate {
        Gate {
            t,
            qs,
            ..Default::default()
        }
    }

    pub fn new_with_phase(t: GType, qs: Vec<usize>, phase: impl Into<Phase>) -> Gate {
        Gate {
            t,
            qs,
            phase: phase.into(),
            ..Default::default()
        }
    }

    pub fn measure(qubit: usize, clbit: usize) -> Gate {
        Gate {
            t: Measure,
            qs: vec![qubit],
            cs: vec![clbit],
            ..Default::default()
        }
    }

    pub fn from_qasm_name(s: &str) -> Gate {
        Gate::new(GType::from_qasm_name(s), vec![])
    }

    pub fn qasm_name(&self) -> &'static str {
        self.t.qasm_name()
    }

    pub fn to_qasm(&self) -> String {
        let mut s = String::from(self.qasm_name());

        if let ZPhase | XPhase = self.t {
            s += &format!("({}*pi)", self.phase.to_f64());
        }

        s += " ";
        s += &self.qs.iter().map(|i| format!("q[{i}]")).join(", ");

        if self.t == Measure {
            s += &format!(" -> c[{}]", self.cs[0]);
        }

        s
    }

    pub fn adjoint(&mut self) {
        match self.t {
            ZPhase | XPhase => {
                self.phase *= -1;
            }
            S => self.t = Sdg,
            T => self.t = Tdg,
            Sdg => self.t = S,
            Tdg => self.t = T,
            _ => {} // everything else is self-adjoint
        }
    }

    fn push_ccz_decomp(circ: &mut Circuit, qs: &[usize]) {
        circ.push(Gate::new(CNOT, vec![qs[1], qs[2]]));
        circ.push(Gate::new(Tdg, vec![qs[2]]));
        circ.push(Gate::new(CNOT, vec![qs[0], qs[2]]));
        circ.push(Gate::new(T, vec![qs[2]]));
        circ.push(Gate::new(CNOT, vec![qs[1], qs[2]]));
        circ.push(Gate::new(Tdg, vec![qs[2]]));
        circ.push(Gate::new(CNOT, vec![qs[0], qs[2]]));
        circ.push(Gate::new(T, vec![qs[1]]));
        circ.push(Gate::new(T, vec![qs[2]]));
        circ.push(Gate::new(CNOT, vec![qs[0], qs[1]]));
        circ.push(Gate::new(T, vec![qs[0]]));
        circ.push(Gate::new(Tdg, vec![qs[1]]));
        circ.push(Gate::new(CNOT, vec![qs[0], qs[1]]));
    }

    /// number of 1- and 2-qubit Clifford + phase gates needed to realise this gate
    pub fn num_basic_gates(&self) -> usize {
        match self.t {
            CCZ => 13,
            TOFF => 15,
            _ => 1,
        }
    }

    /// decompose as 1 and 2 qubit Clifford + phase gates and push on to given circuit
    ///
    /// If a gate is already basic, push a copy of itself.
    pub fn push_basic_gates(&self, circ: &mut Circuit) {
        match self.t {
            CCZ => {
                Gate::push_ccz_decomp(circ, &self.qs);
            }
            TOFF => {
                circ.push(Gate::new(HAD, vec![self.qs[2]]));
                Gate::push_ccz_decomp(circ, &self.qs);
                circ.push(Gate::new(HAD, vec![self.qs[2]]));
            }
            _ => circ.push(self.clone()),
        }
    }

    /// Turn the current output of `qubit` into a spider and grow a fresh output
    fn add_spider<G: GraphLike>(
        graph: &mut G,
        qubit: usize,
        ty: VType,
        et: EType,
        phase: impl Into<Phase>,
    ) -> V {
        let v0 = graph.outputs()[qubit];
        let prev = graph
            .neighbors(v0)
            .next()
            .expect("Output should have 1 neighbor.");
        let row = graph.row(v0);
        graph.set_vertex_type(v0, ty);
        graph.set_phase(v0, phase);
        let outp = graph.add_vertex_with_data(VData {
            ty: VType::B,
            qubit: graph.qubit(v0),
            row: row + 1.0,
            ..Default::default()
        });

        graph.add_edge(v0, outp);
        graph.outputs_mut()[qubit] = outp;

        if et == EType::H {
            graph.toggle_edge_type(v0, prev);
        }

        v0
    }

    /// Put two spiders on the same row and connect them
    fn add_two_qubit<G: GraphLike>(
        graph: &mut G,
        (q0, t0): (usize, VType),
        (q1, t1): (usize, VType),
        et: EType,
    ) -> Vec<V> {
        let v0 = Gate::add_spider(graph, q0, t0, EType::N, Phase::zero());
        let v1 = Gate::add_spider(graph, q1, t1, EType::N, Phase::zero());
        let row = graph.row(v0).max(graph.row(v1));
        for (v, q) in [(v0, q0), (v1, q1)] {
            graph.set_row(v, row);
            let o = graph.outputs()[q];
            graph.set_row(o, row + 1.0);
        }
        graph.add_edge_with_type(v0, v1, et);
        vec![v0, v1]
    }

    /// add the gate to the given graph using spiders
    ///
    /// The i-th entry of `graph.outputs()` is the open end of qubit i, so the
    /// graph must come from [`Circuit::to_graph`]. Barriers leave the graph
    /// unchanged. Returns the vertices that were added or modified.
    ///
    /// Panics on measurements and resets, which have no spider form here;
    /// callers strip them first.
    pub fn add_to_graph(&self, graph: &mut impl GraphLike) -> Vec<V> {
        match self.t {
            ZPhase => vec![Gate::add_spider(
                graph,
                self.qs[0],
                VType::Z,
                EType::N,
                self.phase,
            )],
            Z => vec![Gate::add_spider(
                graph,
                self.qs[0],
                VType::Z,
                EType::N,
                Phase::new(1),
            )],
            S => vec![Gate::add_spider(
                graph,
                self.qs[0],
                VType::Z,
                EType::N,
                Phase::from((1, 2)),
            )],
            Sdg => vec![Gate::add_spider(
                graph,
                self.qs[0],
                VType::Z,
                EType::N,
                Phase::from((-1, 2)),
            )],
            T => vec![Gate::add_spider(
                graph,
                self.qs[0],
                VType::Z,
                EType::N,
                Phase::from((1, 4)),
            )],
            Tdg => vec![Gate::add_spider(
                graph,
                self.qs[0],
                VType::Z,
                EType::N,
                Phase::from((-1, 4)),
            )],
            XPhase => {
                // an X spider is rx up to a phase of half its angle
                graph.scalar_mut().mul_phase(-(self.phase / 2));
                vec![Gate::add_spider(
                    graph,
                    self.qs[0],
                    VType::X,
                    EType::N,
                    self.phase,
                )]
            }
            NOT => vec![Gate::add_spider(
                graph,
                self.qs[0],
                VType::X,
                EType::N,
                Phase::new(1),
            )],
            HAD => vec![Gate::add_spider(
                graph,
                self.qs[0],
                VType::Z,
                EType::H,
                Phase::zero(),
            )],
            CNOT => Gate::add_two_qubit(
                graph,
                (self.qs[0], VType::Z),
                (self.qs[1], VType::X),
                EType::N,
            ),
            CZ => Gate::add_two_qubit(
                graph,
                (self.qs[0], VType::Z),
                (self.qs[1], VType::Z),
                EType::H,
            ),
            SWAP => {
                graph.outputs_mut().swap(self.qs[0], self.qs[1]);
                vec![]
            }
            CCZ | TOFF => {
                let mut c = Circuit::new(0);
                self.push_basic_gates(&mut c);
                c.gates
                    .iter()
                    .flat_map(|g| g.add_to_graph(graph))
                    .collect()
            }
            Barrier => vec![],
            Measure | Reset | UnknownGate => {
                panic!("{} has no ZX-diagram", self.qasm_name())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qasm_names_round_trip() {
        for t in [
            XPhase, NOT, ZPhase, Z, S, T, Sdg, Tdg, CNOT, CZ, SWAP, HAD, TOFF, CCZ, Barrier,
            Measure, Reset,
        ] {
            assert_eq!(GType::from_qasm_name(t.qasm_name()), t);
        }
        assert_eq!(GType::from_qasm_name("u3"), UnknownGate);
    }

    #[test]
    fn to_qasm() {
        assert_eq!(Gate::new(CNOT, vec![0, 2]).to_qasm(), "cx q[0], q[2]");
        assert_eq!(Gate::measure(1, 0).to_qasm(), "measure q[1] -> c[0]");
        assert_eq!(Gate::new(Reset, vec![0]).to_qasm(), "reset q[0]");
        assert_eq!(
            Gate::new_with_phase(ZPhase, vec![0], (1, 2)).to_qasm(),
            "rz(0.5*pi) q[0]"
        );
    }

    #[test]
    fn adjoints() {
        let mut g = Gate::new(S, vec![0]);
        g.adjoint();
        assert_eq!(g.t, Sdg);
        let mut g = Gate::new_with_phase(XPhase, vec![0], (1, 4));
        g.adjoint();
        assert_eq!(g.phase, Phase::from((-1, 4)));
        let mut g = Gate::new(HAD, vec![0]);
        g.adjoint();
        assert_eq!(g, Gate::new(HAD, vec![0]));
    }

    #[test]
    fn basic_gates() {
        let mut c = Circuit::new(3);
        Gate::new(TOFF, vec![0, 1, 2]).push_basic_gates(&mut c);
        assert_eq!(c.num_gates(), Gate::new(TOFF, vec![0, 1, 2]).num_basic_gates());
        assert_eq!(c.num_gates_of_type(CNOT), 6);
        assert_eq!(c.num_gates_of_type(HAD), 2);
    }
}
