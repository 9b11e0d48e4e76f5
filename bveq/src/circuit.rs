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

use crate::error::Error;
use crate::gate::*;
use crate::graph::*;
use crate::phase::Phase;
use num::{Rational64, Zero};
use openqasm::{ast::Symbol, translate::Value, GenericError, ProgramVisitor};
use std::collections::VecDeque;
use std::fmt;
use std::path::Path;

/// A type for quantum circuits
///
/// Besides unitary gates, a circuit may contain barriers, mid-circuit
/// measurements into classical bits, and resets.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Circuit {
    nqubits: usize,
    nclbits: usize,
    pub gates: VecDeque<Gate>,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct CircuitStats {
    pub qubits: usize,
    pub total: usize,
    pub oneq: usize,
    pub twoq: usize,
    pub moreq: usize,
    pub cliff: usize,
    pub non_cliff: usize,
    pub measurements: usize,
    pub resets: usize,
    pub barriers: usize,
}

impl CircuitStats {
    pub fn make(c: &Circuit) -> Self {
        let mut s = CircuitStats {
            qubits: c.num_qubits(),
            total: c.num_gates(),
            oneq: 0,
            twoq: 0,
            moreq: 0,
            cliff: 0,
            non_cliff: 0,
            measurements: 0,
            resets: 0,
            barriers: 0,
        };
        for g in &c.gates {
            match g.t {
                Measure => {
                    s.measurements += 1;
                    continue;
                }
                Reset => {
                    s.resets += 1;
                    continue;
                }
                Barrier => {
                    s.barriers += 1;
                    continue;
                }
                _ => {}
            }

            match g.qs.len() {
                1 => s.oneq += 1,
                2 => s.twoq += 1,
                _ => s.moreq += 1,
            }

            let cliff = match g.t {
                ZPhase | XPhase => g.phase.is_clifford(),
                t => t.is_clifford(),
            };
            if cliff {
                s.cliff += 1;
            } else {
                s.non_cliff += 1;
            }
        }
        s
    }
}

impl fmt::Display for CircuitStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Circuit with {} qubits, {} gates\n  1-qubit: {}\n  2-qubit: {}\n  n-qubit: {}\n  clifford: {}\n  non-clifford: {}\n  measurements: {}\n  resets: {}\n  barriers: {}",
            self.qubits,
            self.total,
            self.oneq,
            self.twoq,
            self.moreq,
            self.cliff,
            self.non_cliff,
            self.measurements,
            self.resets,
            self.barriers
        )
    }
}

impl Circuit {
    pub fn new(nqubits: usize) -> Circuit {
        Circuit::with_clbits(nqubits, 0)
    }

    pub fn with_clbits(nqubits: usize, nclbits: usize) -> Circuit {
        Circuit {
            gates: VecDeque::new(),
            nqubits,
            nclbits,
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.nqubits
    }

    pub fn num_clbits(&self) -> usize {
        self.nclbits
    }

    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    pub fn num_gates_of_type(&self, t: GType) -> usize {
        self.gates.iter().filter(|g| g.t == t).count()
    }

    pub fn push(&mut self, g: Gate) {
        self.gates.push_back(g);
    }

    pub fn add_gate_with_phase(&mut self, name: &str, qs: Vec<usize>, phase: impl Into<Phase>) {
        self.push(Gate::new_with_phase(GType::from_qasm_name(name), qs, phase));
    }

    pub fn add_gate(&mut self, name: &str, qs: Vec<usize>) {
        self.add_gate_with_phase(name, qs, Rational64::zero());
    }

    pub fn x(&mut self, q: usize) -> &mut Self {
        self.push(Gate::new(NOT, vec![q]));
        self
    }

    pub fn z(&mut self, q: usize) -> &mut Self {
        self.push(Gate::new(Z, vec![q]));
        self
    }

    pub fn h(&mut self, q: usize) -> &mut Self {
        self.push(Gate::new(HAD, vec![q]));
        self
    }

    pub fn s(&mut self, q: usize) -> &mut Self {
        self.push(Gate::new(S, vec![q]));
        self
    }

    pub fn sdg(&mut self, q: usize) -> &mut Self {
        self.push(Gate::new(Sdg, vec![q]));
        self
    }

    pub fn t(&mut self, q: usize) -> &mut Self {
        self.push(Gate::new(T, vec![q]));
        self
    }

    pub fn tdg(&mut self, q: usize) -> &mut Self {
        self.push(Gate::new(Tdg, vec![q]));
        self
    }

    /// A Z-rotation by `phase * pi`
    pub fn rz(&mut self, phase: impl Into<Phase>, q: usize) -> &mut Self {
        self.push(Gate::new_with_phase(ZPhase, vec![q], phase));
        self
    }

    /// An X-rotation by `phase * pi`
    pub fn rx(&mut self, phase: impl Into<Phase>, q: usize) -> &mut Self {
        self.push(Gate::new_with_phase(XPhase, vec![q], phase));
        self
    }

    pub fn cx(&mut self, control: usize, target: usize) -> &mut Self {
        self.push(Gate::new(CNOT, vec![control, target]));
        self
    }

    pub fn cz(&mut self, q0: usize, q1: usize) -> &mut Self {
        self.push(Gate::new(CZ, vec![q0, q1]));
        self
    }

    pub fn swap(&mut self, q0: usize, q1: usize) -> &mut Self {
        self.push(Gate::new(SWAP, vec![q0, q1]));
        self
    }

    pub fn ccx(&mut self, c0: usize, c1: usize, target: usize) -> &mut Self {
        self.push(Gate::new(TOFF, vec![c0, c1, target]));
        self
    }

    pub fn barrier(&mut self, qs: Vec<usize>) -> &mut Self {
        self.push(Gate::new(Barrier, qs));
        self
    }

    /// A barrier across every qubit
    pub fn barrier_all(&mut self) -> &mut Self {
        self.barrier((0..self.nqubits).collect())
    }

    /// Measure `qubit` into `clbit`, growing the classical register if needed
    pub fn measure(&mut self, qubit: usize, clbit: usize) -> &mut Self {
        self.nclbits = self.nclbits.max(clbit + 1);
        self.push(Gate::measure(qubit, clbit));
        self
    }

    pub fn reset(&mut self, q: usize) -> &mut Self {
        self.push(Gate::new(Reset, vec![q]));
        self
    }

    /// True if the circuit has no measurements or resets
    pub fn is_unitary(&self) -> bool {
        self.gates.iter().all(|g| g.t.is_unitary())
    }

    pub fn reverse(&mut self) {
        self.gates.make_contiguous().reverse();
    }

    /// Replace the circuit by its inverse
    ///
    /// Only meaningful for unitary circuits.
    pub fn adjoint(&mut self) {
        self.reverse();
        for g in &mut self.gates {
            g.adjoint();
        }
    }

    pub fn to_adjoint(&self) -> Circuit {
        let mut c = self.clone();
        c.adjoint();
        c
    }

    pub fn to_qasm(&self) -> String {
        String::from("OPENQASM 2.0;\ninclude \"qelib1.inc\";\n") + &self.to_string()
    }

    fn from_qasm_parser(read: impl FnOnce(&mut openqasm::Parser)) -> Result<Circuit, Error> {
        let mut cache = openqasm::SourceCache::new();
        let mut parser = openqasm::Parser::new(&mut cache)
            .with_file_policy(openqasm::parser::FilePolicy::Ignore);
        read(&mut parser);
        parser.parse_source::<String>(
            "
            opaque rz(phase) q;
            opaque rx(phase) q;
            opaque x q;
            opaque z q;
            opaque s q;
            opaque t q;
            opaque sdg q;
            opaque tdg q;
            opaque h q;
            opaque cx a, b;
            opaque cz a, b;
            opaque ccx a, b, c;
            opaque ccz a, b, c;
            opaque swap a, b;
        "
            .to_string(),
            None,
        );

        let program = parser
            .done()
            .to_errors()
            .map_err(|e| Error::CircuitParse(e.to_string()))?;
        program
            .type_check()
            .to_errors()
            .map_err(|e| Error::CircuitParse(e.to_string()))?;

        let mut writer = CircuitWriter {
            circuit: Circuit::new(0),
        };
        let mut linearize = openqasm::Linearize::new(&mut writer, usize::MAX);
        linearize
            .visit_program(&program)
            .to_errors()
            .map_err(|e| Error::CircuitParse(e.to_string()))?;

        Ok(writer.circuit)
    }

    /// Parse an OpenQASM 2.0 program
    ///
    /// All quantum (classical) registers are flattened into one, in order of
    /// declaration.
    pub fn from_qasm(source: &str) -> Result<Circuit, Error> {
        Circuit::from_qasm_parser(|parser| {
            parser.parse_source::<String>(source.to_string(), None);
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Circuit, Error> {
        let source = std::fs::read_to_string(path)?;
        Circuit::from_qasm(&source)
    }

    /// returns a copy of the circuit, decomposed into 1- and 2-qubit Clifford +
    /// phase gates.
    pub fn to_basic_gates(&self) -> Circuit {
        // calculate the space needed in advance
        let sz = self.gates.iter().map(|g| g.num_basic_gates()).sum();
        let mut c = Circuit {
            gates: VecDeque::with_capacity(sz),
            nqubits: self.nqubits,
            nclbits: self.nclbits,
        };
        for g in &self.gates {
            g.push_basic_gates(&mut c);
        }

        c
    }

    /// Build the ZX-diagram of a unitary circuit
    ///
    /// Barriers are dropped. Panics on measurements and resets.
    pub fn to_graph<G: GraphLike>(&self) -> G {
        let mut graph = G::new();
        let mut inputs = Vec::with_capacity(self.nqubits);
        let mut outputs = Vec::with_capacity(self.nqubits);

        // we start counting rows from 1, to allow coordinate
        // (0,0) to mean "no coordinate"
        for i in 0..self.nqubits {
            let inp = graph.add_vertex_with_data(VData {
                ty: VType::B,
                qubit: i as f64,
                row: 1.0,
                ..Default::default()
            });
            let outp = graph.add_vertex_with_data(VData {
                ty: VType::B,
                qubit: i as f64,
                row: 2.0,
                ..Default::default()
            });
            graph.add_edge(inp, outp);
            inputs.push(inp);
            outputs.push(outp);
        }

        graph.set_inputs(inputs);
        graph.set_outputs(outputs);

        for g in &self.gates {
            g.add_to_graph(&mut graph);
        }

        let last_row = graph
            .outputs()
            .iter()
            .map(|&o| graph.row(o))
            .fold(0.0, f64::max);
        for o in graph.outputs().clone() {
            graph.set_row(o, last_row);
        }

        graph
    }

    pub fn stats(&self) -> CircuitStats {
        CircuitStats::make(self)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "qreg q[{}];", self.num_qubits())?;
        if self.nclbits > 0 {
            writeln!(f, "creg c[{}];", self.nclbits)?;
        }

        for g in &self.gates {
            writeln!(f, "{};", g.to_qasm())?;
        }

        Ok(())
    }
}

struct CircuitWriter {
    circuit: Circuit,
}

#[derive(Debug)]
#[allow(clippy::enum_variant_names)]
enum CircuitWriterError {
    UnitaryNotSupported,
    ConditionalNotSupported,
}

impl std::fmt::Display for CircuitWriterError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CircuitWriterError::UnitaryNotSupported => {
                write!(f, "arbitrary unitaries are not supported")
            }
            CircuitWriterError::ConditionalNotSupported => {
                write!(f, "conditionals are not supported")
            }
        }
    }
}

impl std::error::Error for CircuitWriterError {}

impl openqasm::GateWriter for &mut CircuitWriter {
    type Error = CircuitWriterError;

    fn initialize(&mut self, qubits: &[Symbol], bits: &[Symbol]) -> Result<(), Self::Error> {
        self.circuit = Circuit::with_clbits(qubits.len(), bits.len());
        Ok(())
    }

    fn write_cx(&mut self, a: usize, b: usize) -> Result<(), Self::Error> {
        self.circuit.push(Gate::new(CNOT, vec![a, b]));
        Ok(())
    }

    fn write_opaque(
        &mut self,
        name: &Symbol,
        params: &[Value],
        regs: &[usize],
    ) -> Result<(), Self::Error> {
        fn param_to_phase(value: Value) -> Phase {
            if value.a.is_zero() {
                Rational64::new(*value.b.numer(), *value.b.denom()).into()
            } else {
                let a = *value.a.numer() as f32 / *value.a.denom() as f32;
                let mut r =
                    Rational64::approximate_float(a / std::f32::consts::PI).unwrap_or(0.into());
                r += Rational64::new(*value.b.numer(), *value.b.denom());
                Phase::new(r)
            }
        }

        let mut g = Gate::from_qasm_name(name.as_str());
        g.qs.extend_from_slice(regs);
        if let Some(&p) = params.first() {
            g.phase = param_to_phase(p);
        }

        self.circuit.push(g);

        Ok(())
    }

    fn write_u(&mut self, _: Value, _: Value, _: Value, _: usize) -> Result<(), Self::Error> {
        Err(CircuitWriterError::UnitaryNotSupported)
    }

    fn write_barrier(&mut self, regs: &[usize]) -> Result<(), Self::Error> {
        self.circuit.push(Gate::new(Barrier, regs.to_vec()));
        Ok(())
    }

    fn write_reset(&mut self, reg: usize) -> Result<(), Self::Error> {
        self.circuit.push(Gate::new(Reset, vec![reg]));
        Ok(())
    }

    fn write_measure(&mut self, from: usize, to: usize) -> Result<(), Self::Error> {
        self.circuit.push(Gate::measure(from, to));
        Ok(())
    }

    fn start_conditional(&mut self, _: usize, _: usize, _: u64) -> Result<(), Self::Error> {
        Err(CircuitWriterError::ConditionalNotSupported)
    }

    fn end_conditional(&mut self) -> Result<(), Self::Error> {
        Err(CircuitWriterError::ConditionalNotSupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::*;
    use crate::vec_graph::Graph;

    #[test]
    fn mk_circuit() {
        let mut c = Circuit::new(3);
        c.add_gate("cz", vec![0, 1]);
        c.add_gate("z", vec![1]);
        c.add_gate("cx", vec![1, 2]);
        c.add_gate("h", vec![0]);
        assert_eq!(c.num_qubits(), 3);
        assert_eq!(c.num_gates(), 4);

        let qasm = r#"
            OPENQASM 2.0;
            include "qelib1.inc";
            qreg q[3];
            cz q[0], q[1];
            z q[1];
            cx q[1], q[2];
            h q[0];
        "#;

        let c1 = Circuit::from_qasm(qasm).unwrap();
        assert_eq!(c1, c);
    }

    #[test]
    fn mk_circuit_with_phase() {
        let mut c = Circuit::new(1);
        c.add_gate_with_phase("rz", vec![0], Rational64::new(1, 1));
        c.add_gate_with_phase("rz", vec![0], Rational64::new(1, 1));
        c.add_gate_with_phase("rz", vec![0], Rational64::new(1, 3));
        c.add_gate_with_phase("rz", vec![0], Rational64::new(2, 3));
        c.add_gate_with_phase("rz", vec![0], Rational64::new(-1, 3));
        c.add_gate_with_phase("rz", vec![0], Rational64::new(-1, 3));
        c.add_gate_with_phase("rx", vec![0], Rational64::new(-1, 2));

        let qasm = r#"
            OPENQASM 2.0;
            include "qelib1.inc";
            qreg q[1];
            rz(pi) q[0];
            rz(-pi) q[0];
            rz(pi/3) q[0];
            rz(2*pi/3) q[0];
            rz(-1/3 * pi) q[0];
            rz(-0.333333333 * pi) q[0];
            rx(-1.57079632679) q[0];
        "#;

        let c1 = Circuit::from_qasm(qasm).unwrap();
        assert_eq!(c1, c);
    }

    #[test]
    fn mk_circuit_2reg() {
        let mut c = Circuit::with_clbits(5, 3);
        c.cx(0, 1).cx(1, 2).cx(2, 3).cx(3, 4);
        c.measure(2, 0).measure(4, 2);

        let qasm = r#"
            OPENQASM 2.0;
            include "qelib1.inc";
            qreg q[2];
            qreg r[3];
            creg c[1];
            creg d[2];
            cx q[0], q[1];
            cx q[1], r[0];
            cx r[0], r[1];
            cx r[1], r[2];
            measure r[0] -> c[0];
            measure r[2] -> d[1];
        "#;

        let c1 = Circuit::from_qasm(qasm).unwrap();
        assert_eq!(c1, c);
    }

    #[test]
    fn dynamic_circuit_round_trip() {
        let mut c = Circuit::with_clbits(2, 2);
        c.x(1).barrier_all().h(1);
        c.h(0).cx(0, 1).h(0).barrier_all().measure(0, 0).reset(0);
        c.h(0).h(0).barrier_all().measure(0, 1);

        let qasm = c.to_qasm();
        assert!(qasm.starts_with("OPENQASM 2.0;\ninclude \"qelib1.inc\";\nqreg q[2];\ncreg c[2];\n"));
        assert!(qasm.contains("barrier q[0], q[1];\n"));
        assert!(qasm.contains("measure q[0] -> c[0];\n"));
        assert!(qasm.contains("reset q[0];\n"));

        let c1 = Circuit::from_qasm(&qasm).unwrap();
        assert_eq!(c1, c);
        assert!(!c1.is_unitary());
    }

    #[test]
    fn rejects_conditionals() {
        let qasm = r#"
            OPENQASM 2.0;
            include "qelib1.inc";
            qreg q[1];
            creg c[1];
            measure q[0] -> c[0];
            if (c == 1) x q[0];
        "#;
        assert!(matches!(
            Circuit::from_qasm(qasm),
            Err(Error::CircuitParse(_))
        ));
    }

    #[test]
    fn stats() {
        let mut c = Circuit::with_clbits(3, 2);
        c.h(0).t(1).cx(0, 1).ccx(0, 1, 2).rz((1, 2), 2);
        c.barrier_all().measure(0, 0).measure(1, 1).reset(2);

        let s = c.stats();
        assert_eq!(s.total, 9);
        assert_eq!(s.oneq, 3);
        assert_eq!(s.twoq, 1);
        assert_eq!(s.moreq, 1);
        assert_eq!(s.cliff, 3);
        assert_eq!(s.non_cliff, 2);
        assert_eq!(s.measurements, 2);
        assert_eq!(s.resets, 1);
        assert_eq!(s.barriers, 1);
        assert!(s.to_string().starts_with("Circuit with 3 qubits, 9 gates"));
    }

    #[test]
    fn adjoint_reverses() {
        let mut c = Circuit::new(2);
        c.s(0).cx(0, 1).rz((1, 4), 1);
        let a = c.to_adjoint();
        let mut expected = Circuit::new(2);
        expected.rz((-1, 4), 1).cx(0, 1).sdg(0);
        assert_eq!(a, expected);
    }

    #[test]
    fn tograph_3cnot() {
        let c = Circuit::from_qasm(
            r#"
            qreg q[2];
            cx q[0], q[1];
            cx q[1], q[0];
            cx q[0], q[1];
        "#,
        )
        .unwrap();

        let g: Graph = c.to_graph();

        assert_eq!(g.num_vertices(), 10);
        assert_eq!(g.num_edges(), 11);

        let mut swap = Circuit::new(2);
        swap.swap(0, 1);
        let h: Graph = swap.to_graph();
        assert_eq!(h.num_vertices(), 4);
        assert_proportional(&g.to_matrix(), &h.to_matrix());
    }

    #[test]
    fn tograph_barrier_is_identity() {
        let mut c = Circuit::new(2);
        c.barrier_all();
        let g: Graph = c.to_graph();
        assert!(g.is_identity());
    }

    #[test]
    fn tograph_toffoli() {
        let mut c = Circuit::new(3);
        c.ccx(0, 1, 2);
        let g: Graph = c.to_graph();
        let h: Graph = c.to_basic_gates().to_graph();
        assert_eq!(c.to_basic_gates().num_gates(), 15);
        assert_proportional(&g.to_matrix(), &h.to_matrix());
    }
}
