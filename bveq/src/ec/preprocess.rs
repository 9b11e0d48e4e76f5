//! Reduce (possibly dynamic) circuits to unitaries the checkers understand.
//!
//! A prepared circuit is a unitary over a set of *wires*, together with
//! the wires whose input is fixed to |0> (ancillary) and the wires whose
//! output is never measured (garbage). Resets open a fresh wire, and
//! measurements are deferred to the end of their wire, which is sound as
//! long as nothing acts on a wire after it was measured.

use super::config::Configuration;
use crate::circuit::Circuit;
use crate::error::Error;
use crate::gate::{GType, Gate};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedCircuit {
    /// unitary part, one qubit per wire, no barriers
    pub circuit: Circuit,
    pub ancillary: Vec<bool>,
    pub garbage: Vec<bool>,
    /// classical bit recorded by each wire, if any
    pub clbits: Vec<Option<usize>>,
}

impl PreparedCircuit {
    pub fn num_wires(&self) -> usize {
        self.circuit.num_qubits()
    }

    pub fn num_ancillae(&self) -> usize {
        self.ancillary.iter().filter(|&&a| a).count()
    }

    pub fn num_garbage(&self) -> usize {
        self.garbage.iter().filter(|&&g| g).count()
    }

    /// Apply a permutation of wires, `perm[old] = new`
    fn relabel(&mut self, perm: &[usize]) {
        let n = perm.len();
        let mut circuit = Circuit::new(n);
        for g in &self.circuit.gates {
            let mut g = g.clone();
            for q in g.qs.iter_mut() {
                *q = perm[*q];
            }
            circuit.push(g);
        }

        let mut ancillary = vec![false; n];
        let mut garbage = vec![false; n];
        let mut clbits = vec![None; n];
        for (old, &new) in perm.iter().enumerate() {
            ancillary[new] = self.ancillary[old];
            garbage[new] = self.garbage[old];
            clbits[new] = self.clbits[old];
        }

        self.circuit = circuit;
        self.ancillary = ancillary;
        self.garbage = garbage;
        self.clbits = clbits;
    }

    /// Wires measured into lower classical bits come first, then the
    /// garbage wires in their current order
    fn backpropagate_output_permutation(&mut self) {
        let mut order: Vec<usize> = (0..self.num_wires()).collect();
        order.sort_by_key(|&w| match self.clbits[w] {
            Some(c) => (0, c, w),
            None => (1, 0, w),
        });

        let mut perm = vec![0; order.len()];
        for (new, &old) in order.iter().enumerate() {
            perm[old] = new;
        }
        self.relabel(&perm);
    }

    /// Add idle wires that are both ancillary and garbage
    pub fn pad_to(&mut self, width: usize) {
        let n = self.num_wires();
        if width <= n {
            return;
        }
        let mut circuit = Circuit::new(width);
        circuit.gates = std::mem::take(&mut self.circuit.gates);
        self.circuit = circuit;
        self.ancillary.resize(width, true);
        self.garbage.resize(width, true);
        self.clbits.resize(width, None);
    }
}

/// Turn a circuit into a [PreparedCircuit]
pub fn prepare(c: &Circuit, config: &Configuration) -> Result<PreparedCircuit, Error> {
    let opt = &config.optimizations;
    let nq = c.num_qubits();

    // current wire of every logical qubit
    let mut wire: Vec<usize> = (0..nq).collect();
    let mut ancillary = vec![false; nq];
    let mut measured = vec![false; nq];
    let mut clbit_wire: FxHashMap<usize, usize> = FxHashMap::default();
    let mut gates: Vec<Gate> = Vec::with_capacity(c.num_gates());
    let in_range = |q: usize| {
        if q < nq {
            Ok(q)
        } else {
            Err(Error::QubitOutOfRange {
                qubit: q,
                num_qubits: nq,
            })
        }
    };

    for g in &c.gates {
        match g.t {
            GType::Barrier => {}
            GType::Measure => {
                let w = wire[in_range(g.qs[0])?];
                measured[w] = true;
                // a later measurement into the same bit supersedes this one
                clbit_wire.insert(g.cs[0], w);
            }
            GType::Reset => {
                let q = in_range(g.qs[0])?;
                if !opt.transform_dynamic_circuit {
                    return Err(Error::DynamicCircuit { qubit: q });
                }
                wire[q] = ancillary.len();
                ancillary.push(true);
                measured.push(false);
            }
            GType::UnknownGate => return Err(Error::UnsupportedGate(g.to_qasm())),
            _ => {
                let mut g = g.clone();
                for q in g.qs.iter_mut() {
                    let w = wire[in_range(*q)?];
                    if measured[w] {
                        return Err(Error::GateAfterMeasurement { qubit: *q });
                    }
                    *q = w;
                }
                gates.push(g);
            }
        }
    }

    let nwires = ancillary.len();
    let mut clbits = vec![None; nwires];
    for (&c, &w) in clbit_wire.iter() {
        clbits[w] = Some(c);
    }
    let garbage = clbits.iter().map(|c| c.is_none()).collect();

    let mut circuit = Circuit::new(nwires);
    for g in gates {
        circuit.push(g);
    }

    let mut p = PreparedCircuit {
        circuit,
        ancillary,
        garbage,
        clbits,
    };

    if opt.backpropagate_output_permutation {
        p.backpropagate_output_permutation();
    }

    log::debug!(
        "prepared circuit: {} wires, {} ancillae, {} garbage",
        p.num_wires(),
        p.num_ancillae(),
        p.num_garbage()
    );

    Ok(p)
}

/// Prepare two circuits for comparison, padding the narrower one
pub fn prepare_pair(
    c1: &Circuit,
    c2: &Circuit,
    config: &Configuration,
) -> Result<(PreparedCircuit, PreparedCircuit), Error> {
    let mut p1 = prepare(c1, config)?;
    let mut p2 = prepare(c2, config)?;
    let width = p1.num_wires().max(p2.num_wires());
    p1.pad_to(width);
    p2.pad_to(width);
    Ok((p1, p2))
}

/// Wire-wise union of two flag vectors of the same length
pub fn union(a: &[bool], b: &[bool]) -> Vec<bool> {
    a.iter().zip(b.iter()).map(|(&x, &y)| x || y).collect()
}
