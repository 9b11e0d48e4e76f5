//! Bernstein-Vazirani circuits for a hidden bitstring, in a static and a
//! dynamic formulation, and checks that the two agree.
//!
//! Bitstrings are written most-significant bit first: the character at
//! index `k` of an `n`-character string is bit `n - 1 - k`. Any character
//! other than `'1'` counts as a 0.

use crate::circuit::Circuit;
use crate::ec::{self, Configuration};
use crate::error::Error;
use std::path::Path;

/// Worker threads used by the verification entry points
pub const DEFAULT_THREADS: usize = 8;

/// Bits of `bitstring`, least significant first
fn oracle_bits(bitstring: &str) -> impl Iterator<Item = bool> + '_ {
    bitstring.chars().rev().map(|c| c == '1')
}

/// The textbook circuit: n data qubits and one auxiliary qubit (qubit n),
/// measured into n classical bits.
pub fn bv_static(bitstring: &str) -> Circuit {
    let n = bitstring.chars().count();
    let mut c = Circuit::with_clbits(n + 1, n);

    c.x(n).barrier_all();
    for q in 0..=n {
        c.h(q);
    }
    c.barrier_all();

    for (q, bit) in oracle_bits(bitstring).enumerate() {
        if bit {
            c.cx(q, n);
        }
    }
    c.barrier_all();

    for q in 0..n {
        c.h(q);
    }
    for q in 0..n {
        c.measure(q, q);
    }

    c
}

/// The same algorithm on two qubits: qubit 0 learns one bit per round and
/// is measured and reset, qubit 1 stays in |-> throughout and is never reset.
pub fn bv_dynamic(bitstring: &str) -> Circuit {
    let n = bitstring.chars().count();
    let mut c = Circuit::with_clbits(2, n);

    c.x(1).barrier_all().h(1);

    for (idx, bit) in oracle_bits(bitstring).enumerate() {
        c.h(0);
        if bit {
            c.cx(0, 1);
        }
        c.h(0).barrier_all().measure(0, idx);
        if idx + 1 < n {
            c.reset(0);
        }
    }

    c
}

pub fn static_file_name(bitstring: &str) -> String {
    format!("BV-{bitstring}_indep_qiskit_{}.qasm", bitstring.chars().count())
}

pub fn dynamic_file_name(bitstring: &str) -> String {
    format!(
        "BV-{bitstring}_dynamic_qiskit_{}.qasm",
        bitstring.chars().count()
    )
}

/// Write both circuits for `bitstring` into `dir` as OpenQASM 2.0
///
/// The directory must exist.
pub fn bitstring_to_file(bitstring: &str, dir: impl AsRef<Path>) -> Result<(), Error> {
    log::info!("Creating {bitstring}");
    let dir = dir.as_ref();
    std::fs::write(
        dir.join(static_file_name(bitstring)),
        bv_static(bitstring).to_qasm(),
    )?;
    std::fs::write(
        dir.join(dynamic_file_name(bitstring)),
        bv_dynamic(bitstring).to_qasm(),
    )?;
    Ok(())
}

/// ZX checker only, with dynamic circuits transformed
pub fn zx_configuration(backpropagate: bool, nthreads: usize) -> Configuration {
    let mut config = Configuration::default();
    config.execution.nthreads = nthreads;
    config.execution.run_construction_checker = false;
    config.execution.run_alternating_checker = false;
    config.execution.run_simulation_checker = false;
    config.execution.run_zx_checker = true;
    config.optimizations.transform_dynamic_circuit = true;
    config.optimizations.backpropagate_output_permutation = backpropagate;
    config.functionality.check_partial_equivalence = false;
    config
}

/// Decision-diagram construction and simulation in partial-equivalence mode
pub fn qmdd_configuration(backpropagate: bool, nthreads: usize) -> Configuration {
    let mut config = Configuration::default();
    config.execution.nthreads = nthreads;
    config.execution.run_construction_checker = true;
    config.execution.run_alternating_checker = false;
    config.execution.run_simulation_checker = true;
    config.execution.run_zx_checker = false;
    config.optimizations.transform_dynamic_circuit = true;
    config.optimizations.backpropagate_output_permutation = backpropagate;
    config.functionality.check_partial_equivalence = true;
    config
}

/// True iff the check under `config` says "equivalent"
pub fn verify_with(qc1: &Circuit, qc2: &Circuit, config: &Configuration) -> Result<bool, Error> {
    let results = ec::verify(qc1, qc2, config)?;
    match results.to_json() {
        Ok(json) => log::info!("{json}"),
        Err(e) => log::warn!("could not render results: {e}"),
    }
    Ok(results.equivalence.to_string() == "equivalent")
}

pub fn verify(qc1: &Circuit, qc2: &Circuit, backpropagate: bool) -> Result<bool, Error> {
    verify_with(qc1, qc2, &zx_configuration(backpropagate, DEFAULT_THREADS))
}

pub fn verify_qmdd(qc1: &Circuit, qc2: &Circuit, backpropagate: bool) -> Result<bool, Error> {
    verify_with(qc1, qc2, &qmdd_configuration(backpropagate, DEFAULT_THREADS))
}

pub fn verify_circuits_zx(bitstring: &str) -> Result<bool, Error> {
    log::info!("Verifying {bitstring} with zx");
    verify(&bv_static(bitstring), &bv_dynamic(bitstring), true)
}

pub fn verify_circuits_qmdd(bitstring: &str) -> Result<bool, Error> {
    log::info!("Verifying {bitstring} with qmdd");
    verify_qmdd(&bv_static(bitstring), &bv_dynamic(bitstring), true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::GType;

    #[test]
    fn static_layout() {
        let c = bv_static("101");
        assert_eq!(c.num_qubits(), 4);
        assert_eq!(c.num_clbits(), 3);
        assert_eq!(c.num_gates_of_type(GType::CNOT), 2);
        assert_eq!(c.num_gates_of_type(GType::Barrier), 3);
        assert_eq!(c.num_gates_of_type(GType::HAD), 7);
        assert_eq!(c.num_gates_of_type(GType::Measure), 3);
        assert_eq!(c.gates[0].t, GType::NOT);
        assert_eq!(c.gates[0].qs, vec![3]);
    }

    #[test]
    fn oracle_reads_msb_first() {
        // "01": bit 0 is set, bit 1 is not
        let c = bv_static("01");
        let cx: Vec<_> = c.gates.iter().filter(|g| g.t == GType::CNOT).collect();
        assert_eq!(cx.len(), 1);
        assert_eq!(cx[0].qs, vec![0, 2]);

        let d = bv_dynamic("10");
        let first_cx = d.gates.iter().position(|g| g.t == GType::CNOT).unwrap();
        let first_measure = d.gates.iter().position(|g| g.t == GType::Measure).unwrap();
        // bit 0 is 0, so the first round has no oracle call
        assert!(first_cx > first_measure);
    }

    #[test]
    fn dynamic_layout() {
        let c = bv_dynamic("110");
        assert_eq!(c.num_qubits(), 2);
        assert_eq!(c.num_clbits(), 3);
        assert_eq!(c.num_gates_of_type(GType::CNOT), 2);
        assert_eq!(c.num_gates_of_type(GType::Measure), 3);
        assert_eq!(c.num_gates_of_type(GType::Reset), 2);
        assert!(c
            .gates
            .iter()
            .filter(|g| g.t == GType::Reset)
            .all(|g| g.qs == vec![0]));
        let cbits: Vec<usize> = c
            .gates
            .iter()
            .filter(|g| g.t == GType::Measure)
            .map(|g| g.cs[0])
            .collect();
        assert_eq!(cbits, vec![0, 1, 2]);
        assert_eq!(c.gates.back().map(|g| g.t), Some(GType::Measure));
    }

    #[test]
    fn configurations() {
        let zx = zx_configuration(true, 8);
        assert!(zx.execution.run_zx_checker);
        assert!(!zx.execution.run_construction_checker);
        assert!(!zx.execution.run_simulation_checker);
        assert!(!zx.execution.run_alternating_checker);
        assert!(zx.optimizations.transform_dynamic_circuit);
        assert!(zx.optimizations.backpropagate_output_permutation);

        let dd = qmdd_configuration(false, 4);
        assert_eq!(dd.execution.nthreads, 4);
        assert!(dd.execution.run_construction_checker);
        assert!(dd.execution.run_simulation_checker);
        assert!(!dd.execution.run_zx_checker);
        assert!(dd.functionality.check_partial_equivalence);
        assert!(!dd.optimizations.backpropagate_output_permutation);
    }

    #[test]
    fn file_names() {
        assert_eq!(static_file_name("101"), "BV-101_indep_qiskit_3.qasm");
        assert_eq!(dynamic_file_name("101"), "BV-101_dynamic_qiskit_3.qasm");
    }

    #[test]
    fn small_instances() {
        for s in ["1", "0", "10", "011", "1101"] {
            assert!(verify_circuits_zx(s).unwrap(), "zx failed on {s}");
            assert!(verify_circuits_qmdd(s).unwrap(), "qmdd failed on {s}");
        }
    }
}
