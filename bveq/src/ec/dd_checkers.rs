//! Equivalence checkers built on decision diagrams.

use super::config::Configuration;
use super::preprocess::{union, PreparedCircuit};
use super::results::EquivalenceCriterion;
use crate::circuit::Circuit;
use crate::dd::{Edge, Package};
use crate::error::Error;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Wire flags shared by both circuits of a check
#[derive(Debug, Clone)]
pub struct Flags {
    pub ancillary: Vec<bool>,
    pub garbage: Vec<bool>,
    pub partial: bool,
}

impl Flags {
    pub fn new(p1: &PreparedCircuit, p2: &PreparedCircuit, config: &Configuration) -> Flags {
        Flags {
            ancillary: union(&p1.ancillary, &p2.ancillary),
            garbage: union(&p1.garbage, &p2.garbage),
            partial: config.functionality.check_partial_equivalence,
        }
    }

    fn has_ancillae(&self) -> bool {
        self.ancillary.iter().any(|&a| a)
    }

    fn has_garbage(&self) -> bool {
        self.garbage.iter().any(|&g| g)
    }
}

/// The DD of the whole circuit, applied gate by gate
pub fn build_functionality(dd: &mut Package, c: &Circuit) -> Result<Edge, Error> {
    let mut e = dd.full_identity();
    for g in &c.gates {
        let ge = dd.gate_dd(g)?;
        e = dd.multiply(ge, e);
    }
    Ok(e)
}

/// Build both unitaries and compare them
///
/// In partial mode only the measurement statistics of the non-garbage
/// outputs are compared, for ancillary inputs fixed to |0>.
pub fn construction(
    p1: &PreparedCircuit,
    p2: &PreparedCircuit,
    flags: &Flags,
) -> Result<EquivalenceCriterion, Error> {
    let mut dd = Package::new(p1.num_wires());
    let u1 = build_functionality(&mut dd, &p1.circuit)?;
    let u2 = build_functionality(&mut dd, &p2.circuit)?;
    let u1 = dd.reduce_ancillae(u1, &flags.ancillary);
    let u2 = dd.reduce_ancillae(u2, &flags.ancillary);
    log::debug!("construction: DD sizes {} and {}", dd.size(u1), dd.size(u2));

    if flags.partial {
        let r1 = dd.abs2(u1);
        let r1 = dd.reduce_garbage(r1, &flags.garbage, false);
        let r2 = dd.abs2(u2);
        let r2 = dd.reduce_garbage(r2, &flags.garbage, false);
        return Ok(if r1 == r2 {
            EquivalenceCriterion::Equivalent
        } else {
            EquivalenceCriterion::NotEquivalent
        });
    }

    Ok(if u1 == u2 {
        EquivalenceCriterion::Equivalent
    } else if dd.equal_up_to_global_phase(u1, u2) {
        EquivalenceCriterion::EquivalentUpToGlobalPhase
    } else {
        EquivalenceCriterion::NotEquivalent
    })
}

/// Build `U1 * U2^dagger` from both ends and test for the identity
///
/// Gates of both circuits are applied in proportion to their gate counts,
/// which keeps the intermediate diagram close to the identity for similar
/// circuits.
pub fn alternating(
    p1: &PreparedCircuit,
    p2: &PreparedCircuit,
    flags: &Flags,
) -> Result<EquivalenceCriterion, Error> {
    if flags.partial && (flags.has_ancillae() || flags.has_garbage()) {
        return Ok(EquivalenceCriterion::NoInformation);
    }

    let mut dd = Package::new(p1.num_wires());
    let mut e = dd.full_identity();
    let (n1, n2) = (p1.circuit.num_gates(), p2.circuit.num_gates());
    let (mut i1, mut i2) = (0, 0);

    while i1 < n1 || i2 < n2 {
        // advance whichever side lags behind its share
        if i2 >= n2 || (i1 < n1 && i1 * n2.max(1) <= i2 * n1.max(1)) {
            let g = dd.gate_dd(&p1.circuit.gates[i1])?;
            e = dd.multiply(g, e);
            i1 += 1;
        } else {
            let g = dd.gate_dd(&p2.circuit.gates[i2])?;
            let g = dd.conjugate_transpose(g);
            e = dd.multiply(e, g);
            i2 += 1;
        }
    }
    log::debug!("alternating: final DD size {}", dd.size(e));

    Ok(if dd.is_identity(e, false) {
        EquivalenceCriterion::Equivalent
    } else if dd.is_identity(e, true) {
        EquivalenceCriterion::EquivalentUpToGlobalPhase
    } else if flags.has_ancillae() {
        // the circuits may still agree on the inputs that matter
        EquivalenceCriterion::NoInformation
    } else {
        EquivalenceCriterion::NotEquivalent
    })
}

/// Outcome of the simulation checker, with the number of runs performed
pub struct SimulationOutcome {
    pub equivalence: EquivalenceCriterion,
    pub performed: usize,
}

/// Compare the circuits on random computational basis states
///
/// Ancillary wires always start in |0>. A single differing output proves
/// the circuits different; otherwise they are probably equivalent.
pub fn simulation(
    p1: &PreparedCircuit,
    p2: &PreparedCircuit,
    flags: &Flags,
    config: &Configuration,
) -> Result<SimulationOutcome, Error> {
    let seed = match config.simulation.seed {
        0 => rand::random(),
        s => s,
    };
    let mut rng = SmallRng::seed_from_u64(seed);
    let n = p1.num_wires();
    let mut dd = Package::new(n);
    let mut performed = 0;

    for _ in 0..config.simulation.max_sims {
        let bits: Vec<bool> = (0..n)
            .map(|q| !flags.ancillary[q] && rng.random_bool(0.5))
            .collect();
        let input = dd.basis_state(&bits);
        let s1 = simulate(&mut dd, &p1.circuit, input)?;
        let s2 = simulate(&mut dd, &p2.circuit, input)?;
        performed += 1;

        let same = if flags.partial {
            let d1 = dd.abs2(s1);
            let d1 = dd.reduce_garbage(d1, &flags.garbage, true);
            let d2 = dd.abs2(s2);
            let d2 = dd.reduce_garbage(d2, &flags.garbage, true);
            d1 == d2
        } else {
            dd.equal_up_to_global_phase(s1, s2)
        };

        if !same {
            log::debug!("simulation: counterexample input {:?}", bits);
            return Ok(SimulationOutcome {
                equivalence: EquivalenceCriterion::NotEquivalent,
                performed,
            });
        }
    }

    Ok(SimulationOutcome {
        equivalence: EquivalenceCriterion::ProbablyEquivalent,
        performed,
    })
}

fn simulate(dd: &mut Package, c: &Circuit, mut state: Edge) -> Result<Edge, Error> {
    for g in &c.gates {
        let ge = dd.gate_dd(g)?;
        state = dd.apply(ge, state);
    }
    Ok(state)
}
