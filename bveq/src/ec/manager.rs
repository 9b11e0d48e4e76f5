//! Runs the enabled checkers on a thread pool and combines their verdicts.

use super::config::Configuration;
use super::dd_checkers::{self, Flags};
use super::preprocess::prepare_pair;
use super::results::{Checker, CheckerRun, EquivalenceCheckingResults, EquivalenceCriterion};
use super::zx;
use crate::circuit::Circuit;
use crate::error::Error;
use itertools::Itertools;
use rayon::prelude::*;
use std::time::Instant;

fn enabled_checkers(config: &Configuration) -> Vec<Checker> {
    let e = &config.execution;
    [
        (e.run_construction_checker, Checker::Construction),
        (e.run_alternating_checker, Checker::Alternating),
        (e.run_simulation_checker, Checker::Simulation),
        (e.run_zx_checker, Checker::Zx),
    ]
    .into_iter()
    .filter_map(|(on, c)| on.then_some(c))
    .collect()
}

/// Check two circuits for equivalence
///
/// Blocks until every enabled checker has finished. Errors of any checker
/// abort the whole check.
pub fn verify(
    c1: &Circuit,
    c2: &Circuit,
    config: &Configuration,
) -> Result<EquivalenceCheckingResults, Error> {
    let start = Instant::now();
    let (p1, p2) = prepare_pair(c1, c2, config)?;
    let flags = Flags::new(&p1, &p2, config);
    let preprocessing_time = start.elapsed().as_secs_f64();

    let checkers = enabled_checkers(config);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.execution.nthreads)
        .build()?;

    let start = Instant::now();
    let outcomes: Vec<Result<(CheckerRun, usize), Error>> = pool.install(|| {
        checkers
            .par_iter()
            .map(|&checker| -> Result<(CheckerRun, usize), Error> {
                let t = Instant::now();
                let mut sims = 0;
                let equivalence = match checker {
                    Checker::Construction => dd_checkers::construction(&p1, &p2, &flags)?,
                    Checker::Alternating => dd_checkers::alternating(&p1, &p2, &flags)?,
                    Checker::Simulation => {
                        let out = dd_checkers::simulation(&p1, &p2, &flags, config)?;
                        sims = out.performed;
                        out.equivalence
                    }
                    Checker::Zx => zx::check(&p1, &p2),
                };
                log::debug!("{checker}: {equivalence}");
                let run = CheckerRun {
                    checker,
                    equivalence,
                    time: t.elapsed().as_secs_f64(),
                };
                Ok((run, sims))
            })
            .collect()
    });

    let mut runs = Vec::with_capacity(outcomes.len());
    let mut performed_simulations = 0;
    for o in outcomes {
        let (run, sims) = o?;
        performed_simulations += sims;
        runs.push(run);
    }

    let (equivalence, conflict) =
        EquivalenceCriterion::combine(runs.iter().map(|r| r.equivalence));
    if conflict {
        log::warn!(
            "checkers disagree: {}",
            runs.iter()
                .map(|r| format!("{}={}", r.checker, r.equivalence))
                .join(", ")
        );
    }

    Ok(EquivalenceCheckingResults {
        num_qubits1: c1.num_qubits(),
        num_qubits2: c2.num_qubits(),
        num_wires: p1.num_wires(),
        num_ancillae: flags.ancillary.iter().filter(|&&a| a).count(),
        num_garbage: flags.garbage.iter().filter(|&&g| g).count(),
        preprocessing_time,
        check_time: start.elapsed().as_secs_f64(),
        equivalence,
        performed_simulations,
        runs,
    })
}
