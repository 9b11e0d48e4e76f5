//! Configuration of an equivalence check.
//!
//! Every section falls back to its defaults when missing, so a JSON
//! configuration only needs to name the settings it changes.

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Which checkers run, and on how many threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Execution {
    pub nthreads: usize,
    pub run_construction_checker: bool,
    pub run_simulation_checker: bool,
    pub run_alternating_checker: bool,
    pub run_zx_checker: bool,
}

impl Default for Execution {
    fn default() -> Self {
        Execution {
            nthreads: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            run_construction_checker: false,
            run_simulation_checker: true,
            run_alternating_checker: true,
            run_zx_checker: true,
        }
    }
}

/// Circuit transformations applied before checking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Optimizations {
    /// Replace resets by fresh ancillary wires and defer measurements.
    pub transform_dynamic_circuit: bool,
    /// Reorder wires so that measured outputs line up by classical bit.
    pub backpropagate_output_permutation: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Functionality {
    /// Compare only the measured outputs, for ancillary inputs fixed to |0>.
    pub check_partial_equivalence: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Simulation {
    pub max_sims: usize,
    /// 0 picks a fresh random seed for every check
    pub seed: u64,
}

impl Default for Simulation {
    fn default() -> Self {
        Simulation {
            max_sims: 16,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub execution: Execution,
    pub optimizations: Optimizations,
    pub functionality: Functionality,
    pub simulation: Simulation,
}

impl Configuration {
    pub fn from_json(s: &str) -> Result<Configuration, Error> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// True if no checker is enabled
    pub fn nothing_to_do(&self) -> bool {
        let e = &self.execution;
        !(e.run_construction_checker
            || e.run_simulation_checker
            || e.run_alternating_checker
            || e.run_zx_checker)
    }
}
