//! Verdicts and the record of a full equivalence check.

use serde::{Deserialize, Serialize};

/// Outcome of an equivalence check
///
/// Renders as the snake-case strings used in reports, e.g. `equivalent`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum EquivalenceCriterion {
    #[display("not_equivalent")]
    NotEquivalent,
    #[display("equivalent")]
    Equivalent,
    #[display("equivalent_up_to_global_phase")]
    EquivalentUpToGlobalPhase,
    #[display("probably_equivalent")]
    ProbablyEquivalent,
    #[display("probably_not_equivalent")]
    ProbablyNotEquivalent,
    #[display("no_information")]
    NoInformation,
}

impl EquivalenceCriterion {
    /// True for verdicts that settle the question
    pub fn is_conclusive(self) -> bool {
        matches!(
            self,
            EquivalenceCriterion::NotEquivalent
                | EquivalenceCriterion::Equivalent
                | EquivalenceCriterion::EquivalentUpToGlobalPhase
        )
    }

    /// True for verdicts that say the circuits are (at least up to phase) equal
    pub fn is_equivalent(self) -> bool {
        matches!(
            self,
            EquivalenceCriterion::Equivalent | EquivalenceCriterion::EquivalentUpToGlobalPhase
        )
    }

    /// Preference among inconclusive verdicts
    fn rank(self) -> u8 {
        match self {
            EquivalenceCriterion::ProbablyEquivalent => 2,
            EquivalenceCriterion::ProbablyNotEquivalent => 1,
            _ => 0,
        }
    }

    /// Combine the verdicts of several checkers
    ///
    /// Conclusive verdicts win. If they disagree, the result is
    /// [EquivalenceCriterion::NoInformation]; the second value of the pair
    /// reports the conflict.
    pub fn combine(
        verdicts: impl IntoIterator<Item = EquivalenceCriterion>,
    ) -> (EquivalenceCriterion, bool) {
        let mut conclusive: Option<EquivalenceCriterion> = None;
        let mut best = EquivalenceCriterion::NoInformation;
        let mut conflict = false;

        for v in verdicts {
            if v.is_conclusive() {
                match conclusive {
                    None => conclusive = Some(v),
                    Some(c) if c.is_equivalent() != v.is_equivalent() => conflict = true,
                    // keep the weaker of two positive verdicts
                    Some(c) => {
                        if c != v {
                            conclusive = Some(EquivalenceCriterion::EquivalentUpToGlobalPhase);
                        }
                    }
                }
            } else if v.rank() > best.rank() {
                best = v;
            }
        }

        if conflict {
            (EquivalenceCriterion::NoInformation, true)
        } else {
            (conclusive.unwrap_or(best), false)
        }
    }
}

/// The checkers run by [crate::ec::verify]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Checker {
    #[display("construction_checker")]
    Construction,
    #[display("alternating_checker")]
    Alternating,
    #[display("simulation_checker")]
    Simulation,
    #[display("zx_checker")]
    Zx,
}

/// One checker's contribution to a check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckerRun {
    pub checker: Checker,
    pub equivalence: EquivalenceCriterion,
    /// wall time in seconds
    pub time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquivalenceCheckingResults {
    pub num_qubits1: usize,
    pub num_qubits2: usize,
    /// width after preprocessing and padding
    pub num_wires: usize,
    pub num_ancillae: usize,
    pub num_garbage: usize,
    pub preprocessing_time: f64,
    pub check_time: f64,
    pub equivalence: EquivalenceCriterion,
    pub performed_simulations: usize,
    pub runs: Vec<CheckerRun>,
}

impl EquivalenceCheckingResults {
    pub fn considered_equivalent(&self) -> bool {
        self.equivalence.is_equivalent()
            || self.equivalence == EquivalenceCriterion::ProbablyEquivalent
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
