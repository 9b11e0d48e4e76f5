//! Equivalence checking of (dynamic) quantum circuits.
//!
//! [verify] prepares both circuits (see [preprocess]), runs the checkers
//! enabled in the [Configuration] and combines their verdicts into one
//! [EquivalenceCriterion].

pub mod config;
pub mod dd_checkers;
pub mod manager;
pub mod preprocess;
pub mod results;
pub mod zx;

pub use config::Configuration;
pub use manager::verify;
pub use results::{Checker, EquivalenceCheckingResults, EquivalenceCriterion};
