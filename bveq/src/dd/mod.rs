//! Decision diagrams for unitaries and states, with tolerance-aware
//! complex weights.

pub mod complex;
pub mod package;

pub use complex::{CIdx, ComplexTable};
pub use package::{Edge, Package};
