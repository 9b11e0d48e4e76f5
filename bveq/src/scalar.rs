//! Global scalars of ZX-diagrams, kept up to a positive real factor.
//!
//! Equivalence checking only needs to know whether a diagram's scalar is
//! zero and what its phase is, so magnitudes (powers of sqrt(2)) are
//! dropped by every rewrite.

use std::fmt;
use std::ops::{Mul, MulAssign};

use num::Zero;

use crate::phase::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scalar {
    phase: Phase,
    zero: bool,
}

impl Scalar {
    pub fn one() -> Scalar {
        Scalar {
            phase: Phase::zero(),
            zero: false,
        }
    }

    pub fn zero() -> Scalar {
        Scalar {
            phase: Phase::zero(),
            zero: true,
        }
    }

    pub fn from_phase(phase: impl Into<Phase>) -> Scalar {
        Scalar {
            phase: phase.into(),
            zero: false,
        }
    }

    /// The scalar `1 + e^(i pi p)`.
    ///
    /// For p in (-1,1) this is `2 cos(pi p / 2) e^(i pi p / 2)` with a
    /// positive cosine, so its phase is exactly `p / 2`. For p = 1 it is zero.
    pub fn one_plus_phase(p: impl Into<Phase>) -> Scalar {
        let p = p.into();
        if p == Phase::new(1) {
            Scalar::zero()
        } else {
            Scalar::from_phase(p / 2)
        }
    }

    pub fn mul_phase(&mut self, p: impl Into<Phase>) {
        self.phase += p.into();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_zero(&self) -> bool {
        self.zero
    }

    pub fn conj(&self) -> Scalar {
        Scalar {
            phase: -self.phase,
            zero: self.zero,
        }
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Scalar::one()
    }
}

impl Mul for Scalar {
    type Output = Scalar;

    fn mul(self, rhs: Scalar) -> Scalar {
        Scalar {
            phase: self.phase + rhs.phase,
            zero: self.zero || rhs.zero,
        }
    }
}

impl MulAssign for Scalar {
    fn mul_assign(&mut self, rhs: Scalar) {
        *self = *self * rhs;
    }
}

impl MulAssign<&Scalar> for Scalar {
    fn mul_assign(&mut self, rhs: &Scalar) {
        *self = *self * *rhs;
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.zero {
            write!(f, "0")
        } else if self.phase.is_zero() {
            write!(f, "1")
        } else {
            write!(f, "exp(i pi {})", self.phase)
        }
    }
}
