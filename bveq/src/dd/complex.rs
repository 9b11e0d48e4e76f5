//! Tolerance-canonicalised complex numbers for decision-diagram weights.
//!
//! Every weight is interned once, so two weights are equal exactly when
//! their indices are. Values closer than [TOLERANCE] in both components
//! share an entry.

use num::complex::Complex64;
use rustc_hash::FxHashMap;

pub const TOLERANCE: f64 = 1e-12;

/// side length of the grid cells used to find nearby values
const BUCKET: f64 = 1e-9;

/// Index of an interned complex number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CIdx(u32);

impl CIdx {
    pub const ZERO: CIdx = CIdx(0);
    pub const ONE: CIdx = CIdx(1);

    pub fn is_zero(self) -> bool {
        self == CIdx::ZERO
    }

    pub fn is_one(self) -> bool {
        self == CIdx::ONE
    }
}

#[derive(Debug, Clone)]
pub struct ComplexTable {
    values: Vec<Complex64>,
    buckets: FxHashMap<(i64, i64), Vec<CIdx>>,
}

impl Default for ComplexTable {
    fn default() -> Self {
        ComplexTable::new()
    }
}

fn bucket_of(z: Complex64) -> (i64, i64) {
    ((z.re / BUCKET).floor() as i64, (z.im / BUCKET).floor() as i64)
}

impl ComplexTable {
    pub fn new() -> ComplexTable {
        ComplexTable {
            values: vec![Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
            buckets: FxHashMap::default(),
        }
    }

    /// Number of interned values, including 0 and 1
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value(&self, i: CIdx) -> Complex64 {
        self.values[i.0 as usize]
    }

    /// Intern `z`, reusing an existing entry within [TOLERANCE]
    pub fn lookup(&mut self, z: Complex64) -> CIdx {
        let re = if z.re.abs() < TOLERANCE { 0.0 } else { z.re };
        let im = if z.im.abs() < TOLERANCE { 0.0 } else { z.im };
        if re == 0.0 && im == 0.0 {
            return CIdx::ZERO;
        }
        if (re - 1.0).abs() < TOLERANCE && im == 0.0 {
            return CIdx::ONE;
        }

        let z = Complex64::new(re, im);
        let (br, bi) = bucket_of(z);
        for dr in -1..=1 {
            for di in -1..=1 {
                if let Some(bucket) = self.buckets.get(&(br + dr, bi + di)) {
                    for &i in bucket {
                        let v = self.values[i.0 as usize];
                        if (v.re - re).abs() <= TOLERANCE && (v.im - im).abs() <= TOLERANCE {
                            return i;
                        }
                    }
                }
            }
        }

        let i = CIdx(self.values.len() as u32);
        self.values.push(z);
        self.buckets.entry((br, bi)).or_default().push(i);
        i
    }

    pub fn mul(&mut self, a: CIdx, b: CIdx) -> CIdx {
        if a.is_zero() || b.is_zero() {
            CIdx::ZERO
        } else if a.is_one() {
            b
        } else if b.is_one() {
            a
        } else {
            self.lookup(self.value(a) * self.value(b))
        }
    }

    /// Panics if `b` is zero
    pub fn div(&mut self, a: CIdx, b: CIdx) -> CIdx {
        assert!(!b.is_zero(), "division by a zero weight");
        if a == b {
            CIdx::ONE
        } else if b.is_one() {
            a
        } else {
            self.lookup(self.value(a) / self.value(b))
        }
    }

    pub fn add(&mut self, a: CIdx, b: CIdx) -> CIdx {
        if a.is_zero() {
            b
        } else if b.is_zero() {
            a
        } else {
            self.lookup(self.value(a) + self.value(b))
        }
    }

    pub fn conj(&mut self, a: CIdx) -> CIdx {
        let z = self.value(a);
        if z.im == 0.0 {
            a
        } else {
            self.lookup(z.conj())
        }
    }

    /// The squared magnitude of `a`, as a real weight
    pub fn norm_sqr(&mut self, a: CIdx) -> CIdx {
        if a.is_zero() || a.is_one() {
            a
        } else {
            let n = self.value(a).norm_sqr();
            self.lookup(Complex64::new(n, 0.0))
        }
    }

    pub fn norm(&self, a: CIdx) -> f64 {
        self.value(a).norm()
    }

    /// True if the two weights have the same magnitude, up to [TOLERANCE]
    pub fn same_magnitude(&self, a: CIdx, b: CIdx) -> bool {
        (self.norm(a) - self.norm(b)).abs() <= TOLERANCE
    }
}
