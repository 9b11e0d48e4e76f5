//! Dense evaluation of small ZX-diagrams, used to check rewrites.
//!
//! Bit `i` of a row (column) index is the value on output (input) `i`.

use crate::graph::*;
use approx::abs_diff_eq;
use num::complex::Complex64;
use rustc_hash::FxHashMap;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

pub type Matrix = Vec<Vec<Complex64>>;

pub trait ToMatrix {
    fn to_matrix(&self) -> Matrix;
}

impl<G: GraphLike> ToMatrix for G {
    fn to_matrix(&self) -> Matrix {
        let mut g = self.clone();
        g.x_to_z();

        let spiders: Vec<V> = g
            .vertices()
            .filter(|&v| g.vertex_type(v) != VType::B)
            .collect();
        let edges = g.edge_vec();
        let nin = g.inputs().len();
        let nout = g.outputs().len();

        let global = if g.scalar().is_zero() {
            Complex64::new(0.0, 0.0)
        } else {
            Complex64::from_polar(1.0, g.scalar().phase().to_radians())
        };

        let mut m = vec![vec![Complex64::new(0.0, 0.0); 1 << nin]; 1 << nout];
        let mut bits: FxHashMap<V, bool> = FxHashMap::default();
        for (row, out) in m.iter_mut().enumerate() {
            for (col, entry) in out.iter_mut().enumerate() {
                for (i, &v) in g.inputs().iter().enumerate() {
                    bits.insert(v, col >> i & 1 == 1);
                }
                for (i, &v) in g.outputs().iter().enumerate() {
                    bits.insert(v, row >> i & 1 == 1);
                }

                let mut sum = Complex64::new(0.0, 0.0);
                for assignment in 0..(1usize << spiders.len()) {
                    let mut amp = Complex64::new(1.0, 0.0);
                    for (k, &v) in spiders.iter().enumerate() {
                        let b = assignment >> k & 1 == 1;
                        bits.insert(v, b);
                        if b {
                            amp *= Complex64::from_polar(1.0, g.phase(v).to_f64() * PI);
                        }
                    }
                    for &(s, t, et) in &edges {
                        let (bs, bt) = (bits[&s], bits[&t]);
                        match et {
                            EType::N if bs != bt => amp = Complex64::new(0.0, 0.0),
                            EType::N => {}
                            EType::H if bs && bt => amp *= -FRAC_1_SQRT_2,
                            EType::H => amp *= FRAC_1_SQRT_2,
                        }
                    }
                    sum += amp;
                }
                *entry = sum * global;
            }
        }
        m
    }
}

/// Panics unless `a` is a positive real multiple of `b`
pub fn assert_proportional(a: &Matrix, b: &Matrix) {
    assert_eq!(a.len(), b.len(), "row counts differ");
    let flat_a: Vec<Complex64> = a.iter().flatten().copied().collect();
    let flat_b: Vec<Complex64> = b.iter().flatten().copied().collect();
    assert_eq!(flat_a.len(), flat_b.len(), "column counts differ");

    let (imax, bmax) = flat_b
        .iter()
        .enumerate()
        .max_by(|x, y| x.1.norm().total_cmp(&y.1.norm()))
        .map(|(i, z)| (i, *z))
        .unwrap_or((0, Complex64::new(0.0, 0.0)));

    if bmax.norm() < 1e-9 {
        assert!(
            flat_a.iter().all(|z| z.norm() < 1e-9),
            "expected a zero matrix, got {a:?}"
        );
        return;
    }

    let c = flat_a[imax] / bmax;
    assert!(
        c.re > 1e-9 && abs_diff_eq!(c.im / c.re, 0.0, epsilon = 1e-9),
        "factor {c} is not a positive real"
    );
    for (za, zb) in flat_a.iter().zip(flat_b.iter()) {
        let d = za - c * zb;
        assert!(d.norm() < 1e-9, "matrices differ: {a:?} vs {b:?}");
    }
}
