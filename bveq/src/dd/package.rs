//! Quasi-reduced decision diagrams for matrices and vectors.
//!
//! A node at level `q + 1` branches on qubit `q`; the terminal sits at
//! level 0. Matrix nodes have four successors in the order `00, 01, 10,
//! 11` (row bit, column bit). Vector nodes use the first two and keep the
//! others at [Edge::ZERO]. No level is ever skipped, except by the zero
//! edge, which always points at the terminal.

use super::complex::{CIdx, ComplexTable};
use crate::error::Error;
use crate::gate::{GType, Gate};
use num::complex::Complex64;
use rustc_hash::{FxHashMap, FxHashSet};
use std::f64::consts::{FRAC_1_SQRT_2, PI};

pub type NodeId = u32;

/// The terminal node
pub const TERMINAL: NodeId = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub node: NodeId,
    pub w: CIdx,
}

impl Edge {
    pub const ZERO: Edge = Edge {
        node: TERMINAL,
        w: CIdx::ZERO,
    };

    pub const ONE: Edge = Edge {
        node: TERMINAL,
        w: CIdx::ONE,
    };

    pub fn is_zero(&self) -> bool {
        self.w.is_zero()
    }

    pub fn is_terminal(&self) -> bool {
        self.node == TERMINAL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Node {
    level: usize,
    e: [Edge; 4],
}

/// A 2x2 matrix, row-major
pub type GateMatrix = [Complex64; 4];

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

pub fn gate_matrix(t: GType, phase: f64) -> Option<GateMatrix> {
    let m = match t {
        GType::NOT => [c(0.0, 0.0), c(1.0, 0.0), c(1.0, 0.0), c(0.0, 0.0)],
        GType::Z => [c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(-1.0, 0.0)],
        GType::S => [c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(0.0, 1.0)],
        GType::Sdg => [c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(0.0, -1.0)],
        GType::T => [
            c(1.0, 0.0),
            c(0.0, 0.0),
            c(0.0, 0.0),
            Complex64::from_polar(1.0, PI / 4.0),
        ],
        GType::Tdg => [
            c(1.0, 0.0),
            c(0.0, 0.0),
            c(0.0, 0.0),
            Complex64::from_polar(1.0, -PI / 4.0),
        ],
        GType::HAD => [
            c(FRAC_1_SQRT_2, 0.0),
            c(FRAC_1_SQRT_2, 0.0),
            c(FRAC_1_SQRT_2, 0.0),
            c(-FRAC_1_SQRT_2, 0.0),
        ],
        // rz as in qelib1: u1(theta), i.e. diag(1, e^(i theta))
        GType::ZPhase => [
            c(1.0, 0.0),
            c(0.0, 0.0),
            c(0.0, 0.0),
            Complex64::from_polar(1.0, phase * PI),
        ],
        GType::XPhase => {
            let (s, co) = (phase * PI / 2.0).sin_cos();
            [c(co, 0.0), c(0.0, -s), c(0.0, -s), c(co, 0.0)]
        }
        _ => return None,
    };
    Some(m)
}

/// A decision-diagram package over a fixed number of qubits
///
/// Nodes are never freed; a package is meant to live for one check.
#[derive(Debug, Clone)]
pub struct Package {
    nqubits: usize,
    ct: ComplexTable,
    nodes: Vec<Node>,
    unique: FxHashMap<(usize, [Edge; 4]), NodeId>,
    identities: Vec<Edge>,
    mult_table: FxHashMap<(NodeId, NodeId, bool), Edge>,
    add_table: FxHashMap<(Edge, Edge), Edge>,
    adjoint_table: FxHashMap<NodeId, Edge>,
}

impl Package {
    pub fn new(nqubits: usize) -> Package {
        Package {
            nqubits,
            ct: ComplexTable::new(),
            nodes: vec![Node {
                level: 0,
                e: [Edge::ZERO; 4],
            }],
            unique: FxHashMap::default(),
            identities: vec![Edge::ONE],
            mult_table: FxHashMap::default(),
            add_table: FxHashMap::default(),
            adjoint_table: FxHashMap::default(),
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.nqubits
    }

    /// Number of nodes created so far, including the terminal
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn complex_table(&self) -> &ComplexTable {
        &self.ct
    }

    pub fn weight(&self, e: Edge) -> Complex64 {
        self.ct.value(e.w)
    }

    pub fn lookup(&mut self, z: Complex64) -> CIdx {
        self.ct.lookup(z)
    }

    fn node(&self, id: NodeId) -> Node {
        self.nodes[id as usize]
    }

    /// Level of the node an edge points to
    pub fn level(&self, e: Edge) -> usize {
        self.node(e.node).level
    }

    /// Multiply the weight of an edge by `w`
    pub fn scale(&mut self, e: Edge, w: CIdx) -> Edge {
        let w = self.ct.mul(e.w, w);
        if w.is_zero() {
            Edge::ZERO
        } else {
            Edge { node: e.node, w }
        }
    }

    /// Find or create the normalised node with the given successors
    ///
    /// Successors are divided by the first one of largest magnitude,
    /// which becomes the weight of the returned edge.
    pub fn make_node(&mut self, level: usize, mut e: [Edge; 4]) -> Edge {
        for x in e.iter_mut() {
            if x.w.is_zero() {
                *x = Edge::ZERO;
            }
        }

        let max = e
            .iter()
            .map(|x| self.ct.norm(x.w))
            .fold(0.0, f64::max);
        if max == 0.0 {
            return Edge::ZERO;
        }
        let Some(imax) = e
            .iter()
            .position(|x| self.ct.norm(x.w) >= max - super::complex::TOLERANCE)
        else {
            return Edge::ZERO;
        };

        let top = e[imax].w;
        for x in e.iter_mut() {
            if !x.w.is_zero() {
                x.w = self.ct.div(x.w, top);
            }
        }

        let node = match self.unique.get(&(level, e)) {
            Some(&id) => id,
            None => {
                let id = self.nodes.len() as NodeId;
                self.nodes.push(Node { level, e });
                self.unique.insert((level, e), id);
                id
            }
        };

        Edge { node, w: top }
    }

    /// The identity on qubits `0..k`
    pub fn identity(&mut self, k: usize) -> Edge {
        while self.identities.len() <= k {
            let z = self.identities.len();
            let prev = self.identities[z - 1];
            let e = self.make_node(z, [prev, Edge::ZERO, Edge::ZERO, prev]);
            self.identities.push(e);
        }
        self.identities[k]
    }

    /// The identity on all qubits of the package
    pub fn full_identity(&mut self) -> Edge {
        self.identity(self.nqubits)
    }

    /// Build the DD of a single-target gate with positive controls
    pub fn make_gate_dd(&mut self, mat: GateMatrix, target: usize, controls: &[usize]) -> Edge {
        let mut em = [Edge::ZERO; 4];
        for (i, x) in mat.iter().enumerate() {
            let w = self.ct.lookup(*x);
            em[i] = Edge {
                node: TERMINAL,
                w,
            };
        }

        for z in 0..target {
            if controls.contains(&z) {
                let id = self.identity(z);
                for (i, x) in em.iter_mut().enumerate() {
                    // when the control is off, the diagonal blocks are the identity
                    let off = if i == 0 || i == 3 { id } else { Edge::ZERO };
                    *x = self.make_node(z + 1, [off, Edge::ZERO, Edge::ZERO, *x]);
                }
            } else {
                for x in em.iter_mut() {
                    *x = self.make_node(z + 1, [*x, Edge::ZERO, Edge::ZERO, *x]);
                }
            }
        }

        let mut e = self.make_node(target + 1, em);

        for z in (target + 1)..self.nqubits {
            if controls.contains(&z) {
                let id = self.identity(z);
                e = self.make_node(z + 1, [id, Edge::ZERO, Edge::ZERO, e]);
            } else {
                e = self.make_node(z + 1, [e, Edge::ZERO, Edge::ZERO, e]);
            }
        }

        e
    }

    /// The DD of a unitary gate of the circuit model
    ///
    /// Barriers are the identity. Measurements and resets are rejected.
    pub fn gate_dd(&mut self, g: &Gate) -> Result<Edge, Error> {
        use GType::*;
        let phase = g.phase.to_f64();
        let e = match g.t {
            NOT | Z | S | Sdg | T | Tdg | HAD | ZPhase | XPhase => {
                let m = gate_matrix(g.t, phase).ok_or(Error::UnsupportedGate(g.to_qasm()))?;
                self.make_gate_dd(m, g.qs[0], &[])
            }
            CNOT | TOFF => {
                let m = gate_matrix(NOT, 0.0).ok_or(Error::UnsupportedGate(g.to_qasm()))?;
                let n = g.qs.len();
                self.make_gate_dd(m, g.qs[n - 1], &g.qs[..n - 1])
            }
            CZ | CCZ => {
                let m = gate_matrix(Z, 0.0).ok_or(Error::UnsupportedGate(g.to_qasm()))?;
                let n = g.qs.len();
                self.make_gate_dd(m, g.qs[n - 1], &g.qs[..n - 1])
            }
            SWAP => {
                let m = gate_matrix(NOT, 0.0).ok_or(Error::UnsupportedGate(g.to_qasm()))?;
                let (a, b) = (g.qs[0], g.qs[1]);
                let ab = self.make_gate_dd(m, b, &[a]);
                let ba = self.make_gate_dd(m, a, &[b]);
                let e = self.multiply(ba, ab);
                self.multiply(ab, e)
            }
            Barrier => self.full_identity(),
            Measure | Reset | UnknownGate => return Err(Error::UnsupportedGate(g.to_qasm())),
        };
        Ok(e)
    }

    /// The computational basis state with qubit `q` set to `bits[q]`
    pub fn basis_state(&mut self, bits: &[bool]) -> Edge {
        let mut e = Edge::ONE;
        for (q, &b) in bits.iter().enumerate() {
            e = if b {
                self.make_node(q + 1, [Edge::ZERO, e, Edge::ZERO, Edge::ZERO])
            } else {
                self.make_node(q + 1, [e, Edge::ZERO, Edge::ZERO, Edge::ZERO])
            };
        }
        e
    }

    /// Matrix product `x * y`
    pub fn multiply(&mut self, x: Edge, y: Edge) -> Edge {
        self.multiply_as(x, y, false)
    }

    /// Apply the matrix `x` to the vector `v`
    pub fn apply(&mut self, x: Edge, v: Edge) -> Edge {
        self.multiply_as(x, v, true)
    }

    fn multiply_as(&mut self, x: Edge, y: Edge, vector: bool) -> Edge {
        if x.is_zero() || y.is_zero() {
            return Edge::ZERO;
        }
        let r = self.multiply_nodes(x.node, y.node, vector);
        let w = self.ct.mul(x.w, y.w);
        self.scale(r, w)
    }

    fn multiply_nodes(&mut self, x: NodeId, y: NodeId, vector: bool) -> Edge {
        if x == TERMINAL && y == TERMINAL {
            return Edge::ONE;
        }
        if let Some(&r) = self.mult_table.get(&(x, y, vector)) {
            return r;
        }

        let nx = self.node(x);
        let ny = self.node(y);
        debug_assert_eq!(nx.level, ny.level, "operands at different levels");

        let mut e = [Edge::ZERO; 4];
        if vector {
            for (i, ei) in e.iter_mut().take(2).enumerate() {
                let p0 = self.multiply_as(nx.e[2 * i], ny.e[0], true);
                let p1 = self.multiply_as(nx.e[2 * i + 1], ny.e[1], true);
                *ei = self.add(p0, p1);
            }
        } else {
            for i in 0..2 {
                for j in 0..2 {
                    let p0 = self.multiply_as(nx.e[2 * i], ny.e[j], false);
                    let p1 = self.multiply_as(nx.e[2 * i + 1], ny.e[2 + j], false);
                    e[2 * i + j] = self.add(p0, p1);
                }
            }
        }

        let r = self.make_node(nx.level, e);
        self.mult_table.insert((x, y, vector), r);
        r
    }

    /// Element-wise sum of two DDs of the same shape
    pub fn add(&mut self, x: Edge, y: Edge) -> Edge {
        if x.is_zero() {
            return y;
        }
        if y.is_zero() {
            return x;
        }
        if x.node == y.node {
            let w = self.ct.add(x.w, y.w);
            return if w.is_zero() {
                Edge::ZERO
            } else {
                Edge { node: x.node, w }
            };
        }

        let key = if x <= y { (x, y) } else { (y, x) };
        if let Some(&r) = self.add_table.get(&key) {
            return r;
        }

        let nx = self.node(x.node);
        let ny = self.node(y.node);
        let mut e = [Edge::ZERO; 4];
        for (i, ei) in e.iter_mut().enumerate() {
            let a = self.scale(nx.e[i], x.w);
            let b = self.scale(ny.e[i], y.w);
            *ei = self.add(a, b);
        }

        let r = self.make_node(nx.level, e);
        self.add_table.insert(key, r);
        r
    }

    pub fn conjugate_transpose(&mut self, x: Edge) -> Edge {
        if x.is_zero() {
            return Edge::ZERO;
        }
        let r = self.conjugate_transpose_node(x.node);
        let w = self.ct.conj(x.w);
        self.scale(r, w)
    }

    fn conjugate_transpose_node(&mut self, x: NodeId) -> Edge {
        if x == TERMINAL {
            return Edge::ONE;
        }
        if let Some(&r) = self.adjoint_table.get(&x) {
            return r;
        }

        let n = self.node(x);
        let mut e = [Edge::ZERO; 4];
        for (i, &j) in [0, 2, 1, 3].iter().enumerate() {
            e[i] = self.conjugate_transpose(n.e[j]);
        }

        let r = self.make_node(n.level, e);
        self.adjoint_table.insert(x, r);
        r
    }

    /// Fix the inputs of the given qubits to |0>
    ///
    /// Zeroes every column with a 1 on an ancillary qubit.
    pub fn reduce_ancillae(&mut self, x: Edge, ancillary: &[bool]) -> Edge {
        let mut memo = FxHashMap::default();
        self.map_node(x, &mut memo, &mut |_, level, mut e| {
            if ancillary.get(level - 1).copied().unwrap_or(false) {
                e[1] = Edge::ZERO;
                e[3] = Edge::ZERO;
            }
            e
        })
    }

    /// Replace every entry by its squared magnitude
    pub fn abs2(&mut self, x: Edge) -> Edge {
        if x.is_zero() {
            return Edge::ZERO;
        }
        let mut memo = FxHashMap::default();
        let r = self.abs2_node(x.node, &mut memo);
        let w = self.ct.norm_sqr(x.w);
        self.scale(r, w)
    }

    fn abs2_node(&mut self, x: NodeId, memo: &mut FxHashMap<NodeId, Edge>) -> Edge {
        if x == TERMINAL {
            return Edge::ONE;
        }
        if let Some(&r) = memo.get(&x) {
            return r;
        }
        let n = self.node(x);
        let mut e = [Edge::ZERO; 4];
        for (i, ei) in e.iter_mut().enumerate() {
            if !n.e[i].is_zero() {
                let c = self.abs2_node(n.e[i].node, memo);
                let w = self.ct.norm_sqr(n.e[i].w);
                *ei = self.scale(c, w);
            }
        }
        let r = self.make_node(n.level, e);
        memo.insert(x, r);
        r
    }

    /// Sum the rows (or vector entries) over the given garbage qubits
    ///
    /// Afterwards only the rows with every garbage qubit at 0 are non-zero.
    pub fn reduce_garbage(&mut self, x: Edge, garbage: &[bool], vector: bool) -> Edge {
        let mut memo = FxHashMap::default();
        self.map_node(x, &mut memo, &mut |pkg, level, e| {
            if !garbage.get(level - 1).copied().unwrap_or(false) {
                return e;
            }
            if vector {
                let s = pkg.add(e[0], e[1]);
                [s, Edge::ZERO, Edge::ZERO, Edge::ZERO]
            } else {
                let s0 = pkg.add(e[0], e[2]);
                let s1 = pkg.add(e[1], e[3]);
                [s0, s1, Edge::ZERO, Edge::ZERO]
            }
        })
    }

    /// Rebuild a DD bottom-up, letting `f` rewrite the (already mapped)
    /// successors of every node
    fn map_node<F>(&mut self, x: Edge, memo: &mut FxHashMap<NodeId, Edge>, f: &mut F) -> Edge
    where
        F: FnMut(&mut Package, usize, [Edge; 4]) -> [Edge; 4],
    {
        if x.is_zero() {
            return Edge::ZERO;
        }
        if x.is_terminal() {
            return x;
        }
        let r = match memo.get(&x.node) {
            Some(&r) => r,
            None => {
                let n = self.node(x.node);
                let mut e = [Edge::ZERO; 4];
                for (i, ei) in e.iter_mut().enumerate() {
                    *ei = self.map_node(n.e[i], memo, f);
                }
                let e = f(self, n.level, e);
                let r = self.make_node(n.level, e);
                memo.insert(x.node, r);
                r
            }
        };
        self.scale(r, x.w)
    }

    pub fn equal_up_to_global_phase(&self, x: Edge, y: Edge) -> bool {
        x.node == y.node && self.ct.same_magnitude(x.w, y.w)
    }

    /// True if `x` is the identity on all qubits, exactly or up to a phase
    pub fn is_identity(&mut self, x: Edge, up_to_phase: bool) -> bool {
        let id = self.full_identity();
        if up_to_phase {
            self.equal_up_to_global_phase(x, id)
        } else {
            x == id
        }
    }

    /// Number of distinct nodes reachable from `x`, counting the terminal
    pub fn size(&self, x: Edge) -> usize {
        let mut seen = FxHashSet::default();
        let mut stack = vec![x.node];
        while let Some(n) = stack.pop() {
            if seen.insert(n) {
                for e in self.node(n).e {
                    if !e.is_zero() {
                        stack.push(e.node);
                    }
                }
            }
        }
        seen.len()
    }

    /// The dense matrix of `x`; bit `q` of a row/column index is qubit `q`
    pub fn to_matrix(&self, x: Edge) -> Vec<Vec<Complex64>> {
        let dim = 1 << self.nqubits;
        let mut m = vec![vec![Complex64::new(0.0, 0.0); dim]; dim];
        self.fill_matrix(x, self.weight(x), 0, 0, &mut m);
        m
    }

    fn fill_matrix(
        &self,
        x: Edge,
        w: Complex64,
        row: usize,
        col: usize,
        m: &mut [Vec<Complex64>],
    ) {
        if x.is_zero() {
            return;
        }
        if x.is_terminal() {
            m[row][col] += w;
            return;
        }
        let n = self.node(x.node);
        let bit = 1 << (n.level - 1);
        for (i, e) in n.e.iter().enumerate() {
            if !e.is_zero() {
                let r = if i >> 1 == 1 { row | bit } else { row };
                let c = if i & 1 == 1 { col | bit } else { col };
                self.fill_matrix(*e, w * self.weight(*e), r, c, m);
            }
        }
    }

    /// The dense vector of `x`; bit `q` of an index is qubit `q`
    pub fn to_vector(&self, x: Edge) -> Vec<Complex64> {
        let mut v = vec![Complex64::new(0.0, 0.0); 1 << self.nqubits];
        let mut stack = vec![(x, self.weight(x), 0usize)];
        while let Some((e, w, idx)) = stack.pop() {
            if e.is_zero() {
                continue;
            }
            if e.is_terminal() {
                v[idx] += w;
                continue;
            }
            let n = self.node(e.node);
            let bit = 1 << (n.level - 1);
            stack.push((n.e[0], w * self.weight(n.e[0]), idx));
            stack.push((n.e[1], w * self.weight(n.e[1]), idx | bit));
        }
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_matrix_eq(a: &[Vec<Complex64>], b: &[Vec<Complex64>]) {
        for (ra, rb) in a.iter().zip(b.iter()) {
            for (za, zb) in ra.iter().zip(rb.iter()) {
                assert_abs_diff_eq!(za.re, zb.re, epsilon = 1e-10);
                assert_abs_diff_eq!(za.im, zb.im, epsilon = 1e-10);
            }
        }
    }

    fn dense(n: usize, f: impl Fn(usize, usize) -> Complex64) -> Vec<Vec<Complex64>> {
        (0..1 << n)
            .map(|r| (0..1 << n).map(|c| f(r, c)).collect())
            .collect()
    }

    #[test]
    fn identity_is_shared() {
        let mut dd = Package::new(3);
        let id = dd.full_identity();
        assert_eq!(dd.size(id), 4);
        assert_eq!(dd.identity(3), id);
        let m = dd.to_matrix(id);
        assert_matrix_eq(&m, &dense(3, |r, c| c_one_if(r == c)));
    }

    fn c_one_if(b: bool) -> Complex64 {
        if b {
            Complex64::new(1.0, 0.0)
        } else {
            Complex64::new(0.0, 0.0)
        }
    }

    #[test]
    fn cnot_matrix() {
        // control on qubit 0, target qubit 2
        let mut dd = Package::new(3);
        let cx = dd.gate_dd(&Gate::new(GType::CNOT, vec![0, 2])).unwrap();
        let m = dd.to_matrix(cx);
        let expected = dense(3, |r, c| {
            let image = if c & 1 == 1 { c ^ 4 } else { c };
            c_one_if(r == image)
        });
        assert_matrix_eq(&m, &expected);

        // control above the target
        let cx = dd.gate_dd(&Gate::new(GType::CNOT, vec![2, 0])).unwrap();
        let m = dd.to_matrix(cx);
        let expected = dense(3, |r, c| {
            let image = if c & 4 == 4 { c ^ 1 } else { c };
            c_one_if(r == image)
        });
        assert_matrix_eq(&m, &expected);
    }

    #[test]
    fn toffoli_and_swap() {
        let mut dd = Package::new(3);
        let t = dd.gate_dd(&Gate::new(GType::TOFF, vec![2, 0, 1])).unwrap();
        let expected = dense(3, |r, c| {
            let image = if c & 5 == 5 { c ^ 2 } else { c };
            c_one_if(r == image)
        });
        assert_matrix_eq(&dd.to_matrix(t), &expected);

        let s = dd.gate_dd(&Gate::new(GType::SWAP, vec![0, 2])).unwrap();
        let expected = dense(3, |r, c| {
            let image = (c & 2) | ((c & 1) << 2) | ((c & 4) >> 2);
            c_one_if(r == image)
        });
        assert_matrix_eq(&dd.to_matrix(s), &expected);
    }

    #[test]
    fn hadamards_square_to_identity() {
        let mut dd = Package::new(2);
        let h = dd.gate_dd(&Gate::new(GType::HAD, vec![1])).unwrap();
        let hh = dd.multiply(h, h);
        assert!(dd.is_identity(hh, false));

        let s = dd.gate_dd(&Gate::new(GType::S, vec![0])).unwrap();
        let sdg = dd.conjugate_transpose(s);
        let p = dd.multiply(s, sdg);
        assert!(dd.is_identity(p, false));

        let z = dd.gate_dd(&Gate::new(GType::Z, vec![0])).unwrap();
        let ss = dd.multiply(s, s);
        assert_eq!(ss, z);
    }

    #[test]
    fn global_phase() {
        let mut dd = Package::new(1);
        let x = dd.gate_dd(&Gate::new(GType::NOT, vec![0])).unwrap();
        let rx = dd
            .gate_dd(&Gate::new_with_phase(GType::XPhase, vec![0], 1))
            .unwrap();
        assert_ne!(x, rx);
        assert!(dd.equal_up_to_global_phase(x, rx));
    }

    #[test]
    fn states() {
        let mut dd = Package::new(2);
        let s = dd.basis_state(&[true, false]);
        let v = dd.to_vector(s);
        assert_abs_diff_eq!(v[1].re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v[0].norm() + v[2].norm() + v[3].norm(), 0.0);

        let h = dd.gate_dd(&Gate::new(GType::HAD, vec![1])).unwrap();
        let hs = dd.apply(h, s);
        let v = dd.to_vector(hs);
        assert_abs_diff_eq!(v[1].re, FRAC_1_SQRT_2, epsilon = 1e-12);
        assert_abs_diff_eq!(v[3].re, FRAC_1_SQRT_2, epsilon = 1e-12);
    }

    #[test]
    fn partial_reductions() {
        let mut dd = Package::new(2);
        // |psi> = H on qubit 1 applied to |00>: garbage qubit 1 gets summed out
        let h = dd.gate_dd(&Gate::new(GType::HAD, vec![1])).unwrap();
        let s = dd.basis_state(&[false, false]);
        let hs = dd.apply(h, s);
        let p = dd.abs2(hs);
        let r = dd.reduce_garbage(p, &[false, true], true);
        let expected = dd.basis_state(&[false, false]);
        assert_eq!(r, expected);

        // ancillary qubit 0 keeps only column 0 of the X gate
        let x = dd.gate_dd(&Gate::new(GType::NOT, vec![0])).unwrap();
        let xr = dd.reduce_ancillae(x, &[true, false]);
        let m = dd.to_matrix(xr);
        let expected = dense(2, |r, c| c_one_if(c & 1 == 0 && r == (c ^ 1)));
        assert_matrix_eq(&m, &expected);

        // summing the rows of |H|^2 gives all-ones in row 0
        let a = dd.abs2(h);
        let g = dd.reduce_garbage(a, &[false, true], false);
        let m = dd.to_matrix(g);
        let expected = dense(2, |r, c| c_one_if(r & 2 == 0 && (r & 1) == (c & 1)));
        assert_matrix_eq(&m, &expected);
    }

    #[test]
    fn agrees_with_zx_semantics() {
        use crate::circuit::Circuit;
        use crate::tensor::{assert_proportional, ToMatrix};
        use crate::vec_graph::Graph;

        let mut c = Circuit::new(3);
        c.h(0)
            .t(1)
            .cx(0, 2)
            .rx((1, 3), 1)
            .sdg(2)
            .swap(0, 1)
            .cz(1, 2)
            .rz((-3, 4), 0);

        let mut dd = Package::new(3);
        let mut u = dd.full_identity();
        for g in &c.gates {
            let e = dd.gate_dd(g).unwrap();
            u = dd.multiply(e, u);
        }

        let g: Graph = c.to_graph();
        assert_proportional(&g.to_matrix(), &dd.to_matrix(u));
    }

    #[test]
    fn rejects_measurements() {
        let mut dd = Package::new(1);
        assert!(matches!(
            dd.gate_dd(&Gate::measure(0, 0)),
            Err(Error::UnsupportedGate(_))
        ));
    }
}
