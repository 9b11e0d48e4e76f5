// bveq - static and dynamic Bernstein-Vazirani circuits and their
//        equivalence, checked with the ZX-calculus and decision diagrams
// Copyright (C) 2021 - Aleks Kissinger
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::basic_rules::*;
use crate::graph::*;
use crate::phase::Phase;
use num::Zero;
use rustc_hash::FxHashMap;

/// Repeatedly apply the given rule at any vertex
/// that matches the check function
///
/// We assume the rule will at most delete the current
/// vertex, and leave other vertices in place (although
/// edges might change).
pub fn vertex_simp<G: GraphLike>(
    g: &mut G,
    check: fn(&G, V) -> bool,
    rule: fn(&mut G, V),
    force_reduce: bool,
) -> bool {
    let mut got_match = false;
    let mut new_matches = true;
    let mut numv;
    while new_matches {
        numv = g.num_vertices();
        new_matches = false;
        for v in g.vertex_vec() {
            if g.contains_vertex(v) && check(g, v) {
                rule(g, v);
                new_matches = true;
                got_match = true;
            }
        }
        if force_reduce && numv >= g.num_vertices() {
            break;
        }
    }

    got_match
}

pub fn edge_simp<G: GraphLike>(
    g: &mut G,
    check: fn(&G, V, V) -> bool,
    rule: fn(&mut G, V, V),
    force_reduce: bool,
) -> bool {
    let mut got_match = false;
    let mut new_matches = true;
    let mut numv;
    while new_matches {
        numv = g.num_vertices();
        new_matches = false;
        for (s, t, _) in g.edge_vec() {
            if !g.contains_vertex(s) || !g.contains_vertex(t) || !check(g, s, t) {
                continue;
            }
            rule(g, s, t);
            new_matches = true;
            got_match = true;
        }
        if force_reduce && numv >= g.num_vertices() {
            break;
        }
    }

    got_match
}

pub fn id_simp(g: &mut impl GraphLike) -> bool {
    vertex_simp(g, check_remove_id, remove_id_unchecked, false)
}

pub fn local_comp_simp(g: &mut impl GraphLike) -> bool {
    vertex_simp(g, check_local_comp, local_comp_unchecked, false)
}

pub fn spider_simp(g: &mut impl GraphLike) -> bool {
    edge_simp(g, check_spider_fusion, spider_fusion_unchecked, false)
}

pub fn pivot_simp(g: &mut impl GraphLike) -> bool {
    edge_simp(g, check_pivot, pivot_unchecked, false)
}

pub fn gen_pivot_simp(g: &mut impl GraphLike) -> bool {
    edge_simp(g, check_gen_pivot_reduce, gen_pivot_unchecked, false)
}

pub fn scalar_simp(g: &mut impl GraphLike) -> bool {
    let mut m = vertex_simp(g, check_remove_single, remove_single_unchecked, false);
    m = edge_simp(g, check_remove_pair, remove_pair_unchecked, false) || m;
    m
}

pub fn interior_clifford_simp(g: &mut impl GraphLike) -> bool {
    spider_simp(g);
    g.x_to_z();
    let mut got_match = false;
    let mut m = true;
    while m {
        m = id_simp(g);
        m = spider_simp(g) || m;
        m = pivot_simp(g) || m;
        m = local_comp_simp(g) || m;
        m = scalar_simp(g) || m;
        if m {
            got_match = true;
        }
    }

    got_match
}

pub fn clifford_simp(g: &mut impl GraphLike) -> bool {
    let mut got_match = false;
    let mut m = true;
    while m {
        m = interior_clifford_simp(g);
        m = gen_pivot_simp(g) || m;
        if m {
            got_match = true;
        }
    }

    got_match
}

/// Merge phase gadgets that act on the same set of spiders
pub fn fuse_gadgets(g: &mut impl GraphLike) -> bool {
    let mut gadgets: FxHashMap<Vec<V>, Vec<(V, V)>> = FxHashMap::default();

    for v in g.vertices() {
        if g.degree(v) != 1 || g.vertex_type(v) != VType::Z {
            continue;
        }
        let Some(w) = g.neighbors(v).next() else {
            continue;
        };
        if g.vertex_type(w) != VType::Z || !g.phase(w).is_zero() {
            continue;
        }
        let mut nhd: Vec<V> = g
            .incident_edges(w)
            .filter(|&(n, et)| n != v && g.vertex_type(n) == VType::Z && et == EType::H)
            .map(|(n, _)| n)
            .collect();
        nhd.sort();
        gadgets.entry(nhd).or_default().push((w, v));
    }

    let mut fused = false;
    for gs in gadgets.values() {
        if gs.len() > 1 {
            fused = true;
            let mut ph = Phase::zero();
            for &(axle, leaf) in &gs[1..] {
                ph += g.phase(leaf);
                g.remove_vertex(axle);
                g.remove_vertex(leaf);
            }

            g.add_to_phase(gs[0].1, ph);
        }
    }

    fused
}

/// Perform a pi-copies to remove all pi phases from the
/// centers of phase gadgets.
fn remove_gadget_pi(g: &mut impl GraphLike) -> bool {
    let gadgets = g
        .vertices()
        // Look for the outsides of phase gadgets
        .filter(|&v| g.degree(v) == 1 && g.vertex_type(v) == VType::Z)
        .filter_map(|v| g.neighbors(v).next().map(|n| (n, v)))
        // Check that the middle is a pi-phase
        .filter(|&(n, v)| {
            g.edge_type(v, n) == EType::H
                && g.vertex_type(n) == VType::Z
                && g.phase(n) == Phase::new(1)
        })
        // Collect them in a hash-map keyed by the central vertex
        // so that multiple phases hanging off a single gadget
        // are only mapped to one phase to flip
        .collect::<FxHashMap<_, _>>();

    let matched = !gadgets.is_empty();

    for &v in gadgets.values() {
        // the match above already established the gadget shape
        pi_copy_unchecked(g, v);
    }

    matched
}

pub fn full_simp(g: &mut impl GraphLike) -> bool {
    let mut got_match = false;
    let mut m = true;
    while m {
        m = clifford_simp(g);
        m = fuse_gadgets(g) || m;
        m = remove_gadget_pi(g) || m;
        if m {
            got_match = true;
        }
    }

    got_match
}
