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

use super::preprocess::PreparedCircuit;
use super::results::EquivalenceCriterion;
use crate::graph::GraphLike;
use crate::simplify::full_simp;
use crate::vec_graph::Graph;
use num::Zero;

/// Checks if two graphs have the same number of inputs and outputs.
pub fn equal_graph_dim(g1: &impl GraphLike, g2: &impl GraphLike) -> bool {
    g1.inputs().len() == g2.inputs().len() && g1.outputs().len() == g2.outputs().len()
}

/// Verifies the equality of two graphs by checking whether they "cancel each other out".
///
/// One graph is composed with the adjoint of the other. If simplifying the
/// result yields the identity, the graphs are equal, exactly if the
/// remaining scalar has phase 0 and up to global phase otherwise.
///
/// Simplification may fail to reach the identity even for equal graphs, so
/// this never proves two graphs unequal. Graphs of different dimension are
/// reported as not equivalent.
pub fn check_graphs(g1: &Graph, g2: &Graph) -> EquivalenceCriterion {
    if !equal_graph_dim(g1, g2) {
        return EquivalenceCriterion::NotEquivalent;
    }
    let mut g = g1.to_adjoint();
    g.plug(g2);
    full_simp(&mut g);
    log::debug!(
        "zx: {} vertices and {} edges left after simplification",
        g.num_vertices(),
        g.num_edges()
    );

    if g.is_identity() {
        if g.scalar().phase().is_zero() {
            EquivalenceCriterion::Equivalent
        } else {
            EquivalenceCriterion::EquivalentUpToGlobalPhase
        }
    } else {
        EquivalenceCriterion::NoInformation
    }
}

/// Run the ZX checker on two prepared circuits of the same width.
pub fn check(p1: &PreparedCircuit, p2: &PreparedCircuit) -> EquivalenceCriterion {
    let g1: Graph = p1.circuit.to_graph();
    let g2: Graph = p2.circuit.to_graph();
    check_graphs(&g1, &g2)
}
