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

pub mod basic_rules;
pub mod bv;
pub mod circuit;
pub mod dd;
pub mod ec;
pub mod error;
pub mod gate;
pub mod graph;
pub mod phase;
pub mod scalar;
pub mod simplify;
pub mod vec_graph;

#[cfg(test)]
mod tensor;

pub use error::Error;
