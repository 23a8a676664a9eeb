// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::EdgeId;

/// Source of live costs of entering an edge, usually a snapshot
/// of current travel times taken from the simulation.
pub trait CostTable {
    fn cost(&self, edge: EdgeId) -> Option<f32>;
}

impl<S: BuildHasher> CostTable for HashMap<EdgeId, f32, S> {
    #[inline]
    fn cost(&self, edge: EdgeId) -> Option<f32> {
        self.get(&edge).cloned()
    }
}

impl CostTable for BTreeMap<EdgeId, f32> {
    #[inline]
    fn cost(&self, edge: EdgeId) -> Option<f32> {
        self.get(&edge).cloned()
    }
}

impl<C: CostTable + ?Sized> CostTable for &C {
    #[inline]
    fn cost(&self, edge: EdgeId) -> Option<f32> {
        (**self).cost(edge)
    }
}
