use fxhash::FxHashMap;

use crate::problem::node::NodeIdx;

/// Sparse urban distances between nodes.
///
/// Pairs that were never inserted have distance 0: the leg is either
/// negligible or already accounted for elsewhere. Absence is not an error.
#[derive(Debug, Clone, Default)]
pub struct DistanceTable {
    distances: FxHashMap<(NodeIdx, NodeIdx), f64>,
}

impl DistanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous distance when the pair was already present.
    pub fn insert(&mut self, from: NodeIdx, to: NodeIdx, distance: f64) -> Option<f64> {
        self.distances.insert((from, to), distance)
    }

    #[inline]
    pub fn distance(&self, from: NodeIdx, to: NodeIdx) -> f64 {
        self.distances.get(&(from, to)).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, from: NodeIdx, to: NodeIdx) -> bool {
        self.distances.contains_key(&(from, to))
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}
