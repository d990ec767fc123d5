//! NUMA affinity masks.
//!
//! An [`AffinityMask`] is a set of NUMA node ids drawn from a fixed
//! [`NumaNodes`] universe. Masks are plain `Copy` values: combining two
//! masks always produces a new one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TopologyError, TopologyResult};

/// Largest NUMA node universe an [`AffinityMask`] can describe.
pub const MAX_NUMA_NODES: usize = u64::BITS as usize;

/// A set of NUMA node ids.
///
/// The empty mask is valid and means "no alignment possible". Fewer set
/// bits means a narrower, more specific placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "Vec<usize>", try_from = "Vec<usize>")]
pub struct AffinityMask(u64);

impl AffinityMask {
    /// The mask with no node set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Mask holding a single node.
    pub fn single(node: usize) -> TopologyResult<Self> {
        Self::from_nodes(&[node])
    }

    /// Build a mask from a list of node ids. Duplicates are ignored.
    pub fn from_nodes(nodes: &[usize]) -> TopologyResult<Self> {
        let mut bits = 0u64;
        for &node in nodes {
            if node >= MAX_NUMA_NODES {
                return Err(TopologyError::NodeOutOfRange {
                    node,
                    count: MAX_NUMA_NODES,
                });
            }
            bits |= 1 << node;
        }
        Ok(Self(bits))
    }

    /// Nodes present in both masks.
    pub fn intersect(&self, other: &Self) -> Self {
        Self(self.0 & other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of nodes in the mask.
    pub fn count(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_set(&self, node: usize) -> bool {
        node < MAX_NUMA_NODES && self.0 & (1 << node) != 0
    }

    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// Strictly fewer nodes than `other`.
    pub fn is_narrower_than(&self, other: &Self) -> bool {
        self.count() < other.count()
    }

    /// Node ids in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = usize> + '_ {
        (0..MAX_NUMA_NODES).filter(|&node| self.is_set(node))
    }
}

impl fmt::Display for AffinityMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for node in self.nodes() {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{node}")?;
            first = false;
        }
        if first {
            f.write_str("<none>")?;
        }
        Ok(())
    }
}

impl From<AffinityMask> for Vec<usize> {
    fn from(mask: AffinityMask) -> Self {
        mask.nodes().collect()
    }
}

impl TryFrom<Vec<usize>> for AffinityMask {
    type Error = TopologyError;

    fn try_from(nodes: Vec<usize>) -> TopologyResult<Self> {
        Self::from_nodes(&nodes)
    }
}

/// The universe of NUMA nodes `[0, count)` on this host.
///
/// Fixed once at startup from node discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct NumaNodes {
    count: usize,
}

impl NumaNodes {
    pub fn new(count: usize) -> TopologyResult<Self> {
        if count == 0 || count > MAX_NUMA_NODES {
            return Err(TopologyError::InvalidNumaNodeCount(count));
        }
        Ok(Self { count })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Mask with every node of the universe set.
    pub fn full_mask(&self) -> AffinityMask {
        if self.count == MAX_NUMA_NODES {
            AffinityMask(u64::MAX)
        } else {
            AffinityMask((1 << self.count) - 1)
        }
    }

    /// Drop any node outside the universe.
    pub fn clamp(&self, mask: AffinityMask) -> AffinityMask {
        mask.intersect(&self.full_mask())
    }
}

impl TryFrom<usize> for NumaNodes {
    type Error = TopologyError;

    fn try_from(count: usize) -> TopologyResult<Self> {
        Self::new(count)
    }
}

impl From<NumaNodes> for usize {
    fn from(nodes: NumaNodes) -> Self {
        nodes.count
    }
}
