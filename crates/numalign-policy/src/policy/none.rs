use numalign_core::{AdmissionResult, NumaNodes, PolicyKind, TopologyHint};

use super::MergePolicy;
use crate::provider::ProviderHints;

/// Alignment disabled: never merges, always admits.
#[derive(Debug, Clone)]
pub struct NonePolicy {
    nodes: NumaNodes,
}

impl NonePolicy {
    pub fn new(nodes: NumaNodes) -> Self {
        Self { nodes }
    }
}

impl MergePolicy for NonePolicy {
    fn name(&self) -> &'static str {
        PolicyKind::None.name()
    }

    /// Returns the unconstrained hint: any node will do.
    fn merge(&self, _providers: &[ProviderHints]) -> (TopologyHint, AdmissionResult) {
        (TopologyHint::unconstrained(&self.nodes), AdmissionResult::admit())
    }
}
