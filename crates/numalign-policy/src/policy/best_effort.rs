use numalign_core::{AdmissionResult, NumaNodes, PolicyKind, TopologyHint};
use tracing::debug;

use super::{MergePolicy, merge_providers};
use crate::provider::ProviderHints;

/// Merge every permutation and always admit.
///
/// The best hint is advisory: resource managers use it as a placement
/// preference when allocating.
#[derive(Debug, Clone)]
pub struct BestEffortPolicy {
    nodes: NumaNodes,
}

impl BestEffortPolicy {
    pub fn new(nodes: NumaNodes) -> Self {
        Self { nodes }
    }
}

impl MergePolicy for BestEffortPolicy {
    fn name(&self) -> &'static str {
        PolicyKind::BestEffort.name()
    }

    fn merge(&self, providers: &[ProviderHints]) -> (TopologyHint, AdmissionResult) {
        let (_, outcome) = merge_providers(&self.nodes, providers, |_| true);
        debug!(policy = self.name(), best = %outcome.best, "admitting pod");
        (outcome.best, AdmissionResult::admit())
    }
}
