use numalign_core::{AdmissionResult, NumaNodes, PolicyKind, TopologyHint};
use tracing::{debug, warn};

use super::{MergePolicy, merge_providers};
use crate::provider::ProviderHints;

/// Admit only when a preferred alignment fits on one NUMA node.
///
/// Candidates spanning zero or several nodes are dropped before the
/// comparator runs. The only exception is a pod with no resource hints
/// at all: its single, empty permutation has nothing to align.
#[derive(Debug, Clone)]
pub struct SingleNumaNodePolicy {
    nodes: NumaNodes,
}

impl SingleNumaNodePolicy {
    pub fn new(nodes: NumaNodes) -> Self {
        Self { nodes }
    }

    fn keeps(candidate: &TopologyHint, no_resources: bool) -> bool {
        no_resources || candidate.affinity.count() == 1
    }
}

impl MergePolicy for SingleNumaNodePolicy {
    fn name(&self) -> &'static str {
        PolicyKind::SingleNumaNode.name()
    }

    fn merge(&self, providers: &[ProviderHints]) -> (TopologyHint, AdmissionResult) {
        let no_resources = providers.iter().all(|p| p.is_empty());
        let (_, outcome) =
            merge_providers(&self.nodes, providers, |c| Self::keeps(c, no_resources));
        let best = outcome.best;

        if outcome.retained > 0 && best.preferred {
            debug!(policy = self.name(), best = %best, "admitting pod");
            return (best, AdmissionResult::admit());
        }

        let message = if outcome.retained == 0 {
            "no single NUMA node alignment is achievable".to_string()
        } else {
            format!(
                "no preferred single NUMA node alignment is achievable (best: {})",
                best.affinity
            )
        };
        warn!(
            policy = self.name(),
            examined = outcome.examined,
            retained = outcome.retained,
            reason = %message,
            "rejecting pod"
        );
        (best, AdmissionResult::reject(message))
    }
}
