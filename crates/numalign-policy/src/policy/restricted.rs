use numalign_core::{AdmissionResult, NumaNodes, PolicyKind, TopologyHint};
use tracing::{debug, warn};

use super::{MergePolicy, merge_providers};
use crate::provider::{FlattenedHints, ProviderHints};

/// Admit only when all providers agree on a preferred alignment.
#[derive(Debug, Clone)]
pub struct RestrictedPolicy {
    nodes: NumaNodes,
}

impl RestrictedPolicy {
    pub fn new(nodes: NumaNodes) -> Self {
        Self { nodes }
    }
}

impl MergePolicy for RestrictedPolicy {
    fn name(&self) -> &'static str {
        PolicyKind::Restricted.name()
    }

    fn merge(&self, providers: &[ProviderHints]) -> (TopologyHint, AdmissionResult) {
        let (flat, outcome) = merge_providers(&self.nodes, providers, |_| true);
        let best = outcome.best;

        if best.preferred {
            debug!(policy = self.name(), best = %best, "admitting pod");
            return (best, AdmissionResult::admit());
        }

        let unaligned = unaligned_resources(&flat, &best);
        let message = if unaligned.is_empty() {
            format!("resources cannot be aligned on a preferred NUMA affinity (best: {})", best.affinity)
        } else {
            format!(
                "resources [{}] cannot be aligned on a preferred NUMA affinity (best: {})",
                unaligned.join(", "),
                best.affinity
            )
        };
        warn!(policy = self.name(), best = %best, reason = %message, "rejecting pod");
        (best, AdmissionResult::reject(message))
    }
}

/// Resources with no preferred hint covering the best affinity.
///
/// With an empty best affinity every resource is unaligned.
fn unaligned_resources<'a>(flat: &'a FlattenedHints, best: &TopologyHint) -> Vec<&'a str> {
    let mut unaligned: Vec<&str> = Vec::new();
    for (resource, hints) in flat.iter() {
        let aligned = !best.affinity.is_empty()
            && hints
                .iter()
                .any(|h| h.preferred && best.affinity.is_subset_of(&h.affinity));
        if !aligned && !unaligned.contains(&resource) {
            unaligned.push(resource);
        }
    }
    unaligned
}
