//! Topology alignment policies.
//!
//! Every policy shares the same merge core ([`merge_hints`]) and differs
//! only in which candidates it lets through and how it turns the best
//! hint into an [`AdmissionResult`].
//!
//! | Policy             | Filter                    | Admits when            |
//! |--------------------|---------------------------|------------------------|
//! | `none`             | no merge at all           | always                 |
//! | `best-effort`      | none                      | always                 |
//! | `restricted`       | none                      | best hint is preferred |
//! | `single-numa-node` | exactly one node          | best hint is preferred |

mod best_effort;
mod none;
mod restricted;
mod single_numa_node;

pub use best_effort::BestEffortPolicy;
pub use none::NonePolicy;
pub use restricted::RestrictedPolicy;
pub use single_numa_node::SingleNumaNodePolicy;

use numalign_core::{AdmissionResult, NumaNodes, PolicyKind, TopologyConfig, TopologyHint, TopologyResult};
use tracing::info;

use crate::merger::{MergeOutcome, merge_hints};
use crate::provider::{FlattenedHints, ProviderHints, flatten_provider_hints};

/// A topology alignment policy as seen by the admission pipeline.
///
/// Implementations are stateless: concurrent calls for different pods
/// need no synchronization, and identical inputs give identical output.
pub trait MergePolicy: Send + Sync {
    /// Stable identifier for logs and metrics.
    fn name(&self) -> &'static str;

    /// Merge provider hints into one hint and an admission verdict.
    fn merge(&self, providers: &[ProviderHints]) -> (TopologyHint, AdmissionResult);
}

/// The configured policy, one per process.
#[derive(Debug, Clone)]
pub enum Policy {
    None(NonePolicy),
    BestEffort(BestEffortPolicy),
    Restricted(RestrictedPolicy),
    SingleNumaNode(SingleNumaNodePolicy),
}

impl Policy {
    pub fn new(kind: PolicyKind, nodes: NumaNodes) -> Self {
        match kind {
            PolicyKind::None => Policy::None(NonePolicy::new(nodes)),
            PolicyKind::BestEffort => Policy::BestEffort(BestEffortPolicy::new(nodes)),
            PolicyKind::Restricted => Policy::Restricted(RestrictedPolicy::new(nodes)),
            PolicyKind::SingleNumaNode => Policy::SingleNumaNode(SingleNumaNodePolicy::new(nodes)),
        }
    }

    /// Validate the config and build its policy.
    pub fn from_config(config: &TopologyConfig) -> TopologyResult<Self> {
        let nodes = config.validate()?;
        let policy = Self::new(config.policy(), nodes);
        info!(
            policy = policy.name(),
            numa_nodes = nodes.count(),
            "topology policy configured"
        );
        Ok(policy)
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            Policy::None(_) => PolicyKind::None,
            Policy::BestEffort(_) => PolicyKind::BestEffort,
            Policy::Restricted(_) => PolicyKind::Restricted,
            Policy::SingleNumaNode(_) => PolicyKind::SingleNumaNode,
        }
    }

    fn inner(&self) -> &dyn MergePolicy {
        match self {
            Policy::None(p) => p,
            Policy::BestEffort(p) => p,
            Policy::Restricted(p) => p,
            Policy::SingleNumaNode(p) => p,
        }
    }
}

impl MergePolicy for Policy {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn merge(&self, providers: &[ProviderHints]) -> (TopologyHint, AdmissionResult) {
        self.inner().merge(providers)
    }
}

/// Flatten the providers' hints and run the shared merge core.
fn merge_providers<F>(
    nodes: &NumaNodes,
    providers: &[ProviderHints],
    keep: F,
) -> (FlattenedHints, MergeOutcome)
where
    F: Fn(&TopologyHint) -> bool,
{
    let flat = flatten_provider_hints(providers, nodes);
    let outcome = merge_hints(nodes, &flat.hints, keep);
    (flat, outcome)
}
