//! Shared types used across numalign crates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TopologyError;
use crate::mask::{AffinityMask, NumaNodes};

/// Reason code carried by every rejecting [`AdmissionResult`].
pub const TOPOLOGY_AFFINITY_ERROR: &str = "TopologyAffinityError";

/// A provider's opinion on where a resource could be placed.
///
/// `preferred` marks the affinity as optimal for the provider, as opposed
/// to merely possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopologyHint {
    pub affinity: AffinityMask,
    pub preferred: bool,
}

impl TopologyHint {
    pub fn new(affinity: AffinityMask, preferred: bool) -> Self {
        Self {
            affinity,
            preferred,
        }
    }

    /// "Anywhere is fine": the full universe, preferred.
    ///
    /// Stands in for providers that reported no hints.
    pub fn unconstrained(nodes: &NumaNodes) -> Self {
        Self::new(nodes.full_mask(), true)
    }

    /// The worst possible hint: no node, not preferred.
    pub fn unsatisfiable() -> Self {
        Self::new(AffinityMask::empty(), false)
    }
}

impl fmt::Display for TopologyHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{affinity: {}, preferred: {}}}", self.affinity, self.preferred)
    }
}

/// Admit / reject verdict handed back to the pod admission pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionResult {
    pub admit: bool,
    pub reason: Option<String>,
}

impl AdmissionResult {
    pub fn admit() -> Self {
        Self {
            admit: true,
            reason: None,
        }
    }

    /// Reject, prefixing the message with [`TOPOLOGY_AFFINITY_ERROR`].
    pub fn reject(message: impl AsRef<str>) -> Self {
        Self {
            admit: false,
            reason: Some(format!("{TOPOLOGY_AFFINITY_ERROR}: {}", message.as_ref())),
        }
    }

    pub fn is_admitted(&self) -> bool {
        self.admit
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

/// Which alignment policy a node runs. Chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    /// Alignment administratively disabled.
    #[default]
    None,
    /// Compute the best alignment, admit regardless.
    BestEffort,
    /// Admit only when every provider agrees on a preferred alignment.
    Restricted,
    /// Like `Restricted`, limited to a single NUMA node.
    SingleNumaNode,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::None,
        PolicyKind::BestEffort,
        PolicyKind::Restricted,
        PolicyKind::SingleNumaNode,
    ];

    /// Stable identifier used in config files, logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            PolicyKind::None => "none",
            PolicyKind::BestEffort => "best-effort",
            PolicyKind::Restricted => "restricted",
            PolicyKind::SingleNumaNode => "single-numa-node",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| TopologyError::UnknownPolicy(s.to_string()))
    }
}
