//! Hint providers and hint normalization.
//!
//! Each provider reports a [`ProviderHints`] map (resource name → hints).
//! Before enumeration the maps are flattened into one ordered list of
//! hint lists: provider order first, then resource name order.

use std::collections::BTreeMap;

use numalign_core::{NumaNodes, TopologyHint};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One provider's hints, keyed by resource name.
///
/// A resource missing from the map does not take part in alignment. A
/// resource mapped to an empty list has no opinion and is treated as
/// unconstrained.
pub type ProviderHints = BTreeMap<String, Vec<TopologyHint>>;

/// A resource manager that reports topology hints for the pod under
/// admission.
pub trait HintProvider {
    fn name(&self) -> &str;

    fn topology_hints(&self) -> ProviderHints;
}

/// Gather hints from every provider, keeping provider order.
pub fn collect_hints(providers: &[&dyn HintProvider]) -> Vec<ProviderHints> {
    providers.iter().map(|p| p.topology_hints()).collect()
}

/// A provider with a fixed set of hints, as loaded from a hints file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticHintProvider {
    pub name: String,
    #[serde(default)]
    pub hints: ProviderHints,
}

impl StaticHintProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hints: ProviderHints::new(),
        }
    }

    pub fn with_hints(mut self, resource: impl Into<String>, hints: Vec<TopologyHint>) -> Self {
        self.hints.insert(resource.into(), hints);
        self
    }
}

impl HintProvider for StaticHintProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn topology_hints(&self) -> ProviderHints {
        self.hints.clone()
    }
}

/// Normalized, ordered hint lists ready for enumeration.
///
/// `resources[i]` names the resource whose hints are `hints[i]`. Every
/// list is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenedHints {
    pub resources: Vec<String>,
    pub hints: Vec<Vec<TopologyHint>>,
}

impl FlattenedHints {
    pub fn len(&self) -> usize {
        self.hints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TopologyHint])> {
        self.resources
            .iter()
            .map(String::as_str)
            .zip(self.hints.iter().map(Vec::as_slice))
    }
}

/// Flatten and normalize provider hints against the node universe.
///
/// Empty lists become `[unconstrained]`. Masks reaching past the universe
/// are clamped to it.
pub fn flatten_provider_hints(providers: &[ProviderHints], nodes: &NumaNodes) -> FlattenedHints {
    let mut flat = FlattenedHints::default();

    for provider in providers {
        for (resource, hints) in provider {
            let normalized = if hints.is_empty() {
                vec![TopologyHint::unconstrained(nodes)]
            } else {
                hints
                    .iter()
                    .map(|hint| {
                        let affinity = nodes.clamp(hint.affinity);
                        if affinity != hint.affinity {
                            warn!(
                                resource = %resource,
                                affinity = %hint.affinity,
                                numa_nodes = nodes.count(),
                                "hint reaches past the NUMA node universe, clamping"
                            );
                        }
                        TopologyHint::new(affinity, hint.preferred)
                    })
                    .collect()
            };
            flat.resources.push(resource.clone());
            flat.hints.push(normalized);
        }
    }

    flat
}
