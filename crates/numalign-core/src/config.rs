//! numalign.toml configuration parser.
//!
//! ```toml
//! [topology_manager]
//! policy = "single-numa-node"
//! numa_nodes = 2
//! max_allowable_numa_nodes = 8
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{TopologyError, TopologyResult};
use crate::mask::NumaNodes;
use crate::types::PolicyKind;

/// Hosts with more NUMA nodes than this must raise `max_allowable_numa_nodes`.
pub const DEFAULT_MAX_ALLOWABLE_NUMA_NODES: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyConfig {
    pub topology_manager: TopologyManagerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyManagerConfig {
    #[serde(default)]
    pub policy: PolicyKind,
    /// Validated on load: 1..=64 nodes.
    pub numa_nodes: NumaNodes,
    pub max_allowable_numa_nodes: Option<usize>,
}

impl TopologyConfig {
    pub fn from_file(path: &Path) -> TopologyResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate. Unknown policy names fail here.
    pub fn from_toml_str(content: &str) -> TopologyResult<Self> {
        let config: TopologyConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> TopologyResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Scaffold a config for the given policy and host size.
    pub fn scaffold(policy: PolicyKind, numa_nodes: NumaNodes) -> Self {
        TopologyConfig {
            topology_manager: TopologyManagerConfig {
                policy,
                numa_nodes,
                max_allowable_numa_nodes: Some(DEFAULT_MAX_ALLOWABLE_NUMA_NODES),
            },
        }
    }

    pub fn policy(&self) -> PolicyKind {
        self.topology_manager.policy
    }

    pub fn max_allowable_numa_nodes(&self) -> usize {
        self.topology_manager
            .max_allowable_numa_nodes
            .unwrap_or(DEFAULT_MAX_ALLOWABLE_NUMA_NODES)
    }

    /// Check the node count against the allowed maximum, returning the
    /// node universe.
    pub fn validate(&self) -> TopologyResult<NumaNodes> {
        let nodes = self.topology_manager.numa_nodes;
        let count = nodes.count();
        let max = self.max_allowable_numa_nodes();
        // Alignment is only skipped entirely under `none`, so the cap only
        // matters for the merging policies.
        if self.policy() != PolicyKind::None && count > max {
            return Err(TopologyError::TooManyNumaNodes { count, max });
        }
        Ok(nodes)
    }
}
