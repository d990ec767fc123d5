//! Topology configuration error types.

use thiserror::Error;

/// Errors raised while building the topology alignment setup.
///
/// These are all startup-time failures. A pod that cannot be aligned is
/// not an error: it gets a rejecting [`AdmissionResult`](crate::AdmissionResult).
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("unknown topology policy: {0}")]
    UnknownPolicy(String),

    #[error("invalid NUMA node count {0}: must be between 1 and {max}", max = crate::MAX_NUMA_NODES)]
    InvalidNumaNodeCount(usize),

    #[error("{count} NUMA nodes exceed the allowed maximum of {max}")]
    TooManyNumaNodes { count: usize, max: usize },

    #[error("NUMA node {node} out of range for a {count}-node topology")]
    NodeOutOfRange { node: usize, count: usize },

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TopologyResult<T> = Result<T, TopologyError>;
