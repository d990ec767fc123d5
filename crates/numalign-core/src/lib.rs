//! numalign-core — shared types for NUMA topology alignment.
//!
//! Holds the value types every other numalign crate speaks in:
//!
//! - **`mask`** — `AffinityMask` bitsets over the `NumaNodes` universe
//! - **`types`** — `TopologyHint`, `AdmissionResult`, `PolicyKind`
//! - **`config`** — `numalign.toml` parsing and startup validation
//! - **`error`** — configuration errors

pub mod config;
pub mod error;
pub mod mask;
pub mod types;

pub use config::{TopologyConfig, TopologyManagerConfig};
pub use error::{TopologyError, TopologyResult};
pub use mask::{AffinityMask, MAX_NUMA_NODES, NumaNodes};
pub use types::*;
