//! numalign-policy — topology hint merging and admission policies.
//!
//! Resource providers (CPU, memory, devices) each report where they could
//! place a pod's resources as lists of `TopologyHint`s. This crate
//! reconciles those lists into one aligned placement and decides whether
//! the alignment is good enough to admit the pod.
//!
//! # Components
//!
//! - **`provider`** — `HintProvider` trait and hint normalization
//! - **`permutation`** — lazy Cartesian product over per-resource hint lists
//! - **`merger`** — per-permutation reduction and best-hint selection
//! - **`policy`** — the `none`, `best-effort`, `restricted` and
//!   `single-numa-node` policies
//!
//! # Data flow
//!
//! ```text
//! providers ──► [ProviderHints] ──► flatten ──► Permutations
//!                                                   │
//!                         policy filter ◄── merge_permutation
//!                               │
//!                          comparator ──► best TopologyHint ──► AdmissionResult
//! ```

pub mod merger;
pub mod permutation;
pub mod policy;
pub mod provider;

pub use merger::{MergeOutcome, is_better, merge_hints, merge_permutation};
pub use permutation::Permutations;
pub use policy::{BestEffortPolicy, MergePolicy, NonePolicy, Policy, RestrictedPolicy, SingleNumaNodePolicy};
pub use provider::{FlattenedHints, HintProvider, ProviderHints, StaticHintProvider, collect_hints, flatten_provider_hints};
