//! Hint merging — reduce permutations and pick the best candidate.
//!
//! Each permutation is reduced to one hint: the intersection of all its
//! masks, preferred only if every hint in it is preferred. Candidates are
//! then folded left to right into a running best, starting from the
//! unsatisfiable hint `{empty, preferred: false}`.

use numalign_core::{NumaNodes, TopologyHint};
use tracing::{debug, trace};

use crate::permutation::Permutations;

/// Result of a merge, with enumeration statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Best merged hint, or the unsatisfiable hint if no candidate won.
    pub best: TopologyHint,
    /// Permutations enumerated.
    pub examined: usize,
    /// Permutations that passed the policy filter.
    pub retained: usize,
}

/// Reduce one permutation to a single hint.
///
/// The empty permutation reduces to the unconstrained hint.
pub fn merge_permutation(nodes: &NumaNodes, permutation: &[TopologyHint]) -> TopologyHint {
    permutation
        .iter()
        .fold(TopologyHint::unconstrained(nodes), |acc, hint| {
            TopologyHint::new(
                acc.affinity.intersect(&hint.affinity),
                acc.preferred && hint.preferred,
            )
        })
}

/// Whether `candidate` replaces `best` as the running best.
///
/// An empty affinity never wins. Otherwise preferred beats non-preferred,
/// and at equal preference the strictly narrower mask wins. Exact ties
/// keep the earlier hint.
pub fn is_better(candidate: &TopologyHint, best: &TopologyHint) -> bool {
    if candidate.affinity.is_empty() {
        return false;
    }
    if best.affinity.is_empty() {
        return true;
    }
    if candidate.preferred != best.preferred {
        return candidate.preferred;
    }
    candidate.affinity.is_narrower_than(&best.affinity)
}

/// Enumerate every permutation of `lists`, keep those accepted by
/// `keep`, and return the best merged hint.
///
/// # Panics
///
/// Panics if no permutation exists, which normalized hint lists never
/// allow.
pub fn merge_hints<F>(nodes: &NumaNodes, lists: &[Vec<TopologyHint>], keep: F) -> MergeOutcome
where
    F: Fn(&TopologyHint) -> bool,
{
    let outcome = Permutations::new(lists)
        .map(|permutation| merge_permutation(nodes, &permutation))
        .fold(
            MergeOutcome {
                best: TopologyHint::unsatisfiable(),
                examined: 0,
                retained: 0,
            },
            |mut outcome, candidate| {
                outcome.examined += 1;
                if !keep(&candidate) {
                    trace!(candidate = %candidate, "candidate filtered out");
                    return outcome;
                }
                outcome.retained += 1;
                if is_better(&candidate, &outcome.best) {
                    debug!(
                        candidate = %candidate,
                        previous = %outcome.best,
                        "new best merged hint"
                    );
                    outcome.best = candidate;
                }
                outcome
            },
        );

    assert!(
        outcome.examined > 0,
        "hint merge enumerated no permutations; a hint list was not normalized"
    );

    debug!(
        resources = lists.len(),
        examined = outcome.examined,
        retained = outcome.retained,
        best = %outcome.best,
        "merged topology hints"
    );
    outcome
}
