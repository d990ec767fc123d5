//! Property tests for the merge core.

use numalign_core::{AffinityMask, NumaNodes, PolicyKind, TopologyHint};
use numalign_policy::*;
use proptest::prelude::*;

const NUMA_NODES: usize = 4;

fn nodes() -> NumaNodes {
    NumaNodes::new(NUMA_NODES).unwrap()
}

fn any_hint() -> impl Strategy<Value = TopologyHint> {
    (0u64..(1 << NUMA_NODES), any::<bool>()).prop_map(|(bits, preferred)| {
        let nodes: Vec<usize> = (0..NUMA_NODES).filter(|n| bits & (1 << n) != 0).collect();
        TopologyHint::new(AffinityMask::from_nodes(&nodes).unwrap(), preferred)
    })
}

fn any_lists() -> impl Strategy<Value = Vec<Vec<TopologyHint>>> {
    prop::collection::vec(prop::collection::vec(any_hint(), 1..4), 0..4)
}

fn any_providers() -> impl Strategy<Value = Vec<ProviderHints>> {
    prop::collection::vec(
        prop::collection::btree_map("[a-d]", prop::collection::vec(any_hint(), 0..3), 0..3),
        0..3,
    )
}

fn any_kind() -> impl Strategy<Value = PolicyKind> {
    prop::sample::select(PolicyKind::ALL.to_vec())
}

proptest! {
    #[test]
    fn merge_is_deterministic(providers in any_providers(), kind in any_kind()) {
        let policy = Policy::new(kind, nodes());
        prop_assert_eq!(policy.merge(&providers), policy.merge(&providers));
    }

    #[test]
    fn examines_every_permutation(lists in any_lists()) {
        let expected: usize = lists.iter().map(Vec::len).product();
        let outcome = merge_hints(&nodes(), &lists, |_| true);
        prop_assert_eq!(outcome.examined, expected);
        prop_assert_eq!(Permutations::new(&lists).count(), expected);
        prop_assert_eq!(Permutations::total(&lists), expected);
    }

    #[test]
    fn empty_list_equals_unconstrained(providers in any_providers(), kind in any_kind()) {
        let policy = Policy::new(kind, nodes());
        let explicit: Vec<ProviderHints> = providers
            .iter()
            .map(|p| {
                p.iter()
                    .map(|(resource, hints)| {
                        let hints = if hints.is_empty() {
                            vec![TopologyHint::unconstrained(&nodes())]
                        } else {
                            hints.clone()
                        };
                        (resource.clone(), hints)
                    })
                    .collect()
            })
            .collect();
        prop_assert_eq!(policy.merge(&providers), policy.merge(&explicit));
    }

    #[test]
    fn preferred_outranks_non_preferred(a in any_hint(), b in any_hint()) {
        prop_assume!(!a.affinity.is_empty() && !b.affinity.is_empty());
        let preferred = TopologyHint::new(a.affinity, true);
        let fallback = TopologyHint::new(b.affinity, false);
        prop_assert!(is_better(&preferred, &fallback));
        prop_assert!(!is_better(&fallback, &preferred));
    }

    #[test]
    fn strictly_narrower_wins(a in any_hint(), b in any_hint()) {
        prop_assume!(!a.affinity.is_empty() && a.affinity.count() < b.affinity.count());
        let narrow = TopologyHint::new(a.affinity, b.preferred);
        prop_assert!(is_better(&narrow, &b));
        prop_assert!(!is_better(&b, &narrow));
    }

    #[test]
    fn best_is_no_worse_than_any_candidate(lists in any_lists()) {
        let outcome = merge_hints(&nodes(), &lists, |_| true);
        for permutation in Permutations::new(&lists) {
            let candidate = merge_permutation(&nodes(), &permutation);
            prop_assert!(!is_better(&candidate, &outcome.best));
        }
    }

    #[test]
    fn single_numa_node_admits_only_one_node(providers in any_providers()) {
        let n = nodes();
        let no_resources = providers.iter().all(|p| p.is_empty());
        let (best, result) = Policy::new(PolicyKind::SingleNumaNode, n).merge(&providers);
        if result.is_admitted() {
            prop_assert!(best.preferred);
            if no_resources {
                prop_assert_eq!(best, TopologyHint::unconstrained(&n));
            } else {
                prop_assert_eq!(best.affinity.count(), 1);
            }
        }
    }

    #[test]
    fn restricted_admits_iff_best_effort_best_is_preferred(providers in any_providers()) {
        let (best, best_effort) = Policy::new(PolicyKind::BestEffort, nodes()).merge(&providers);
        let (restricted_best, restricted) = Policy::new(PolicyKind::Restricted, nodes()).merge(&providers);
        prop_assert!(best_effort.is_admitted());
        prop_assert_eq!(best, restricted_best);
        prop_assert_eq!(restricted.is_admitted(), best.preferred);
    }
}
