//! End-to-end admission scenarios through every policy.

use numalign_core::{AffinityMask, NumaNodes, PolicyKind, TopologyConfig, TopologyHint};
use numalign_policy::*;

fn hint(nodes: &[usize], preferred: bool) -> TopologyHint {
    TopologyHint::new(AffinityMask::from_nodes(nodes).unwrap(), preferred)
}

fn provider(resource: &str, hints: Vec<TopologyHint>) -> ProviderHints {
    ProviderHints::from([(resource.to_string(), hints)])
}

fn policy(kind: PolicyKind, numa_nodes: usize) -> Policy {
    Policy::new(kind, NumaNodes::new(numa_nodes).unwrap())
}

#[test]
fn single_numa_node_finds_the_single_node_candidate() {
    let providers = vec![
        provider("cpu", vec![hint(&[0, 1], true)]),
        provider("nvidia.com/gpu", vec![hint(&[0], true), hint(&[1], false)]),
    ];

    let (best, result) = policy(PolicyKind::SingleNumaNode, 2).merge(&providers);

    assert_eq!(best, hint(&[0], true));
    assert!(result.is_admitted());
}

#[test]
fn single_numa_node_rejects_when_nothing_fits_one_node() {
    let providers = vec![
        provider("cpu", vec![hint(&[0, 1], true), hint(&[1, 2], true)]),
        provider("memory", vec![hint(&[0, 1, 2], true)]),
    ];

    let (best, result) = policy(PolicyKind::SingleNumaNode, 3).merge(&providers);

    assert_eq!(best, TopologyHint::unsatisfiable());
    assert!(!result.is_admitted());
    assert!(result.reason().unwrap().contains("no single NUMA node alignment"));
}

#[test]
fn single_numa_node_rejects_agreement_spanning_both_nodes() {
    let providers = vec![
        provider("cpu", vec![hint(&[0, 1], true)]),
        provider("memory", vec![hint(&[0, 1], true)]),
    ];

    let (best, result) = policy(PolicyKind::SingleNumaNode, 2).merge(&providers);
    let (_, restricted) = policy(PolicyKind::Restricted, 2).merge(&providers);

    assert_eq!(best, TopologyHint::unsatisfiable());
    assert!(!result.is_admitted());
    assert!(restricted.is_admitted());
}

#[test]
fn restricted_rejects_disjoint_providers_best_effort_admits() {
    let providers = vec![
        provider("cpu", vec![hint(&[0], false)]),
        provider("memory", vec![hint(&[1], false)]),
    ];

    let (restricted_best, restricted) = policy(PolicyKind::Restricted, 2).merge(&providers);
    let (best_effort_best, best_effort) = policy(PolicyKind::BestEffort, 2).merge(&providers);

    assert_eq!(restricted_best, TopologyHint::unsatisfiable());
    assert!(!restricted.is_admitted());
    let reason = restricted.reason().unwrap();
    assert!(reason.contains("cpu") && reason.contains("memory"), "{reason}");

    assert_eq!(best_effort_best, TopologyHint::unsatisfiable());
    assert!(best_effort.is_admitted());
}

#[test]
fn every_policy_admits_with_no_providers() {
    let nodes = NumaNodes::new(4).unwrap();
    for kind in PolicyKind::ALL {
        let (best, result) = Policy::new(kind, nodes).merge(&[]);
        assert!(result.is_admitted(), "{kind} rejected an empty provider set");
        assert_eq!(best, TopologyHint::unconstrained(&nodes), "{kind}");
    }
}

#[test]
fn provider_without_hints_matches_unconstrained_hint() {
    let nodes = NumaNodes::new(2).unwrap();
    let cpu = provider("cpu", vec![hint(&[1], true), hint(&[0, 1], false)]);
    let silent = vec![cpu.clone(), provider("memory", vec![])];
    let explicit = vec![cpu, provider("memory", vec![TopologyHint::unconstrained(&nodes)])];

    for kind in PolicyKind::ALL {
        let policy = Policy::new(kind, nodes);
        assert_eq!(policy.merge(&silent), policy.merge(&explicit), "{kind}");
    }
}

#[test]
fn policy_names_are_stable() {
    let names: Vec<&str> = PolicyKind::ALL
        .into_iter()
        .map(|kind| policy(kind, 2).name())
        .collect();
    assert_eq!(names, vec!["none", "best-effort", "restricted", "single-numa-node"]);
}

#[test]
fn policy_from_config() {
    let config = TopologyConfig::from_toml_str(
        r#"
[topology_manager]
policy = "restricted"
numa_nodes = 2
"#,
    )
    .unwrap();

    let policy = Policy::from_config(&config).unwrap();

    assert_eq!(policy.kind(), PolicyKind::Restricted);
    assert_eq!(policy.name(), "restricted");
}

#[test]
fn collected_static_providers_feed_the_policy() {
    let cpu = StaticHintProvider::new("cpu-manager").with_hints("cpu", vec![hint(&[1], true)]);
    let devices = StaticHintProvider::new("device-manager")
        .with_hints("nvidia.com/gpu", vec![hint(&[0], true), hint(&[1], true)]);

    let providers = collect_hints(&[&cpu, &devices]);
    let (best, result) = policy(PolicyKind::Restricted, 2).merge(&providers);

    assert_eq!(best, hint(&[1], true));
    assert!(result.is_admitted());
}

#[test]
fn policies_are_shareable_across_threads() {
    let policy = std::sync::Arc::new(policy(PolicyKind::SingleNumaNode, 2));
    let providers = vec![provider("cpu", vec![hint(&[0], true), hint(&[1], true)])];

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let policy = policy.clone();
            let providers = providers.clone();
            std::thread::spawn(move || policy.merge(&providers))
        })
        .collect();

    for handle in handles {
        let (best, result) = handle.join().unwrap();
        assert_eq!(best, hint(&[0], true));
        assert!(result.is_admitted());
    }
}
