use std::path::Path;

use anyhow::Context;
use numalign_core::{AdmissionResult, NumaNodes, PolicyKind, TopologyConfig, TopologyHint};
use numalign_policy::{HintProvider, MergePolicy, Policy, ProviderHints, StaticHintProvider};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Hints file layout: providers in the order they are consulted.
#[derive(Debug, Deserialize)]
pub struct HintsFile {
    pub providers: Vec<StaticHintProvider>,
}

#[derive(Debug, Serialize)]
pub struct MergeReport {
    pub policy: PolicyKind,
    pub numa_nodes: usize,
    pub hint: TopologyHint,
    pub admission: AdmissionResult,
}

pub fn run(
    hints: &str,
    config: Option<&str>,
    policy: Option<&str>,
    numa_nodes: Option<usize>,
    format: &str,
) -> anyhow::Result<()> {
    let config = resolve_config(config, policy, numa_nodes)?;
    let policy = Policy::from_config(&config)?;

    let file: HintsFile = serde_json::from_str(&std::fs::read_to_string(hints)?)?;
    let report = evaluate(&policy, &config, &file);

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => println!("{}", format_report(&report)),
    }

    Ok(())
}

/// Config file values first, then command-line overrides.
///
/// Without a config file the node count must be given explicitly.
fn resolve_config(
    path: Option<&str>,
    policy: Option<&str>,
    numa_nodes: Option<usize>,
) -> anyhow::Result<TopologyConfig> {
    let mut config = match path {
        Some(path) => TopologyConfig::from_file(Path::new(path))?,
        None => {
            let count = numa_nodes.context("--numa-nodes is required when --config is not given")?;
            TopologyConfig::scaffold(PolicyKind::BestEffort, NumaNodes::new(count)?)
        }
    };
    if let Some(policy) = policy {
        config.topology_manager.policy = policy.parse()?;
    }
    if let Some(numa_nodes) = numa_nodes {
        config.topology_manager.numa_nodes = NumaNodes::new(numa_nodes)?;
    }
    config.validate()?;
    Ok(config)
}

fn evaluate(policy: &Policy, config: &TopologyConfig, file: &HintsFile) -> MergeReport {
    let providers: Vec<ProviderHints> = file
        .providers
        .iter()
        .map(|p| {
            info!(provider = p.name(), resources = p.hints.len(), "loaded provider hints");
            p.topology_hints()
        })
        .collect();

    let (hint, admission) = policy.merge(&providers);
    MergeReport {
        policy: policy.kind(),
        numa_nodes: config.topology_manager.numa_nodes.count(),
        hint,
        admission,
    }
}

pub fn format_report(report: &MergeReport) -> String {
    let verdict = if report.admission.is_admitted() {
        "ADMIT"
    } else {
        "REJECT"
    };
    let mut out = format!(
        "policy:     {}\nnuma nodes: {}\naffinity:   {}\npreferred:  {}\nverdict:    {}",
        report.policy, report.numa_nodes, report.hint.affinity, report.hint.preferred, verdict
    );
    if let Some(reason) = report.admission.reason() {
        out.push_str(&format!("\nreason:     {reason}"));
    }
    out
}
