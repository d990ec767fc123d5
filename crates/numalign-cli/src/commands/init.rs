use std::path::Path;

use numalign_core::{NumaNodes, PolicyKind, TopologyConfig};

pub fn list_policies() -> anyhow::Result<()> {
    for kind in PolicyKind::ALL {
        println!("{kind}");
    }
    Ok(())
}

pub fn init(path: &str, policy: &str, numa_nodes: usize) -> anyhow::Result<()> {
    let config = scaffold(policy, numa_nodes)?;
    let output = Path::new(path);
    std::fs::write(output, config.to_toml_string()?)?;
    println!("✓ Generated {}", output.display());
    Ok(())
}

/// Build a scaffold config, refusing anything that would fail at startup.
fn scaffold(policy: &str, numa_nodes: usize) -> anyhow::Result<TopologyConfig> {
    let config = TopologyConfig::scaffold(policy.parse()?, NumaNodes::new(numa_nodes)?);
    config.validate()?;
    Ok(config)
}
