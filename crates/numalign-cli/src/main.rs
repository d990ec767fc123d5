use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "numalign",
    about = "numalign — NUMA topology alignment for pod admission",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge provider hints and print the admission verdict.
    ///
    /// The policy and node count come from --config, and can be
    /// overridden with --policy and --numa-nodes.
    Merge {
        /// JSON file with the providers' hints
        #[arg(long)]
        hints: String,
        /// numalign.toml to read the policy from
        #[arg(short, long)]
        config: Option<String>,
        /// Policy override (none, best-effort, restricted, single-numa-node)
        #[arg(short, long)]
        policy: Option<String>,
        /// NUMA node count override (required without --config)
        #[arg(short, long)]
        numa_nodes: Option<usize>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// List the available policies
    Policies,
    /// Write a numalign.toml scaffold
    Init {
        #[arg(long, default_value = "numalign.toml")]
        path: String,
        #[arg(short, long, default_value = "best-effort")]
        policy: String,
        #[arg(short, long, default_value = "2")]
        numa_nodes: usize,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("numalign=info".parse()?)
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Merge {
            hints,
            config,
            policy,
            numa_nodes,
            format,
        } => commands::merge::run(&hints, config.as_deref(), policy.as_deref(), numa_nodes, &format),
        Commands::Policies => commands::init::list_policies(),
        Commands::Init {
            path,
            policy,
            numa_nodes,
        } => commands::init::init(&path, &policy, numa_nodes),
    }
}
