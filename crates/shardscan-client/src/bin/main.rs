//! Sharded address discovery CLI
//!
//! Derives addresses from a locally held wallet seed and probes an
//! explorer-style activity endpoint until every group reaches its gap
//! limit, then prints the discovered set as JSON.
//!
//! Usage:
//!   cargo run --bin shardscan -- \
//!     --wallet-seed deadbeef... \
//!     --explorer-url http://localhost:3000

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shardscan_client::{HttpOracle, SeedDeriver};
use shardscan_core::constants::{DEFAULT_BATCH_SIZE, DEFAULT_GROUP_COUNT, DEFAULT_MIN_GAP};
use shardscan_core::{DiscoveryConfig, DiscoverySession};

#[derive(Parser, Debug)]
#[command(name = "shardscan")]
#[command(about = "Discover used addresses of a group-sharded HD wallet")]
struct Args {
    /// Explorer base URL for the batch activity endpoint
    #[arg(long, default_value = "http://localhost:3000")]
    explorer_url: String,

    /// Wallet seed, hex-encoded
    #[arg(long)]
    wallet_seed: String,

    /// Total number of address groups
    #[arg(long, default_value_t = DEFAULT_GROUP_COUNT)]
    groups: u32,

    /// Consecutive unused addresses before a group stops scanning
    #[arg(long, default_value_t = DEFAULT_MIN_GAP)]
    min_gap: u32,

    /// Addresses derived and probed per round trip
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Derivation index already known to the caller; repeatable, never re-derived
    #[arg(long = "skip-index")]
    skip_indexes: Vec<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shardscan=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let seed = hex::decode(&args.wallet_seed)?;
    let config = DiscoveryConfig {
        group_count: args.groups,
        min_gap: args.min_gap,
        batch_size: args.batch_size,
    };

    tracing::info!(
        explorer = %args.explorer_url,
        groups = config.group_count,
        min_gap = config.min_gap,
        batch_size = config.batch_size,
        seeded = args.skip_indexes.len(),
        "Starting discovery"
    );

    let mut deriver = SeedDeriver::new(seed, config.group_count);
    let mut oracle = HttpOracle::new(args.explorer_url);
    let mut session = DiscoverySession::new(config, args.skip_indexes.iter().copied())?;

    let found = session.run(&mut deriver, &mut oracle).await?;
    let report = session.report();

    tracing::info!(
        active = report.total_active,
        derived = report.derived,
        "Discovery finished"
    );

    let output = serde_json::json!({
        "addresses": found,
        "report": report,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
