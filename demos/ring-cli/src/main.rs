//! `ring-cli` — run a single leader election from the command line.
//!
//! ```text
//! ring-cli --agents 8 --variant async --max-delay 4 --malicious 1 --seed 42
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use ring_core::Tick;
use ring_sim::{AsyncModel, Outcome, RingConfig, RingObserver, SyncModel};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Variant {
    Sync,
    Async,
}

/// Run a ring leader election and print the outcome.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Number of agents in the ring.
    #[arg(long, default_value_t = 5)]
    agents: u32,

    /// Which transport to simulate.
    #[arg(long, value_enum, default_value_t = Variant::Sync)]
    variant: Variant,

    /// Maximum per-message delay, in ticks (async variant only).
    #[arg(long, default_value_t = 3)]
    max_delay: u32,

    /// Number of Byzantine agents (async variant only).
    #[arg(long, default_value_t = 0)]
    malicious: u32,

    /// Driver ceiling; the run times out if not finalized by this tick.
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,

    /// Seed for the run's deterministic RNG.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

struct LoggingObserver;

impl RingObserver for LoggingObserver {
    fn on_tick_start(&mut self, tick: Tick) {
        tracing::trace!(%tick, "tick start");
    }

    fn on_election(&mut self, tick: Tick, leader: ring_core::AgentId) {
        tracing::info!(%tick, %leader, "election complete");
    }

    fn on_abort(&mut self, tick: Tick, expected: u32, revealed: u32) {
        tracing::error!(%tick, expected, revealed, "election aborted: commitment mismatch");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = RingConfig::builder(cli.agents)
        .max_message_delay(cli.max_delay)
        .malicious_nodes(cli.malicious)
        .max_ticks(cli.max_ticks)
        .seed(cli.seed)
        .build()
        .context("invalid ring configuration")?;

    let (outcome, agents): (Outcome, Vec<(u32, Option<u32>, String)>) = match cli.variant {
        Variant::Sync => {
            let mut model = SyncModel::new(config);
            let outcome = model.run(&mut LoggingObserver);
            let rows = model
                .agents()
                .iter()
                .map(|a| (a.id.0, a.leader.map(|l| l.0), a.phase.to_string()))
                .collect();
            (outcome, rows)
        }
        Variant::Async => {
            let mut model = AsyncModel::new(config).context("failed to build async transport")?;
            let outcome = model.run(&mut LoggingObserver);
            let rows = model
                .agents()
                .iter()
                .map(|a| (a.id.0, a.leader.map(|l| l.0), a.phase.to_string()))
                .collect();
            (outcome, rows)
        }
    };

    println!("=== ring-election ({:?}) ===", cli.variant);
    println!(
        "agents: {}  seed: {}  max_delay: {}  malicious: {}",
        cli.agents, cli.seed, cli.max_delay, cli.malicious
    );
    println!();
    println!("{:<8} {:<8} {:<10}", "agent", "leader", "phase");
    for (id, leader, phase) in &agents {
        let leader_str = leader.map_or("-".to_string(), |l| l.to_string());
        println!("{id:<8} {leader_str:<8} {phase:<10}");
    }
    println!();

    let exit_code = match outcome {
        Outcome::Elected { leader, tick } => {
            println!("elected leader {leader} at {tick}");
            0
        }
        Outcome::Aborted { tick } => {
            println!("aborted at {tick}: cheating detected");
            2
        }
        Outcome::TimedOut => {
            println!("timed out after {} ticks", cli.max_ticks);
            1
        }
    };

    std::process::exit(exit_code);
}
