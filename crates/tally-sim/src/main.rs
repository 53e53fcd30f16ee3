//! Demo scenario: a simulated host and proxy around the tracker.
//!
//! Runs the full join → roster fetch → count refresh → query flow
//! in-process and prints what a text-placeholder caller would see.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::sync::mpsc;
use tracing::info;

use tally_core::{Config, CountTracker};
use tally_sim::host::SimHost;
use tally_sim::proxy::{run_proxy_loop, SimProxy};

#[derive(Parser)]
#[clap(name = "tally-sim")]
#[clap(about = "In-process proxy/host simulation for the player-count tracker")]
struct Cli {
    /// Backend servers fronted by the simulated proxy, as name=count
    #[clap(short, long = "server", value_parser = parse_server_arg)]
    servers: Vec<(String, u32)>,

    /// Enable debug logging
    #[clap(short, long)]
    debug: bool,
}

fn parse_server_arg(arg: &str) -> Result<(String, u32), String> {
    let (name, count) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected name=count, got {:?}", arg))?;
    let count = count
        .parse()
        .map_err(|e| format!("bad count in {:?}: {}", arg, e))?;
    Ok((name.to_string(), count))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt::init();
    }

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("bad configuration: {}", e))?;

    let servers = if cli.servers.is_empty() {
        vec![
            ("lobby".to_string(), 3),
            ("skywars".to_string(), 12),
            ("bedwars".to_string(), 7),
        ]
    } else {
        cli.servers.clone()
    };

    eprintln!(
        "Starting tally-sim with {} backend server(s) (check_interval = {}s)",
        servers.len(),
        config.check_interval_secs
    );

    let (wire_tx, wire_rx) = mpsc::unbounded_channel();
    let host = Arc::new(SimHost::new(wire_tx));
    let tracker = Arc::new(CountTracker::new(host.clone(), config));
    let proxy = SimProxy::new(servers.iter().cloned());

    tokio::spawn(run_proxy_loop(proxy, wire_rx, host.clone(), tracker.clone()));

    tracker.activate();

    // First join: the roster is unknown, so the tracker fetches it.
    let first = host.connect_carrier();
    tracker.on_carrier_joined();
    settle().await;

    // Second join: the roster is known now, so counts refresh.
    let second = host.connect_carrier();
    tracker.on_carrier_joined();
    settle().await;

    println!("network-wide: {}", tracker.query("total"));
    for (name, _) in &servers {
        println!("{}: {}", name, tracker.query(name));
    }

    // One player leaves; the remaining carrier refreshes the counts.
    host.disconnect_carrier(second);
    tracker.on_carrier_left();
    settle().await;

    info!("refresh sweep done, {} server(s) tracked", tracker.cache().len());

    // Last player leaves: the sweep finds no carrier and skips sending.
    host.disconnect_carrier(first);
    tracker.on_carrier_left();
    settle().await;

    tracker.deactivate();
    println!("after shutdown: {}", tracker.query("total"));

    Ok(())
}

/// Give the spawned proxy loop a moment to drain the wire.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}
