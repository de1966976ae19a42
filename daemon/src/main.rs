//! Ballot daemon — entry point for running a ballot ledger server.

mod config;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use ballot_ledger::PollLedger;
use ballot_rpc::{event_channel, BroadcastSink, RpcServer, RpcState};
use ballot_store_lmdb::LmdbEnvironment;
use ballot_types::{Principal, SystemClock};

use config::DaemonConfig;

#[derive(Parser)]
#[command(name = "ballot-daemon", about = "Ballot ledger daemon")]
struct Cli {
    /// Data directory for ledger storage.
    #[arg(long, env = "BALLOT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Address the RPC server binds to.
    #[arg(long, env = "BALLOT_LISTEN")]
    listen: Option<std::net::IpAddr>,

    /// RPC server port.
    #[arg(long, env = "BALLOT_RPC_PORT")]
    rpc_port: Option<u16>,

    /// Ledger owner principal (0x-prefixed address).
    #[arg(long, env = "BALLOT_OWNER")]
    owner: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> DaemonConfig {
        let base = match self.config {
            Some(ref path) => match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<DaemonConfig>(&contents) {
                    Ok(cfg) => {
                        tracing::info!("Loaded config from {}", path.display());
                        cfg
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file: {e}, using defaults");
                        DaemonConfig::default()
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        "Failed to read config file {}: {e}, using defaults",
                        path.display()
                    );
                    DaemonConfig::default()
                }
            },
            None => DaemonConfig::default(),
        };

        DaemonConfig {
            data_dir: self.data_dir.unwrap_or(base.data_dir),
            listen: self.listen.unwrap_or(base.listen),
            rpc_port: self.rpc_port.unwrap_or(base.rpc_port),
            owner: self.owner.unwrap_or(base.owner),
            map_size: base.map_size,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ballot_utils::init_tracing();

    let config = Cli::parse().into_config();

    let owner = Principal::parse(&config.owner)
        .with_context(|| format!("invalid owner principal {:?}", config.owner))?;

    let env = LmdbEnvironment::open(&config.data_dir, config.map_size)
        .with_context(|| format!("open ledger store at {}", config.data_dir.display()))?;
    let store = env.poll_store();

    let events = event_channel();
    let ledger = PollLedger::new(store, owner)
        .with_event_sink(Box::new(BroadcastSink::new(events.clone())));
    let state = Arc::new(RpcState::new(ledger, Box::new(SystemClock), events));

    let addr = SocketAddr::new(config.listen, config.rpc_port);
    tracing::info!(
        %addr,
        data_dir = %config.data_dir.display(),
        "Starting ballot daemon"
    );
    RpcServer::new(addr).start(state).await?;

    Ok(())
}
