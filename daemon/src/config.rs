//! Daemon configuration.

use serde::Deserialize;
use std::net::IpAddr;
use std::path::PathBuf;

use ballot_store_lmdb::DEFAULT_MAP_SIZE;

/// Full daemon configuration. A TOML file supplies the base values; CLI
/// flags and environment variables override them field by field.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    /// Data directory for ledger storage.
    pub data_dir: PathBuf,

    /// Address the RPC server binds to.
    pub listen: IpAddr,

    /// RPC server port.
    pub rpc_port: u16,

    /// Ledger owner principal, granted creator-level authority on every poll.
    pub owner: String,

    /// LMDB map size in bytes.
    pub map_size: usize,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./ballot_data"),
            listen: IpAddr::from([127, 0, 0, 1]),
            rpc_port: 7077,
            owner: "0x0".to_string(),
            map_size: DEFAULT_MAP_SIZE,
        }
    }
}
