//! Configuration for a volgrow node
//!
//! All settings are carried explicitly: every component receives the values it
//! needs through its constructor, there is no ambient global configuration.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::common::error::{Error, Result};

/// Node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bind address for the HTTP API
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,

    /// Port the resize endpoint listens on across the cluster. Used for peer
    /// entries that do not name a port of their own.
    #[serde(default = "default_cluster_port")]
    pub cluster_port: u16,

    /// Volume group that backs every cluster volume on this node
    #[serde(default)]
    pub vg_name: String,

    /// Shared secret known to all cluster members
    #[serde(default)]
    pub secret: String,

    /// Peer nodes (`host` or `host:port`), excluding the local node.
    /// List order is the fan-out order.
    #[serde(default)]
    pub peers: Vec<String>,

    /// Per-peer request timeout in seconds
    #[serde(default = "default_peer_timeout")]
    pub peer_timeout_secs: u64,

    /// Logging level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_bind_addr() -> SocketAddr {
    "0.0.0.0:7000".parse().unwrap()
}
fn default_cluster_port() -> u16 {
    7000
}
fn default_peer_timeout() -> u64 {
    10
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            cluster_port: default_cluster_port(),
            vg_name: String::new(),
            secret: String::new(),
            peers: Vec::new(),
            peer_timeout_secs: default_peer_timeout(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from an optional `volgrow.toml` in the working
    /// directory, overridden by `VOLGROW_*` environment variables.
    pub fn load() -> Result<Config> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("volgrow").required(false))
            .add_source(config::Environment::with_prefix("VOLGROW"))
            .build()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Reject configurations a node cannot safely run with.
    pub fn validate(&self) -> Result<()> {
        if self.secret.is_empty() {
            return Err(Error::InvalidConfig("secret must not be empty".into()));
        }
        if self.vg_name.is_empty() {
            return Err(Error::InvalidConfig(
                "volume group name must not be empty".into(),
            ));
        }
        if self.cluster_port == 0 {
            return Err(Error::InvalidConfig("cluster port must not be 0".into()));
        }
        Ok(())
    }
}
