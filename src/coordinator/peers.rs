//! Cluster peer enumeration

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::error::{Error, Result};

/// A peer node running the same coordination service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerNode {
    pub address: String,
    pub port: u16,
}

impl fmt::Display for PeerNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}

/// Source of the cluster's peer set, excluding the local node.
///
/// The returned order is the fan-out order and must be deterministic across
/// calls within one orchestration.
pub trait PeerDirectory {
    fn list_peers(&self) -> Result<Vec<PeerNode>>;
}

/// Peer directory backed by the configured peer list
pub struct StaticPeerDirectory {
    peers: Vec<PeerNode>,
}

impl StaticPeerDirectory {
    /// Build from `host` / `host:port` entries. Entries without a port fall
    /// back to `default_port`. Entry order is preserved.
    pub fn from_entries(entries: &[String], default_port: u16) -> Result<Self> {
        let mut peers = Vec::with_capacity(entries.len());
        for entry in entries {
            let (address, port) = match entry.rsplit_once(':') {
                Some((host, port)) => {
                    let port = port.parse().map_err(|_| {
                        Error::InvalidConfig(format!("invalid peer port in '{}'", entry))
                    })?;
                    (host, port)
                }
                None => (entry.as_str(), default_port),
            };
            if address.is_empty() {
                return Err(Error::InvalidConfig(format!(
                    "invalid peer entry '{}'",
                    entry
                )));
            }
            peers.push(PeerNode {
                address: address.to_string(),
                port,
            });
        }
        Ok(Self { peers })
    }
}

impl PeerDirectory for StaticPeerDirectory {
    fn list_peers(&self) -> Result<Vec<PeerNode>> {
        Ok(self.peers.clone())
    }
}
