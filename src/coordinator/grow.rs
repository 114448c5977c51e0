//! The resize orchestration
//!
//! One grow is a linear gate sequence, each step a hard gate on the next:
//! validate input, take the per-volume lock, enumerate peers, fan the resize
//! out to every peer in directory order (sequentially, fail-fast), and only
//! then mutate local storage. There is no retry, no rollback and no resume: a
//! peer failure leaves already-grown peers at the new size, and a local
//! failure leaves the local node behind the peers. Both windows are accepted
//! and surface as errors for manual remediation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::common::error::{Error, Result};
use crate::coordinator::commands::{local_resize_commands, CommandRunner};
use crate::coordinator::peers::PeerDirectory;
use crate::coordinator::remote::{ResizeEnvelope, ResizeTransport};
use crate::coordinator::size::{validate_size, validate_volume_name};

/// One inbound resize request. Lives for the duration of one orchestration,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeRequest {
    pub volume: String,
    pub size: String,
}

/// Orchestrates a cluster-wide volume grow.
///
/// Generic over its three seams so tests can substitute recording fakes for
/// the peer directory, the peer transport and the command runner.
pub struct GrowCoordinator<D, T, R> {
    directory: D,
    transport: T,
    runner: R,
    vg_name: String,
    // One async mutex per volume name; grows of the same volume serialize,
    // distinct volumes proceed independently.
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl<D, T, R> GrowCoordinator<D, T, R>
where
    D: PeerDirectory,
    T: ResizeTransport,
    R: CommandRunner,
{
    pub fn new(directory: D, transport: T, runner: R, vg_name: impl Into<String>) -> Self {
        Self {
            directory,
            transport,
            runner,
            vg_name: vg_name.into(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Grow `volume` to `size` on every cluster node, peers first.
    ///
    /// Calling this twice for a volume already at the target size is passed
    /// through unchanged: the same commands are issued again and whatever the
    /// storage tooling reports is surfaced.
    pub async fn grow(&self, volume: &str, size: &str) -> Result<()> {
        validate_volume_name(volume)?;
        validate_size(size)?;

        let lock = self.volume_lock(volume);
        let _guard = lock.lock().await;

        let peers = self.directory.list_peers().map_err(|e| match e {
            Error::PeerDiscovery(_) => e,
            other => Error::PeerDiscovery(other.to_string()),
        })?;

        let request = ResizeRequest {
            volume: volume.to_string(),
            size: size.to_string(),
        };
        let envelope = ResizeEnvelope::from(&request);

        tracing::info!(
            volume = %request.volume,
            size = %request.size,
            peers = peers.len(),
            "growing volume across cluster"
        );

        // Sequential fan-out in directory order. The first failure aborts the
        // whole operation; peers already grown are not rolled back.
        for peer in &peers {
            self.transport.send(peer, &envelope).await?;
        }

        self.grow_backing_lv(&request)
    }

    /// Grow only this node's logical volume and filesystem, without any peer
    /// fan-out. Served to peers so that a fan-out call never re-propagates.
    pub async fn grow_local(&self, volume: &str, size: &str) -> Result<()> {
        validate_volume_name(volume)?;
        validate_size(size)?;

        let lock = self.volume_lock(volume);
        let _guard = lock.lock().await;

        self.grow_backing_lv(&ResizeRequest {
            volume: volume.to_string(),
            size: size.to_string(),
        })
    }

    fn grow_backing_lv(&self, request: &ResizeRequest) -> Result<()> {
        let commands = local_resize_commands(&self.vg_name, &request.volume, &request.size);
        self.runner.run(&commands)?;
        tracing::info!(volume = %request.volume, size = %request.size, "local volume grown");
        Ok(())
    }

    fn volume_lock(&self, volume: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        locks.entry(volume.to_string()).or_default().clone()
    }
}
