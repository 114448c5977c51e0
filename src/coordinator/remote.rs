//! Wire envelope and HTTP client for the peer resize call

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

use crate::common::auth::{Credential, CredentialSource};
use crate::common::error::{Error, Result};
use crate::coordinator::grow::ResizeRequest;
use crate::coordinator::peers::PeerNode;

/// Wire representation of a resize request sent to a peer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeEnvelope {
    pub pv_name: String,
    pub new_size: String,
}

impl From<&ResizeRequest> for ResizeEnvelope {
    fn from(request: &ResizeRequest) -> Self {
        Self {
            pv_name: request.volume.clone(),
            new_size: request.size.clone(),
        }
    }
}

impl From<ResizeEnvelope> for ResizeRequest {
    fn from(envelope: ResizeEnvelope) -> Self {
        Self {
            volume: envelope.pv_name,
            size: envelope.new_size,
        }
    }
}

/// Sends one authenticated resize command to one peer.
///
/// Success is exactly an acknowledged-OK response. No retry is performed; a
/// single failure aborts the whole multi-peer operation.
pub trait ResizeTransport {
    fn send(
        &self,
        peer: &PeerNode,
        envelope: &ResizeEnvelope,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// HTTP transport: POSTs the envelope to the peer's local-only resize endpoint
pub struct HttpResizeClient {
    http: reqwest::Client,
    credential: Credential,
}

impl HttpResizeClient {
    /// `timeout` bounds each peer call; without it a dead peer would hang the
    /// whole orchestration.
    pub fn new(credentials: &dyn CredentialSource, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;
        Ok(Self {
            http,
            credential: credentials.credential(),
        })
    }
}

impl ResizeTransport for HttpResizeClient {
    async fn send(&self, peer: &PeerNode, envelope: &ResizeEnvelope) -> Result<()> {
        let url = format!("http://{}/sec/lv/grow", peer);
        tracing::info!(peer = %peer, "growing logical volume on peer");

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.credential.identity, Some(&self.credential.secret))
            .json(envelope)
            .send()
            .await
            .map_err(|e| Error::Remote {
                peer: peer.to_string(),
                reason: e.to_string(),
            })?;

        // Only the status is examined; the body is never parsed.
        if response.status() != reqwest::StatusCode::OK {
            return Err(Error::Remote {
                peer: peer.to_string(),
                reason: format!("peer answered with status {}", response.status()),
            });
        }

        Ok(())
    }
}
