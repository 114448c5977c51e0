//! Error types for volgrow

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // === Input Errors ===
    #[error("invalid input: {0}")]
    Input(String),

    // === Orchestration Errors ===
    #[error("peer discovery failed: {0}")]
    PeerDiscovery(String),

    #[error("resize rejected by peer {peer}: {reason}")]
    Remote { peer: String, reason: String },

    #[error("local command `{command}` failed: {reason}")]
    LocalCommand { command: String, reason: String },

    // === Ambient Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Convert to HTTP status code for API responses
    pub fn to_http_status(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Error::Input(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message exposed at the API boundary.
    ///
    /// Input errors are safe to return verbatim. Everything else collapses to
    /// a kind-level message; the detailed cause (which peer, which command) is
    /// only ever logged on the node that observed it.
    pub fn public_message(&self) -> String {
        match self {
            Error::Input(msg) => msg.clone(),
            Error::PeerDiscovery(_) => "cluster peers could not be determined".to_string(),
            Error::Remote { .. } => {
                "volume resize could not be applied on all cluster nodes".to_string()
            }
            Error::LocalCommand { .. } => "volume resize failed on this node".to_string(),
            _ => "internal error".to_string(),
        }
    }
}
