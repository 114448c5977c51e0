//! Cluster trust material
//!
//! Every cluster member authenticates with the same fixed service identity and
//! a shared secret. Components never read the secret from ambient state; they
//! obtain a [`Credential`] through the [`CredentialSource`] seam, which keeps
//! the trust model swappable without touching the orchestration logic.

use base64::{engine::general_purpose::STANDARD, Engine};

/// Fixed service identity carried by every intra-cluster request
pub const SERVICE_IDENTITY: &str = "VOLGROW_API";

/// Credential presented to peers
#[derive(Debug, Clone)]
pub struct Credential {
    pub identity: String,
    pub secret: String,
}

/// Source of the credential a component presents to the cluster
pub trait CredentialSource {
    fn credential(&self) -> Credential;
}

/// Shared-secret trust: one static credential known to all cluster members
pub struct SharedSecretAuth {
    secret: String,
}

impl SharedSecretAuth {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Check an inbound identity/secret pair.
    pub fn verify(&self, identity: &str, secret: &str) -> bool {
        identity == SERVICE_IDENTITY && secret == self.secret
    }

    /// Check an inbound `Authorization: Basic <base64>` header value.
    pub fn verify_basic_header(&self, header: &str) -> bool {
        let Some(encoded) = header.strip_prefix("Basic ") else {
            return false;
        };
        let Ok(decoded) = STANDARD.decode(encoded.trim()) else {
            return false;
        };
        let Ok(pair) = String::from_utf8(decoded) else {
            return false;
        };
        match pair.split_once(':') {
            Some((identity, secret)) => self.verify(identity, secret),
            None => false,
        }
    }
}

impl CredentialSource for SharedSecretAuth {
    fn credential(&self) -> Credential {
        Credential {
            identity: SERVICE_IDENTITY.to_string(),
            secret: self.secret.clone(),
        }
    }
}
