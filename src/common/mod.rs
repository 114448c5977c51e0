//! Common utilities and types shared across volgrow

pub mod auth;
pub mod config;
pub mod error;

pub use auth::{Credential, CredentialSource, SharedSecretAuth, SERVICE_IDENTITY};
pub use config::Config;
pub use error::{Error, Result};
