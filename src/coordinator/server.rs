//! Coordinator server

use std::sync::Arc;
use std::time::Duration;

use crate::common::auth::SharedSecretAuth;
use crate::common::config::Config;
use crate::common::error::Result;
use crate::coordinator::commands::ShellRunner;
use crate::coordinator::grow::GrowCoordinator;
use crate::coordinator::http::{create_router, AppState};
use crate::coordinator::peers::StaticPeerDirectory;
use crate::coordinator::remote::HttpResizeClient;

/// The coordinator wired for production use
pub type NodeCoordinator = GrowCoordinator<StaticPeerDirectory, HttpResizeClient, ShellRunner>;

pub struct Server {
    config: Config,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn serve(self) -> Result<()> {
        self.config.validate()?;

        tracing::info!("starting volgrow node");
        tracing::info!("  HTTP API: {}", self.config.bind_addr);
        tracing::info!("  volume group: {}", self.config.vg_name);
        tracing::info!("  peers: {:?}", self.config.peers);

        let auth = Arc::new(SharedSecretAuth::new(self.config.secret.clone()));
        let directory =
            StaticPeerDirectory::from_entries(&self.config.peers, self.config.cluster_port)?;
        let transport = HttpResizeClient::new(
            auth.as_ref(),
            Duration::from_secs(self.config.peer_timeout_secs),
        )?;
        let coordinator: Arc<NodeCoordinator> = Arc::new(GrowCoordinator::new(
            directory,
            transport,
            ShellRunner,
            self.config.vg_name.clone(),
        ));

        let router = create_router(AppState { coordinator, auth });

        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!("volgrow ready");
        axum::serve(listener, router).await?;

        Ok(())
    }
}
