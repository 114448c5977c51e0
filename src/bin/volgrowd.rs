//! volgrow server binary

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use volgrow::{Config, Server};

#[derive(Parser)]
#[command(name = "volgrowd")]
#[command(about = "distributed volume-resize coordinator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the resize coordinator server
    Serve {
        /// Bind address for the HTTP API
        #[arg(long)]
        bind: Option<String>,

        /// Cluster-wide resize port (used for peers without an explicit port)
        #[arg(long)]
        port: Option<u16>,

        /// Volume group backing the cluster volumes on this node
        #[arg(long)]
        vg: Option<String>,

        /// Shared cluster secret
        #[arg(long)]
        secret: Option<String>,

        /// Peer nodes (comma-separated `host` or `host:port`), in fan-out order
        #[arg(long, value_delimiter = ',')]
        peers: Vec<String>,

        /// Per-peer request timeout in seconds
        #[arg(long)]
        peer_timeout_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            port,
            vg,
            secret,
            peers,
            peer_timeout_secs,
        } => {
            // Load config from file/env, then override with CLI arguments
            let mut config = Config::load()?;
            if let Some(bind) = bind {
                config.bind_addr = bind.parse()?;
            }
            if let Some(port) = port {
                config.cluster_port = port;
            }
            if let Some(vg) = vg {
                config.vg_name = vg;
            }
            if let Some(secret) = secret {
                config.secret = secret;
            }
            if !peers.is_empty() {
                config.peers = peers;
            }
            if let Some(timeout) = peer_timeout_secs {
                config.peer_timeout_secs = timeout;
            }

            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
                )
                .with(tracing_subscriber::fmt::layer())
                .init();

            Server::new(config).serve().await?;
        }
    }

    Ok(())
}
