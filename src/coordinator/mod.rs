//! Resize orchestration: input validation, ordered peer fan-out and local
//! storage mutation, plus the HTTP surface that exposes both.

pub mod commands;
pub mod grow;
pub mod http;
pub mod peers;
pub mod remote;
pub mod server;
pub mod size;

pub use commands::{local_resize_commands, CommandRunner, ShellRunner};
pub use grow::{GrowCoordinator, ResizeRequest};
pub use peers::{PeerDirectory, PeerNode, StaticPeerDirectory};
pub use remote::{HttpResizeClient, ResizeEnvelope, ResizeTransport};
pub use server::Server;
