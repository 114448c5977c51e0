//! # volgrow
//!
//! A distributed volume-resize coordinator for replicated, LVM-backed storage
//! clusters. Growing a volume means enlarging its backing logical volume and
//! filesystem on every node of the cluster, peers first and in a fixed order,
//! before the local node mutates its own storage and reports success.
//!
//! ## Architecture
//!
//! ```text
//!                  grow(volume, size)
//!                        │
//!              ┌─────────▼──────────┐
//!              │  GrowCoordinator   │
//!              │  validate → lock   │
//!              └─────────┬──────────┘
//!          peer fan-out  │  (sequential, fail-fast)
//!      ┌─────────────────┼──────────────────┐
//!      │                 │                  │
//! ┌────▼─────┐     ┌─────▼────┐      ┌──────▼─────────┐
//! │ node2    │     │ node3    │      │ local node     │
//! │ /sec/lv/ │ ... │ /sec/lv/ │ then │ lvextend       │
//! │ grow     │     │ grow     │      │ xfs_growfs     │
//! └──────────┘     └──────────┘      └────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! volgrowd serve \
//!   --bind 0.0.0.0:7000 \
//!   --vg vg_cluster \
//!   --secret "$CLUSTER_SECRET" \
//!   --peers node2:7000,node3:7000
//! ```

pub mod common;
pub mod coordinator;
pub mod ops;

// Re-export commonly used types
pub use common::{Config, Error, Result};
pub use coordinator::{GrowCoordinator, Server};

/// Current version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
