//! Periodic usage collection for billing reconciliation

#![allow(dead_code)]

use crate::common::Result;

/// Collect per-volume usage for the given volume group.
///
/// Meant to run on a schedule; the collection itself is not implemented yet.
pub async fn collect_usage(_vg_name: &str) -> Result<UsageReport> {
    tracing::info!("starting usage collection");

    // TODO: Implement collection:
    // 1. Enumerate logical volumes in the volume group
    // 2. Read allocated and used bytes per volume
    // 3. Reconcile with the previous datapoint, interpolating gaps
    // 4. Hand the datapoints to the billing backend

    Ok(UsageReport {
        volumes_checked: 0,
        bytes_allocated: 0,
        bytes_used: 0,
    })
}

#[derive(Debug)]
pub struct UsageReport {
    pub volumes_checked: usize,
    pub bytes_allocated: u64,
    pub bytes_used: u64,
}
