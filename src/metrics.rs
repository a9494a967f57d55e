//! Metrics for attach/detach operations.
//!
//! Recorded through the `metrics` facade; the embedding process decides
//! whether to install a recorder/exporter.

use std::time::Instant;

use metrics::{counter, histogram};

/// Metric names
pub mod names {
    /// Counter: Total number of volume operations by type and status
    pub const FC_OPERATIONS_TOTAL: &str = "fc_operations_total";
    /// Histogram: Duration of volume operations in seconds
    pub const FC_OPERATION_DURATION_SECONDS: &str = "fc_operation_duration_seconds";
    /// Counter: Number of SCSI bus rescans triggered during attach
    pub const FC_SCSI_RESCANS_TOTAL: &str = "fc_scsi_rescans_total";
    /// Counter: Number of SCSI hosts a rescan trigger was written to
    pub const FC_SCSI_RESCAN_HOSTS_TOTAL: &str = "fc_scsi_rescan_hosts_total";
    /// Counter: Number of SCSI hosts whose rescan trigger failed
    pub const FC_SCSI_RESCAN_HOST_FAILURES_TOTAL: &str = "fc_scsi_rescan_host_failures_total";
}

/// Record a volume operation with its result
pub fn record_operation(operation: &str, status: &str, duration_secs: f64) {
    counter!(names::FC_OPERATIONS_TOTAL, "operation" => operation.to_string(), "status" => status.to_string())
        .increment(1);
    histogram!(names::FC_OPERATION_DURATION_SECONDS, "operation" => operation.to_string())
        .record(duration_secs);
}

/// Record a SCSI bus rescan fan-out
pub fn record_rescan(hosts_attempted: usize, hosts_failed: usize) {
    counter!(names::FC_SCSI_RESCANS_TOTAL).increment(1);
    counter!(names::FC_SCSI_RESCAN_HOSTS_TOTAL).increment(hosts_attempted as u64);
    if hosts_failed > 0 {
        counter!(names::FC_SCSI_RESCAN_HOST_FAILURES_TOTAL).increment(hosts_failed as u64);
    }
}

/// Helper for timing operations
pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    /// Start timing an operation
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    /// Complete the operation with success
    pub fn success(self) {
        let duration = self.start.elapsed().as_secs_f64();
        record_operation(&self.operation, "success", duration);
    }

    /// Complete the operation with failure
    pub fn failure(self, error_code: &str) {
        let duration = self.start.elapsed().as_secs_f64();
        record_operation(&self.operation, error_code, duration);
    }
}
