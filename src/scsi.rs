//! SCSI bus rescanning.

use tracing::warn;

use crate::error::Result;
use crate::io::FsIo;

const SCSI_HOST_PATH: &str = "/sys/class/scsi_host/";

/// Wildcard channel/target/lun trigger understood by the kernel scan file.
const SCAN_WILDCARD: &[u8] = b"- - -";

/// Outcome of a host-wide rescan fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RescanReport {
    /// Number of SCSI hosts a scan trigger was written to.
    pub hosts_attempted: usize,
    /// Number of hosts where the write failed.
    pub hosts_failed: usize,
}

/// Ask every SCSI host to re-probe its bus for newly visible devices.
///
/// Writes `- - -` to `/sys/class/scsi_host/<host>/scan` for each host. A
/// failed write is logged and counted but does not abort the fan-out; only
/// failure to list the host directory itself is an error.
pub fn rescan_scsi_hosts(io: &dyn FsIo) -> Result<RescanReport> {
    let hosts = io.read_dir(SCSI_HOST_PATH)?;
    let mut report = RescanReport {
        hosts_attempted: 0,
        hosts_failed: 0,
    };
    for host in hosts {
        let scan_file = format!("{}{}/scan", SCSI_HOST_PATH, host);
        report.hosts_attempted += 1;
        if let Err(e) = io.write_file(&scan_file, SCAN_WILDCARD) {
            warn!(host = %host, error = %e, "SCSI host rescan trigger failed");
            report.hosts_failed += 1;
        }
    }
    Ok(report)
}
