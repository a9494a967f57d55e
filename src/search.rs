//! Device lookup by interconnect identifier.
//!
//! Two strategies, selected by the connector contents:
//! - WWN+LUN: scan `/dev/disk/by-path` for an entry *containing* the FC
//!   fragment. by-path names encode interface topology and may carry extra
//!   suffixes, so a substring match is required.
//! - WWID: scan `/dev/disk/by-id` for an entry *equal to* `scsi-<wwid>`.
//!   by-id names are stable identifiers with no decoration, so the match is
//!   exact.
//!
//! [`search_disk`] composes the lookups into the two-phase search: probe,
//! rescan the SCSI bus at most once, probe again.

use tracing::{debug, error, warn};

use crate::connector::Connector;
use crate::device::find_multipath_device;
use crate::error::{FcError, Result};
use crate::io::FsIo;
use crate::scsi::rescan_scsi_hosts;

const DEV_BY_PATH: &str = "/dev/disk/by-path/";
const DEV_BY_ID: &str = "/dev/disk/by-id/";

/// Find the disk and its device-mapper parent for a WWN and LUN.
///
/// Either element may be `None`; a lookup miss is not an error.
pub fn find_disk(wwn: &str, lun: &str, io: &dyn FsIo) -> (Option<String>, Option<String>) {
    let fc_fragment = format!("-fc-0x{}-lun-{}", wwn, lun);
    if let Ok(entries) = io.read_dir(DEV_BY_PATH) {
        for name in entries {
            if name.contains(&fc_fragment)
                && let Ok(disk) = io.eval_symlinks(&format!("{}{}", DEV_BY_PATH, name))
            {
                match find_multipath_device(&disk, io) {
                    Ok(dm) => return (Some(disk), dm),
                    Err(e) => {
                        debug!(disk = %disk, error = %e, "Multipath lookup failed, trying next entry");
                    }
                }
            }
        }
    }
    (None, None)
}

/// Find the disk and its device-mapper parent for a WWID.
///
/// Example WWID: `3600508b400105e210000900000490000`
/// (`<VENDOR NAME><IDENTIFIER NUMBER>`); whitespace in a WWID appears as an
/// underscore in the by-id entry name. A symlink that fails to resolve ends
/// the lookup for this WWID; a failed multipath lookup still reports the raw
/// disk so the caller's precedence rule can settle the result.
pub fn find_disk_wwid(wwid: &str, io: &dyn FsIo) -> (Option<String>, Option<String>) {
    let id_name = format!("scsi-{}", wwid);
    if let Ok(entries) = io.read_dir(DEV_BY_ID) {
        for name in entries {
            if name == id_name {
                let link = format!("{}{}", DEV_BY_ID, name);
                let disk = match io.eval_symlinks(&link) {
                    Ok(disk) => disk,
                    Err(e) => {
                        error!(symlink = %link, error = %e, "Failed to find a corresponding disk from symlink");
                        return (None, None);
                    }
                };
                return match find_multipath_device(&disk, io) {
                    Ok(dm) => (Some(disk), dm),
                    Err(e) => {
                        warn!(disk = %disk, error = %e, "Multipath lookup failed for WWID disk");
                        (Some(disk), None)
                    }
                };
            }
        }
    }
    error!(entry = %format!("{}{}", DEV_BY_ID, id_name), "Failed to find a disk");
    (None, None)
}

/// Two-phase search for the device described by a connector.
///
/// Phase one probes every identifier in the authoritative list, stopping
/// early only on a multipath hit (a raw-only hit does not short-circuit: a
/// later identifier might still surface the dm node). If nothing multipath
/// turned up, the SCSI bus is rescanned exactly once and the probe repeats,
/// after which the search terminates regardless of outcome. A multipath
/// device always wins over a raw one.
pub fn search_disk(c: &Connector, io: &dyn FsIo) -> Result<String> {
    let mut disk: Option<String> = None;
    let mut dm: Option<String> = None;

    let mut rescanned = false;
    loop {
        if c.uses_wwns() {
            for wwn in &c.target_wwns {
                (disk, dm) = find_disk(wwn, &c.lun, io);
                if dm.is_some() {
                    break;
                }
            }
        } else {
            for wwid in &c.wwids {
                (disk, dm) = find_disk_wwid(wwid, io);
                if dm.is_some() {
                    break;
                }
            }
        }
        if rescanned || dm.is_some() {
            break;
        }
        // Nothing multipath yet: rescan the bus once and search again.
        match rescan_scsi_hosts(io) {
            Ok(report) => {
                debug!(
                    hosts_attempted = report.hosts_attempted,
                    hosts_failed = report.hosts_failed,
                    "SCSI bus rescan complete"
                );
                crate::metrics::record_rescan(report.hosts_attempted, report.hosts_failed);
            }
            Err(e) => warn!(error = %e, "SCSI bus rescan failed"),
        }
        rescanned = true;
    }

    match (dm, disk) {
        // A multipath devicemapper device beats the raw disk.
        (Some(dm), _) => Ok(dm),
        (None, Some(disk)) => Ok(disk),
        (None, None) => Err(FcError::DiskNotFound),
    }
}
