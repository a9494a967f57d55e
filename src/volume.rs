//! Attach and detach orchestration.
//!
//! `attach` resolves a connector to the device path a caller should mount,
//! preferring a multipath device-mapper node over any raw path. `detach`
//! walks a device path back to its underlying SCSI devices and removes each
//! one from the host.

use tracing::{error, info};

use crate::connector::Connector;
use crate::device::find_slave_devices;
use crate::error::{FcError, Result};
use crate::io::FsIo;
use crate::metrics::OperationTimer;
use crate::search::search_disk;

const DM_PATH_PREFIX: &str = "/dev/dm-";

/// Attach a Fibre Channel volume, returning the device path to use.
///
/// Runs the two-phase search (probe, rescan the bus at most once, probe
/// again) over the connector's authoritative identifier set. Fails with
/// [`FcError::DiskNotFound`] when no identifier matched after the rescan.
pub fn attach(c: &Connector, io: &dyn FsIo) -> Result<String> {
    let timer = OperationTimer::new("attach");
    info!(volume = %c.volume_name, "Attaching fibre channel volume");

    match search_disk(c, io) {
        Ok(device_path) => {
            info!(volume = %c.volume_name, device = %device_path, "Fibre channel volume attached");
            timer.success();
            Ok(device_path)
        }
        Err(e) => {
            info!(volume = %c.volume_name, "Unable to find disk given WWNN or WWIDs");
            timer.failure("not_found");
            Err(e)
        }
    }
}

/// Detach the volume at `device_path`, removing every underlying device.
///
/// A multipath path is expanded to its slave devices; anything else is
/// removed directly. Removal is attempted for every device in listing order
/// even after failures; the last failure is returned, earlier ones are only
/// logged. A returned error therefore does not mean no device was removed,
/// and success for one slave says nothing about its siblings.
pub fn detach(device_path: &str, io: &dyn FsIo) -> Result<()> {
    let timer = OperationTimer::new("detach");
    info!(device = %device_path, "Detaching fibre channel volume");

    let dst_path = io.eval_symlinks(device_path)?;

    let devices = if dst_path.starts_with(DM_PATH_PREFIX) {
        find_slave_devices(&dst_path, io)
    } else {
        vec![dst_path.clone()]
    };

    info!(device = %device_path, resolved = %dst_path, devices = ?devices, "Removing devices from SCSI subsystem");

    let mut last_err = None;
    for device in &devices {
        if let Err(e) = detach_disk(device, io) {
            error!(device = %device, error = %e, "Device removal failed");
            last_err = Some(e);
        }
    }

    match last_err {
        Some(e) => {
            error!(error = %e, "Last error occurred during detach");
            timer.failure("removal_failed");
            Err(e)
        }
        None => {
            timer.success();
            Ok(())
        }
    }
}

/// Remove a single SCSI device such as `/dev/sdx` from the host.
fn detach_disk(device_path: &str, io: &dyn FsIo) -> Result<()> {
    let Some(rest) = device_path.strip_prefix("/dev/") else {
        return Err(FcError::InvalidPath(device_path.to_string()));
    };
    let device = rest.rsplit('/').next().unwrap_or(rest);
    remove_from_scsi_subsystem(device, io)
}

/// Write the removal trigger for a device name (`sdx`) to sysfs.
fn remove_from_scsi_subsystem(device: &str, io: &dyn FsIo) -> Result<()> {
    let delete_file = format!("/sys/block/{}/device/delete", device);
    info!(path = %delete_file, "Removing device from SCSI subsystem");
    io.write_file(&delete_file, b"1")
        .map_err(|source| FcError::RemovalFailed {
            device: format!("/dev/{}", device),
            source,
        })
}
