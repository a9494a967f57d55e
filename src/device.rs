//! Device path parsing and multipath membership resolution.
//!
//! Block devices reached over Fibre Channel surface either as plain SCSI
//! disks (`/dev/sdx`) or aggregated under a device-mapper multipath node
//! (`/dev/dm-N`). The functions here translate between linked paths, bare
//! device names, and their dm parents by walking `/sys/block`.

use tracing::debug;

use crate::error::{FcError, Result};
use crate::io::FsIo;

const SYS_BLOCK_PATH: &str = "/sys/block/";

/// Resolve a linked path such as `/dev/disk/by-path/XXXX` down to the bare
/// device name (`sdx`, `hdx`, ...). Passing `/dev/sdx` returns `sdx`.
///
/// The resolved path must be flat: exactly `/dev*/name`. Multipath and FC
/// device nodes always live directly under `/dev`, so anything deeper is
/// rejected as [`FcError::InvalidPath`].
pub fn device_name_for_path(path: &str, io: &dyn FsIo) -> Result<String> {
    let device_path = io.eval_symlinks(path)?;
    // A path like /dev/sdx splits into "", "dev", "sdx".
    let parts: Vec<&str> = device_path.split('/').collect();
    if parts.len() == 3 && parts[1].starts_with("dev") {
        return Ok(parts[2].to_string());
    }
    Err(FcError::InvalidPath(device_path))
}

/// Extract the `dm-N` leaf from an (unresolved) `/dev/dm-N` path.
///
/// Returns `None` when the path is not flat; callers treat that as "no
/// slaves discoverable", not as an error.
fn dm_leaf_name(dm_path: &str) -> Option<&str> {
    let parts: Vec<&str> = dm_path.split('/').collect();
    if parts.len() == 3 && parts[1].starts_with("dev") {
        Some(parts[2])
    } else {
        None
    }
}

/// Find the device-mapper parent aggregating `device_path`, if any.
///
/// Scans `/sys/block` for `dm-*` entries and probes their `slaves/`
/// directories for the raw device name. Returns the first match in listing
/// order as `/dev/dm-N`. "Not aggregated" is a normal outcome and returns
/// `Ok(None)`; only symlink resolution and the `/sys/block` listing itself
/// can fail.
pub fn find_multipath_device(device_path: &str, io: &dyn FsIo) -> Result<Option<String>> {
    let disk = device_name_for_path(device_path, io)?;
    let entries = io.read_dir(SYS_BLOCK_PATH)?;
    for name in entries {
        if name.starts_with("dm-")
            && io
                .lstat(&format!("{}{}/slaves/{}", SYS_BLOCK_PATH, name, disk))
                .is_ok()
        {
            debug!(device = %disk, multipath = %name, "Device is a multipath slave");
            return Ok(Some(format!("/dev/{}", name)));
        }
    }
    Ok(None)
}

/// List all slave devices of the multipath node at `dm_path`.
///
/// Returns `/dev/<name>` for every entry of `/sys/block/<dm>/slaves/`, in
/// listing order. A malformed path or a missing/unreadable slaves directory
/// yields an empty list, never an error.
pub fn find_slave_devices(dm_path: &str, io: &dyn FsIo) -> Vec<String> {
    let Some(disk) = dm_leaf_name(dm_path) else {
        return Vec::new();
    };
    let slaves_path = format!("{}{}/slaves/", SYS_BLOCK_PATH, disk);
    match io.read_dir(&slaves_path) {
        Ok(entries) => entries
            .into_iter()
            .map(|name| format!("/dev/{}", name))
            .collect(),
        Err(e) => {
            debug!(path = %slaves_path, error = %e, "No slave devices found");
            Vec::new()
        }
    }
}
