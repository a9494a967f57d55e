//! Fibre Channel volume attach/detach library
//!
//! Resolves SCSI/FC block devices into usable device paths and manages
//! their safe removal. Given target WWNs with a LUN, or WWIDs, it locates
//! the raw block device under `/dev/disk/by-path` or `/dev/disk/by-id`,
//! detects whether the device is aggregated under a device-mapper multipath
//! node, and returns the path a caller should mount. Detaching reverses
//! this: all underlying paths are discovered and removed from the SCSI
//! subsystem.
//!
//! This library provides:
//! - `attach`/`detach` entry points driven by a [`Connector`] descriptor
//! - Multipath parent and slave resolution over `/sys/block`
//! - A host-wide SCSI bus rescan used once per attach when the first probe
//!   comes up empty
//! - An injectable [`FsIo`] capability so every operation is testable
//!   without touching `/sys` or `/dev`
//!
//! All I/O is synchronous and blocking; nothing persists between calls.

pub mod connector;
pub mod device;
pub mod error;
pub mod io;
pub mod metrics;
pub mod scsi;
pub mod search;
pub mod volume;

pub use connector::Connector;
pub use device::{find_multipath_device, find_slave_devices};
pub use error::{FcError, Result};
pub use io::{FsIo, OsFs};
pub use scsi::{RescanReport, rescan_scsi_hosts};
pub use volume::{attach, detach};
