//! Connection descriptor for a Fibre Channel volume.

use serde::{Deserialize, Serialize};

/// All parameters needed to locate a Fibre Channel volume on this host.
///
/// Identifier precedence: when `target_wwns` is non-empty the device is
/// resolved by WWN+LUN and `wwids` is ignored entirely; only an empty
/// `target_wwns` makes `wwids` authoritative. The two sets are never merged.
///
/// Field names on the wire follow the Kubernetes FC volume source
/// (`targetWWNs`, `lun`, `wwids`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connector {
    /// Opaque volume label, used for logging only.
    #[serde(rename = "volumeName", default)]
    pub volume_name: String,

    /// World Wide Names of the target ports, as bare hex strings.
    #[serde(rename = "targetWWNs", default)]
    pub target_wwns: Vec<String>,

    /// Logical unit number, paired with every WWN.
    #[serde(default)]
    pub lun: String,

    /// World Wide Identifiers of the volume.
    #[serde(default)]
    pub wwids: Vec<String>,
}

impl Connector {
    /// True when WWN+LUN resolution applies; false means WWID resolution.
    pub fn uses_wwns(&self) -> bool {
        !self.target_wwns.is_empty()
    }
}
