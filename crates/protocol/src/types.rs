use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Negotiation parameters for an OS-image install transfer.
///
/// Sent exactly once, before any payload bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOpen {
    /// Version the package is expected to report once validated.
    pub version: String,
    /// Install on the standby supervisor instead of the active one.
    #[serde(default, skip_serializing_if = "is_false")]
    pub standby_supervisor: bool,
}

/// Destination parameters for a file put.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutDetails {
    pub remote_file: String,
    /// Octal permission bits to apply on the target (0 leaves the default).
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub permissions: u32,
}

/// Digest algorithm used for the transfer trailer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashMethod {
    #[serde(rename = "sha256")]
    Sha256,
}

/// Digest trailer sent after the last payload chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashTrailer {
    pub method: HashMethod,
    /// Hex-encoded digest over every payload byte, in send order.
    pub digest: String,
}

/// Device report that a package is present and validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validated {
    pub version: String,
}

/// Device-reported install failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallErrorKind {
    Unspecified,
    Incompatible,
    ParseFail,
    IntegrityFail,
    InstallInProgress,
}

/// How the target should reboot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RebootMethod {
    #[default]
    Cold,
    Warm,
    Powerdown,
    Halt,
}

/// Snapshot of a target's reboot state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebootStatus {
    /// A reboot is still pending or in progress.
    pub active: bool,
    /// Device-suggested wait before polling again, in nanoseconds (0 = none).
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub wait_nanos: u64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,
    /// Number of reboots since the triggering request.
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub count: u32,
}

impl RebootStatus {
    /// Returns the device-suggested poll wait, if it reported one.
    pub fn suggested_wait(&self) -> Option<Duration> {
        (self.wait_nanos > 0).then(|| Duration::from_nanos(self.wait_nanos))
    }
}

fn is_false(v: &bool) -> bool {
    !*v
}

fn is_zero_u32(v: &u32) -> bool {
    *v == 0
}

fn is_zero_u64(v: &u64) -> bool {
    *v == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_open_json_roundtrip() {
        let open = TransferOpen {
            version: "7.2.1".into(),
            standby_supervisor: true,
        };
        let json = serde_json::to_string(&open).unwrap();
        let parsed: TransferOpen = serde_json::from_str(&json).unwrap();
        assert_eq!(open, parsed);
    }

    #[test]
    fn transfer_open_omits_default_standby() {
        let open = TransferOpen {
            version: "7.2.1".into(),
            standby_supervisor: false,
        };
        let json = serde_json::to_string(&open).unwrap();
        assert!(!json.contains("standbySupervisor"));
    }

    #[test]
    fn put_details_field_names() {
        let json = r#"{"remoteFile":"/tmp/cfg","permissions":420}"#;
        let details: PutDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.remote_file, "/tmp/cfg");
        assert_eq!(details.permissions, 420);
    }

    #[test]
    fn put_details_omits_zero_permissions() {
        let details = PutDetails {
            remote_file: "/tmp/cfg".into(),
            permissions: 0,
        };
        let json = serde_json::to_string(&details).unwrap();
        assert!(!json.contains("permissions"));
    }

    #[test]
    fn reboot_status_suggested_wait() {
        let status = RebootStatus {
            active: true,
            wait_nanos: 2_000_000_000,
            ..Default::default()
        };
        assert_eq!(status.suggested_wait(), Some(Duration::from_secs(2)));

        let status = RebootStatus::default();
        assert_eq!(status.suggested_wait(), None);
    }

    #[test]
    fn install_error_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&InstallErrorKind::IntegrityFail).unwrap(),
            "\"integrity_fail\""
        );
    }
}
