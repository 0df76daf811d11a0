use serde::{Deserialize, Serialize};

use crate::types::{HashTrailer, InstallErrorKind, PutDetails, TransferOpen, Validated};

/// Frames the client sends on an install stream.
///
/// Send order within one session is fixed: one `TransferOpen`, then content
/// chunks in payload order, then one `TransferEnd`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum InstallRequest {
    TransferOpen(TransferOpen),
    Content(#[serde(with = "base64_bytes")] Vec<u8>),
    TransferEnd,
}

/// Signals the device emits asynchronously during an install.
///
/// `Unknown` absorbs signal types this client does not understand; the
/// engine treats it as a protocol violation rather than skipping it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "value",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum InstallSignal {
    /// Device is ready to receive payload chunks.
    TransferReady,
    /// Bytes received so far; informational only.
    TransferProgress { bytes_received: u64 },
    /// Percentage synced to the standby supervisor; informational only.
    SyncProgress { percentage_transferred: u32 },
    /// Package is present and validated.
    Validated(Validated),
    /// Device rejected the install.
    InstallError {
        kind: InstallErrorKind,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        detail: String,
    },
    #[serde(other)]
    Unknown,
}

impl InstallSignal {
    /// Variant name, for diagnostics on unexpected signals.
    pub fn name(&self) -> &'static str {
        match self {
            InstallSignal::TransferReady => "transferReady",
            InstallSignal::TransferProgress { .. } => "transferProgress",
            InstallSignal::SyncProgress { .. } => "syncProgress",
            InstallSignal::Validated(_) => "validated",
            InstallSignal::InstallError { .. } => "installError",
            InstallSignal::Unknown => "unknown",
        }
    }
}

/// Frames the client sends on a file-put stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum PutRequest {
    Open(PutDetails),
    Contents(#[serde(with = "base64_bytes")] Vec<u8>),
    Hash(HashTrailer),
}

/// Final acknowledgement of a completed put.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PutAck {}

/// Serde adapter: `Vec<u8>` as base64 strings in JSON, matching Go's
/// `[]byte` serialization on the device side.
mod base64_bytes {
    use base64::{Engine, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        STANDARD.encode(data).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}
