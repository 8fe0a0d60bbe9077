use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of a control request. `output` and `status` are absent when the
/// request was rejected before anything ran.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ControlResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Echoes the caller's value, even when it was rejected.
    pub service: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ServiceStatusEntry {
    pub name: &'static str,
    /// Running right now.
    pub status: bool,
    /// Enabled at boot.
    pub enabled: bool,
}

/// One entry per monitored service, keyed by unit name.
pub type ServiceStatusMap = BTreeMap<&'static str, ServiceStatusEntry>;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InstallResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LogsResponse {
    pub logs: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
