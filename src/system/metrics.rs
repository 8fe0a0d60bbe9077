use chrono::Local;
use serde::Serialize;

/// Interfaces considered for the network gauge, matched in name order.
const NETWORK_INTERFACE_PREFIXES: &[&str] = &["eth0", "ens", "enp"];

/// The network gauge never reports more than this.
pub const NETWORK_GAUGE_CEILING: u64 = 99;

/// Unprocessed host readings. `None` marks a reading that could not be taken.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawReadings {
    pub cpu_percent: Option<f32>,
    pub memory_used_bytes: u64,
    pub memory_total_bytes: u64,
    /// `(used, total)` bytes of the filesystem mounted at `/`.
    pub root_disk: Option<(u64, u64)>,
    /// Cumulative received bytes of the first matching interface.
    pub network_rx_bytes: Option<u64>,
    pub load_one: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MetricsSnapshot {
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
    pub network: f64,
    pub load: f64,
    pub timestamp: String,
}

impl MetricsSnapshot {
    pub fn from_readings(raw: &RawReadings) -> Self {
        Self::from_readings_at(raw, Local::now().format("%Y-%m-%d %H:%M:%S").to_string())
    }

    pub fn from_readings_at(raw: &RawReadings, timestamp: String) -> Self {
        let cpu = raw
            .cpu_percent
            .map(f64::from)
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
            .clamp(0.0, 100.0);
        let memory = percent(raw.memory_used_bytes, raw.memory_total_bytes);
        let disk = raw
            .root_disk
            .map(|(used, total)| percent(used, total))
            .unwrap_or(0.0);
        let network = raw
            .network_rx_bytes
            .map(network_gauge)
            .unwrap_or(0) as f64;
        let load = raw
            .load_one
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or(0.0);

        Self {
            cpu: round_to(cpu, 1),
            memory: round_to(memory, 1),
            disk: round_to(disk, 1),
            network: round_to(network, 1),
            load: round_to(load, 2),
            timestamp,
        }
    }
}

/// Pseudo-percentage derived from a received-bytes counter: whole megabytes
/// modulo 100, capped at [`NETWORK_GAUGE_CEILING`].
pub fn network_gauge(rx_bytes: u64) -> u64 {
    ((rx_bytes / 1_000_000) % 100).min(NETWORK_GAUGE_CEILING)
}

/// Whether an interface name feeds the network gauge.
pub fn is_gauge_interface(name: &str) -> bool {
    NETWORK_INTERFACE_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// `(used, total)` for a filesystem, where used is everything not available to
/// unprivileged users. Blocks reserved for root therefore count as used, so the
/// result sits a few points above `df`'s Use% on ext filesystems.
pub fn root_disk_usage(total: u64, available: u64) -> (u64, u64) {
    (total.saturating_sub(available), total)
}

fn percent(used: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    ((used as f64 / total as f64) * 100.0).clamp(0.0, 100.0)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
