//! Host-facing building blocks: allow-lists, process execution and the
//! wrappers around systemctl, apt, journalctl and sysinfo.

pub mod allowlist;
pub mod executor;
pub mod info;
pub mod metrics;
pub mod package_manager;
pub mod probe;
pub mod service_manager;
