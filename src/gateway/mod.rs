//! The service-control gateway: validates requests against the allow-lists,
//! runs the matching host command and reports a structured result.
//!
//! Every operation is request-scoped. Nothing is cached and no state is kept
//! between calls; the host is the only source of truth.

use std::sync::Arc;

use crate::server::config::ServerConfig;
use crate::system::executor::CommandExecutor;
use crate::system::package_manager::HostTools;
use crate::system::probe::HostProbe;
use crate::system::service_manager::Systemctl;

pub mod control;
pub mod host;
pub mod install;
pub mod logs;
pub mod models;
pub mod status;

pub use control::{Verification, VerificationPolicy};

/// Lines returned by the logs action when the caller does not ask for a count.
pub const DEFAULT_LOG_LINES: u32 = 50;

#[derive(Clone)]
pub struct Gateway {
    systemctl: Systemctl,
    tools: HostTools,
    probe: Arc<dyn HostProbe>,
    policy: VerificationPolicy,
    max_log_lines: u32,
    advertised_ip: Option<String>,
}

impl Gateway {
    pub fn new(
        executor: Arc<dyn CommandExecutor>,
        probe: Arc<dyn HostProbe>,
        config: &ServerConfig,
    ) -> Self {
        Self {
            systemctl: Systemctl::new(executor.clone(), config.use_sudo),
            tools: HostTools::new(executor, config.use_sudo),
            probe,
            policy: VerificationPolicy::new(config.start_settle(), config.stop_settle()),
            max_log_lines: config.max_log_lines.max(1),
            advertised_ip: config.advertised_ip.clone(),
        }
    }
}
