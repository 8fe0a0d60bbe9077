use std::sync::Arc;
use tracing::{debug, warn};

use crate::system::allowlist::{ServiceAction, ServiceName};
use crate::system::executor::{output_text, privileged, CommandExecutor};

/// Thin wrapper around `systemctl`. The OS owns the running/stopped state;
/// this type only asks about it and requests transitions.
#[derive(Clone)]
pub struct Systemctl {
    executor: Arc<dyn CommandExecutor>,
    use_sudo: bool,
}

impl Systemctl {
    pub fn new(executor: Arc<dyn CommandExecutor>, use_sudo: bool) -> Self {
        Self { executor, use_sudo }
    }

    /// `true` iff `systemctl is-active` prints exactly `active`.
    pub async fn is_active(&self, service: ServiceName) -> bool {
        self.query("is-active", service, "active").await
    }

    /// `true` iff `systemctl is-enabled` prints exactly `enabled`.
    pub async fn is_enabled(&self, service: ServiceName) -> bool {
        self.query("is-enabled", service, "enabled").await
    }

    /// Issues `systemctl <action> <service>` and returns its combined output.
    pub async fn apply(&self, action: ServiceAction, service: ServiceName) -> String {
        let argv = privileged(
            self.use_sudo,
            &["systemctl", action.as_str(), service.as_str()],
        );
        output_text(self.executor.run(&argv).await)
    }

    async fn query(&self, verb: &str, service: ServiceName, expected: &str) -> bool {
        match self
            .executor
            .run(&["systemctl", verb, service.as_str()])
            .await
        {
            Ok(out) => {
                debug!(service = %service, verb, state = %out.output, "Queried unit state.");
                out.output.trim() == expected
            }
            Err(e) => {
                warn!(service = %service, verb, error = %e, "Unit state query failed.");
                false
            }
        }
    }
}
