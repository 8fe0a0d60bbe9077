use std::time::Duration;
use tracing::{info, warn};

use crate::gateway::models::ControlResult;
use crate::gateway::Gateway;
use crate::system::allowlist::{ServiceAction, ServiceName};
use crate::system::service_manager::Systemctl;

/// How the outcome of a lifecycle action is judged.
///
/// This is a fixed sleep followed by a single re-check. A unit that needs
/// longer than the settle delay to come up is reported as a failure even if
/// it starts a moment later; there is no polling and no retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// Wait, then succeed only if the unit is active.
    ExpectRunning(Duration),
    /// Wait, then succeed only if the unit is no longer active.
    ExpectStopped(Duration),
    /// Succeed without looking; the command's exit status is not consulted.
    Assume,
}

impl Verification {
    pub async fn verify(self, systemctl: &Systemctl, service: ServiceName) -> bool {
        match self {
            Verification::ExpectRunning(delay) => {
                tokio::time::sleep(delay).await;
                systemctl.is_active(service).await
            }
            Verification::ExpectStopped(delay) => {
                tokio::time::sleep(delay).await;
                !systemctl.is_active(service).await
            }
            Verification::Assume => true,
        }
    }
}

/// Maps each action to its [`Verification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationPolicy {
    start_settle: Duration,
    stop_settle: Duration,
}

impl Default for VerificationPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(2), Duration::from_secs(1))
    }
}

impl VerificationPolicy {
    pub fn new(start_settle: Duration, stop_settle: Duration) -> Self {
        Self {
            start_settle,
            stop_settle,
        }
    }

    pub fn for_action(&self, action: ServiceAction) -> Verification {
        match action {
            ServiceAction::Start | ServiceAction::Restart => {
                Verification::ExpectRunning(self.start_settle)
            }
            ServiceAction::Stop => Verification::ExpectStopped(self.stop_settle),
            ServiceAction::Status | ServiceAction::Enable | ServiceAction::Disable => {
                Verification::Assume
            }
        }
    }
}

impl Gateway {
    /// Validates `(service, action)`, runs `systemctl <action> <service>` and
    /// judges the outcome with the [`VerificationPolicy`].
    ///
    /// Rejected requests never reach the executor.
    pub async fn control_service(&self, service: &str, action: &str) -> ControlResult {
        let (Some(unit), Ok(verb)) = (ServiceName::parse(service), action.parse::<ServiceAction>())
        else {
            warn!(service = %service, action = %action, "Rejected control request.");
            return ControlResult {
                success: false,
                message: "Invalid service or action".to_string(),
                output: None,
                service: service.to_string(),
                action: action.to_string(),
                status: None,
            };
        };

        info!(service = %unit, action = %verb, "Running lifecycle action.");
        let output = self.systemctl.apply(verb, unit).await;

        let verification = self.policy.for_action(verb);
        let success = verification.verify(&self.systemctl, unit).await;
        let status = self.systemctl.is_active(unit).await;

        let message = if success {
            format!("Service {unit} {verb} completed successfully")
        } else {
            format!("Failed to {verb} {unit}")
        };
        info!(service = %unit, action = %verb, success, running = status, "Lifecycle action finished.");

        ControlResult {
            success,
            message,
            output: Some(output),
            service: unit.as_str().to_string(),
            action: verb.as_str().to_string(),
            status: Some(status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_per_action() {
        let policy = VerificationPolicy::default();
        assert_eq!(
            policy.for_action(ServiceAction::Start),
            Verification::ExpectRunning(Duration::from_secs(2))
        );
        assert_eq!(
            policy.for_action(ServiceAction::Restart),
            Verification::ExpectRunning(Duration::from_secs(2))
        );
        assert_eq!(
            policy.for_action(ServiceAction::Stop),
            Verification::ExpectStopped(Duration::from_secs(1))
        );
        for action in [ServiceAction::Status, ServiceAction::Enable, ServiceAction::Disable] {
            assert_eq!(policy.for_action(action), Verification::Assume);
        }
    }

    #[test]
    fn test_policy_uses_configured_delays() {
        let policy = VerificationPolicy::new(Duration::from_millis(10), Duration::ZERO);
        assert_eq!(
            policy.for_action(ServiceAction::Start),
            Verification::ExpectRunning(Duration::from_millis(10))
        );
        assert_eq!(
            policy.for_action(ServiceAction::Stop),
            Verification::ExpectStopped(Duration::ZERO)
        );
    }
}
