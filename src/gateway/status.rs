use tracing::{debug, warn};

use crate::gateway::models::{ServiceStatusEntry, ServiceStatusMap};
use crate::gateway::Gateway;
use crate::system::allowlist::{ServiceName, MONITORED_SERVICES};

impl Gateway {
    /// Whether `service` is running right now.
    pub async fn service_status(&self, service: ServiceName) -> bool {
        self.systemctl.is_active(service).await
    }

    /// Running and boot-enabled state for every monitored service. Each query
    /// stands alone; a failed one only turns its own field `false`.
    pub async fn all_services_status(&self) -> ServiceStatusMap {
        let mut statuses = ServiceStatusMap::new();
        for &(service, display_name) in MONITORED_SERVICES {
            let Some(unit) = ServiceName::parse(service) else {
                warn!(service = %service, "Monitored service missing from allow-list, skipping.");
                continue;
            };
            let entry = ServiceStatusEntry {
                name: display_name,
                status: self.systemctl.is_active(unit).await,
                enabled: self.systemctl.is_enabled(unit).await,
            };
            statuses.insert(unit.as_str(), entry);
        }
        debug!(count = statuses.len(), "Collected service statuses.");
        statuses
    }
}
