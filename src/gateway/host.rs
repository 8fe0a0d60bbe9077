use tracing::debug;

use crate::gateway::Gateway;
use crate::system::info::SystemInfo;
use crate::system::metrics::MetricsSnapshot;

impl Gateway {
    /// A fresh reading of CPU, memory, disk, network and load.
    pub async fn system_metrics(&self) -> MetricsSnapshot {
        let readings = self.probe.readings().await;
        debug!(?readings, "Read host metrics.");
        MetricsSnapshot::from_readings(&readings)
    }

    pub async fn system_info(&self) -> SystemInfo {
        let facts = self.probe.facts().await;
        SystemInfo::from_facts(facts, self.advertised_ip.as_deref())
    }
}
