use async_trait::async_trait;
use sysinfo::{Disks, Networks, System, MINIMUM_CPU_UPDATE_INTERVAL};
use tracing::{debug, warn};

use crate::system::info::{collect_public_ip_addresses, HostFacts};
use crate::system::metrics::{is_gauge_interface, root_disk_usage, RawReadings};

/// Source of live host readings. Nothing here is cached between calls.
#[async_trait]
pub trait HostProbe: Send + Sync {
    async fn readings(&self) -> RawReadings;
    async fn facts(&self) -> HostFacts;
}

/// Reads the running host through `sysinfo` and `netdev`.
#[derive(Debug, Clone, Default)]
pub struct SysinfoProbe;

#[async_trait]
impl HostProbe for SysinfoProbe {
    async fn readings(&self) -> RawReadings {
        let mut sys = System::new();

        // CPU usage is a delta between two refreshes.
        sys.refresh_cpu_usage();
        tokio::time::sleep(MINIMUM_CPU_UPDATE_INTERVAL).await;
        sys.refresh_cpu_usage();
        sys.refresh_memory();

        let cpu_percent = if sys.cpus().is_empty() {
            warn!("No CPUs reported, CPU usage will be 0.");
            None
        } else {
            Some(sys.global_cpu_usage())
        };

        let disks = Disks::new_with_refreshed_list();
        let root_disk = disks
            .list()
            .iter()
            .find(|disk| disk.mount_point() == std::path::Path::new("/"))
            .map(|disk| root_disk_usage(disk.total_space(), disk.available_space()));
        if root_disk.is_none() {
            warn!("Root filesystem not found, disk usage will be 0.");
        }

        let networks = Networks::new_with_refreshed_list();
        // First matching interface in name order, so the choice is stable.
        let network_rx_bytes = networks
            .iter()
            .filter(|(name, _)| is_gauge_interface(name))
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(name, data)| {
                debug!(interface = %name, "Using interface for network gauge.");
                data.total_received()
            });
        if network_rx_bytes.is_none() {
            debug!("No eth0/ens*/enp* interface, network gauge will be 0.");
        }

        let load = System::load_average();

        RawReadings {
            cpu_percent,
            memory_used_bytes: sys.used_memory(),
            memory_total_bytes: sys.total_memory(),
            root_disk,
            network_rx_bytes,
            load_one: Some(load.one),
        }
    }

    async fn facts(&self) -> HostFacts {
        let default_ipv4 = match netdev::get_default_interface() {
            Ok(iface) => iface.ipv4.first().map(|net| net.addr().to_string()),
            Err(e) => {
                debug!(error = %e, "No default network interface.");
                None
            }
        };

        HostFacts {
            hostname: System::host_name(),
            uptime_secs: Some(System::uptime()),
            kernel: System::kernel_version(),
            distro: System::long_os_version(),
            default_ipv4,
            public_ips: collect_public_ip_addresses(),
        }
    }
}
