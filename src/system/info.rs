use serde::Serialize;
use std::net::IpAddr;
use sysinfo::Networks;

/// Host identity as reported by the info action.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SystemInfo {
    pub hostname: String,
    pub uptime: String,
    pub kernel: String,
    pub distro: String,
    pub ip: String,
}

/// Raw facts about the host; each one is read independently and may be missing.
#[derive(Debug, Clone, Default)]
pub struct HostFacts {
    pub hostname: Option<String>,
    pub uptime_secs: Option<u64>,
    pub kernel: Option<String>,
    pub distro: Option<String>,
    pub default_ipv4: Option<String>,
    pub public_ips: Vec<String>,
}

impl SystemInfo {
    /// `advertised_ip` wins over the default interface address, which wins
    /// over the first public address.
    pub fn from_facts(facts: HostFacts, advertised_ip: Option<&str>) -> Self {
        let ip = advertised_ip
            .map(str::to_string)
            .or(facts.default_ipv4)
            .or_else(|| facts.public_ips.into_iter().next())
            .unwrap_or_default();

        Self {
            hostname: facts.hostname.unwrap_or_default(),
            uptime: facts.uptime_secs.map(format_uptime).unwrap_or_default(),
            kernel: facts.kernel.unwrap_or_default(),
            distro: facts.distro.unwrap_or_default(),
            ip,
        }
    }
}

/// Renders uptime the way `uptime -p` does, e.g. `up 2 days, 3 hours, 1 minute`.
pub fn format_uptime(total_secs: u64) -> String {
    let minutes_total = total_secs / 60;
    let parts = [
        (minutes_total / (60 * 24 * 7), "week"),
        ((minutes_total / (60 * 24)) % 7, "day"),
        ((minutes_total / 60) % 24, "hour"),
        (minutes_total % 60, "minute"),
    ];

    let rendered: Vec<String> = parts
        .iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, unit)| {
            if *count == 1 {
                format!("{count} {unit}")
            } else {
                format!("{count} {unit}s")
            }
        })
        .collect();

    if rendered.is_empty() {
        "up 0 minutes".to_string()
    } else {
        format!("up {}", rendered.join(", "))
    }
}

/// Public (globally routable) addresses on any interface, sorted and deduplicated.
pub fn collect_public_ip_addresses() -> Vec<String> {
    let mut public_ips = Vec::new();
    let networks = Networks::new_with_refreshed_list();

    for (_if_name, network_data) in networks.iter() {
        for ip_network in network_data.ip_networks() {
            if is_public(ip_network.addr) {
                public_ips.push(ip_network.addr.to_string());
            }
        }
    }
    public_ips.sort_unstable();
    public_ips.dedup();
    public_ips
}

fn is_public(ip_addr: IpAddr) -> bool {
    if ip_addr.is_loopback() || ip_addr.is_multicast() || ip_addr.is_unspecified() {
        return false;
    }
    match ip_addr {
        IpAddr::V4(v4) => {
            !(v4.is_link_local() || v4.is_private() || v4.is_documentation() || v4.is_broadcast())
        }
        IpAddr::V6(v6) => {
            let segments = v6.segments();
            // fe80::/10, fc00::/7, 2001:db8::/32
            !((segments[0] & 0xffc0 == 0xfe80)
                || (segments[0] & 0xfe00 == 0xfc00)
                || (segments[0] == 0x2001 && segments[1] == 0x0db8))
        }
    }
}
