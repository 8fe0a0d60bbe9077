//! Fixed allow-lists for everything that ends up on a command line.
//!
//! Values of [`ServiceName`], [`PackageName`] and [`LogUnit`] can only be
//! obtained by an exact match against the static tables below, and they carry
//! the table's own `&'static str` rather than the caller's input. Command
//! builders accept only these types, so caller-supplied text never reaches an
//! argv.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Units that may be controlled through the gateway.
pub const ALLOWED_SERVICES: &[&str] = &[
    "apache2",
    "nginx",
    "haproxy",
    "vsftpd",
    "ssh",
    "sshd",
    "isc-dhcp-server",
    "inetd",
    "mysql",
    "postgresql",
    "redis-server",
    "mongod",
];

/// Packages that may be installed through the gateway. Independent of
/// [`ALLOWED_SERVICES`].
pub const ALLOWED_PACKAGES: &[&str] = &[
    "mysql-server",
    "postgresql",
    "redis-server",
    "mongodb-org",
    "docker.io",
    "nodejs",
    "python3-pip",
];

/// Services reported by the status listing, with their dashboard labels.
pub const MONITORED_SERVICES: &[(&str, &str)] = &[
    ("apache2", "Apache2"),
    ("nginx", "Nginx"),
    ("haproxy", "HaProxy"),
    ("vsftpd", "FTP Server"),
    ("ssh", "SSH Server"),
    ("isc-dhcp-server", "DHCP Server"),
];

/// Journal unit used by the logs action when none is requested.
pub const DEFAULT_LOG_UNIT: &str = "syslog";

fn lookup(table: &'static [&'static str], candidate: &str) -> Option<&'static str> {
    table.iter().copied().find(|entry| *entry == candidate)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceName(&'static str);

impl ServiceName {
    pub fn parse(candidate: &str) -> Option<Self> {
        lookup(ALLOWED_SERVICES, candidate).map(Self)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for ServiceName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackageName(&'static str);

impl PackageName {
    pub fn parse(candidate: &str) -> Option<Self> {
        lookup(ALLOWED_PACKAGES, candidate).map(Self)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Lifecycle actions accepted by `systemctl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceAction {
    Start,
    Stop,
    Restart,
    Status,
    Enable,
    Disable,
}

impl ServiceAction {
    pub const ALL: [ServiceAction; 6] = [
        ServiceAction::Start,
        ServiceAction::Stop,
        ServiceAction::Restart,
        ServiceAction::Status,
        ServiceAction::Enable,
        ServiceAction::Disable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceAction::Start => "start",
            ServiceAction::Stop => "stop",
            ServiceAction::Restart => "restart",
            ServiceAction::Status => "status",
            ServiceAction::Enable => "enable",
            ServiceAction::Disable => "disable",
        }
    }
}

impl FromStr for ServiceAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceAction::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for ServiceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A journal unit the logs action may read: an allow-listed service or syslog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogUnit {
    Service(ServiceName),
    Syslog,
}

impl LogUnit {
    pub fn parse(candidate: &str) -> Option<Self> {
        if candidate == DEFAULT_LOG_UNIT {
            return Some(LogUnit::Syslog);
        }
        ServiceName::parse(candidate).map(LogUnit::Service)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogUnit::Service(name) => name.as_str(),
            LogUnit::Syslog => DEFAULT_LOG_UNIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_name_requires_exact_match() {
        assert_eq!(ServiceName::parse("nginx").map(|s| s.as_str()), Some("nginx"));
        assert!(ServiceName::parse("Nginx").is_none());
        assert!(ServiceName::parse(" nginx").is_none());
        assert!(ServiceName::parse("nginx; rm -rf /").is_none());
        assert!(ServiceName::parse("").is_none());
    }

    #[test]
    fn test_package_list_is_independent_of_services() {
        assert!(PackageName::parse("mysql-server").is_some());
        assert!(ServiceName::parse("mysql-server").is_none());
        assert!(PackageName::parse("nginx").is_none());
        assert!(PackageName::parse("rm -rf /").is_none());
    }

    #[test]
    fn test_action_parsing() {
        for action in ServiceAction::ALL {
            assert_eq!(action.as_str().parse::<ServiceAction>(), Ok(action));
        }
        assert!("reload".parse::<ServiceAction>().is_err());
        assert!("START".parse::<ServiceAction>().is_err());
        assert_eq!(
            serde_json::to_string(&ServiceAction::Restart).unwrap(),
            "\"restart\""
        );
    }

    #[test]
    fn test_monitored_services_are_allow_listed() {
        for (service, _) in MONITORED_SERVICES {
            assert!(ServiceName::parse(service).is_some(), "{service} not allow-listed");
        }
    }

    #[test]
    fn test_log_unit() {
        assert_eq!(LogUnit::parse("syslog"), Some(LogUnit::Syslog));
        assert_eq!(LogUnit::parse("ssh").map(|u| u.as_str()), Some("ssh"));
        assert!(LogUnit::parse("ssh -n 1; id").is_none());
    }
}
