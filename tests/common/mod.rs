#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use servicedeck::gateway::Gateway;
use servicedeck::server::config::ServerConfig;
use servicedeck::system::executor::{CommandExecutor, CommandOutput, ExecError};
use servicedeck::system::info::HostFacts;
use servicedeck::system::metrics::RawReadings;
use servicedeck::system::probe::HostProbe;

/// Simulates systemctl, apt and journalctl, and records every argv it sees.
#[derive(Default)]
pub struct FakeHost {
    calls: Mutex<Vec<Vec<String>>>,
    active: Mutex<HashSet<String>>,
    enabled: Mutex<HashSet<String>>,
    /// Units whose state never changes, whatever is asked of them.
    stuck: Mutex<HashSet<String>>,
    /// Units whose state queries fail to spawn.
    broken: Mutex<HashSet<String>>,
}

impl FakeHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_active(&self, unit: &str) {
        self.active.lock().unwrap().insert(unit.to_string());
    }

    pub fn set_enabled(&self, unit: &str) {
        self.enabled.lock().unwrap().insert(unit.to_string());
    }

    pub fn set_stuck(&self, unit: &str) {
        self.stuck.lock().unwrap().insert(unit.to_string());
    }

    pub fn set_broken(&self, unit: &str) {
        self.broken.lock().unwrap().insert(unit.to_string());
    }

    pub fn is_active(&self, unit: &str) -> bool {
        self.active.lock().unwrap().contains(unit)
    }

    pub fn is_enabled(&self, unit: &str) -> bool {
        self.enabled.lock().unwrap().contains(unit)
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that are not read-only state queries.
    pub fn mutating_calls(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|argv| !(argv.len() == 3 && argv[0] == "systemctl" && argv[1].starts_with("is-")))
            .collect()
    }

    fn transition(&self, verb: &str, unit: &str) -> CommandOutput {
        if self.stuck.lock().unwrap().contains(unit) {
            return CommandOutput::new(format!("Job for {unit}.service failed."), Some(1));
        }
        match verb {
            "start" | "restart" => {
                self.active.lock().unwrap().insert(unit.to_string());
            }
            "stop" => {
                self.active.lock().unwrap().remove(unit);
            }
            "enable" => {
                self.enabled.lock().unwrap().insert(unit.to_string());
            }
            "disable" => {
                self.enabled.lock().unwrap().remove(unit);
            }
            "status" => {
                let state = if self.is_active(unit) { "active (running)" } else { "inactive (dead)" };
                return CommandOutput::new(format!("● {unit}.service\n   Active: {state}"), Some(0));
            }
            _ => return CommandOutput::new(format!("Unknown command verb {verb}."), Some(1)),
        }
        CommandOutput::new("", Some(0))
    }
}

#[async_trait]
impl CommandExecutor for FakeHost {
    async fn run(&self, argv: &[&str]) -> Result<CommandOutput, ExecError> {
        self.calls
            .lock()
            .unwrap()
            .push(argv.iter().map(|s| s.to_string()).collect());

        let argv = match argv.split_first() {
            Some((&"sudo", rest)) => rest,
            _ => argv,
        };

        match argv {
            ["systemctl", query @ ("is-active" | "is-enabled"), unit] => {
                if self.broken.lock().unwrap().contains(*unit) {
                    return Err(ExecError::Spawn {
                        program: "systemctl".to_string(),
                        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                    });
                }
                let (on, text_on, text_off) = if *query == "is-active" {
                    (self.is_active(unit), "active", "inactive")
                } else {
                    (self.is_enabled(unit), "enabled", "disabled")
                };
                Ok(if on {
                    CommandOutput::new(text_on, Some(0))
                } else {
                    CommandOutput::new(text_off, Some(3))
                })
            }
            ["systemctl", verb, unit] => Ok(self.transition(verb, unit)),
            ["apt", "update"] => Ok(CommandOutput::new("Reading package lists... Done", Some(0))),
            ["apt", "install", "-y", package] => {
                Ok(CommandOutput::new(format!("Setting up {package} ..."), Some(0)))
            }
            ["journalctl", "-u", unit, "-n", lines, "--no-pager"] => Ok(CommandOutput::new(
                format!("-- {unit}: last {lines} entries --"),
                Some(0),
            )),
            _ => Ok(CommandOutput::new("command not found", Some(127))),
        }
    }
}

/// Fixed host readings.
#[derive(Default)]
pub struct FakeProbe {
    pub readings: RawReadings,
    pub facts: HostFacts,
}

#[async_trait]
impl HostProbe for FakeProbe {
    async fn readings(&self) -> RawReadings {
        self.readings.clone()
    }

    async fn facts(&self) -> HostFacts {
        self.facts.clone()
    }
}

/// Config with the production settle delays.
pub fn default_config() -> ServerConfig {
    ServerConfig::default()
}

/// Config without settle delays, for tests that do not care about timing.
pub fn instant_config() -> ServerConfig {
    ServerConfig {
        start_settle_ms: 0,
        stop_settle_ms: 0,
        ..ServerConfig::default()
    }
}

pub fn gateway_with(host: Arc<FakeHost>, probe: FakeProbe, config: &ServerConfig) -> Gateway {
    Gateway::new(host, Arc::new(probe), config)
}

pub fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}
