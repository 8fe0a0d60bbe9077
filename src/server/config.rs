use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

const ENV_PREFIX: &str = "SERVICEDECK_";

#[derive(Deserialize, Debug, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_listen_address")]
    pub listen_address: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    /// Prefix privileged commands (systemctl actions, apt, journalctl) with `sudo`.
    #[serde(default = "default_use_sudo")]
    pub use_sudo: bool,

    /// Reported as `ip` by the info action instead of the detected address.
    #[serde(default)]
    pub advertised_ip: Option<String>,

    /// Upper bound for a single command. Unset means commands may run forever.
    #[serde(default)]
    pub command_timeout_secs: Option<u64>,

    #[serde(default = "default_start_settle_ms")]
    pub start_settle_ms: u64,

    #[serde(default = "default_stop_settle_ms")]
    pub stop_settle_ms: u64,

    #[serde(default = "default_max_log_lines")]
    pub max_log_lines: u32,
}

// Partial config for layering
#[derive(Deserialize, Default, Debug)]
struct PartialServerConfig {
    listen_address: Option<String>,
    log_dir: Option<String>,
    use_sudo: Option<bool>,
    advertised_ip: Option<String>,
    command_timeout_secs: Option<u64>,
    start_settle_ms: Option<u64>,
    stop_settle_ms: Option<u64>,
    max_log_lines: Option<u32>,
}

fn default_listen_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_use_sudo() -> bool {
    true
}

fn default_start_settle_ms() -> u64 {
    2000
}

fn default_stop_settle_ms() -> u64 {
    1000
}

fn default_max_log_lines() -> u32 {
    1000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            log_dir: default_log_dir(),
            use_sudo: default_use_sudo(),
            advertised_ip: None,
            command_timeout_secs: None,
            start_settle_ms: default_start_settle_ms(),
            stop_settle_ms: default_stop_settle_ms(),
            max_log_lines: default_max_log_lines(),
        }
    }
}

impl ServerConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self, String> {
        dotenv::dotenv().ok();

        // 1. Load from file (optional)
        let file_config: PartialServerConfig = if let Some(path_str) = config_path {
            let path = Path::new(path_str);
            if path.exists() {
                let contents = fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read config file at {path:?}: {e}"))?;
                toml::from_str(&contents)
                    .map_err(|e| format!("Failed to parse TOML from config file at {path:?}: {e}"))?
            } else {
                PartialServerConfig::default()
            }
        } else {
            PartialServerConfig::default()
        };

        // 2. Load from environment variables
        let env_config: PartialServerConfig = envy::prefixed(ENV_PREFIX)
            .from_env::<PartialServerConfig>()
            .map_err(|e| format!("Failed to load config from environment: {e}"))?;

        Ok(Self::merge(env_config, file_config))
    }

    /// Environment values win over file values; anything missing falls back to the defaults.
    fn merge(env_config: PartialServerConfig, file_config: PartialServerConfig) -> Self {
        ServerConfig {
            listen_address: env_config
                .listen_address
                .or(file_config.listen_address)
                .unwrap_or_else(default_listen_address),
            log_dir: env_config
                .log_dir
                .or(file_config.log_dir)
                .unwrap_or_else(default_log_dir),
            use_sudo: env_config
                .use_sudo
                .or(file_config.use_sudo)
                .unwrap_or_else(default_use_sudo),
            advertised_ip: env_config.advertised_ip.or(file_config.advertised_ip),
            command_timeout_secs: env_config
                .command_timeout_secs
                .or(file_config.command_timeout_secs),
            start_settle_ms: env_config
                .start_settle_ms
                .or(file_config.start_settle_ms)
                .unwrap_or_else(default_start_settle_ms),
            stop_settle_ms: env_config
                .stop_settle_ms
                .or(file_config.stop_settle_ms)
                .unwrap_or_else(default_stop_settle_ms),
            max_log_lines: env_config
                .max_log_lines
                .or(file_config.max_log_lines)
                .unwrap_or_else(default_max_log_lines),
        }
    }

    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn start_settle(&self) -> Duration {
        Duration::from_millis(self.start_settle_ms)
    }

    pub fn stop_settle(&self) -> Duration {
        Duration::from_millis(self.stop_settle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_overrides_file() {
        let file: PartialServerConfig = toml::from_str(
            r#"
            listen_address = "127.0.0.1:9000"
            use_sudo = false
            max_log_lines = 200
            "#,
        )
        .unwrap();
        let env = PartialServerConfig {
            listen_address: Some("0.0.0.0:7000".to_string()),
            ..Default::default()
        };

        let config = ServerConfig::merge(env, file);

        assert_eq!(config.listen_address, "0.0.0.0:7000");
        assert!(!config.use_sudo);
        assert_eq!(config.max_log_lines, 200);
        assert_eq!(config.start_settle_ms, 2000);
        assert_eq!(config.stop_settle_ms, 1000);
    }

    #[test]
    fn test_zero_timeout_means_unbounded() {
        let config = ServerConfig {
            command_timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(config.command_timeout().is_none());

        let config = ServerConfig {
            command_timeout_secs: Some(30),
            ..Default::default()
        };
        assert_eq!(config.command_timeout(), Some(Duration::from_secs(30)));
    }
}
