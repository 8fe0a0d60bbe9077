use tracing::{info, warn};

use crate::gateway::models::LogsResponse;
use crate::gateway::{Gateway, DEFAULT_LOG_LINES};
use crate::system::allowlist::{LogUnit, DEFAULT_LOG_UNIT};

impl Gateway {
    /// Tail of a unit's journal. The unit must be allow-listed (or `syslog`)
    /// and `lines` must be a whole number between 1 and the configured maximum.
    pub async fn logs(&self, service: Option<&str>, lines: Option<&str>) -> LogsResponse {
        let service = service.unwrap_or(DEFAULT_LOG_UNIT);
        let unit = LogUnit::parse(service);
        let count = match lines {
            None => Some(DEFAULT_LOG_LINES),
            Some(raw) => parse_line_count(raw, self.max_log_lines),
        };

        let (Some(unit), Some(count)) = (unit, count) else {
            warn!(service = %service, lines = ?lines, "Rejected logs request.");
            return LogsResponse {
                logs: String::new(),
                error: Some("Invalid service or line count".to_string()),
            };
        };

        info!(unit = unit.as_str(), lines = count, "Reading journal.");
        LogsResponse {
            logs: self.tools.journal(unit, count).await,
            error: None,
        }
    }
}

fn parse_line_count(raw: &str, max: u32) -> Option<u32> {
    raw.parse::<u32>()
        .ok()
        .filter(|count| (1..=max).contains(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_count() {
        assert_eq!(parse_line_count("50", 1000), Some(50));
        assert_eq!(parse_line_count("1000", 1000), Some(1000));
        assert_eq!(parse_line_count("1001", 1000), None);
        assert_eq!(parse_line_count("0", 1000), None);
        assert_eq!(parse_line_count("-5", 1000), None);
        assert_eq!(parse_line_count("10; reboot", 1000), None);
        assert_eq!(parse_line_count("", 1000), None);
    }
}
