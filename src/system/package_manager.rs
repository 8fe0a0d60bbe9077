use std::sync::Arc;
use tracing::info;

use crate::system::allowlist::{LogUnit, PackageName};
use crate::system::executor::{output_text, privileged, CommandExecutor};

/// `apt` and `journalctl` access, both run with the configured privilege.
#[derive(Clone)]
pub struct HostTools {
    executor: Arc<dyn CommandExecutor>,
    use_sudo: bool,
}

impl HostTools {
    pub fn new(executor: Arc<dyn CommandExecutor>, use_sudo: bool) -> Self {
        Self { executor, use_sudo }
    }

    /// Refreshes the package index, then installs `package`. The refresh
    /// output is discarded; only the install output is returned.
    pub async fn install(&self, package: PackageName) -> String {
        let refresh = privileged(self.use_sudo, &["apt", "update"]);
        let refresh_output = output_text(self.executor.run(&refresh).await);
        info!(package = %package, bytes = refresh_output.len(), "Package index refreshed.");

        let install = privileged(
            self.use_sudo,
            &["apt", "install", "-y", package.as_str()],
        );
        output_text(self.executor.run(&install).await)
    }

    /// Last `lines` journal entries of `unit`.
    pub async fn journal(&self, unit: LogUnit, lines: u32) -> String {
        let lines = lines.to_string();
        let argv = privileged(
            self.use_sudo,
            &["journalctl", "-u", unit.as_str(), "-n", lines.as_str(), "--no-pager"],
        );
        output_text(self.executor.run(&argv).await)
    }
}
