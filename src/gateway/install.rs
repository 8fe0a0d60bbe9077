use tracing::{info, warn};

use crate::gateway::models::InstallResult;
use crate::gateway::Gateway;
use crate::system::allowlist::PackageName;

impl Gateway {
    /// Refreshes the package index and installs `package` if it is allow-listed.
    /// The install is reported as initiated regardless of apt's exit status.
    pub async fn install_package(&self, requested: &str) -> InstallResult {
        let Some(package) = PackageName::parse(requested) else {
            warn!(package = %requested, "Rejected install request.");
            return InstallResult {
                success: false,
                message: "Package not allowed for installation".to_string(),
                output: None,
            };
        };

        info!(package = %package, "Installing package.");
        let output = self.tools.install(package).await;

        InstallResult {
            success: true,
            message: format!("Package {package} installation initiated"),
            output: Some(output),
        }
    }
}
