//! Resolution of the effective `PortalConfig` from the config file,
//! the active profile, and CLI flag overrides.

use std::time::Duration;

use campus_core::PortalConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Build a `PortalConfig` from `--server`, or else the active profile.
pub fn build_portal_config(global: &GlobalOpts) -> Result<PortalConfig, CliError> {
    let mut portal_config = if let Some(ref server) = global.server {
        PortalConfig::from_url_str(server)?
    } else {
        let config = campus_config::load_config_or_default();
        let profile = campus_config::active_profile_name(&config, global.profile.as_deref());

        if !config.profiles.contains_key(&profile) {
            return Err(CliError::NoConfig {
                path: campus_config::config_path().display().to_string(),
            });
        }
        campus_config::resolve_portal_config(&config, &profile)?
    };

    if let Some(timeout) = global.timeout {
        portal_config = portal_config.with_timeout(Duration::from_secs(timeout));
    }
    Ok(portal_config)
}
