//! Configuration command handlers. These run without a Portal.

use campus_config::{Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;

use super::util;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            println!("{}", campus_config::config_path().display());
            Ok(())
        }

        ConfigCommand::Show => {
            let config = campus_config::load_config_or_default();
            let rendered = toml_string(&config)?;
            print!("{rendered}");
            Ok(())
        }

        ConfigCommand::Init { server, profile } => {
            // Reject bad URLs before writing them to disk.
            let _: url::Url = server.parse().map_err(|e| CliError::Validation {
                field: "server".into(),
                reason: format!("invalid URL '{server}': {e}"),
            })?;

            let mut config = campus_config::load_config_or_default();
            config.profiles.insert(
                profile.clone(),
                Profile {
                    server,
                    timeout: None,
                },
            );
            if config.default_profile.is_none() {
                config.default_profile = Some(profile.clone());
            }
            campus_config::save_config(&config)?;
            util::notify(
                &format!(
                    "Profile '{profile}' saved to {}",
                    campus_config::config_path().display()
                ),
                global.quiet,
            );
            Ok(())
        }

        ConfigCommand::Use { profile } => {
            let mut config = campus_config::load_config_or_default();
            if !config.profiles.contains_key(&profile) {
                return Err(CliError::NotFound {
                    resource_type: "profile".into(),
                    identifier: profile,
                    list_command: "config show".into(),
                });
            }
            config.default_profile = Some(profile.clone());
            campus_config::save_config(&config)?;
            util::notify(&format!("Default profile set to '{profile}'"), global.quiet);
            Ok(())
        }
    }
}

fn toml_string(config: &Config) -> Result<String, CliError> {
    toml::to_string_pretty(config).map_err(|e| CliError::Operation(e.to_string()))
}
