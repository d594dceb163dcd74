//! Configuration loading and management.

use std::path::PathBuf;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Default tracing filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// `tracing` filter directives, e.g. `clubday_core=debug`.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file and `CLUBDAY_*`
    /// environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from environment variables (CLUBDAY_*)
        figment.merge(Env::prefixed("CLUBDAY_"))
    }
}

/// Returns the platform-specific config directory for clubday.
///
/// On Linux: `~/.config/clubday`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("clubday"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_filter_is_warn() {
        assert_eq!(Config::default().log_filter, "warn");
    }

    #[test]
    fn test_dirs_config_path_ends_with_clubday() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "clubday");
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::string(r#"log_filter = "clubday_core=debug""#))
            .extract()
            .unwrap();
        assert_eq!(config.log_filter, "clubday_core=debug");
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::string("colour = true"))
            .extract()
            .unwrap();
        assert_eq!(config, Config::default());
    }
}
