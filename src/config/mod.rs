pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

pub const DEFAULT_IP_ENDPOINT: &str = "https://api.ipify.org/?format=json";
pub const DEFAULT_GEOLOCATION_ENDPOINT: &str = "https://ipvigilante.com/";
pub const DEFAULT_FLYOVER_ENDPOINT: &str = "http://api.open-notify.org/iss-pass.json";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Fully resolved settings: defaults, then the TOML file, then CLI flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub ip_endpoint: String,
    pub geolocation_endpoint: String,
    pub flyover_endpoint: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ip_endpoint: DEFAULT_IP_ENDPOINT.to_string(),
            geolocation_endpoint: DEFAULT_GEOLOCATION_ENDPOINT.to_string(),
            flyover_endpoint: DEFAULT_FLYOVER_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            log_format: LogFormat::default(),
        }
    }
}

impl Settings {
    pub fn apply_toml(&mut self, file: &TomlConfig) {
        if let Some(endpoints) = &file.endpoints {
            if let Some(ip) = &endpoints.ip {
                self.ip_endpoint = ip.clone();
            }
            if let Some(geolocation) = &endpoints.geolocation {
                self.geolocation_endpoint = geolocation.clone();
            }
            if let Some(flyover) = &endpoints.flyover {
                self.flyover_endpoint = flyover.clone();
            }
        }
        if let Some(http) = &file.http {
            if let Some(timeout) = http.timeout_seconds {
                self.timeout_seconds = timeout;
            }
            if let Some(user_agent) = &http.user_agent {
                self.user_agent = user_agent.clone();
            }
        }
        if let Some(format) = file.logging.as_ref().and_then(|l| l.format) {
            self.log_format = format;
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("endpoints.ip", &self.ip_endpoint)?;
        validate_url("endpoints.geolocation", &self.geolocation_endpoint)?;
        validate_url("endpoints.flyover", &self.flyover_endpoint)?;
        validate_positive_number("http.timeout_seconds", self.timeout_seconds, 1)?;
        validate_non_empty_string("http.user_agent", &self.user_agent)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn ip_endpoint(&self) -> &str {
        &self.ip_endpoint
    }

    fn geolocation_endpoint(&self) -> &str {
        &self.geolocation_endpoint
    }

    fn flyover_endpoint(&self) -> &str {
        &self.flyover_endpoint
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "iss-flyover")]
#[command(about = "Print the next ISS passes over your current location")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Public IP lookup endpoint")]
    pub ip_endpoint: Option<String>,

    #[arg(long, help = "Geolocation endpoint; the IP is appended as a path segment")]
    pub geo_endpoint: Option<String>,

    #[arg(long, help = "Flyover prediction endpoint; lat/lon are added as query parameters")]
    pub flyover_endpoint: Option<String>,

    #[arg(long, help = "Per-request timeout in seconds")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Print the full report as JSON")]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Resolves defaults, the optional config file and these flags into settings.
    pub fn load_settings(&self) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(path) = &self.config {
            let file = TomlConfig::from_file(path)?;
            settings.apply_toml(&file);
        }

        self.apply_to(&mut settings);
        settings.validate()?;
        Ok(settings)
    }

    fn apply_to(&self, settings: &mut Settings) {
        if let Some(ip) = &self.ip_endpoint {
            settings.ip_endpoint = ip.clone();
        }
        if let Some(geo) = &self.geo_endpoint {
            settings.geolocation_endpoint = geo.clone();
        }
        if let Some(flyover) = &self.flyover_endpoint {
            settings.flyover_endpoint = flyover.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            settings.timeout_seconds = timeout;
        }
        if let Some(format) = self.log_format {
            settings.log_format = format;
        }
    }
}
