use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub admin: AdminConfig,
    /// Absent notify credentials degrade notification to a logged no-op.
    #[serde(default)]
    pub notify: Option<NotifyConfig>,
}

impl ApiConfig {
    pub fn load() -> Result<Self> {
        let configured_path = std::env::var("HOMECHECK_API_CONFIG")
            .unwrap_or_else(|_| "config/api.toml".to_string());
        assert!(
            !configured_path.is_empty(),
            "Configuration path must be non-empty"
        );
        assert!(
            configured_path.len() < 4096,
            "Configuration path length exceeds hard limit"
        );

        let mut builder = Config::builder()
            .add_source(File::new(&configured_path, FileFormat::Toml).required(true));

        if let Ok(env_override) = std::env::var("HOMECHECK_API_ENV") {
            if !env_override.is_empty() {
                let env_file = format!("config/api.{}.toml", env_override);
                if Path::new(&env_file).exists() {
                    builder = builder.add_source(File::new(&env_file, FileFormat::Toml));
                }
            }
        }

        // HOMECHECK__DATABASE__URL and friends win over anything in the files.
        builder = builder.add_source(Environment::with_prefix("HOMECHECK").separator("__"));

        let settings = builder
            .build()
            .map_err(|err| map_config_error(err, &configured_path))?;
        let config: Self = settings
            .try_deserialize()
            .context("Failed to deserialize API configuration")?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        assert!(
            !self.database.url.is_empty(),
            "Database URL must be specified"
        );
        assert!(
            self.server.port > 0,
            "Server port must be greater than zero"
        );
        assert!(
            !self.session.secret.is_empty(),
            "Session signing secret must be specified"
        );
        assert!(
            !self.admin.password.is_empty(),
            "Admin password must be specified"
        );
        if let Some(notify) = &self.notify {
            notify.ensure_bounds()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: Option<IpAddr>,
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> SocketAddr {
        let host = self.host.unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert!(self.port != 0, "HTTP port cannot be zero");
        assert!(self.port < 65535, "HTTP port must be below 65535");
        SocketAddr::new(host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Secret used to sign the admin session cookie.
    pub secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Single shared admin password; there are no per-user accounts.
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotifyConfig {
    /// Transactional email provider endpoint accepting {from,to,subject,text}.
    pub api_url: String,
    pub api_key: String,
    pub sender: String,
    pub recipient: String,
    pub request_timeout_ms: Option<u64>,
}

impl NotifyConfig {
    pub fn ensure_bounds(&self) -> Result<()> {
        assert!(!self.api_url.is_empty(), "Notify API URL must be specified");
        assert!(!self.api_key.is_empty(), "Notify API key must be specified");
        assert!(
            !self.sender.is_empty(),
            "Notify sender address must be specified"
        );
        assert!(
            !self.recipient.is_empty(),
            "Notify recipient address must be specified"
        );
        let millis = self.request_timeout_millis();
        assert!(millis >= 100, "Notify timeout must be at least 100ms");
        assert!(millis <= 60_000, "Notify timeout cannot exceed 60 seconds");
        Ok(())
    }

    pub fn request_timeout_millis(&self) -> u64 {
        self.request_timeout_ms.unwrap_or(10_000)
    }
}

fn map_config_error(err: ConfigError, path: &str) -> ConfigError {
    match err {
        ConfigError::NotFound(_) => ConfigError::NotFound(path.to_string()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_address_defaults_to_localhost() {
        let server = ServerConfig {
            host: None,
            port: 8080,
        };
        assert_eq!(server.address().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn notify_timeout_defaults_within_bounds() {
        let notify = NotifyConfig {
            api_url: "https://mail.example/v1/send".to_string(),
            api_key: "key".to_string(),
            sender: "forms@example.com".to_string(),
            recipient: "office@example.com".to_string(),
            request_timeout_ms: None,
        };
        assert_eq!(notify.request_timeout_millis(), 10_000);
        notify.ensure_bounds().unwrap();
    }
}
