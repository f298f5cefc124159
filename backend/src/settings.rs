//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `PROBLEM_SERVICE_*` environment variables, command-line
//! flags and configuration files, in the usual OrthoConfig precedence.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::DEFAULT_WORK_DELAY;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Settings that cannot be turned into a running server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// The bind host is not an IP address.
    #[error("bind host '{host}' is not an IP address")]
    InvalidHost { host: String },
    /// The public URL lacks an `http` or `https` scheme.
    #[error("public URL '{url}' must start with http:// or https://")]
    InvalidPublicUrl { url: String },
}

/// Configuration values controlling the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PROBLEM_SERVICE")]
pub struct ServerSettings {
    /// IP address to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// Simulated work delay of the thing query, in milliseconds.
    pub work_delay_ms: Option<u64>,
    /// Externally visible base URL advertised in the OpenAPI server entry.
    pub public_url: Option<String>,
    /// Serve the OpenAPI document and Swagger UI in release builds.
    #[ortho_config(default = false)]
    pub expose_docs: bool,
}

impl ServerSettings {
    /// Return the configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured port, falling back to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Socket address the server binds to.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidHost`] when the host does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host();
        let ip: IpAddr = host.parse().map_err(|_| SettingsError::InvalidHost {
            host: host.to_owned(),
        })?;
        Ok(SocketAddr::new(ip, self.port()))
    }

    /// Simulated work delay applied before each thing query resolves.
    pub fn work_delay(&self) -> Duration {
        self.work_delay_ms
            .map_or(DEFAULT_WORK_DELAY, Duration::from_millis)
    }

    /// Validated public URL, if configured.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidPublicUrl`] for URLs without an
    /// `http` or `https` scheme.
    pub fn public_url(&self) -> Result<Option<&str>, SettingsError> {
        let Some(url) = self.public_url.as_deref().map(str::trim) else {
            return Ok(None);
        };
        if url.is_empty() {
            return Ok(None);
        }
        if url.starts_with("http://") || url.starts_with("https://") {
            Ok(Some(url))
        } else {
            Err(SettingsError::InvalidPublicUrl {
                url: url.to_owned(),
            })
        }
    }

    /// Whether `/openapi/v1.json` and `/docs` are served.
    pub fn docs_enabled(&self) -> bool {
        self.expose_docs || cfg!(debug_assertions)
    }

    /// Check every derived value up front so startup fails early.
    ///
    /// # Errors
    /// Returns the first [`SettingsError`] found.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.bind_addr()?;
        self.public_url()?;
        Ok(())
    }
}
