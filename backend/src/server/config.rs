//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use problem_service::domain::DEFAULT_WORK_DELAY;
use problem_service::settings::{ServerSettings, SettingsError};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) work_delay: Duration,
    pub(crate) docs: Option<DocsConfig>,
}

/// Where the OpenAPI document should claim the API lives.
pub(crate) struct DocsConfig {
    pub(crate) public_url: Option<String>,
}

impl ServerConfig {
    /// Construct a configuration binding `bind_addr` with the default work
    /// delay and docs disabled.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            work_delay: DEFAULT_WORK_DELAY,
            docs: None,
        }
    }

    /// Derive the configuration from loaded settings.
    ///
    /// # Errors
    /// Returns [`SettingsError`] when the bind address or public URL is
    /// invalid.
    pub fn from_settings(settings: &ServerSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let config = Self::new(settings.bind_addr()?).with_work_delay(settings.work_delay());
        if !settings.docs_enabled() {
            return Ok(config);
        }
        let public_url = settings.public_url()?.map(str::to_owned);
        Ok(config.with_docs(public_url))
    }

    /// Override the simulated work delay of the thing query.
    #[must_use]
    pub fn with_work_delay(mut self, work_delay: Duration) -> Self {
        self.work_delay = work_delay;
        self
    }

    /// Serve the OpenAPI document and Swagger UI.
    #[must_use]
    pub fn with_docs(mut self, public_url: Option<String>) -> Self {
        self.docs = Some(DocsConfig { public_url });
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Exercised by bootstrap tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
