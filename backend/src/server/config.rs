//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use movies_service::config::{MoviesSettings, SettingsError};
use movies_service::domain::RetryPolicy;
use url::Url;

/// Validated configuration for creating the HTTP server and its adapters.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) info_url: Url,
    pub(crate) reviews_url: Url,
    pub(crate) request_timeout: Duration,
    pub(crate) retry: RetryPolicy,
}

impl ServerConfig {
    /// Resolve loaded settings into a server configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when a URL or the bind address is invalid.
    pub fn from_settings(settings: &MoviesSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            info_url: settings.info_url()?,
            reviews_url: settings.reviews_url()?,
            request_timeout: settings.request_timeout(),
            retry: settings.retry_policy(),
        })
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
