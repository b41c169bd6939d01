//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `MOVIES_*` environment variables, and an
//! optional configuration file. Every field is optional; accessors apply the
//! defaults and validate the values adapters need.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::domain::RetryPolicy;

const DEFAULT_INFO_URL: &str = "http://localhost:8080/v1/movieinfos";
const DEFAULT_REVIEWS_URL: &str = "http://localhost:8081/v1/reviews";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8082";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_RETRY_MAX_RETRIES: u32 = 3;
const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 300;

/// Invalid configuration value.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A base URL setting does not parse as an absolute URL.
    #[error("{key} is not a valid URL: {value}")]
    Url {
        /// Setting name.
        key: &'static str,
        /// Rejected value.
        value: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// The bind address is not `host:port`.
    #[error("bind address is not a valid socket address: {value}")]
    BindAddr {
        /// Rejected value.
        value: String,
        /// Parser failure.
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Settings for the movies aggregation service.
///
/// An empty source set yields the all-`None` value, so the service starts on
/// the accessor defaults alone.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(prefix = "MOVIES")]
pub struct MoviesSettings {
    /// Base URL of the movie-info service; the movie id is appended.
    pub info_url: Option<String>,
    /// Base URL of the review service; the movie id is appended.
    pub reviews_url: Option<String>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Per-request timeout for upstream calls, in milliseconds.
    pub request_timeout_ms: Option<u64>,
    /// Retries after the first attempt for server-side upstream failures.
    pub retry_max_retries: Option<u32>,
    /// Delay before the first retry, in milliseconds; doubles per retry.
    pub retry_base_delay_ms: Option<u64>,
}

impl MoviesSettings {
    /// Movie-info base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Url`] when the configured value does not parse.
    pub fn info_url(&self) -> Result<Url, SettingsError> {
        parse_url("info_url", self.info_url.as_deref().unwrap_or(DEFAULT_INFO_URL))
    }

    /// Review service base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Url`] when the configured value does not parse.
    pub fn reviews_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "reviews_url",
            self.reviews_url.as_deref().unwrap_or(DEFAULT_REVIEWS_URL),
        )
    }

    /// Address for the HTTP listener.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value is not `host:port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Per-request timeout applied by both upstream adapters.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS))
    }

    /// Retry policy shared by both upstream adapters.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_max_retries.unwrap_or(DEFAULT_RETRY_MAX_RETRIES),
            Duration::from_millis(
                self.retry_base_delay_ms
                    .unwrap_or(DEFAULT_RETRY_BASE_DELAY_MS),
            ),
        )
    }
}

fn parse_url(key: &'static str, value: &str) -> Result<Url, SettingsError> {
    Url::parse(value).map_err(|source| SettingsError::Url {
        key,
        value: value.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings loading and defaults.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const KEYS: [&str; 6] = [
        "MOVIES_INFO_URL",
        "MOVIES_REVIEWS_URL",
        "MOVIES_BIND_ADDR",
        "MOVIES_REQUEST_TIMEOUT_MS",
        "MOVIES_RETRY_MAX_RETRIES",
        "MOVIES_RETRY_BASE_DELAY_MS",
    ];

    fn load_from_empty_args() -> MoviesSettings {
        MoviesSettings::load_from_iter([OsString::from("movies-service")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(KEYS.map(|key| (key, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.info_url().expect("default url").as_str(),
            DEFAULT_INFO_URL
        );
        assert_eq!(
            settings.reviews_url().expect("default url").as_str(),
            DEFAULT_REVIEWS_URL
        );
        assert_eq!(
            settings.bind_addr().expect("default addr"),
            "0.0.0.0:8082".parse::<SocketAddr>().expect("literal addr")
        );
        assert_eq!(settings.request_timeout(), Duration::from_secs(5));
        let policy = settings.retry_policy();
        assert_eq!(policy.max_attempts(), 4);
        assert_eq!(policy.base_delay(), Duration::from_millis(300));
    }

    #[rstest]
    fn partial_environment_keeps_remaining_defaults() {
        let _guard = lock_env(KEYS.map(|key| {
            let value = (key == "MOVIES_RETRY_MAX_RETRIES").then(|| "5".to_owned());
            (key, value)
        }));

        let settings = load_from_empty_args();
        assert_eq!(settings.retry_policy().max_attempts(), 6);
        assert_eq!(settings.retry_policy().base_delay(), Duration::from_millis(300));
        assert!(settings.info_url.is_none());
        assert_eq!(
            settings.reviews_url().expect("default url").as_str(),
            DEFAULT_REVIEWS_URL
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("MOVIES_INFO_URL", Some("http://catalog:9000/v1/movieinfos".to_owned())),
            ("MOVIES_REVIEWS_URL", Some("http://reviews:9001/v1/reviews".to_owned())),
            ("MOVIES_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            ("MOVIES_REQUEST_TIMEOUT_MS", Some("250".to_owned())),
            ("MOVIES_RETRY_MAX_RETRIES", Some("1".to_owned())),
            ("MOVIES_RETRY_BASE_DELAY_MS", Some("10".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.info_url().expect("info url").host_str(),
            Some("catalog")
        );
        assert_eq!(
            settings.reviews_url().expect("reviews url").port(),
            Some(9001)
        );
        assert_eq!(
            settings.bind_addr().expect("bind addr").port(),
            9090
        );
        assert_eq!(settings.request_timeout(), Duration::from_millis(250));
        assert_eq!(settings.retry_policy().max_attempts(), 2);
        assert_eq!(
            settings.retry_policy().base_delay(),
            Duration::from_millis(10)
        );
    }

    #[rstest]
    #[case::relative_url(MoviesSettings {
        info_url: Some("/v1/movieinfos".to_owned()),
        ..MoviesSettings::default()
    })]
    #[case::garbage_url(MoviesSettings {
        info_url: Some("http://[::1".to_owned()),
        ..MoviesSettings::default()
    })]
    fn invalid_urls_are_rejected(#[case] settings: MoviesSettings) {
        let error = settings.info_url().expect_err("url should be rejected");
        assert!(matches!(error, SettingsError::Url { key: "info_url", .. }));
    }

    #[rstest]
    fn invalid_bind_addr_is_rejected() {
        let settings = MoviesSettings {
            bind_addr: Some("localhost".to_owned()),
            ..MoviesSettings::default()
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
    }
}
