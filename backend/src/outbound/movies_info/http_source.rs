//! Reqwest-backed movie-info source adapter.
//!
//! This adapter owns transport details only: endpoint construction, HTTP
//! status classification, and JSON decoding into the domain record. Retries
//! are delegated to the shared [`RetryPolicy`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{info, warn};

use super::dto::MovieInfoDto;
use crate::domain::ports::{MovieInfoSource, UpstreamError};
use crate::domain::{MovieInfo, RetryPolicy, RetryRuntime};
use crate::outbound::upstream_http::{
    HttpSourceBuildError, body_text, build_client, endpoint_for, get, validate_base_url,
};

/// Prefix identifying the movie-info service in server-error messages.
pub const MOVIES_INFO_SERVER_MARKER: &str = "Error connecting to MoviesInfoService: ";

/// Movie-info adapter issuing `GET {base_url}/{id}`.
pub struct MoviesInfoHttpSource {
    client: Client,
    base_url: Url,
    retry: RetryPolicy,
    runtime: RetryRuntime,
}

impl MoviesInfoHttpSource {
    /// Build an adapter with the production retry runtime.
    /// ```rust,ignore
    /// let source = MoviesInfoHttpSource::new(base_url, timeout, RetryPolicy::default())?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the base URL cannot take path segments or the
    /// reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, HttpSourceBuildError> {
        Self::with_runtime(base_url, timeout, retry, RetryRuntime::default())
    }

    /// Build an adapter with injected retry runtime helpers.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn with_runtime(
        base_url: Url,
        timeout: Duration,
        retry: RetryPolicy,
        runtime: RetryRuntime,
    ) -> Result<Self, HttpSourceBuildError> {
        validate_base_url(&base_url)?;
        Ok(Self {
            client: build_client(timeout)?,
            base_url,
            retry,
            runtime,
        })
    }

    async fn fetch_once(
        &self,
        url: &Url,
        movie_id: &str,
        attempt: u32,
    ) -> Result<MovieInfo, UpstreamError> {
        let (status, body) = get(&self.client, url).await?;
        info!(movie_id, attempt, status = status.as_u16(), "movie info service responded");

        if status.is_success() {
            return parse_movie_info(&body, movie_id);
        }
        let error = map_status_error(status, &body, movie_id);
        warn!(movie_id, attempt, %error, "movie info lookup rejected");
        Err(error)
    }
}

#[async_trait]
impl MovieInfoSource for MoviesInfoHttpSource {
    async fn fetch_movie_info(&self, movie_id: &str) -> Result<MovieInfo, UpstreamError> {
        let url = endpoint_for(&self.base_url, movie_id)?;
        let url = &url;
        self.retry
            .execute(&self.runtime, move |attempt| {
                self.fetch_once(url, movie_id, attempt)
            })
            .await
    }
}

fn parse_movie_info(body: &[u8], movie_id: &str) -> Result<MovieInfo, UpstreamError> {
    let decoded: MovieInfoDto = serde_json::from_slice(body).map_err(|error| {
        UpstreamError::decode(format!("invalid movie info payload: {error}"))
    })?;
    Ok(decoded.into_domain(movie_id))
}

fn map_status_error(status: StatusCode, body: &[u8], movie_id: &str) -> UpstreamError {
    match status {
        StatusCode::NOT_FOUND => {
            UpstreamError::not_found(format!("Unable to find movie with id {movie_id}"))
        }
        _ if status.is_client_error() => UpstreamError::client(status.as_u16(), body_text(body)),
        _ if status.is_server_error() => {
            UpstreamError::server(format!("{MOVIES_INFO_SERVER_MARKER}{}", body_text(body)))
        }
        _ => UpstreamError::transport(format!(
            "unexpected movie info status {}",
            status.as_u16()
        )),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network movie-info mapping helpers.

    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    #[rstest]
    fn not_found_names_the_requested_movie() {
        let error = map_status_error(StatusCode::NOT_FOUND, b"", "101");
        assert_eq!(
            error,
            UpstreamError::not_found("Unable to find movie with id 101")
        );
    }

    #[rstest]
    #[case::bad_request(StatusCode::BAD_REQUEST)]
    #[case::conflict(StatusCode::CONFLICT)]
    #[case::too_many_requests(StatusCode::TOO_MANY_REQUESTS)]
    fn other_client_statuses_keep_status_and_body(#[case] status: StatusCode) {
        let error = map_status_error(status, b"movieInfoId invalid", "97");
        assert_eq!(
            error,
            UpstreamError::client(status.as_u16(), "movieInfoId invalid")
        );
    }

    #[rstest]
    #[case::internal(StatusCode::INTERNAL_SERVER_ERROR)]
    #[case::bad_gateway(StatusCode::BAD_GATEWAY)]
    #[case::unavailable(StatusCode::SERVICE_UNAVAILABLE)]
    fn server_statuses_are_prefixed_with_marker(#[case] status: StatusCode) {
        let error = map_status_error(status, b"server down", "97");
        assert_eq!(
            error,
            UpstreamError::server("Error connecting to MoviesInfoService: server down")
        );
        assert!(error.is_retryable());
    }

    #[rstest]
    fn parses_movie_info_payload() {
        let body = r#"{
            "movieInfoId": "97",
            "name": "Batman Begins",
            "year": 2005,
            "cast": ["Christian Bale", "Michael Caine"],
            "releaseDate": "2005-06-15"
        }"#;

        let info = parse_movie_info(body.as_bytes(), "97").expect("payload decodes");
        assert_eq!(info.name, "Batman Begins");
        assert_eq!(info.cast, vec!["Christian Bale", "Michael Caine"]);
        assert_eq!(info.release_date, NaiveDate::from_ymd_opt(2005, 6, 15));
    }

    #[rstest]
    fn missing_identifier_falls_back_to_request() {
        let body = r#"{ "movieInfoId": null, "name": "Dark Knight", "year": 2008, "cast": null }"#;

        let info = parse_movie_info(body.as_bytes(), "abc").expect("payload decodes");
        assert_eq!(info.movie_info_id, "abc");
        assert!(info.cast.is_empty());
        assert!(info.release_date.is_none());
    }

    #[rstest]
    fn rejects_negative_years() {
        let body = r#"{ "movieInfoId": "1", "name": "Broken", "year": -1 }"#;

        let error = parse_movie_info(body.as_bytes(), "1").expect_err("decode must fail");
        assert!(matches!(error, UpstreamError::Decode { .. }));
    }
}
