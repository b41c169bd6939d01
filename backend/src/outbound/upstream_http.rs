//! Transport helpers shared by the upstream HTTP source adapters.
//!
//! Adapters own status classification; this module owns client construction,
//! endpoint building, and mapping transport failures.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use thiserror::Error;

use crate::domain::ports::UpstreamError;

const DEFAULT_USER_AGENT: &str = "movies-service/0.1";

/// Errors raised while constructing an upstream HTTP adapter.
#[derive(Debug, Error)]
pub enum HttpSourceBuildError {
    /// The reqwest client could not be built.
    #[error("failed to build upstream HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// The base URL cannot have an identifier appended as a path segment.
    #[error("upstream base URL cannot carry path segments: {url}")]
    BaseUrl {
        /// Offending URL.
        url: String,
    },
}

pub(super) fn build_client(timeout: Duration) -> Result<Client, HttpSourceBuildError> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .build()?)
}

pub(super) fn validate_base_url(base_url: &Url) -> Result<(), HttpSourceBuildError> {
    if base_url.cannot_be_a_base() {
        return Err(HttpSourceBuildError::BaseUrl {
            url: base_url.to_string(),
        });
    }
    Ok(())
}

/// Append `id` to `base_url` as a single percent-encoded path segment.
pub(super) fn endpoint_for(base_url: &Url, id: &str) -> Result<Url, UpstreamError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| {
            UpstreamError::transport(format!("base URL {base_url} cannot carry path segments"))
        })?
        .pop_if_empty()
        .push(id);
    Ok(url)
}

/// Issue one GET and read the full response body.
pub(super) async fn get(client: &Client, url: &Url) -> Result<(StatusCode, Vec<u8>), UpstreamError> {
    let response = client
        .get(url.clone())
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(map_transport_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    Ok((status, body.to_vec()))
}

/// Upstream payload as text.
///
/// Valid UTF-8 is carried through byte for byte. Invalid sequences are
/// replaced with U+FFFD, so non-UTF-8 payloads are not reproduced exactly.
pub(super) fn body_text(body: &[u8]) -> String {
    String::from_utf8_lossy(body).into_owned()
}

fn map_transport_error(error: reqwest::Error) -> UpstreamError {
    if error.is_timeout() {
        UpstreamError::transport(format!("request timed out: {error}"))
    } else {
        UpstreamError::transport(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn url(raw: &str) -> Url {
        Url::parse(raw).expect("valid test URL")
    }

    #[rstest]
    #[case::no_trailing_slash("http://localhost:8080/v1/movieinfos", "http://localhost:8080/v1/movieinfos/97")]
    #[case::trailing_slash("http://localhost:8080/v1/movieinfos/", "http://localhost:8080/v1/movieinfos/97")]
    #[case::root("http://localhost:8080", "http://localhost:8080/97")]
    fn appends_identifier_as_last_segment(#[case] base: &str, #[case] expected: &str) {
        let endpoint = endpoint_for(&url(base), "97").expect("endpoint builds");
        assert_eq!(endpoint.as_str(), expected);
    }

    #[rstest]
    fn escapes_identifiers_containing_separators() {
        let endpoint =
            endpoint_for(&url("http://localhost:8080/v1/reviews"), "a/b?c").expect("endpoint builds");
        assert_eq!(endpoint.as_str(), "http://localhost:8080/v1/reviews/a%2Fb%3Fc");
    }

    #[rstest]
    fn rejects_base_urls_without_paths() {
        let error = validate_base_url(&url("mailto:ops@example.com")).expect_err("must fail");
        assert!(matches!(error, HttpSourceBuildError::BaseUrl { .. }));
    }

    #[rstest]
    fn body_text_keeps_payload_verbatim() {
        assert_eq!(body_text(b"  server down\n"), "  server down\n");
    }

    #[rstest]
    fn body_text_replaces_invalid_utf8() {
        assert_eq!(body_text(b"down \xff\xfe"), "down \u{FFFD}\u{FFFD}");
    }
}
