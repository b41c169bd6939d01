//! Reqwest-backed review source adapter.
//!
//! Unlike the movie-info adapter, a `404` here means "no reviews" and is
//! returned as an empty list.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{info, warn};

use super::dto::ReviewDto;
use crate::domain::ports::{ReviewSource, UpstreamError};
use crate::domain::{RetryPolicy, RetryRuntime, Review};
use crate::outbound::upstream_http::{
    HttpSourceBuildError, body_text, build_client, endpoint_for, get, validate_base_url,
};

/// Prefix identifying the review service in server-error messages.
pub const REVIEWS_SERVER_MARKER: &str = "Server exception in reviews service: ";

/// Review adapter issuing `GET {base_url}/{movie_id}`.
pub struct ReviewsHttpSource {
    client: Client,
    base_url: Url,
    retry: RetryPolicy,
    runtime: RetryRuntime,
}

impl ReviewsHttpSource {
    /// Build an adapter with the production retry runtime.
    ///
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
    ) -> Result<Vec<Review>, UpstreamError> {
        let (status, body) = get(&self.client, url).await?;
        info!(movie_id, attempt, status = status.as_u16(), "review service responded");

        match classify(status, &body) {
            Outcome::Reviews => parse_reviews(&body),
            Outcome::NoReviews => Ok(Vec::new()),
            Outcome::Failed(error) => {
                warn!(movie_id, attempt, %error, "review lookup rejected");
                Err(error)
            }
        }
    }
}

#[async_trait]
impl ReviewSource for ReviewsHttpSource {
    async fn fetch_reviews(&self, movie_id: &str) -> Result<Vec<Review>, UpstreamError> {
        let url = endpoint_for(&self.base_url, movie_id)?;
        let url = &url;
        self.retry
            .execute(&self.runtime, move |attempt| {
                self.fetch_once(url, movie_id, attempt)
            })
            .await
    }
}

#[derive(Debug, PartialEq)]
enum Outcome {
    Reviews,
    NoReviews,
    Failed(UpstreamError),
}

/// An empty success body (for example `204`) carries no reviews.
fn classify(status: StatusCode, body: &[u8]) -> Outcome {
    match status {
        _ if status.is_success() && body.trim_ascii().is_empty() => Outcome::NoReviews,
        _ if status.is_success() => Outcome::Reviews,
        StatusCode::NOT_FOUND => Outcome::NoReviews,
        _ if status.is_client_error() => {
            Outcome::Failed(UpstreamError::client(status.as_u16(), body_text(body)))
        }
        _ if status.is_server_error() => Outcome::Failed(UpstreamError::server(format!(
            "{REVIEWS_SERVER_MARKER}{}",
            body_text(body)
        ))),
        _ => Outcome::Failed(UpstreamError::transport(format!(
            "unexpected review status {}",
            status.as_u16()
        ))),
    }
}

fn parse_reviews(body: &[u8]) -> Result<Vec<Review>, UpstreamError> {
    let decoded: Vec<ReviewDto> = serde_json::from_slice(body)
        .map_err(|error| UpstreamError::decode(format!("invalid review payload: {error}")))?;
    Ok(decoded.into_iter().map(Review::from).collect())
}
