//! Builders wiring upstream adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;

use movies_service::domain::MoviesService;
use movies_service::inbound::http::state::HttpState;
use movies_service::outbound::movies_info::MoviesInfoHttpSource;
use movies_service::outbound::reviews::ReviewsHttpSource;

use super::ServerConfig;

/// Build the handler state from real upstream adapters sharing one retry
/// policy.
///
/// # Errors
///
/// Returns [`std::io::Error`] when either adapter rejects its base URL or the
/// HTTP client cannot be constructed.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let movie_info = MoviesInfoHttpSource::new(
        config.info_url.clone(),
        config.request_timeout,
        config.retry,
    )
    .map_err(|e| std::io::Error::other(format!("movie-info adapter: {e}")))?;
    let reviews = ReviewsHttpSource::new(
        config.reviews_url.clone(),
        config.request_timeout,
        config.retry,
    )
    .map_err(|e| std::io::Error::other(format!("reviews adapter: {e}")))?;

    let movies = MoviesService::new(Arc::new(movie_info), Arc::new(reviews));
    Ok(web::Data::new(HttpState::new(Arc::new(movies))))
}
