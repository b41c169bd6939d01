//! Driving port for the movie aggregation use-case.
//!
//! HTTP handlers depend on this port only, so they can be exercised without
//! any upstream service.

use async_trait::async_trait;

use super::UpstreamError;
use crate::domain::{Movie, MovieInfo};

/// Use-case port returning a catalog entry combined with its reviews.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieQuery: Send + Sync {
    /// Assemble the movie for `movie_id`.
    ///
    /// # Errors
    ///
    /// Returns the first unrecovered [`UpstreamError`] from either upstream.
    async fn get_movie(&self, movie_id: &str) -> Result<Movie, UpstreamError>;
}

/// Fixture query returning a fixed catalog entry without reviews.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureMovieQuery;

#[async_trait]
impl MovieQuery for FixtureMovieQuery {
    async fn get_movie(&self, movie_id: &str) -> Result<Movie, UpstreamError> {
        let info = MovieInfo {
            movie_info_id: movie_id.to_owned(),
            name: "Dark Knight Rises".to_owned(),
            year: 2012,
            cast: vec!["Christian Bale".to_owned(), "Tom Hardy".to_owned()],
            release_date: None,
        };
        Ok(Movie::new(info, Vec::new()))
    }
}
