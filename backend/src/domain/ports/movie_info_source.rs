//! Driven port for fetching catalog entries from the movie-info service.
//!
//! A catalog entry is required for every aggregation, so a missing entry is
//! an error here rather than an empty result.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::UpstreamError;
use crate::domain::MovieInfo;

/// Port for looking up one catalog entry by identifier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieInfoSource: Send + Sync {
    /// Fetch the catalog entry for `movie_id`.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::NotFound`] when the catalog has no such entry,
    /// and the other variants for client, server, or transport failures.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use movies_service::domain::ports::{FixtureMovieInfoSource, MovieInfoSource};
    ///
    /// let info = FixtureMovieInfoSource.fetch_movie_info("97").await?;
    /// assert_eq!(info.movie_info_id, "97");
    /// # Ok::<(), movies_service::domain::ports::UpstreamError>(())
    /// ```
    async fn fetch_movie_info(&self, movie_id: &str) -> Result<MovieInfo, UpstreamError>;
}

/// Fixture implementation echoing the requested identifier on a fixed entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureMovieInfoSource;

#[async_trait]
impl MovieInfoSource for FixtureMovieInfoSource {
    async fn fetch_movie_info(&self, movie_id: &str) -> Result<MovieInfo, UpstreamError> {
        Ok(MovieInfo {
            movie_info_id: movie_id.to_owned(),
            name: "Batman Begins".to_owned(),
            year: 2005,
            cast: vec!["Christian Bale".to_owned(), "Michael Caine".to_owned()],
            release_date: NaiveDate::from_ymd_opt(2005, 6, 15),
        })
    }
}
