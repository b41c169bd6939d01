//! Movie aggregation service.
//!
//! Implements the [`MovieQuery`] driving port by looking up the catalog entry
//! first and only then its reviews. A catalog failure ends the request; the
//! review source is responsible for turning "no reviews" into an empty list.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::Movie;
use crate::domain::ports::{MovieInfoSource, MovieQuery, ReviewSource, UpstreamError};

/// Aggregates the movie-info and review sources into one [`Movie`].
#[derive(Clone)]
pub struct MoviesService {
    movie_info: Arc<dyn MovieInfoSource>,
    reviews: Arc<dyn ReviewSource>,
}

impl MoviesService {
    /// Create a service over the two upstream sources.
    pub fn new(movie_info: Arc<dyn MovieInfoSource>, reviews: Arc<dyn ReviewSource>) -> Self {
        Self {
            movie_info,
            reviews,
        }
    }
}

#[async_trait]
impl MovieQuery for MoviesService {
    async fn get_movie(&self, movie_id: &str) -> Result<Movie, UpstreamError> {
        let movie_info = self
            .movie_info
            .fetch_movie_info(movie_id)
            .await
            .inspect_err(|error| warn!(movie_id, %error, "movie info lookup failed"))?;

        let review_list = self
            .reviews
            .fetch_reviews(movie_id)
            .await
            .inspect_err(|error| warn!(movie_id, %error, "review lookup failed"))?;

        debug!(movie_id, reviews = review_list.len(), "movie assembled");
        Ok(Movie::new(movie_info, review_list))
    }
}

#[cfg(test)]
#[path = "movies_service_tests.rs"]
mod tests;
