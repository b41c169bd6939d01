//! Driven port for fetching reviews from the review service.
//!
//! Reviews are optional enrichment: an identifier the review service does not
//! know resolves to an empty list, not an error.

use async_trait::async_trait;

use super::UpstreamError;
use crate::domain::Review;

/// Port for listing the reviews attached to one catalog entry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// Fetch every review for `movie_id` in upstream order.
    ///
    /// # Errors
    ///
    /// Returns client, server, or transport failures. Never returns
    /// [`UpstreamError::NotFound`].
    async fn fetch_reviews(&self, movie_id: &str) -> Result<Vec<Review>, UpstreamError>;
}

/// Fixture implementation returning no reviews.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureReviewSource;

#[async_trait]
impl ReviewSource for FixtureReviewSource {
    async fn fetch_reviews(&self, _movie_id: &str) -> Result<Vec<Review>, UpstreamError> {
        Ok(Vec::new())
    }
}
