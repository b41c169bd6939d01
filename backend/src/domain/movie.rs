//! Movie catalog records, reviews, and the composite view built from both.
//!
//! These types are transport agnostic: outbound adapters decode upstream
//! payloads into them and inbound adapters serialise them into responses.

use chrono::NaiveDate;

/// Catalog entry fetched from the movie-info service.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieInfo {
    /// Catalog identifier.
    pub movie_info_id: String,
    /// Movie title.
    pub name: String,
    /// Release year.
    pub year: u32,
    /// Cast members in billing order.
    pub cast: Vec<String>,
    /// Release date, when the catalog records one.
    pub release_date: Option<NaiveDate>,
}

/// Review fetched from the review service.
///
/// `rating` is range-checked by the review service and is not re-validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    /// Review identifier assigned by the review service.
    pub review_id: Option<String>,
    /// Catalog identifier the review belongs to.
    pub movie_info_id: i64,
    /// Free-text comment.
    pub comment: String,
    /// Rating between 0.0 and 5.0.
    pub rating: f64,
}

/// Catalog entry together with its reviews.
///
/// ## Invariants
/// - `movie_info` is always present; a movie is only assembled after the
///   catalog lookup succeeded.
/// - `review_list` keeps the order returned by the review service and may be
///   empty.
///
/// # Examples
/// ```
/// use movies_service::domain::{Movie, MovieInfo};
///
/// let info = MovieInfo {
///     movie_info_id: "97".to_owned(),
///     name: "Batman Begins".to_owned(),
///     year: 2005,
///     cast: vec!["Christian Bale".to_owned()],
///     release_date: None,
/// };
/// let movie = Movie::new(info, Vec::new());
/// assert!(movie.review_list().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    movie_info: MovieInfo,
    review_list: Vec<Review>,
}

impl Movie {
    /// Compose a movie from its catalog entry and reviews.
    pub fn new(movie_info: MovieInfo, review_list: Vec<Review>) -> Self {
        Self {
            movie_info,
            review_list,
        }
    }

    /// Catalog entry.
    pub fn movie_info(&self) -> &MovieInfo {
        &self.movie_info
    }

    /// Reviews in upstream order.
    pub fn review_list(&self) -> &[Review] {
        &self.review_list
    }

    /// Split the movie back into its parts.
    pub fn into_parts(self) -> (MovieInfo, Vec<Review>) {
        (self.movie_info, self.review_list)
    }
}
