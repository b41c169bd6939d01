//! Movie aggregation endpoint.
//!
//! ```text
//! GET /v1/movies/{id}
//! ```

use actix_web::{HttpResponse, get, web};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Movie, MovieInfo, Review};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Catalog entry as exposed to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieInfoResponse {
    #[schema(example = "97")]
    pub movie_info_id: String,
    #[schema(example = "Batman Begins")]
    pub name: String,
    #[schema(example = 2005)]
    pub year: u32,
    pub cast: Vec<String>,
    /// ISO 8601 calendar date; `null` when the catalog has none.
    pub release_date: Option<NaiveDate>,
}

impl From<MovieInfo> for MovieInfoResponse {
    fn from(info: MovieInfo) -> Self {
        Self {
            movie_info_id: info.movie_info_id,
            name: info.name,
            year: info.year,
            cast: info.cast,
            release_date: info.release_date,
        }
    }
}

/// Review as exposed to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub review_id: Option<String>,
    #[schema(example = 97)]
    pub movie_info_id: i64,
    pub comment: String,
    #[schema(example = 4.5)]
    pub rating: f64,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            review_id: review.review_id,
            movie_info_id: review.movie_info_id,
            comment: review.comment,
            rating: review.rating,
        }
    }
}

/// Response payload combining a catalog entry and its reviews.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    pub movie_info: MovieInfoResponse,
    /// Reviews in the order the review service returned them.
    pub review_list: Vec<ReviewResponse>,
}

impl From<Movie> for MovieResponse {
    fn from(movie: Movie) -> Self {
        let (info, reviews) = movie.into_parts();
        Self {
            movie_info: info.into(),
            review_list: reviews.into_iter().map(ReviewResponse::from).collect(),
        }
    }
}

/// Fetch a movie together with its reviews.
///
/// Error responses are plain text carrying the upstream failure message.
#[utoipa::path(
    get,
    path = "/v1/movies/{id}",
    params(("id" = String, Path, description = "Catalog identifier")),
    responses(
        (status = 200, description = "Movie with reviews", body = MovieResponse),
        (
            status = 404,
            description = "Catalog has no such movie",
            body = String,
            content_type = "text/plain"
        ),
        (
            status = 500,
            description = "Upstream service failure",
            body = String,
            content_type = "text/plain"
        )
    ),
    tags = ["movies"],
    operation_id = "getMovieById"
)]
#[get("/movies/{id}")]
pub async fn get_movie_by_id(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let movie_id = path.into_inner();
    info!(movie_id = %movie_id, "fetching movie");
    let movie = state.movies.get_movie(&movie_id).await?;
    Ok(HttpResponse::Ok().json(MovieResponse::from(movie)))
}
