//! Tests for the movie aggregation service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockMovieInfoSource, MockReviewSource};
use crate::domain::{MovieInfo, Review};

fn movie_info(movie_id: &str) -> MovieInfo {
    MovieInfo {
        movie_info_id: movie_id.to_owned(),
        name: "Batman Begins".to_owned(),
        year: 2005,
        cast: vec!["Christian Bale".to_owned(), "Michael Caine".to_owned()],
        release_date: chrono::NaiveDate::from_ymd_opt(2005, 6, 15),
    }
}

#[fixture]
fn reviews() -> Vec<Review> {
    vec![
        Review {
            review_id: Some("2".to_owned()),
            movie_info_id: 97,
            comment: "Excellent Movie".to_owned(),
            rating: 9.0,
        },
        Review {
            review_id: Some("1".to_owned()),
            movie_info_id: 97,
            comment: "Awesome Movie".to_owned(),
            rating: 8.0,
        },
    ]
}

fn service(movie_info: MockMovieInfoSource, reviews: MockReviewSource) -> MoviesService {
    MoviesService::new(Arc::new(movie_info), Arc::new(reviews))
}

#[rstest]
#[tokio::test]
async fn combines_catalog_entry_with_reviews_in_upstream_order(reviews: Vec<Review>) {
    let mut info_source = MockMovieInfoSource::new();
    info_source
        .expect_fetch_movie_info()
        .times(1)
        .returning(|id| Ok(movie_info(id)));
    let mut review_source = MockReviewSource::new();
    let scripted = reviews.clone();
    review_source
        .expect_fetch_reviews()
        .times(1)
        .return_once(move |_| Ok(scripted));

    let movie = service(info_source, review_source)
        .get_movie("97")
        .await
        .expect("aggregation succeeds");

    assert_eq!(movie.movie_info(), &movie_info("97"));
    assert_eq!(movie.review_list(), reviews.as_slice());
}

#[rstest]
#[tokio::test]
async fn catalog_not_found_skips_review_lookup() {
    let mut info_source = MockMovieInfoSource::new();
    info_source
        .expect_fetch_movie_info()
        .times(1)
        .returning(|id| {
            Err(UpstreamError::not_found(format!(
                "Unable to find movie with id {id}"
            )))
        });
    let mut review_source = MockReviewSource::new();
    review_source.expect_fetch_reviews().never();

    let error = service(info_source, review_source)
        .get_movie("101")
        .await
        .expect_err("catalog miss fails the aggregation");

    assert_eq!(
        error,
        UpstreamError::not_found("Unable to find movie with id 101")
    );
}

#[rstest]
#[case::client(UpstreamError::client(400_u16, "movieInfoId must be numeric"))]
#[case::exhausted(UpstreamError::retries_exhausted(
    4_u32,
    UpstreamError::server("Error connecting to MoviesInfoService: down")
))]
#[case::transport(UpstreamError::transport("connection refused"))]
#[tokio::test]
async fn catalog_failures_propagate_unchanged(#[case] failure: UpstreamError) {
    let expected = failure.clone();
    let mut info_source = MockMovieInfoSource::new();
    info_source
        .expect_fetch_movie_info()
        .times(1)
        .return_once(move |_| Err(failure));
    let mut review_source = MockReviewSource::new();
    review_source.expect_fetch_reviews().never();

    let result = service(info_source, review_source).get_movie("97").await;

    assert_eq!(result, Err(expected));
}

#[rstest]
#[tokio::test]
async fn empty_review_list_still_yields_a_movie() {
    let mut info_source = MockMovieInfoSource::new();
    info_source
        .expect_fetch_movie_info()
        .returning(|id| Ok(movie_info(id)));
    let mut review_source = MockReviewSource::new();
    review_source
        .expect_fetch_reviews()
        .returning(|_| Ok(Vec::new()));

    let movie = service(info_source, review_source)
        .get_movie("97")
        .await
        .expect("empty reviews are not an error");

    assert!(movie.review_list().is_empty());
}

#[rstest]
#[tokio::test]
async fn review_server_failures_are_not_swallowed() {
    let failure = UpstreamError::retries_exhausted(
        4_u32,
        UpstreamError::server("Server exception in reviews service: reviews server down"),
    );
    let expected = failure.clone();
    let mut info_source = MockMovieInfoSource::new();
    info_source
        .expect_fetch_movie_info()
        .returning(|id| Ok(movie_info(id)));
    let mut review_source = MockReviewSource::new();
    review_source
        .expect_fetch_reviews()
        .times(1)
        .return_once(move |_| Err(failure));

    let result = service(info_source, review_source).get_movie("97").await;

    assert_eq!(result, Err(expected));
}

#[rstest]
#[tokio::test]
async fn repeated_aggregations_are_structurally_equal(reviews: Vec<Review>) {
    let mut info_source = MockMovieInfoSource::new();
    info_source
        .expect_fetch_movie_info()
        .times(2)
        .returning(|id| Ok(movie_info(id)));
    let mut review_source = MockReviewSource::new();
    review_source
        .expect_fetch_reviews()
        .times(2)
        .returning(move |_| Ok(reviews.clone()));
    let service = service(info_source, review_source);

    let first = service.get_movie("97").await.expect("first call succeeds");
    let second = service.get_movie("97").await.expect("second call succeeds");

    assert_eq!(first, second);
}
