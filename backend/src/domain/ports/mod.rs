//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`MovieInfoSource`], [`ReviewSource`]) are implemented by the
//! outbound HTTP adapters; the driving port ([`MovieQuery`]) is consumed by
//! inbound handlers.

mod macros;
pub(crate) use macros::define_port_error;

mod movie_info_source;
mod movie_query;
mod review_source;
mod upstream_error;

#[cfg(test)]
pub use movie_info_source::MockMovieInfoSource;
pub use movie_info_source::{FixtureMovieInfoSource, MovieInfoSource};
#[cfg(test)]
pub use movie_query::MockMovieQuery;
pub use movie_query::{FixtureMovieQuery, MovieQuery};
#[cfg(test)]
pub use review_source::MockReviewSource;
pub use review_source::{FixtureReviewSource, ReviewSource};
pub use upstream_error::{NOT_FOUND_STATUS, UpstreamError};
