//! Domain primitives, ports, and services.
//!
//! Purpose: define the movie aggregate, the upstream ports it is assembled
//! from, and the retry policy those ports share. Nothing here depends on a
//! transport; adapters live under `inbound` and `outbound`.
//!
//! Public surface:
//! - [`Movie`], [`MovieInfo`], [`Review`]: aggregate and its parts.
//! - [`MoviesService`]: aggregation use-case behind [`ports::MovieQuery`].
//! - [`RetryPolicy`]: backoff specification for upstream adapters.

pub mod movie;
pub mod movies_service;
pub mod ports;
pub mod retry;

pub use self::movie::{Movie, MovieInfo, Review};
pub use self::movies_service::MoviesService;
pub use self::retry::{
    BackoffJitter, RandomJitter, RetryPolicy, RetryRuntime, RetrySleeper, TokioSleeper,
};
