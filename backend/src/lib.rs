//! Movies aggregation service library.
//!
//! Combines catalog entries from the movie-info service with reviews from the
//! review service behind a single HTTP endpoint, retrying transient upstream
//! failures with exponential backoff.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
