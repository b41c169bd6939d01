//! Outbound adapters implementing domain ports for external services.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of domain port traits:
//!
//! - **movies_info**: reqwest-backed `MovieInfoSource` for the movie-info service
//! - **reviews**: reqwest-backed `ReviewSource` for the review service
//!
//! Adapters are thin translators that convert between HTTP payloads and
//! domain types. They classify failures and apply the retry policy; they
//! contain no aggregation logic.

pub mod movies_info;
pub mod reviews;
pub mod upstream_http;
