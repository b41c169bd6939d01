//! Review service outbound adapter.
//!
//! This module provides a reqwest implementation of the `ReviewSource` port.

mod dto;
mod http_source;

pub use http_source::{REVIEWS_SERVER_MARKER, ReviewsHttpSource};
