//! Movie-info service outbound adapter.
//!
//! This module provides a reqwest implementation of the `MovieInfoSource`
//! port.

mod dto;
mod http_source;

pub use http_source::{MOVIES_INFO_SERVER_MARKER, MoviesInfoHttpSource};
