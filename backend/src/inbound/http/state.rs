//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on driving ports and stay testable without network I/O.

use std::sync::Arc;

use crate::domain::ports::MovieQuery;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub movies: Arc<dyn MovieQuery>,
}

impl HttpState {
    /// Construct state from the movie aggregation port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use movies_service::domain::ports::FixtureMovieQuery;
    /// use movies_service::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureMovieQuery));
    /// let _movies = state.movies.clone();
    /// ```
    pub fn new(movies: Arc<dyn MovieQuery>) -> Self {
        Self { movies }
    }
}
