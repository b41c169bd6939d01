//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the movie endpoint, the health probes, and the
//! response schemas. Swagger UI serves it in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::movies::{MovieInfoResponse, MovieResponse, ReviewResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Movies service API",
        description = "Aggregates movie catalog entries with their reviews."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::movies::get_movie_by_id,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(MovieResponse, MovieInfoResponse, ReviewResponse)),
    tags(
        (name = "movies", description = "Movie aggregation"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
