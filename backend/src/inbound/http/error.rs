//! HTTP adapter mapping for upstream errors.
//!
//! Purpose: keep [`UpstreamError`] transport agnostic while letting Actix
//! handlers turn unrecovered failures into plain-text responses whose status
//! and body come from the originating upstream failure.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::ports::UpstreamError;
use crate::middleware::trace::TraceId;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, UpstreamError>;

/// Body returned for failures that carry no client-safe message.
pub const GENERIC_ERROR_MESSAGE: &str = "Internal server error";

/// Status code the boundary reports for `error`.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use movies_service::domain::ports::UpstreamError;
/// use movies_service::inbound::http::error::status_for;
///
/// let error = UpstreamError::not_found("Unable to find movie with id 101");
/// assert_eq!(status_for(&error), StatusCode::NOT_FOUND);
/// ```
pub fn status_for(error: &UpstreamError) -> StatusCode {
    match error.root_cause() {
        UpstreamError::NotFound { .. } => StatusCode::NOT_FOUND,
        UpstreamError::Client { status, .. } => StatusCode::from_u16(*status)
            .ok()
            .filter(StatusCode::is_client_error)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        UpstreamError::Server { .. }
        | UpstreamError::RetriesExhausted { .. }
        | UpstreamError::Transport { .. }
        | UpstreamError::Decode { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Response body the boundary reports for `error`.
pub fn message_for(error: &UpstreamError) -> String {
    match error.root_cause() {
        UpstreamError::NotFound { message }
        | UpstreamError::Client { message, .. }
        | UpstreamError::Server { message } => message.clone(),
        UpstreamError::RetriesExhausted { .. }
        | UpstreamError::Transport { .. }
        | UpstreamError::Decode { .. } => GENERIC_ERROR_MESSAGE.to_owned(),
    }
}

impl ResponseError for UpstreamError {
    fn status_code(&self) -> StatusCode {
        status_for(self)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let trace_id = TraceId::current().map(|id| id.to_string());
        error!(
            status = status.as_u16(),
            error = %self,
            trace_id = trace_id.as_deref().unwrap_or("-"),
            "upstream failure reported to client"
        );
        HttpResponse::build(status)
            .content_type(ContentType::plaintext())
            .body(message_for(self))
    }
}

#[cfg(test)]
mod tests;
