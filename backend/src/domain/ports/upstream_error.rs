//! Error taxonomy shared by every upstream source adapter.
//!
//! Adapters classify each failed call into exactly one variant. The retry
//! policy keys on the variant kind, never on which service produced it, and
//! the HTTP boundary maps variants to status codes.

use super::define_port_error;

/// Status code reported for [`UpstreamError::NotFound`].
pub const NOT_FOUND_STATUS: u16 = 404;

define_port_error! {
    /// Failure surfaced by an upstream service call.
    pub enum UpstreamError {
        /// Upstream answered 404 for the requested identifier.
        NotFound { message: String } => "{message}",
        /// Upstream answered with a 4xx other than 404. `message` is the
        /// response payload verbatim.
        Client { status: u16, message: String } => "{message}",
        /// Upstream answered with a 5xx. `message` carries the service marker
        /// followed by the response payload.
        Server { message: String } => "{message}",
        /// The retry budget ran out; `last` is the final failure observed.
        RetriesExhausted { attempts: u32, last: Box<UpstreamError> } => "{last}",
        /// No response was received (connection refused, timeout, ...).
        Transport { message: String } => "upstream transport failed: {message}",
        /// A success payload could not be decoded.
        Decode { message: String } => "upstream response decode failed: {message}",
    }
}

impl UpstreamError {
    /// Return whether retrying this error is expected to help.
    ///
    /// Only server-side failures qualify; client errors and not-found are
    /// deterministic.
    ///
    /// # Examples
    /// ```
    /// use movies_service::domain::ports::UpstreamError;
    ///
    /// assert!(UpstreamError::server("boom").is_retryable());
    /// assert!(!UpstreamError::not_found("missing").is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Server { .. })
    }

    /// Return the originating failure, unwrapping retry exhaustion.
    ///
    /// # Examples
    /// ```
    /// use movies_service::domain::ports::UpstreamError;
    ///
    /// let root = UpstreamError::server("Error connecting: down");
    /// let exhausted = UpstreamError::retries_exhausted(4_u32, root.clone());
    /// assert_eq!(exhausted.root_cause(), &root);
    /// ```
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Self::RetriesExhausted { last, .. } = current {
            current = last.as_ref();
        }
        current
    }

    /// Status code carried by the root cause, when upstream supplied one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self.root_cause() {
            Self::NotFound { .. } => Some(NOT_FOUND_STATUS),
            Self::Client { status, .. } => Some(*status),
            _ => None,
        }
    }
}
