//! Error types for the library layer.

/// Errors produced by the library layer: upstream API failures and
/// rejected arguments.
#[derive(thiserror::Error, Debug)]
pub enum RosterError {
    /// An error from the underlying API client.
    #[error("API error: {0}")]
    Api(#[from] roster_api::Error),
    /// A caller passed a value outside the accepted range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl RosterError {
    /// Whether retrying the request that produced this error may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(api_err) => api_err.is_transient(),
            _ => false,
        }
    }
}
