//! Failures surfaced by [`crate::Client`].

/// Why a console API call produced no usable response.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Transport failure, timeout, or a 2xx body that did not decode.
    #[error("Request failed")]
    RequestFailed,
    /// Non-2xx response. `body` is the start of the payload, cut at 2000 bytes.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
}

impl Error {
    /// Network failures, 429 and 5xx are worth retrying; other statuses will
    /// fail the same way again.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::RequestFailed => true,
            Error::HttpStatus { status, .. } => *status == 429 || *status >= 500,
        }
    }
}
