use thiserror::Error;

use crate::provider::ProviderId;

/// Typed failures raised by the core library.
///
/// I/O problems are not listed here: they travel as `anyhow::Error` with the
/// offending path attached as context.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("'{input}' is not a valid number for {field}")]
    InvalidNumber { field: &'static str, input: String },

    #[error("The {provider} provider cannot serve {request} requests")]
    UnsupportedRequest {
        provider: ProviderId,
        request: &'static str,
    },
}
