use thiserror::Error;

/// 0x-prefixed hex string (e.g. "0x1234...").
pub type Hex = String;

/// Glide client error types.
#[derive(Debug, Error)]
pub enum GlideError {
    #[error(
        "unsupported account kind: {0}; \
         the gasless flow applies only to plain or 7702-delegated accounts"
    )]
    UnsupportedAccountKind(String),

    #[error("quote endpoint rejected the request (status {status}): {body}")]
    QuoteRejected { status: u16, body: String },

    #[error("execute endpoint rejected the request (status {status}): {body}")]
    ExecutionRejected { status: u16, body: String },

    #[error("no signing capability available: {0}")]
    SigningUnavailable(String),

    #[error("relay reported terminal status `{status}` for the execution")]
    RelayExecutionFailed { status: String },

    #[error(
        "no terminal status after {attempts} polls; \
         check the request id with the relay manually"
    )]
    PollTimeout { attempts: u32 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, GlideError>;
