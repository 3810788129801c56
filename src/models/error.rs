use thiserror::Error;

/// Malformed input. Any of these aborts the invocation before anything is sent.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Malformed event: {0}")]
    MalformedEvent(#[from] serde_json::Error),

    #[error("Event contains no records")]
    NoRecords,

    #[error("Unterminated quote in message payload")]
    UnterminatedQuote,

    #[error("Trailing escape character in message payload")]
    TrailingEscape,

    #[error("Token '{0}' is not a key=value pair")]
    MissingSeparator(String),

    #[error("Missing field '{0}' in message payload")]
    MissingField(String),

    #[error("No CloudFormation region found in stack id '{0}'")]
    UnrecognizedStackId(String),
}
