use reqwest::StatusCode;
use thiserror::Error;

/// Connection settings are absent or unusable. Kept apart from
/// [`QueryError`] so callers can tell a deployment problem from a data one.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("{variable} is not set")]
    Missing { variable: &'static str },

    #[error("store URL {value} is not a valid absolute http(s) URL")]
    InvalidUrl { value: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("store unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("store rejected query ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("malformed store response: {0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Query(#[from] QueryError),
}
