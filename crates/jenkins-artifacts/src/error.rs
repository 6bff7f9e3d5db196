use thiserror::Error;

/// Client error types
#[derive(Error, Debug)]
pub enum JenkinsError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Error parsing response from {url}: {source}")]
    ParseError {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Server error from {url}: {status}")]
    ServerError { url: String, status: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type JenkinsResult<T> = Result<T, JenkinsError>;
