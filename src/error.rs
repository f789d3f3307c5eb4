use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Connection refused, timeout, DNS failure and friends.
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: String,
        url:    String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not build the http client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("could not encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid base url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The body did not have the shape the caller asked for.
    #[error("could not decode response body as {target} at `{path}`: {message}")]
    Decode {
        target:  &'static str,
        path:    String,
        message: String,
    },

    #[error("{operation} violates the published schema: {}", .violations.join("; "))]
    SchemaViolation {
        operation:  String,
        violations: Vec<String>,
    },
}
