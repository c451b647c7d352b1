use thiserror::Error;

/// Startup failures. These abort the run before any request goes out.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("FACEIT_API_KEY is not set; add it to .env or the environment")]
    MissingApiKey,
    #[error("FACEIT_API_KEY still holds the placeholder value")]
    PlaceholderApiKey,
    #[error("player roster is empty")]
    EmptyRoster,
    #[error("invalid history limit {0:?}, expected a positive integer")]
    InvalidHistoryLimit(String),
}

/// Per-request failures. Callers in `fetch` swallow these and log them.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("http {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid json: {0}")]
    Decode(#[from] serde_json::Error),
}
