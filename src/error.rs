use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Upstream returned status {0}")]
    UpstreamStatus(reqwest::StatusCode),
    #[error("Bad input: {0}")]
    BadInput(String),
    #[error("Selector error: {0}")]
    Selector(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StatsError {
    /// True when the failure came from the upstream site rather than
    /// from the caller's input.
    pub fn is_upstream(&self) -> bool {
        matches!(self, StatsError::Network(_) | StatsError::UpstreamStatus(_))
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
