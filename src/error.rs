use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EzError>;

#[derive(Debug, Error)]
pub enum EzError {
    /// HTTP 429 from the completion service. Retried internally.
    #[error("rate limited by remote service")]
    RateLimited,

    #[error("max retries reached after {attempts} rate-limited attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("remote service error ({status}): {body}")]
    RemoteService { status: StatusCode, body: String },

    #[error("message produced no chunks within the length limit")]
    EmptyChunkSet,

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EzError {
    /// Map a non-success HTTP status to its error kind.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        if status == StatusCode::TOO_MANY_REQUESTS {
            Self::RateLimited
        } else {
            Self::RemoteService { status, body }
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited)
    }
}
