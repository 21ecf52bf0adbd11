use slackr_db::StoreError;
use thiserror::Error;

/// Every service failure is either the caller's input or the caller's
/// permissions; `Internal` covers faults in the machinery underneath.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Input error: {0}")]
    Input(String),

    #[error("Access error: {0}")]
    Access(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn input(description: impl Into<String>) -> Self {
        Self::Input(description.into())
    }

    pub fn access(description: impl Into<String>) -> Self {
        Self::Access(description.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UserNotFound(_) | StoreError::ChannelNotFound(_) => {
                Self::Input(err.to_string())
            }
            StoreError::LockPoisoned => Self::Internal(anyhow::anyhow!(err)),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
