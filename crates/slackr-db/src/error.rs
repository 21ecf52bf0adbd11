use slackr_types::models::{ChannelId, UserId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid user ID: {0}")]
    UserNotFound(UserId),

    #[error("invalid channel ID: {0}")]
    ChannelNotFound(ChannelId),

    #[error("data store lock poisoned")]
    LockPoisoned,
}
