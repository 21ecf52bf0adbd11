pub mod access;
pub mod admin;
pub mod auth;
pub mod channel;
pub mod channels;
pub mod config;
pub mod error;
pub mod message;
pub mod reactions;
pub mod search;
pub mod state;
pub mod user;
pub mod users;
pub mod workspace;

pub use error::{ApiError, ApiResult};
pub use state::{AppState, AppStateInner};
