//! Session resolution and the authorization predicates the services share.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use slackr_db::DataStore;
use slackr_types::api::Claims;
use slackr_types::models::{Channel, Message, UserId};
use tracing::debug;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{ApiError, ApiResult};

/// Signs a session token for a registry binding.
pub(crate) fn create_token(config: &Config, user_id: UserId, session_id: Uuid) -> ApiResult<String> {
    let claims = Claims {
        uid: user_id,
        jti: session_id,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.token_secret.as_bytes()),
    )
    .map_err(|e| anyhow::anyhow!("Token signing failed: {e}"))?;

    Ok(token)
}

/// `None` for anything that is not a well-formed, correctly signed token.
/// Lifetime is not checked here: a session lasts until its binding is removed.
pub(crate) fn decode_claims(config: &Config, token: &str) -> Option<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.token_secret.as_bytes()),
        &validation(),
    )
    .ok()
    .map(|data| data.claims)
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();
    validation
}

/// Resolves a token to the user its session is bound to.
///
/// With `required` set, an unbound token is an access fault; otherwise it
/// resolves to `None` so read-only callers can treat it as "nobody".
pub fn resolve(
    store: &DataStore,
    config: &Config,
    token: &str,
    required: bool,
) -> ApiResult<Option<UserId>> {
    let bound = decode_claims(config, token).and_then(|claims| {
        store
            .sessions()
            .resolve(&claims.jti)
            .filter(|&user_id| user_id == claims.uid)
    });

    match bound {
        Some(user_id) => Ok(Some(user_id)),
        None if required => {
            debug!("Rejected unbound session token");
            Err(ApiError::access("invalid token"))
        }
        None => Ok(None),
    }
}

pub fn require_auth(store: &DataStore, config: &Config, token: &str) -> ApiResult<UserId> {
    resolve(store, config, token, true)?.ok_or_else(|| ApiError::access("invalid token"))
}

pub fn authorized_user(store: &DataStore, config: &Config, token: &str) -> Option<UserId> {
    resolve(store, config, token, false).ok().flatten()
}

// -- Authorization rules --

pub fn is_global_owner(store: &DataStore, user_id: UserId) -> bool {
    store.is_global_owner(user_id)
}

/// Channel owners and workspace owners may manage a channel's owners.
pub fn can_moderate(store: &DataStore, channel: &Channel, user_id: UserId) -> bool {
    channel.has_owner(user_id) || is_global_owner(store, user_id)
}

/// Edit and remove: the author, or anyone who can moderate the channel.
pub fn can_modify_message(
    store: &DataStore,
    channel: &Channel,
    message: &Message,
    user_id: UserId,
) -> bool {
    message.author_id == user_id || can_moderate(store, channel, user_id)
}
