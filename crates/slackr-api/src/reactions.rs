use slackr_db::DataStore;
use slackr_types::models::{Message, MessageId, ReactId, UserId};
use tracing::info;

use crate::access::require_auth;
use crate::error::{ApiError, ApiResult};
use crate::state::AppStateInner;

/// The only reaction kind there is.
pub const REACT_THUMBS_UP: ReactId = 1;

#[tracing::instrument(skip(state, token))]
pub fn message_react(
    state: &AppStateInner,
    token: &str,
    message_id: MessageId,
    react_id: ReactId,
) -> ApiResult<()> {
    state.db.with_store(|store| {
        let actor = require_auth(store, &state.config, token)?;
        check_react_id(react_id)?;

        let message = find_message(store, message_id)?;
        if message.has_reacted(react_id, actor) {
            return Err(ApiError::input("already reacted to this message"));
        }
        ensure_member(store, message, actor)?;

        message_mut(store, message_id)?.add_react(react_id, actor);
        info!(actor, "Reaction added");
        Ok(())
    })
}

#[tracing::instrument(skip(state, token))]
pub fn message_unreact(
    state: &AppStateInner,
    token: &str,
    message_id: MessageId,
    react_id: ReactId,
) -> ApiResult<()> {
    state.db.with_store(|store| {
        let actor = require_auth(store, &state.config, token)?;
        check_react_id(react_id)?;

        let message = find_message(store, message_id)?;
        ensure_member(store, message, actor)?;
        if !message.reacts.contains_key(&react_id) {
            return Err(ApiError::input("message has no reaction of that kind"));
        }
        if !message.has_reacted(react_id, actor) {
            return Err(ApiError::input("cannot remove a reaction you did not make"));
        }

        message_mut(store, message_id)?.remove_react(react_id, actor);
        info!(actor, "Reaction removed");
        Ok(())
    })
}

/// Any channel member may pin; no ownership needed.
#[tracing::instrument(skip(state, token))]
pub fn message_pin(state: &AppStateInner, token: &str, message_id: MessageId) -> ApiResult<()> {
    set_pinned(state, token, message_id, true)
}

#[tracing::instrument(skip(state, token))]
pub fn message_unpin(state: &AppStateInner, token: &str, message_id: MessageId) -> ApiResult<()> {
    set_pinned(state, token, message_id, false)
}

fn set_pinned(
    state: &AppStateInner,
    token: &str,
    message_id: MessageId,
    pinned: bool,
) -> ApiResult<()> {
    state.db.with_store(|store| {
        let actor = require_auth(store, &state.config, token)?;

        let message = find_message(store, message_id)?;
        ensure_member(store, message, actor)?;
        if message.is_pinned == pinned {
            let state_name = if pinned { "pinned" } else { "unpinned" };
            return Err(ApiError::input(format!("message is already {state_name}")));
        }

        message_mut(store, message_id)?.is_pinned = pinned;
        info!(actor, pinned, "Pin state changed");
        Ok(())
    })
}

fn check_react_id(react_id: ReactId) -> ApiResult<()> {
    if react_id != REACT_THUMBS_UP {
        return Err(ApiError::input("react ID is not valid"));
    }
    Ok(())
}

fn find_message(store: &DataStore, message_id: MessageId) -> ApiResult<&Message> {
    store
        .get_message(message_id)
        .ok_or_else(|| ApiError::input("message does not exist"))
}

fn message_mut(store: &mut DataStore, message_id: MessageId) -> ApiResult<&mut Message> {
    store
        .get_message_mut(message_id)
        .ok_or_else(|| ApiError::input("message does not exist"))
}

fn ensure_member(store: &DataStore, message: &Message, user_id: UserId) -> ApiResult<()> {
    if !store.get_channel(message.channel_id)?.has_member(user_id) {
        return Err(ApiError::access("user is not in the channel"));
    }
    Ok(())
}
