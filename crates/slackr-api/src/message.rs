use slackr_db::DataStore;
use slackr_db::ids::EntityKind;
use slackr_types::models::{ChannelId, Message, MessageId, Timestamp, UserId};
use tracing::{debug, info};

use crate::access::{can_modify_message, require_auth};
use crate::auth::check_length;
use crate::error::{ApiError, ApiResult};
use crate::state::{AppStateInner, now};

#[tracing::instrument(skip(state, token, message))]
pub fn message_send(
    state: &AppStateInner,
    token: &str,
    channel_id: ChannelId,
    message: &str,
) -> ApiResult<MessageId> {
    state.db.with_store(|store| {
        let actor = require_auth(store, &state.config, token)?;
        check_message_length(state, message)?;
        ensure_member(store, channel_id, actor)?;

        let message_id = post(store, channel_id, actor, message, now());
        info!(actor, message_id, "Message sent");
        Ok(message_id)
    })
}

/// Stores the message now but keeps it out of every read until `time_sent`.
#[tracing::instrument(skip(state, token, message))]
pub fn message_send_later(
    state: &AppStateInner,
    token: &str,
    channel_id: ChannelId,
    message: &str,
    time_sent: Timestamp,
) -> ApiResult<MessageId> {
    state.db.with_store(|store| {
        let actor = require_auth(store, &state.config, token)?;
        check_message_length(state, message)?;
        ensure_member(store, channel_id, actor)?;

        if time_sent < now() {
            return Err(ApiError::input("time sent is in the past"));
        }

        let message_id = post(store, channel_id, actor, message, time_sent);
        info!(actor, message_id, time_sent, "Message scheduled");
        Ok(message_id)
    })
}

/// Editing a message down to nothing removes it.
#[tracing::instrument(skip(state, token, message))]
pub fn message_edit(
    state: &AppStateInner,
    token: &str,
    message_id: MessageId,
    message: &str,
) -> ApiResult<()> {
    state.db.with_store(|store| {
        let actor = require_auth(store, &state.config, token)?;
        ensure_can_modify(store, message_id, actor)?;
        check_message_length(state, message)?;

        if message.is_empty() {
            store.remove_message(message_id);
            info!(actor, "Message removed by empty edit");
            return Ok(());
        }

        if let Some(existing) = store.get_message_mut(message_id) {
            existing.content = message.to_string();
        }
        info!(actor, "Message edited");
        Ok(())
    })
}

#[tracing::instrument(skip(state, token))]
pub fn message_remove(state: &AppStateInner, token: &str, message_id: MessageId) -> ApiResult<()> {
    state.db.with_store(|store| {
        let actor = require_auth(store, &state.config, token)?;
        ensure_can_modify(store, message_id, actor)?;

        store.remove_message(message_id);
        info!(actor, "Message removed");
        Ok(())
    })
}

fn check_message_length(state: &AppStateInner, message: &str) -> ApiResult<()> {
    check_length(message, "message", 0, state.config.message_max_len)
}

fn ensure_member(store: &DataStore, channel_id: ChannelId, user_id: UserId) -> ApiResult<()> {
    if !store.get_channel(channel_id)?.has_member(user_id) {
        return Err(ApiError::access("user is not in the channel"));
    }
    Ok(())
}

/// Missing message is an input fault; a caller who is neither the author nor
/// able to moderate the channel is an access fault.
fn ensure_can_modify(store: &DataStore, message_id: MessageId, user_id: UserId) -> ApiResult<()> {
    let message = store
        .get_message(message_id)
        .ok_or_else(|| ApiError::input("message does not exist"))?;
    let channel = store.get_channel(message.channel_id)?;

    if !can_modify_message(store, channel, message, user_id) {
        debug!(user_id, "Rejected modification of another user's message");
        return Err(ApiError::access(
            "only the author or an owner can change this message",
        ));
    }
    Ok(())
}

fn post(
    store: &mut DataStore,
    channel_id: ChannelId,
    author_id: UserId,
    content: &str,
    time_created: Timestamp,
) -> MessageId {
    let message_id = store.generate_id(EntityKind::Message);
    store.insert_message(Message::new(
        message_id,
        channel_id,
        author_id,
        content.to_string(),
        time_created,
    ));
    message_id
}
