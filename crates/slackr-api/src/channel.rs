//! Membership, ownership and history of a single channel.
//!
//! Every operation resolves the caller first, then the users and channel it
//! names, then applies its own rules in a fixed order, so the same request
//! always fails with the same fault.

use slackr_db::DataStore;
use slackr_types::api::{ChannelDetails, MemberSummary, MessagesPage};
use slackr_types::models::{ChannelId, UserId};
use tracing::{debug, info};

use crate::access::{can_moderate, is_global_owner, require_auth};
use crate::error::{ApiError, ApiResult};
use crate::state::{AppStateInner, now};

#[tracing::instrument(skip(state, token))]
pub fn channel_invite(
    state: &AppStateInner,
    token: &str,
    channel_id: ChannelId,
    u_id: UserId,
) -> ApiResult<()> {
    state.db.with_store(|store| {
        let actor = require_auth(store, &state.config, token)?;
        store.get_user(u_id)?;
        let channel = store.get_channel(channel_id)?;

        if channel.has_member(u_id) {
            return Err(ApiError::input("user is already in the channel"));
        }
        if !channel.has_member(actor) {
            return Err(ApiError::access("only channel members can invite"));
        }

        store.get_channel_mut(channel_id)?.add_member(u_id);
        info!(actor, "User invited to channel");
        Ok(())
    })
}

/// Public channels are open to anyone; private ones only to workspace owners.
#[tracing::instrument(skip(state, token))]
pub fn channel_join(state: &AppStateInner, token: &str, channel_id: ChannelId) -> ApiResult<()> {
    state.db.with_store(|store| {
        let actor = require_auth(store, &state.config, token)?;
        let channel = store.get_channel(channel_id)?;

        if !channel.is_public && !is_global_owner(store, actor) {
            return Err(ApiError::access("channel is private"));
        }
        if channel.has_member(actor) {
            return Err(ApiError::input("user is already in the channel"));
        }

        store.get_channel_mut(channel_id)?.add_member(actor);
        info!(actor, "User joined channel");
        Ok(())
    })
}

/// Owners have to be demoted before they can leave.
#[tracing::instrument(skip(state, token))]
pub fn channel_leave(state: &AppStateInner, token: &str, channel_id: ChannelId) -> ApiResult<()> {
    state.db.with_store(|store| {
        let actor = require_auth(store, &state.config, token)?;
        let channel = store.get_channel(channel_id)?;

        if !channel.has_member(actor) {
            return Err(ApiError::access("user is not in the channel"));
        }
        if channel.has_owner(actor) {
            return Err(ApiError::input("owners cannot leave the channel"));
        }

        store.get_channel_mut(channel_id)?.remove_member(actor);
        info!(actor, "User left channel");
        Ok(())
    })
}

#[tracing::instrument(skip(state, token))]
pub fn channel_addowner(
    state: &AppStateInner,
    token: &str,
    channel_id: ChannelId,
    u_id: UserId,
) -> ApiResult<()> {
    state.db.with_store(|store| {
        let actor = require_auth(store, &state.config, token)?;
        store.get_user(u_id)?;
        let channel = store.get_channel(channel_id)?;

        if !channel.has_member(u_id) {
            return Err(ApiError::input("user is not in the channel"));
        }
        if !can_moderate(store, channel, actor) {
            return Err(ApiError::access("only owners can change channel ownership"));
        }
        if channel.has_owner(u_id) {
            return Err(ApiError::input("user is already an owner of the channel"));
        }

        store.get_channel_mut(channel_id)?.add_owner(u_id);
        info!(actor, "Channel owner added");
        Ok(())
    })
}

/// The demoted user stays a member.
#[tracing::instrument(skip(state, token))]
pub fn channel_removeowner(
    state: &AppStateInner,
    token: &str,
    channel_id: ChannelId,
    u_id: UserId,
) -> ApiResult<()> {
    state.db.with_store(|store| {
        let actor = require_auth(store, &state.config, token)?;
        store.get_user(u_id)?;
        let channel = store.get_channel(channel_id)?;

        if !channel.has_member(u_id) {
            return Err(ApiError::input("user is not in the channel"));
        }
        if !can_moderate(store, channel, actor) {
            return Err(ApiError::access("only owners can change channel ownership"));
        }
        if !channel.has_owner(u_id) {
            return Err(ApiError::input("user is not an owner of the channel"));
        }

        store.get_channel_mut(channel_id)?.remove_owner(u_id);
        info!(actor, "Channel owner removed");
        Ok(())
    })
}

#[tracing::instrument(skip(state, token))]
pub fn channel_details(
    state: &AppStateInner,
    token: &str,
    channel_id: ChannelId,
) -> ApiResult<ChannelDetails> {
    state.db.with_store(|store| {
        let actor = require_auth(store, &state.config, token)?;
        let channel = store.get_channel(channel_id)?;

        if !channel.has_member(actor) {
            return Err(ApiError::access("user is not in the channel"));
        }

        Ok(ChannelDetails {
            name: channel.name.clone(),
            owner_members: summaries(store, channel.owners())?,
            all_members: summaries(store, channel.members())?,
        })
    })
}

/// One page of visible history, newest first, starting `start` messages back.
#[tracing::instrument(skip(state, token))]
pub fn channel_messages(
    state: &AppStateInner,
    token: &str,
    channel_id: ChannelId,
    start: usize,
) -> ApiResult<MessagesPage> {
    let page_size = state.config.page_size;

    state.db.with_store(|store| {
        let actor = require_auth(store, &state.config, token)?;
        let channel = store.get_channel(channel_id)?;

        if !channel.has_member(actor) {
            return Err(ApiError::access("user is not in the channel"));
        }

        let history = store.channel_messages(channel_id, now());
        let count = history.len();

        // An empty channel still has a first page.
        if start >= count && !(count == 0 && start == 0) {
            debug!(count, "Rejected out-of-range history start");
            return Err(ApiError::input("start is not valid"));
        }

        let end = start + page_size;
        let end = if end >= count { -1 } else { end as i64 };

        let messages = history
            .iter()
            .skip(start)
            .take(page_size)
            .map(|message| message.record(actor))
            .collect();

        Ok(MessagesPage {
            messages,
            start,
            end,
        })
    })
}

fn summaries(store: &DataStore, ids: &[UserId]) -> ApiResult<Vec<MemberSummary>> {
    ids.iter()
        .map(|&id| {
            store
                .get_user(id)
                .map(|user| user.summary())
                .map_err(ApiError::from)
        })
        .collect()
}
