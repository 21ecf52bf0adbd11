use slackr_db::ids::EntityKind;
use slackr_types::api::ChannelSummary;
use slackr_types::models::{Channel, ChannelId};
use tracing::info;

use crate::access::require_auth;
use crate::auth::check_length;
use crate::error::ApiResult;
use crate::state::AppStateInner;

#[tracing::instrument(skip(state, token))]
pub fn channels_create(
    state: &AppStateInner,
    token: &str,
    name: &str,
    is_public: bool,
) -> ApiResult<ChannelId> {
    state.db.with_store(|store| {
        let u_id = require_auth(store, &state.config, token)?;
        check_length(name, "channel name", 0, state.config.channel_name_max_len)?;

        let channel_id = store.generate_id(EntityKind::Channel);
        store.insert_channel(Channel::new(channel_id, name.to_string(), is_public, u_id));

        info!(channel_id, u_id, "Channel created");
        Ok(channel_id)
    })
}

/// Channels the caller belongs to, in creation order.
#[tracing::instrument(skip_all)]
pub fn channels_list(state: &AppStateInner, token: &str) -> ApiResult<Vec<ChannelSummary>> {
    state.db.with_store(|store| {
        let u_id = require_auth(store, &state.config, token)?;
        Ok(store
            .channels()
            .filter(|channel| channel.has_member(u_id))
            .map(summary)
            .collect())
    })
}

/// Every channel, public or not.
#[tracing::instrument(skip_all)]
pub fn channels_listall(state: &AppStateInner, token: &str) -> ApiResult<Vec<ChannelSummary>> {
    state.db.with_store(|store| {
        require_auth(store, &state.config, token)?;
        Ok(store.channels().map(summary).collect())
    })
}

fn summary(channel: &Channel) -> ChannelSummary {
    ChannelSummary {
        channel_id: channel.id,
        name: channel.name.clone(),
    }
}
