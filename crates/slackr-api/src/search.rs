use slackr_types::api::MessageRecord;
use tracing::debug;

use crate::access::authorized_user;
use crate::error::ApiResult;
use crate::state::{AppStateInner, now};

/// Case-insensitive substring search over every channel's visible messages.
///
/// Results are grouped by channel in creation order, newest first within each
/// channel. An unresolvable token or a blank query finds nothing rather than
/// failing.
#[tracing::instrument(skip(state, token, query))]
pub fn search(state: &AppStateInner, token: &str, query: &str) -> ApiResult<Vec<MessageRecord>> {
    let query = normalize_query(query);

    state.db.with_store(|store| {
        let Some(viewer) = authorized_user(store, &state.config, token) else {
            debug!("Search without a valid session");
            return Ok(Vec::new());
        };
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let store = &*store;
        let now = now();
        let results: Vec<MessageRecord> = store
            .channels()
            .flat_map(|channel| store.channel_messages(channel.id, now))
            .filter(|message| message.content.to_lowercase().contains(&query))
            .map(|message| message.record(viewer))
            .collect();

        debug!(matches = results.len(), "Search complete");
        Ok(results)
    })
}

fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}
