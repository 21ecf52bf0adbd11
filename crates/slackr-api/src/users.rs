use slackr_types::api::UserProfile;

use crate::access::authorized_user;
use crate::error::ApiResult;
use crate::state::AppStateInner;

/// Every registered user's full profile, in registration order. Callers
/// without a live session get an empty list.
#[tracing::instrument(skip_all)]
pub fn users_all(state: &AppStateInner, token: &str) -> ApiResult<Vec<UserProfile>> {
    state.db.with_store(|store| {
        if authorized_user(store, &state.config, token).is_none() {
            return Ok(Vec::new());
        }
        Ok(store.users().map(|user| user.profile()).collect())
    })
}
