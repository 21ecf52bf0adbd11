use slackr_types::api::UserProfile;
use slackr_types::models::{
    HANDLE_MAX_LENGTH, SYSTEM_AVATAR_URL, SYSTEM_EMAIL, SYSTEM_HANDLE, SYSTEM_NAME_FIRST,
    SYSTEM_NAME_LAST, SYSTEM_USER_ID, UserId,
};
use tracing::info;

use crate::access::require_auth;
use crate::auth::{NAME_MAX_LENGTH, NAME_MIN_LENGTH, check_length, email_valid};
use crate::error::{ApiError, ApiResult};
use crate::state::AppStateInner;

pub const HANDLE_MIN_LENGTH: usize = 2;

/// Full profile of any user. Id 0 is the built-in bot account, which has no
/// row in the store.
#[tracing::instrument(skip(state, token))]
pub fn user_profile(state: &AppStateInner, token: &str, u_id: UserId) -> ApiResult<UserProfile> {
    state.db.with_store(|store| {
        require_auth(store, &state.config, token)?;

        if u_id == SYSTEM_USER_ID {
            return Ok(system_profile());
        }
        Ok(store.get_user(u_id)?.profile())
    })
}

#[tracing::instrument(skip(state, token))]
pub fn user_profile_setname(
    state: &AppStateInner,
    token: &str,
    name_first: &str,
    name_last: &str,
) -> ApiResult<UserProfile> {
    state.db.with_store(|store| {
        let u_id = require_auth(store, &state.config, token)?;
        check_length(name_first, "first name", NAME_MIN_LENGTH, NAME_MAX_LENGTH)?;
        check_length(name_last, "last name", NAME_MIN_LENGTH, NAME_MAX_LENGTH)?;

        let user = store.get_user_mut(u_id)?;
        user.name_first = name_first.to_string();
        user.name_last = name_last.to_string();

        info!(u_id, "Name updated");
        Ok(user.profile())
    })
}

#[tracing::instrument(skip_all)]
pub fn user_profile_setemail(
    state: &AppStateInner,
    token: &str,
    email: &str,
) -> ApiResult<UserProfile> {
    state.db.with_store(|store| {
        let u_id = require_auth(store, &state.config, token)?;

        if !email_valid(email) {
            return Err(ApiError::input("email is not valid"));
        }
        if store.email_in_use(email) {
            return Err(ApiError::input("email is already in use"));
        }

        let user = store.get_user_mut(u_id)?;
        user.email = email.to_string();

        info!(u_id, "Email updated");
        Ok(user.profile())
    })
}

#[tracing::instrument(skip(state, token))]
pub fn user_profile_sethandle(
    state: &AppStateInner,
    token: &str,
    handle_str: &str,
) -> ApiResult<UserProfile> {
    state.db.with_store(|store| {
        let u_id = require_auth(store, &state.config, token)?;
        check_length(handle_str, "handle", HANDLE_MIN_LENGTH, HANDLE_MAX_LENGTH)?;

        if store.handle_in_use(handle_str) {
            return Err(ApiError::input("handle is already taken"));
        }

        let user = store.get_user_mut(u_id)?;
        user.handle = handle_str.to_string();

        info!(u_id, "Handle updated");
        Ok(user.profile())
    })
}

fn system_profile() -> UserProfile {
    UserProfile {
        u_id: SYSTEM_USER_ID,
        email: SYSTEM_EMAIL.to_string(),
        name_first: SYSTEM_NAME_FIRST.to_string(),
        name_last: SYSTEM_NAME_LAST.to_string(),
        handle_str: SYSTEM_HANDLE.to_string(),
        profile_img_url: SYSTEM_AVATAR_URL.to_string(),
    }
}
