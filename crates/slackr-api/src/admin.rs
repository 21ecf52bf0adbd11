use slackr_types::models::UserId;
use tracing::{info, warn};

use crate::access::{is_global_owner, require_auth};
use crate::error::{ApiError, ApiResult};
use crate::state::AppStateInner;

/// Workspace-wide permission levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Owner,
    Member,
}

impl TryFrom<u32> for Permission {
    type Error = ApiError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Self::Owner),
            2 => Ok(Self::Member),
            _ => Err(ApiError::input("permission ID is not valid")),
        }
    }
}

#[tracing::instrument(skip(state, token))]
pub fn admin_userpermission_change(
    state: &AppStateInner,
    token: &str,
    u_id: UserId,
    permission_id: u32,
) -> ApiResult<()> {
    let permission = Permission::try_from(permission_id)?;

    state.db.with_store(|store| {
        let actor = require_auth(store, &state.config, token)?;
        if !is_global_owner(store, actor) {
            return Err(ApiError::access("only workspace owners can change permissions"));
        }
        store.get_user(u_id)?;

        match permission {
            Permission::Owner => store.add_global_owner(u_id),
            Permission::Member => store.remove_global_owner(u_id),
        }

        info!(actor, ?permission, "Workspace permission changed");
        Ok(())
    })
}

/// Removes a user and everything they authored or belonged to.
#[tracing::instrument(skip(state, token))]
pub fn admin_user_remove(state: &AppStateInner, token: &str, u_id: UserId) -> ApiResult<()> {
    state.db.with_store(|store| {
        let actor = require_auth(store, &state.config, token)?;
        store.get_user(u_id)?;
        if !is_global_owner(store, actor) {
            return Err(ApiError::access("only workspace owners can remove users"));
        }

        store.remove_user(u_id)?;
        warn!(actor, "User removed from workspace");
        Ok(())
    })
}
