use crate::error::ApiResult;
use crate::state::AppStateInner;

/// Wipes the workspace back to its initial state. Every outstanding token
/// stops resolving and ids start again from 1.
#[tracing::instrument(skip_all)]
pub fn workspace_reset(state: &AppStateInner) -> ApiResult<()> {
    state.db.with_store(|store| {
        store.reset();
        Ok(())
    })
}
