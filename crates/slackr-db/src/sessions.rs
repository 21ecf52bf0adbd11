use std::collections::HashMap;

use slackr_types::models::UserId;
use uuid::Uuid;

/// Maps live session ids to the user they were issued for. A user may hold
/// any number of sessions at once.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<Uuid, UserId>,
}

impl SessionRegistry {
    /// Mints a fresh session id bound to `user_id`.
    pub fn login(&mut self, user_id: UserId) -> Uuid {
        let session_id = Uuid::new_v4();
        self.sessions.insert(session_id, user_id);
        session_id
    }

    /// Returns false when there was nothing to remove.
    pub fn logout(&mut self, session_id: &Uuid) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    pub fn resolve(&self, session_id: &Uuid) -> Option<UserId> {
        self.sessions.get(session_id).copied()
    }

    pub fn revoke_user(&mut self, user_id: UserId) {
        self.sessions.retain(|_, &mut owner| owner != user_id);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
