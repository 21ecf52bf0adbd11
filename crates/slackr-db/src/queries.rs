use slackr_types::models::{
    Channel, ChannelId, Message, MessageId, SYSTEM_EMAIL, SYSTEM_HANDLE, Timestamp, User, UserId,
};
use tracing::debug;

use crate::DataStore;
use crate::error::StoreError;

impl DataStore {
    // -- Users --

    pub fn insert_user(&mut self, user: User) {
        self.users.insert(user.id, user);
    }

    pub fn get_user(&self, id: UserId) -> Result<&User, StoreError> {
        self.users.get(&id).ok_or(StoreError::UserNotFound(id))
    }

    pub fn get_user_mut(&mut self, id: UserId) -> Result<&mut User, StoreError> {
        self.users.get_mut(&id).ok_or(StoreError::UserNotFound(id))
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|u| u.email == email)
    }

    /// The system user's address counts as taken.
    pub fn email_in_use(&self, email: &str) -> bool {
        email == SYSTEM_EMAIL || self.user_by_email(email).is_some()
    }

    /// The system user's handle counts as taken.
    pub fn handle_in_use(&self, handle: &str) -> bool {
        handle == SYSTEM_HANDLE || self.users.values().any(|u| u.handle == handle)
    }

    /// Erases a user and everything that refers to them: authored messages,
    /// channel membership and ownership, global ownership, live sessions and
    /// pending reset codes. The only failure is an unknown id, checked before
    /// anything is touched.
    pub fn remove_user(&mut self, id: UserId) -> Result<(), StoreError> {
        self.get_user(id)?;

        let before = self.messages.len();
        self.messages.retain(|_, m| m.author_id != id);
        let removed_messages = before - self.messages.len();

        for channel in self.channels.values_mut() {
            channel.remove_member(id);
        }
        self.global_owners.retain(|&owner| owner != id);
        self.sessions.revoke_user(id);
        self.reset_codes.retain(|_, &mut owner| owner != id);
        self.users.remove(&id);

        debug!(user_id = id, removed_messages, "User removed from store");
        Ok(())
    }

    // -- Global owners --

    pub fn is_global_owner(&self, id: UserId) -> bool {
        self.global_owners.contains(&id)
    }

    pub fn global_owners(&self) -> &[UserId] {
        &self.global_owners
    }

    pub fn add_global_owner(&mut self, id: UserId) {
        if !self.is_global_owner(id) {
            self.global_owners.push(id);
        }
    }

    pub fn remove_global_owner(&mut self, id: UserId) {
        self.global_owners.retain(|&owner| owner != id);
    }

    // -- Channels --

    pub fn insert_channel(&mut self, channel: Channel) {
        self.channels.insert(channel.id, channel);
    }

    pub fn get_channel(&self, id: ChannelId) -> Result<&Channel, StoreError> {
        self.channels.get(&id).ok_or(StoreError::ChannelNotFound(id))
    }

    pub fn get_channel_mut(&mut self, id: ChannelId) -> Result<&mut Channel, StoreError> {
        self.channels.get_mut(&id).ok_or(StoreError::ChannelNotFound(id))
    }

    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }

    // -- Messages --

    pub fn insert_message(&mut self, message: Message) {
        self.messages.insert(message.id, message);
    }

    /// Absent rather than an error: each caller decides what a missing
    /// message means for its own contract.
    pub fn get_message(&self, id: MessageId) -> Option<&Message> {
        self.messages.get(&id)
    }

    pub fn get_message_mut(&mut self, id: MessageId) -> Option<&mut Message> {
        self.messages.get_mut(&id)
    }

    pub fn remove_message(&mut self, id: MessageId) -> Option<Message> {
        self.messages.remove(&id)
    }

    /// Messages of one channel that are visible at `now`, newest first. Ties
    /// on the timestamp fall back to the id, so later sends still sort first.
    pub fn channel_messages(&self, channel_id: ChannelId, now: Timestamp) -> Vec<&Message> {
        let mut messages: Vec<&Message> = self
            .messages
            .values()
            .filter(|m| m.channel_id == channel_id && m.is_visible_at(now))
            .collect();

        messages.sort_by(|a, b| {
            b.time_created
                .cmp(&a.time_created)
                .then_with(|| b.id.cmp(&a.id))
        });
        messages
    }

    // -- Password reset codes --

    pub fn reset_code_in_use(&self, code: &str) -> bool {
        self.reset_codes.contains_key(code)
    }

    pub fn insert_reset_code(&mut self, code: String, user_id: UserId) {
        self.reset_codes.insert(code, user_id);
    }

    pub fn reset_code_owner(&self, code: &str) -> Option<UserId> {
        self.reset_codes.get(code).copied()
    }

    /// Consumes the code, returning who it was issued to.
    pub fn take_reset_code(&mut self, code: &str) -> Option<UserId> {
        self.reset_codes.remove(code)
    }
}
