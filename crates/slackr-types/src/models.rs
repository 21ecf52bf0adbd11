use std::collections::BTreeMap;

use crate::api::{MemberSummary, MessageRecord, ReactRecord, UserProfile};

pub type UserId = u32;
pub type ChannelId = u32;
pub type MessageId = u32;
pub type ReactId = u32;

/// Epoch seconds.
pub type Timestamp = i64;

pub const HANDLE_MAX_LENGTH: usize = 20;

// -- Reserved system user --
//
// Bot messages are attributed to this virtual user. Its email and handle are
// reserved so no registered user can collide with it.

pub const SYSTEM_USER_ID: UserId = 0;
pub const SYSTEM_EMAIL: &str = "hangman@slackr.com.au";
pub const SYSTEM_HANDLE: &str = "hangman";
pub const SYSTEM_NAME_FIRST: &str = "Hangman";
pub const SYSTEM_NAME_LAST: &str = "Bot";
pub const SYSTEM_AVATAR_URL: &str = "https://visualpharm.com/assets/825/Bot-595b40b65ba036ed117d3818.svg";

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: String,
    /// Argon2 PHC string, never the plaintext.
    pub password_hash: String,
    pub name_first: String,
    pub name_last: String,
    pub handle: String,
    pub profile_img_url: String,
}

impl User {
    pub fn summary(&self) -> MemberSummary {
        MemberSummary {
            u_id: self.id,
            name_first: self.name_first.clone(),
            name_last: self.name_last.clone(),
            profile_img_url: self.profile_img_url.clone(),
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            u_id: self.id,
            email: self.email.clone(),
            name_first: self.name_first.clone(),
            name_last: self.name_last.clone(),
            handle_str: self.handle.clone(),
            profile_img_url: self.profile_img_url.clone(),
        }
    }
}

/// Owners are always a subset of members; both keep insertion order.
#[derive(Debug, Clone)]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
    pub is_public: bool,
    owners: Vec<UserId>,
    members: Vec<UserId>,
}

impl Channel {
    /// A fresh channel with `creator` as its only member and owner.
    pub fn new(id: ChannelId, name: String, is_public: bool, creator: UserId) -> Self {
        Self {
            id,
            name,
            is_public,
            owners: vec![creator],
            members: vec![creator],
        }
    }

    pub fn owners(&self) -> &[UserId] {
        &self.owners
    }

    pub fn members(&self) -> &[UserId] {
        &self.members
    }

    pub fn has_member(&self, user_id: UserId) -> bool {
        self.members.contains(&user_id)
    }

    pub fn has_owner(&self, user_id: UserId) -> bool {
        self.owners.contains(&user_id)
    }

    pub fn add_member(&mut self, user_id: UserId) {
        if !self.has_member(user_id) {
            self.members.push(user_id);
        }
    }

    /// Removes the user entirely, demoting them first if they were an owner.
    pub fn remove_member(&mut self, user_id: UserId) {
        self.remove_owner(user_id);
        self.members.retain(|&id| id != user_id);
    }

    /// No-op for non-members so the owner set never escapes the member set.
    pub fn add_owner(&mut self, user_id: UserId) {
        if self.has_member(user_id) && !self.has_owner(user_id) {
            self.owners.push(user_id);
        }
    }

    pub fn remove_owner(&mut self, user_id: UserId) {
        self.owners.retain(|&id| id != user_id);
    }
}

#[derive(Debug, Clone)]
pub struct Message {
    pub id: MessageId,
    pub channel_id: ChannelId,
    pub author_id: UserId,
    pub content: String,
    /// May lie in the future for deferred messages.
    pub time_created: Timestamp,
    pub reacts: BTreeMap<ReactId, Vec<UserId>>,
    pub is_pinned: bool,
}

impl Message {
    pub fn new(
        id: MessageId,
        channel_id: ChannelId,
        author_id: UserId,
        content: String,
        time_created: Timestamp,
    ) -> Self {
        Self {
            id,
            channel_id,
            author_id,
            content,
            time_created,
            reacts: BTreeMap::new(),
            is_pinned: false,
        }
    }

    /// Deferred messages stay hidden until their timestamp has passed.
    pub fn is_visible_at(&self, now: Timestamp) -> bool {
        self.time_created <= now
    }

    pub fn has_reacted(&self, react_id: ReactId, user_id: UserId) -> bool {
        self.reacts
            .get(&react_id)
            .is_some_and(|users| users.contains(&user_id))
    }

    pub fn add_react(&mut self, react_id: ReactId, user_id: UserId) {
        let users = self.reacts.entry(react_id).or_default();
        if !users.contains(&user_id) {
            users.push(user_id);
        }
    }

    /// Drops the reaction kind altogether once nobody holds it.
    pub fn remove_react(&mut self, react_id: ReactId, user_id: UserId) {
        if let Some(users) = self.reacts.get_mut(&react_id) {
            users.retain(|&id| id != user_id);
            if users.is_empty() {
                self.reacts.remove(&react_id);
            }
        }
    }

    /// Flat record as seen by `viewer`.
    pub fn record(&self, viewer: UserId) -> MessageRecord {
        MessageRecord {
            message_id: self.id,
            u_id: self.author_id,
            message: self.content.clone(),
            time_created: self.time_created,
            reacts: self
                .reacts
                .iter()
                .map(|(&react_id, users)| ReactRecord {
                    react_id,
                    u_ids: users.clone(),
                    is_this_user_reacted: users.contains(&viewer),
                })
                .collect(),
            is_pinned: self.is_pinned,
        }
    }
}
