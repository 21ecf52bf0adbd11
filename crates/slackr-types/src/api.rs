use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ChannelId, MessageId, ReactId, Timestamp, UserId};

// -- Session token claims --

/// Claims carried by every session token. `jti` names the registry binding,
/// so two logins in the same second still yield distinct tokens. There is no
/// expiry: a token is good for exactly as long as its binding exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub uid: UserId,
    pub jti: Uuid,
}

// -- Auth --

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub u_id: UserId,
    pub token: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LogoutResponse {
    pub is_success: bool,
}

// -- Users --

/// Public view of a user, as listed in channel owner/member lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberSummary {
    pub u_id: UserId,
    pub name_first: String,
    pub name_last: String,
    pub profile_img_url: String,
}

/// Full profile, returned by profile lookups only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub u_id: UserId,
    pub email: String,
    pub name_first: String,
    pub name_last: String,
    pub handle_str: String,
    pub profile_img_url: String,
}

// -- Channels --

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelSummary {
    pub channel_id: ChannelId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChannelDetails {
    pub name: String,
    pub owner_members: Vec<MemberSummary>,
    pub all_members: Vec<MemberSummary>,
}

// -- Messages --

#[derive(Debug, Clone, Serialize)]
pub struct ReactRecord {
    pub react_id: ReactId,
    pub u_ids: Vec<UserId>,
    pub is_this_user_reacted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageRecord {
    pub message_id: MessageId,
    pub u_id: UserId,
    pub message: String,
    pub time_created: Timestamp,
    pub reacts: Vec<ReactRecord>,
    pub is_pinned: bool,
}

/// One page of a channel's history, newest first. `end` is -1 when there is
/// nothing further to load.
#[derive(Debug, Clone, Serialize)]
pub struct MessagesPage {
    pub messages: Vec<MessageRecord>,
    pub start: usize,
    pub end: i64,
}
