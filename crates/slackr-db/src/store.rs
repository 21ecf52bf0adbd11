use std::collections::{BTreeMap, HashMap};

use slackr_types::models::{Channel, ChannelId, Message, MessageId, User, UserId};
use tracing::info;

use crate::ids::{EntityKind, IdGenerator};
use crate::sessions::SessionRegistry;

/// Every entity of one workspace. Collections are keyed by id, and since ids
/// only grow, iteration order is creation order.
#[derive(Debug, Default)]
pub struct DataStore {
    pub(crate) ids: IdGenerator,
    pub(crate) users: BTreeMap<UserId, User>,
    pub(crate) channels: BTreeMap<ChannelId, Channel>,
    pub(crate) messages: BTreeMap<MessageId, Message>,
    pub(crate) global_owners: Vec<UserId>,
    pub(crate) sessions: SessionRegistry,
    pub(crate) reset_codes: HashMap<String, UserId>,
}

impl DataStore {
    pub fn generate_id(&mut self, kind: EntityKind) -> u32 {
        self.ids.generate(kind)
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn sessions_mut(&mut self) -> &mut SessionRegistry {
        &mut self.sessions
    }

    /// Drops every entity, session and reset code and restarts all id counters.
    pub fn reset(&mut self) {
        *self = Self::default();
        info!("Data store reset");
    }
}
