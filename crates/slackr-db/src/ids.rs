use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Channel,
    Message,
}

/// Per-kind monotonic counters. Ids start at 1 and are never handed out twice
/// for the lifetime of the generator.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: HashMap<EntityKind, u32>,
}

impl IdGenerator {
    pub fn generate(&mut self, kind: EntityKind) -> u32 {
        let next = self.next.entry(kind).or_insert(1);
        let id = *next;
        *next += 1;
        id
    }
}
