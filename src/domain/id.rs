use std::str::FromStr;

use super::contact::ContactId;
use super::*;
use tracing::{debug, warn};

/// Which kind of identifier new contacts receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdPolicy {
    #[default]
    Sequential,
    Random,
}

impl FromStr for IdPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" | "seq" => Ok(IdPolicy::Sequential),
            "uuid" | "random" => Ok(IdPolicy::Random),
            other => Err(AppError::Config(format!(
                "'{other}' is not an id policy (sequential, uuid)"
            ))),
        }
    }
}

/// Hands out ids that are unique within one collection.
///
/// The sequential counter starts after the largest integer id seen and
/// never goes back, so removed ids are not reused. Once the counter is
/// exhausted new contacts get random ids instead. Random ids are
/// regenerated on the (unlikely) collision with an id already taken.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    policy: IdPolicy,
    next_seq: u64,
}

impl IdAllocator {
    pub fn new(policy: IdPolicy) -> Self {
        Self {
            policy,
            next_seq: 0,
        }
    }

    pub fn seeded<'a>(policy: IdPolicy, existing: impl IntoIterator<Item = &'a ContactId>) -> Self {
        let mut allocator = Self::new(policy);
        for id in existing {
            allocator.observe(id);
        }
        allocator
    }

    /// Moves the counter past `id` if it is a larger integer id.
    pub fn observe(&mut self, id: &ContactId) {
        if let ContactId::Seq(n) = id {
            self.next_seq = self.next_seq.max(n.saturating_add(1));
        }
    }

    pub fn allocate(&mut self, taken: impl Fn(&ContactId) -> bool) -> ContactId {
        loop {
            let id = match self.policy {
                IdPolicy::Sequential => match self.next_seq.checked_add(1) {
                    Some(next) => {
                        let id = ContactId::Seq(self.next_seq);
                        self.next_seq = next;
                        id
                    }
                    None => {
                        warn!("sequential ids exhausted, using a random id");
                        ContactId::Uuid(Uuid::new_v4())
                    }
                },
                IdPolicy::Random => ContactId::Uuid(Uuid::new_v4()),
            };

            if !taken(&id) {
                return id;
            }
            debug!(%id, "generated id already taken, regenerating");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_starts_at_zero_for_empty_collection() {
        let mut ids = IdAllocator::seeded(IdPolicy::Sequential, &Vec::<ContactId>::new());

        assert_eq!(ids.allocate(|_| false), ContactId::Seq(0));
        assert_eq!(ids.allocate(|_| false), ContactId::Seq(1));
    }

    #[test]
    fn sequential_continues_after_largest_existing_id() {
        let existing = [
            ContactId::Seq(3),
            ContactId::Uuid(Uuid::new_v4()),
            ContactId::Seq(11),
            ContactId::Seq(7),
        ];
        let mut ids = IdAllocator::seeded(IdPolicy::Sequential, &existing);

        assert_eq!(ids.allocate(|_| false), ContactId::Seq(12));
    }

    #[test]
    fn taken_ids_are_skipped() {
        let mut ids = IdAllocator::new(IdPolicy::Sequential);
        let taken = [ContactId::Seq(0), ContactId::Seq(1)];

        assert_eq!(ids.allocate(|id| taken.contains(id)), ContactId::Seq(2));
    }

    #[test]
    fn exhausted_counter_falls_back_to_random_ids() {
        let existing = [ContactId::Seq(u64::MAX)];
        let mut ids = IdAllocator::seeded(IdPolicy::Sequential, &existing);

        let first = ids.allocate(|id| existing.contains(id));
        let second = ids.allocate(|id| id == &first);

        assert!(matches!(first, ContactId::Uuid(_)));
        assert!(matches!(second, ContactId::Uuid(_)));
        assert_ne!(first, second);
    }

    #[test]
    fn counter_hands_out_the_last_value_before_falling_back() {
        let mut ids = IdAllocator::seeded(IdPolicy::Sequential, &[ContactId::Seq(u64::MAX - 2)]);

        assert_eq!(ids.allocate(|_| false), ContactId::Seq(u64::MAX - 1));
        assert!(matches!(ids.allocate(|_| false), ContactId::Uuid(_)));
    }

    #[test]
    fn random_policy_yields_v4_uuids() {
        let mut ids = IdAllocator::new(IdPolicy::Random);

        match ids.allocate(|_| false) {
            ContactId::Uuid(id) => assert_eq!(id.get_version_num(), 4),
            other => panic!("expected uuid, got {other}"),
        }
    }

    #[test]
    fn policy_parses_from_config_strings() {
        assert_eq!("uuid".parse::<IdPolicy>().ok(), Some(IdPolicy::Random));
        assert_eq!(" Sequential ".parse::<IdPolicy>().ok(), Some(IdPolicy::Sequential));
        assert!("counter".parse::<IdPolicy>().is_err());
    }
}
