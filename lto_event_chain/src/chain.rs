/// LTO Event Chain: Chain
///
/// Append-only, hash-linked event list.
///
/// Rules:
///   - Strict append only: no mutation, no deletion, no reordering
///   - Each event's `previous` is the hash of the event before it;
///     the first event points at the chain's initial hash
///   - Appends go through an internal lock so a chain can be shared
///     (`Arc<EventChain>`) with readers that only observe its head

use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use tracing::debug;

use crate::account::Account;
use crate::error::ChainError;
use crate::event::{Event, EventBody};
use crate::hashing::{build_id, event_hash, sha256_hex, CHAIN_ID_TYPE, RESOURCE_ID_TYPE};

const RANDOM_SEED_LEN: usize = 20;

/// The narrow view of an event chain that resources bound to it need.
pub trait ResourceChain {
    /// Mint a resource identifier scoped to this chain.
    ///
    /// The same reference always yields the same identifier on the same
    /// chain. `None` uses a random seed.
    fn create_resource_id(&self, reference: Option<&str>) -> String;

    /// Hash of the most recently appended event, or the initial hash
    /// when the chain is empty.
    fn latest_hash(&self) -> String;
}

/// Append-only chain of hash-linked events.
pub struct EventChain {
    id: String,
    events: RwLock<Vec<Event>>,
}

impl EventChain {
    /// Wrap an existing chain identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            events: RwLock::new(Vec::new()),
        }
    }

    /// Create a new chain owned by `account`.
    ///
    /// The chain id is derived from the account's public key and the
    /// nonce seed. `None` uses a random seed.
    pub fn create(account: &Account, nonce_seed: Option<&str>) -> Self {
        let id = match nonce_seed {
            Some(seed) => build_id(CHAIN_ID_TYPE, seed.as_bytes(), account.public_key.as_bytes()),
            None => build_id(
                CHAIN_ID_TYPE,
                &random_seed(),
                account.public_key.as_bytes(),
            ),
        };
        debug!(chain_id = %id, "created event chain");
        Self::new(id)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Hash the first event links to.
    pub fn initial_hash(&self) -> String {
        sha256_hex(self.id.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Copy of all events in append order.
    pub fn events(&self) -> Vec<Event> {
        self.read().clone()
    }

    /// Link `body` to the current head and append it.
    pub fn add(&self, body: EventBody) -> Result<Event, ChainError> {
        let mut events = self.events.write().unwrap_or_else(PoisonError::into_inner);

        let previous = match events.last() {
            Some(last) => last.hash.clone(),
            None => self.initial_hash(),
        };
        let hash = event_hash(&body, &previous)?;

        let event = Event {
            body,
            previous,
            hash,
        };
        events.push(event.clone());

        debug!(
            chain_id = %self.id,
            count = events.len(),
            hash = %event.hash,
            "appended event"
        );
        Ok(event)
    }

    /// Re-check every link and hash from the initial hash forward.
    pub fn validate(&self) -> Result<(), ChainError> {
        let events = self.read();
        let mut expected_previous = self.initial_hash();

        for (index, event) in events.iter().enumerate() {
            if event.previous != expected_previous {
                return Err(ChainError::BrokenLink {
                    index,
                    expected: expected_previous,
                    actual: event.previous.clone(),
                });
            }

            let computed = event_hash(&event.body, &event.previous)?;
            if computed != event.hash {
                return Err(ChainError::HashMismatch {
                    index,
                    stored: event.hash.clone(),
                    computed,
                });
            }

            expected_previous = event.hash.clone();
        }

        Ok(())
    }

    /// Build a chain from previously recorded events without re-linking.
    /// Use `validate()` to check the result.
    pub fn from_events(id: impl Into<String>, events: Vec<Event>) -> Self {
        Self {
            id: id.into(),
            events: RwLock::new(events),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Event>> {
        self.events.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ResourceChain for EventChain {
    fn create_resource_id(&self, reference: Option<&str>) -> String {
        let id = match reference {
            Some(reference) => build_id(RESOURCE_ID_TYPE, reference.as_bytes(), self.id.as_bytes()),
            None => build_id(RESOURCE_ID_TYPE, &random_seed(), self.id.as_bytes()),
        };
        debug!(chain_id = %self.id, reference = ?reference, resource_id = %id, "minted resource id");
        id
    }

    fn latest_hash(&self) -> String {
        match self.read().last() {
            Some(event) => event.hash.clone(),
            None => self.initial_hash(),
        }
    }
}

fn random_seed() -> [u8; RANDOM_SEED_LEN] {
    rand::random()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chain() -> EventChain {
        EventChain::create(&Account::new("owner"), Some("chain-seed"))
    }

    #[test]
    fn empty_chain_head_is_initial_hash() {
        let c = chain();
        assert!(c.is_empty());
        assert_eq!(c.latest_hash(), c.initial_hash());
    }

    #[test]
    fn first_event_links_to_initial_hash() {
        let c = chain();
        let e = c.add(EventBody::new(json!({"n": 1}), 1)).unwrap();
        assert_eq!(e.previous, c.initial_hash());
        assert_eq!(c.latest_hash(), e.hash);
    }

    #[test]
    fn chain_id_is_deterministic_for_seed() {
        let owner = Account::new("owner");
        let a = EventChain::create(&owner, Some("s"));
        let b = EventChain::create(&owner, Some("s"));
        let c = EventChain::create(&owner, None);
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
    }
}
