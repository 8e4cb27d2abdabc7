/// Chain integrity tests: linking, validation and tamper detection.

use serde_json::json;

use lto_event_chain::hashing::{verify_id, RESOURCE_ID_TYPE};
use lto_event_chain::{Account, ChainError, EventBody, EventChain, ResourceChain};

fn build_chain(n: u64) -> EventChain {
    let chain = EventChain::create(&Account::new("owner-key"), Some("fixture"));
    for i in 1..=n {
        chain
            .add(EventBody::new(json!({ "action": "step", "n": i }), 1_000 + i))
            .expect("append event");
    }
    chain
}

#[test]
fn events_are_linked_in_order() {
    let chain = build_chain(5);
    let events = chain.events();
    assert_eq!(events.len(), 5);
    assert_eq!(events[0].previous, chain.initial_hash());
    for pair in events.windows(2) {
        assert_eq!(pair[1].previous, pair[0].hash);
    }
    assert_eq!(chain.latest_hash(), events[4].hash);
}

#[test]
fn valid_chain_passes_validation() {
    let chain = build_chain(10);
    chain.validate().expect("chain should validate");
}

#[test]
fn rebuilt_chain_has_same_head() {
    let chain = build_chain(3);
    let copy = EventChain::from_events(chain.id(), chain.events());
    copy.validate().expect("copy validates");
    assert_eq!(copy.latest_hash(), chain.latest_hash());
}

#[test]
fn tampered_body_is_detected() {
    let chain = build_chain(3);
    let mut events = chain.events();
    events[1].body.data = json!({ "action": "forged" });

    let tampered = EventChain::from_events(chain.id(), events);
    match tampered.validate() {
        Err(ChainError::HashMismatch { index, .. }) => assert_eq!(index, 1),
        other => panic!("expected hash mismatch, got {:?}", other),
    }
}

#[test]
fn reordered_events_break_the_link() {
    let chain = build_chain(3);
    let mut events = chain.events();
    events.swap(1, 2);

    let reordered = EventChain::from_events(chain.id(), events);
    match reordered.validate() {
        Err(ChainError::BrokenLink { index, .. }) => assert_eq!(index, 1),
        other => panic!("expected broken link, got {:?}", other),
    }
}

#[test]
fn resource_ids_are_deterministic_per_reference() {
    let chain = build_chain(0);
    let a = chain.create_resource_id(Some("process:main"));
    let b = chain.create_resource_id(Some("process:main"));
    let c = chain.create_resource_id(Some("process:other"));
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(verify_id(&a, RESOURCE_ID_TYPE));
}

#[test]
fn resource_ids_are_scoped_to_the_chain() {
    let owner = Account::new("owner-key");
    let one = EventChain::create(&owner, Some("one"));
    let two = EventChain::create(&owner, Some("two"));
    assert_ne!(
        one.create_resource_id(Some("process:main")),
        two.create_resource_id(Some("process:main"))
    );
}

#[test]
fn random_resource_ids_differ() {
    let chain = build_chain(0);
    let a = chain.create_resource_id(None);
    let b = chain.create_resource_id(None);
    assert!(!a.is_empty());
    assert_ne!(a, b);
}

#[test]
fn event_value_has_wire_fields() {
    let chain = build_chain(1);
    let v = chain.events()[0].to_value();
    assert_eq!(v["body"]["action"], "step");
    assert_eq!(v["timestamp"], 1_001);
    assert_eq!(v["previous"], chain.initial_hash());
    assert_eq!(v["hash"], chain.latest_hash());
}
