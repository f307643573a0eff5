// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::codec::parse_record;
use crate::hash::{leaf_hash, to_hex};
use crate::merkle::{build_levels, prove, Branch};
use crate::store::{emit_record, MemoryStore, SnapshotStore};

#[test]
fn test_memory_store_lookup() {
    let store = MemoryStore::new((1..=8).map(|i| (i, i * 1111)));
    assert_eq!(store.user_count(), 8);

    let proof = parse_record(&store.lookup(8).unwrap()).unwrap();
    assert_eq!(proof.id(), 8);
    assert_eq!(proof.balance(), 8888);
    assert_eq!(proof.user_hash(), to_hex(&leaf_hash(8, 8888)));
    assert_eq!(proof.path().len(), 3);
    assert_eq!(proof.root(), to_hex(&store.root().unwrap()));

    assert_eq!(store.lookup(0), None);
    assert_eq!(store.lookup(9), None);
}

/// Published record for user 8 of the eight-user `(i, i * 1111)` snapshot.
const PUBLISHED_RECORD_8: &str = "(8,8888) 0x6266ab587ef565a55daf01ff5101d1b40b4f4334c9ece68c130fe223a1a37c96 \
(left,0x33471d10e51b83e3419eba1f096203264d1e60de57522402827a4de50dee8375) \
(left,0x03b6089f6b1adf08e6f1b5c7f2eff348e3bcc97903216a726c62f358e97c1df1) \
(left,0xfafe4ecc00e37d340d72f581fbbda4e179ad24bdc2f45713dcc2a38ebfc30439) \
0xb1231de33da17c23cebd80c104b88198e0914b0463d0e14db163605b904a7ba3";

#[test]
fn test_memory_store_matches_published_record() {
    let store = MemoryStore::new((1..=8).map(|i| (i, i * 1111)));
    assert_eq!(store.lookup(8).as_deref(), Some(PUBLISHED_RECORD_8));
    assert_eq!(
        to_hex(&store.root().unwrap()),
        "0xb1231de33da17c23cebd80c104b88198e0914b0463d0e14db163605b904a7ba3"
    );
}

#[test]
fn test_memory_store_orders_by_id() {
    let shuffled = MemoryStore::new(vec![(3, 30), (1, 10), (2, 20)]);
    let sorted = MemoryStore::new(vec![(1, 10), (2, 20), (3, 30)]);
    assert_eq!(shuffled.root(), sorted.root());
    assert_eq!(shuffled.lookup(2), sorted.lookup(2));
}

#[test]
fn test_memory_store_keeps_last_duplicate() {
    let store = MemoryStore::new(vec![(1, 10), (2, 20), (1, 11)]);
    assert_eq!(store.user_count(), 2);
    let proof = parse_record(&store.lookup(1).unwrap()).unwrap();
    assert_eq!(proof.balance(), 11);
}

#[test]
fn test_single_user_snapshot() {
    let store = MemoryStore::new(vec![(5, 500)]);
    let proof = parse_record(&store.lookup(5).unwrap()).unwrap();
    assert!(proof.path().is_empty());
    assert_eq!(proof.user_hash(), proof.root());
}

#[test]
fn test_empty_store() {
    let store = MemoryStore::new(Vec::new());
    assert_eq!(store.user_count(), 0);
    assert_eq!(store.root(), None);
    assert_eq!(store.lookup(1), None);
}

#[test]
fn test_emit_refuses_inconsistent_branch() {
    let leaves = vec![leaf_hash(1, 10), leaf_hash(2, 20)];
    let nodes = build_levels(&leaves);
    let branch = prove(&nodes, 2, 0).unwrap();

    assert!(emit_record(1, 10, &branch).is_some());
    // Wrong balance for the stored leaf.
    assert_eq!(emit_record(1, 11, &branch), None);

    let bad_root = Branch {
        root: [0u8; 32],
        ..branch
    };
    assert_eq!(emit_record(1, 10, &bad_root), None);
}
