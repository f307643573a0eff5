// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Snapshot store capability.
//!
//! The query path only ever needs a point lookup that answers with a raw
//! record string. Loading is a constructor on each concrete store, so a
//! handle that exists is a handle that loaded.

use crate::codec::encode_record;
use crate::hash::{leaf_hash, to_hex, Digest};
use crate::merkle::{build_levels, fold_path, Branch};
use crate::proof::{MerkleStep, UserProof};

pub trait SnapshotStore: Send + Sync {
    /// Raw inclusion record for `id`, or `None` if the user is not committed.
    fn lookup(&self, id: u64) -> Option<String>;

    /// Number of users committed in the snapshot.
    fn user_count(&self) -> u64;

    /// Published root, `None` for an empty snapshot.
    fn root(&self) -> Option<Digest>;
}

/// Turn a Merkle branch into a raw record.
///
/// The path is folded back to the root first; a branch that does not
/// reproduce the root is never emitted.
pub fn emit_record(id: u64, balance: u64, branch: &Branch) -> Option<String> {
    if branch.leaf != leaf_hash(id, balance) {
        tracing::error!(id, "stored leaf does not match committed balance");
        return None;
    }
    if fold_path(branch.leaf, &branch.siblings) != branch.root {
        tracing::error!(id, "merkle path does not fold to the snapshot root");
        return None;
    }

    let path = branch
        .siblings
        .iter()
        .map(|(position, hash)| MerkleStep::new(*position, to_hex(hash)))
        .collect();
    let proof = UserProof::new(id, balance, to_hex(&branch.leaf), path, to_hex(&branch.root));
    Some(encode_record(&proof))
}

/// In-memory snapshot built from `(id, balance)` pairs.
#[derive(Debug)]
pub struct MemoryStore {
    users: Vec<(u64, u64)>,
    nodes: Vec<Digest>,
}

impl MemoryStore {
    /// Users are committed in ascending id order; a repeated id keeps its
    /// last balance.
    pub fn new(users: impl IntoIterator<Item = (u64, u64)>) -> Self {
        let mut users: Vec<(u64, u64)> = users.into_iter().collect();
        users.sort_by_key(|(id, _)| *id);
        users.reverse();
        users.dedup_by_key(|(id, _)| *id);
        users.reverse();

        let leaves: Vec<Digest> = users
            .iter()
            .map(|(id, balance)| leaf_hash(*id, *balance))
            .collect();
        let nodes = build_levels(&leaves);
        Self { users, nodes }
    }
}

impl SnapshotStore for MemoryStore {
    fn lookup(&self, id: u64) -> Option<String> {
        let order = self.users.binary_search_by_key(&id, |(user, _)| *user).ok()?;
        let (_, balance) = self.users[order];
        let branch = crate::merkle::prove(&self.nodes, self.users.len() as u64, order as u64)?;
        emit_record(id, balance, &branch)
    }

    fn user_count(&self) -> u64 {
        self.users.len() as u64
    }

    fn root(&self) -> Option<Digest> {
        self.nodes.last().copied()
    }
}
