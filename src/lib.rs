// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! por-kernel: proof-of-reserve snapshots, Merkle inclusion proofs and the
//! textual record codec shared by the node and the verifier.

pub mod error;
pub mod hash;
pub mod proof;
pub mod codec;
pub mod merkle;
pub mod store;
pub mod snapshot;
pub mod verify;
pub mod wire;

pub use error::{CodecError, StoreError, VerifyError};
pub use proof::{MerkleStep, Position, UserProof};
pub use store::{MemoryStore, SnapshotStore};
pub use snapshot::PorDb;

#[cfg(test)]
pub mod tests;
