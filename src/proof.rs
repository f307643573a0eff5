//! Inclusion Proof Structures.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Which side of the pair a sibling occupies relative to the path so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    Right,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Left => "left",
            Position::Right => "right",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = ();

    /// Case-sensitive: only `left` and `right` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Position::Left),
            "right" => Ok(Position::Right),
            _ => Err(()),
        }
    }
}

/// One sibling hash consumed while rebuilding the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleStep {
    pub position: Position,
    /// Hex digest, kept exactly as the store emitted it.
    pub hash: String,
}

impl MerkleStep {
    pub fn new(position: Position, hash: impl Into<String>) -> Self {
        Self {
            position,
            hash: hash.into(),
        }
    }
}

/// One account's membership claim against a committed snapshot root.
///
/// Built fresh for every query and never mutated afterwards, so the fields
/// are only reachable through accessors. Hash strings are opaque here: no
/// case folding, no length checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProof {
    id: u64,
    balance: u64,
    user_hash: String,
    path: Vec<MerkleStep>,
    root: String,
}

impl UserProof {
    pub fn new(
        id: u64,
        balance: u64,
        user_hash: impl Into<String>,
        path: Vec<MerkleStep>,
        root: impl Into<String>,
    ) -> Self {
        Self {
            id,
            balance,
            user_hash: user_hash.into(),
            path,
            root: root.into(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn user_hash(&self) -> &str {
        &self.user_hash
    }

    /// Sibling steps in leaf-to-root order.
    pub fn path(&self) -> &[MerkleStep] {
        &self.path
    }

    pub fn root(&self) -> &str {
        &self.root
    }
}
