// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A raw record that does not follow the record grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Fewer than three tokens (leaf, user hash, root), or an empty field.
    #[error("malformed record: {0}")]
    MalformedRecord(String),
    /// The leading `(id,balance)` token could not be parsed.
    #[error("malformed leaf {0:?}")]
    MalformedLeaf(String),
    /// A `(position,hash)` token could not be parsed.
    #[error("malformed step {0:?}")]
    MalformedStep(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("not a regular file: {0:?}")]
    NotAFile(PathBuf),
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
    #[error("user ids must be strictly ascending (line {line})")]
    UnsortedInput { line: usize },
    #[error("expected {expected} users, found {found}")]
    CountMismatch { expected: u64, found: u64 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("not a 32-byte hex digest: {0:?}")]
    BadDigest(String),
    #[error("user hash mismatch: proof carries {claimed}, leaf hashes to {computed}")]
    LeafMismatch { claimed: String, computed: String },
    #[error("root mismatch: expected {expected}, path folds to {computed}")]
    RootMismatch { expected: String, computed: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;
