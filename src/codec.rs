// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Raw Record Codec
//!
//! The store answers a lookup with one whitespace-separated line:
//!
//! ```text
//! record      := leaf SP hash SP step* root
//! leaf        := "(" id "," balance ")"
//! step        := "(" position "," hash ")" SP
//! position    := "left" | "right"
//! id, balance := decimal digit sequence
//! hash        := "0x" hex digit sequence
//! ```
//!
//! The number of steps depends on the tree depth, so the parser accepts any
//! number of middle tokens but is strict about the shape of each one.
//! Parsing is all-or-nothing: a single bad token rejects the whole record.

use crate::error::CodecError;
use crate::proof::{MerkleStep, Position, UserProof};
use core::fmt::Write;

/// Parse a raw store record into a [`UserProof`].
pub fn parse_record(raw: &str) -> Result<UserProof, CodecError> {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(CodecError::MalformedRecord(format!(
            "expected at least 3 tokens, found {}",
            tokens.len()
        )));
    }

    let (id, balance) = parse_leaf(tokens[0])?;
    let user_hash = tokens[1];
    let root = tokens[tokens.len() - 1];

    let path = tokens[2..tokens.len() - 1]
        .iter()
        .map(|token| parse_step(token))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(UserProof::new(id, balance, user_hash, path, root))
}

/// Render a [`UserProof`] back into the raw record grammar.
pub fn encode_record(proof: &UserProof) -> String {
    let mut out = format!("({},{}) {}", proof.id(), proof.balance(), proof.user_hash());
    for step in proof.path() {
        // Writing into a String cannot fail.
        let _ = write!(out, " ({},{})", step.position, step.hash);
    }
    out.push(' ');
    out.push_str(proof.root());
    out
}

pub(crate) fn parse_leaf(token: &str) -> Result<(u64, u64), CodecError> {
    let malformed = || CodecError::MalformedLeaf(token.to_string());

    let fields = split_pair(token).ok_or_else(malformed)?;
    let id = parse_decimal(fields.0).ok_or_else(malformed)?;
    let balance = parse_decimal(fields.1).ok_or_else(malformed)?;
    Ok((id, balance))
}

fn parse_step(token: &str) -> Result<MerkleStep, CodecError> {
    let malformed = || CodecError::MalformedStep(token.to_string());

    let (position, hash) = split_pair(token).ok_or_else(malformed)?;
    let position: Position = position.parse().map_err(|_| malformed())?;
    if hash.is_empty() {
        return Err(malformed());
    }
    Ok(MerkleStep::new(position, hash))
}

/// `"(a,b)"` -> `("a", "b")`. Exactly one enclosing pair and one comma.
fn split_pair(token: &str) -> Option<(&str, &str)> {
    let inner = token.strip_prefix('(')?.strip_suffix(')')?;
    let mut parts = inner.split(',');
    let first = parts.next()?;
    let second = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((first, second))
}

/// Digits only: `u64::from_str` would also take a leading `+`.
fn parse_decimal(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
