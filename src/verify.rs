//! Client-side Proof Verification.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::error::VerifyError;
use crate::hash::{from_hex, leaf_hash, to_hex, Digest};
use crate::merkle::fold_path;
use crate::proof::UserProof;

/// Recompute the root a proof commits to.
///
/// Checks that `user_hash` is the leaf hash of `(id, balance)` and that the
/// path folds to `root`. Returns the root on success.
///
/// Not used on the query path: the node hands proofs out as the store
/// produced them and leaves checking them to clients.
pub fn verify_proof(proof: &UserProof) -> Result<Digest, VerifyError> {
    let claimed_leaf = decode(proof.user_hash())?;
    let root = decode(proof.root())?;

    let computed_leaf = leaf_hash(proof.id(), proof.balance());
    if computed_leaf != claimed_leaf {
        return Err(VerifyError::LeafMismatch {
            claimed: proof.user_hash().to_string(),
            computed: to_hex(&computed_leaf),
        });
    }

    let siblings = proof
        .path()
        .iter()
        .map(|step| Ok((step.position, decode(&step.hash)?)))
        .collect::<Result<Vec<_>, VerifyError>>()?;

    let computed_root = fold_path(computed_leaf, &siblings);
    if computed_root != root {
        return Err(VerifyError::RootMismatch {
            expected: proof.root().to_string(),
            computed: to_hex(&computed_root),
        });
    }
    Ok(root)
}

/// Hex digests from the wire are accepted in either case.
fn decode(s: &str) -> Result<Digest, VerifyError> {
    from_hex(&s.to_ascii_lowercase()).ok_or_else(|| VerifyError::BadDigest(s.to_string()))
}
