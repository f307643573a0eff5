// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Tagged SHA-256 Hashing
//!
//! Every digest committed to a snapshot is a tagged hash:
//!
//! ```text
//! H_tag(m) = SHA256( SHA256(tag) || SHA256(tag) || m )
//! ```
//!
//! Leaves and branches use distinct tags so a branch can never be replayed
//! as a leaf (and vice versa).

use sha2::{Digest as _, Sha256};

pub const DIGEST_LEN: usize = 32;

/// Raw 32-byte digest.
pub type Digest = [u8; DIGEST_LEN];

pub const LEAF_TAG: &[u8] = b"ProofOfReserve_Leaf";
pub const BRANCH_TAG: &[u8] = b"ProofOfReserve_Branch";

/// Incremental tagged hasher.
///
/// The tag prefix is absorbed once at construction; `finalize` and `reset`
/// return the hasher to the freshly-tagged state so it can be reused.
#[derive(Clone)]
pub struct TaggedHasher {
    prefix: Sha256,
    inner: Sha256,
}

impl TaggedHasher {
    pub fn new(tag: &[u8]) -> Self {
        let tag_hash = Sha256::digest(tag);
        let mut prefix = Sha256::new();
        prefix.update(tag_hash);
        prefix.update(tag_hash);
        Self {
            inner: prefix.clone(),
            prefix,
        }
    }

    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self
    }

    pub fn finalize(&mut self) -> Digest {
        let hasher = std::mem::replace(&mut self.inner, self.prefix.clone());
        let mut out = [0u8; DIGEST_LEN];
        out.copy_from_slice(&hasher.finalize());
        out
    }

    pub fn reset(&mut self) {
        self.inner = self.prefix.clone();
    }
}

/// Canonical leaf preimage for one account.
pub fn leaf_preimage(id: u64, balance: u64) -> String {
    format!("({},{})", id, balance)
}

pub fn leaf_hash(id: u64, balance: u64) -> Digest {
    TaggedHasher::new(LEAF_TAG)
        .update(leaf_preimage(id, balance).as_bytes())
        .finalize()
}

pub fn branch_hash(left: &Digest, right: &Digest) -> Digest {
    TaggedHasher::new(BRANCH_TAG)
        .update(left)
        .update(right)
        .finalize()
}

/// `0x`-prefixed lowercase hex, the form digests take inside records.
pub fn to_hex(digest: &Digest) -> String {
    format!("0x{}", hex::encode(digest))
}

/// Inverse of [`to_hex`]. Requires the `0x` prefix and exactly 64 hex digits.
pub fn from_hex(s: &str) -> Option<Digest> {
    let body = s.strip_prefix("0x")?;
    let mut out = [0u8; DIGEST_LEN];
    hex::decode_to_slice(body, &mut out).ok()?;
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_tag_digest() {
        // SHA256("ProofOfReserve_Leaf")
        let expected =
            hex::decode("c2742372f93fdec96944c6b0b76948680a9ff8fe19acec27fc6860f0f055fac2").unwrap();
        assert_eq!(Sha256::digest(LEAF_TAG).as_slice(), expected.as_slice());
    }

    #[test]
    fn test_tagged_hash_matches_manual_concatenation() {
        let data = [0x10, 0xdd, 0xcd, 0xdd, 0x31];
        let tag_hash = Sha256::digest(LEAF_TAG);

        let mut concat = Vec::new();
        concat.extend_from_slice(&tag_hash);
        concat.extend_from_slice(&tag_hash);
        concat.extend_from_slice(&data);

        let tagged = TaggedHasher::new(LEAF_TAG).update(&data).finalize();
        assert_eq!(tagged.as_slice(), Sha256::digest(&concat).as_slice());
    }

    #[test]
    fn test_finalize_resets_state() {
        let mut hasher = TaggedHasher::new(BRANCH_TAG);
        let first = hasher.update(b"abc").finalize();
        let second = hasher.update(b"abc").finalize();
        assert_eq!(first, second);

        hasher.update(b"garbage");
        hasher.reset();
        assert_eq!(hasher.update(b"abc").finalize(), first);
    }

    #[test]
    fn test_hex_is_strict() {
        let d = leaf_hash(8, 8888);
        let s = to_hex(&d);
        assert_eq!(s.len(), 66);
        assert_eq!(from_hex(&s), Some(d));
        assert_eq!(from_hex(&s[2..]), None);
        assert_eq!(from_hex("0xabc"), None);
    }
}
