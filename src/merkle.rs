// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Merkle tree over tagged leaf hashes.
//!
//! # Layout
//! All levels are stored back to back, leaves first:
//!
//! ```text
//! | level 0 (leaves, padded) | level 1 (padded) | ... | root |
//! ```
//!
//! Any level wider than one node with an odd width gets its last node
//! duplicated, so every non-root level has even width. The layout is fully
//! determined by the leaf count, which is what lets the store walk a
//! memory-mapped copy without any per-level offsets on disk.

use crate::hash::{branch_hash, Digest, DIGEST_LEN};
use crate::proof::Position;

/// Random access to a flattened level layout.
pub trait NodeSource {
    fn node(&self, index: usize) -> Option<Digest>;
}

impl NodeSource for [Digest] {
    fn node(&self, index: usize) -> Option<Digest> {
        self.get(index).copied()
    }
}

impl NodeSource for Vec<Digest> {
    fn node(&self, index: usize) -> Option<Digest> {
        self.as_slice().node(index)
    }
}

/// Level layout viewed directly over raw bytes (e.g. a memory map).
pub struct DigestSlice<'a>(pub &'a [u8]);

impl NodeSource for DigestSlice<'_> {
    fn node(&self, index: usize) -> Option<Digest> {
        let start = index.checked_mul(DIGEST_LEN)?;
        let bytes = self.0.get(start..start.checked_add(DIGEST_LEN)?)?;
        let mut out = [0u8; DIGEST_LEN];
        out.copy_from_slice(bytes);
        Some(out)
    }
}

/// Everything needed to rebuild the root from one leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub leaf: Digest,
    /// Leaf-to-root order.
    pub siblings: Vec<(Position, Digest)>,
    pub root: Digest,
}

/// Total number of stored nodes for `leaf_count` leaves.
pub fn node_count(leaf_count: u64) -> u64 {
    if leaf_count == 0 {
        return 0;
    }
    let mut total = 0;
    let mut width = leaf_count;
    while width > 1 {
        width += width & 1;
        total += width;
        width >>= 1;
    }
    total + 1
}

/// Build the full level layout. Empty input yields an empty layout.
pub fn build_levels(leaves: &[Digest]) -> Vec<Digest> {
    let mut nodes = Vec::with_capacity(node_count(leaves.len() as u64) as usize);
    if leaves.is_empty() {
        return nodes;
    }
    nodes.extend_from_slice(leaves);

    let mut start = 0;
    let mut width = leaves.len();
    while width > 1 {
        if width & 1 == 1 {
            let last = nodes[nodes.len() - 1];
            nodes.push(last);
            width += 1;
        }
        for i in 0..width / 2 {
            let parent = branch_hash(&nodes[start + 2 * i], &nodes[start + 2 * i + 1]);
            nodes.push(parent);
        }
        start += width;
        width /= 2;
    }
    nodes
}

pub fn merkle_root(leaves: &[Digest]) -> Option<Digest> {
    build_levels(leaves).last().copied()
}

/// Collect the sibling path for leaf `order`.
///
/// Returns `None` when `order` is out of range or the layout is shorter than
/// `leaf_count` implies.
pub fn prove<S: NodeSource + ?Sized>(nodes: &S, leaf_count: u64, order: u64) -> Option<Branch> {
    if order >= leaf_count {
        return None;
    }
    let mut idx = usize::try_from(order).ok()?;
    let mut width = usize::try_from(leaf_count).ok()?;
    let mut base = 0usize;

    let leaf = nodes.node(idx)?;
    let mut siblings = Vec::new();
    while width > 1 {
        width += width & 1;
        let sibling = if idx & 1 == 0 {
            (Position::Right, nodes.node(base + idx + 1)?)
        } else {
            (Position::Left, nodes.node(base + idx - 1)?)
        };
        siblings.push(sibling);
        base += width;
        width >>= 1;
        idx >>= 1;
    }

    let root = nodes.node(base)?;
    Some(Branch { leaf, siblings, root })
}

/// Recompute a root from a leaf hash and its sibling path.
pub fn fold_path(leaf: Digest, siblings: &[(Position, Digest)]) -> Digest {
    siblings.iter().fold(leaf, |acc, (position, sibling)| match position {
        Position::Left => branch_hash(sibling, &acc),
        Position::Right => branch_hash(&acc, sibling),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_count() {
        assert_eq!(node_count(0), 0);
        assert_eq!(node_count(1), 1);
        assert_eq!(node_count(2), 3);
        // 3 -> 4 + 2 + 1
        assert_eq!(node_count(3), 7);
        // 5 -> 6 + (3 -> 4) + 2 + 1
        assert_eq!(node_count(5), 13);
        assert_eq!(node_count(8), 15);
    }

    #[test]
    fn test_digest_slice_bounds() {
        let bytes = [7u8; DIGEST_LEN * 2];
        let view = DigestSlice(&bytes);
        assert_eq!(view.node(1), Some([7u8; DIGEST_LEN]));
        assert_eq!(view.node(2), None);
        assert_eq!(view.node(usize::MAX), None);
    }
}
