// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::error::{Result, StoreError};
use crate::hash::{Digest, DIGEST_LEN};
use crate::merkle::{node_count, prove, DigestSlice, NodeSource};
use crate::snapshot::decode::{read_header, verify_fingerprint};
use crate::snapshot::encode::build_sidecars;
use crate::snapshot::{
    index_path, merkle_path, HEADER_LEN, INDEX_ENTRY_LEN, INDEX_MAGIC, MAGIC_LEN, MERKLE_MAGIC,
};
use crate::store::{emit_record, SnapshotStore};
use byteorder::{ByteOrder, LittleEndian};
use memmap2::Mmap;
use std::fs::{self, File};
use std::path::Path;

/// Proof-of-reserve database backed by memory-mapped sidecars.
///
/// Read-only after `load`; lookups touch only the maps, so the handle can be
/// shared across threads without locking.
#[derive(Debug)]
pub struct PorDb {
    index: Mmap,
    merkle: Mmap,
    count: u64,
}

impl PorDb {
    /// Load the snapshot for `path`, rebuilding sidecars that are missing or
    /// fail their fingerprint.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(StoreError::NotAFile(path.to_path_buf()));
        }

        let index_file = index_path(path);
        let merkle_file = merkle_path(path);
        let reusable = sidecar_valid(&index_file, &INDEX_MAGIC)
            && sidecar_valid(&merkle_file, &MERKLE_MAGIC)
            && newer_than(&index_file, path)
            && newer_than(&merkle_file, path);
        if reusable {
            tracing::debug!("reusing existing snapshot sidecars");
        } else {
            tracing::info!("snapshot sidecars missing or stale, rebuilding");
            for stale in [&index_file, &merkle_file] {
                if stale.exists() {
                    fs::remove_file(stale)?;
                }
            }
            build_sidecars(path, &index_file, &merkle_file)?;
        }

        let index = map_file(&index_file)?;
        let merkle = map_file(&merkle_file)?;
        Self::from_maps(index, merkle)
    }

    fn from_maps(index: Mmap, merkle: Mmap) -> Result<Self> {
        let count = read_header(&index)?.count;
        let merkle_count = read_header(&merkle)?.count;
        if count != merkle_count {
            return Err(StoreError::CountMismatch {
                expected: count,
                found: merkle_count,
            });
        }

        let index_len = count
            .checked_mul(INDEX_ENTRY_LEN as u64)
            .and_then(|n| n.checked_add(HEADER_LEN as u64));
        let merkle_len = node_count(count)
            .checked_mul(DIGEST_LEN as u64)
            .and_then(|n| n.checked_add(HEADER_LEN as u64));
        if index_len != Some(index.len() as u64) || merkle_len != Some(merkle.len() as u64) {
            return Err(StoreError::InvalidFormat(format!(
                "sidecar sizes do not match {} users",
                count
            )));
        }

        tracing::info!(users = count, "snapshot loaded");
        Ok(Self {
            index,
            merkle,
            count,
        })
    }

    fn entry(&self, order: u64) -> (u64, u64) {
        let start = HEADER_LEN + order as usize * INDEX_ENTRY_LEN;
        let id = LittleEndian::read_u64(&self.index[start..start + 8]);
        let balance = LittleEndian::read_u64(&self.index[start + 8..start + 16]);
        (id, balance)
    }

    /// Binary search the index for `id`, returning `(order, balance)`.
    fn find(&self, id: u64) -> Option<(u64, u64)> {
        let (mut lo, mut hi) = (0u64, self.count);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let (mid_id, balance) = self.entry(mid);
            match mid_id.cmp(&id) {
                std::cmp::Ordering::Less => lo = mid + 1,
                std::cmp::Ordering::Greater => hi = mid,
                std::cmp::Ordering::Equal => return Some((mid, balance)),
            }
        }
        None
    }

    fn nodes(&self) -> DigestSlice<'_> {
        DigestSlice(&self.merkle[HEADER_LEN..])
    }
}

impl SnapshotStore for PorDb {
    fn lookup(&self, id: u64) -> Option<String> {
        let (order, balance) = self.find(id)?;
        let branch = prove(&self.nodes(), self.count, order)?;
        emit_record(id, balance, &branch)
    }

    fn user_count(&self) -> u64 {
        self.count
    }

    fn root(&self) -> Option<Digest> {
        if self.count == 0 {
            return None;
        }
        self.nodes().node(node_count(self.count) as usize - 1)
    }
}

fn sidecar_valid(path: &Path, magic: &[u8; MAGIC_LEN]) -> bool {
    if !path.is_file() {
        return false;
    }
    match map_file(path) {
        Ok(map) => verify_fingerprint(&map, magic),
        Err(e) => {
            tracing::warn!("cannot map sidecar {:?}: {}", path.file_name(), e);
            false
        }
    }
}

/// A sidecar older than its user file was built from a previous snapshot.
fn newer_than(sidecar: &Path, source: &Path) -> bool {
    let modified = |p: &Path| fs::metadata(p).and_then(|m| m.modified());
    match (modified(sidecar), modified(source)) {
        (Ok(sidecar), Ok(source)) => sidecar >= source,
        _ => false,
    }
}

fn map_file(path: &Path) -> Result<Mmap> {
    let file = File::open(path)?;
    // Sidecars are never written in place once renamed; rebuilds replace the file.
    let map = unsafe { Mmap::map(&file)? };
    Ok(map)
}
