// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Sidecar encoding.
//!
//! Building is streamed: users flow from the user file into the index, leaves
//! flow from the index into the merkle sidecar, and each upper level is
//! computed by reading the previous level back from the file being written.
//! Memory stays constant in the number of users.

use crate::error::Result;
use crate::hash::{branch_hash, leaf_hash, Digest, DIGEST_LEN};
use crate::merkle::node_count;
use crate::snapshot::decode::UserReader;
use crate::snapshot::{sidecar_path, FINGERPRINT_LEN, HEADER_LEN, INDEX_MAGIC, MAGIC_LEN, MERKLE_MAGIC};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Writer that fingerprints everything passing through it.
struct FingerprintWriter<W: Write> {
    inner: W,
    hasher: blake3::Hasher,
}

impl<W: Write> Write for FingerprintWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Body of a sidecar under construction.
pub struct SidecarBody<'a> {
    writer: FingerprintWriter<BufWriter<&'a mut File>>,
    tmp_path: &'a Path,
}

impl SidecarBody<'_> {
    /// Reader over bytes already written, starting at file offset `offset`.
    pub fn read_back(&mut self, offset: u64) -> io::Result<BufReader<File>> {
        self.writer.flush()?;
        let mut file = File::open(self.tmp_path)?;
        file.seek(SeekFrom::Start(offset))?;
        Ok(BufReader::new(file))
    }
}

impl Write for SidecarBody<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Write one sidecar atomically: body goes to `<path>.tmp`, the fingerprint
/// is patched into the first 32 bytes, then the file is renamed into place.
/// A failed body leaves neither the temp file nor `path` behind.
pub fn write_sidecar<F>(path: &Path, magic: &[u8; MAGIC_LEN], count: u64, body: F) -> Result<()>
where
    F: FnOnce(&mut SidecarBody<'_>) -> Result<()>,
{
    let tmp_path = sidecar_path(path, "tmp");
    if let Err(e) = fill_sidecar(&tmp_path, magic, count, body) {
        if let Err(rm) = fs::remove_file(&tmp_path) {
            tracing::warn!("cannot remove {:?}: {}", tmp_path.file_name(), rm);
        }
        return Err(e);
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

fn fill_sidecar<F>(tmp_path: &Path, magic: &[u8; MAGIC_LEN], count: u64, body: F) -> Result<()>
where
    F: FnOnce(&mut SidecarBody<'_>) -> Result<()>,
{
    let mut file = File::create(tmp_path)?;
    // Placeholder for the fingerprint.
    file.write_all(&[0u8; FINGERPRINT_LEN])?;

    let fingerprint = {
        let mut out = SidecarBody {
            writer: FingerprintWriter {
                inner: BufWriter::new(&mut file),
                hasher: blake3::Hasher::new(),
            },
            tmp_path,
        };
        out.write_all(magic)?;
        out.write_u64::<LittleEndian>(count)?;
        body(&mut out)?;
        out.flush()?;
        out.writer.hasher.finalize()
    };

    file.seek(SeekFrom::Start(0))?;
    file.write_all(fingerprint.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

/// Build `.index` and `.merkle` sidecars from a user file.
///
/// Returns the number of committed users.
pub fn build_sidecars(user_file: &Path, index: &Path, merkle: &Path) -> Result<u64> {
    let users = UserReader::new(BufReader::new(File::open(user_file)?))?;
    let count = users.expected();

    write_sidecar(index, &INDEX_MAGIC, count, |w| {
        for user in users {
            let (id, balance) = user?;
            w.write_u64::<LittleEndian>(id)?;
            w.write_u64::<LittleEndian>(balance)?;
        }
        Ok(())
    })?;

    let mut entries = BufReader::new(File::open(index)?);
    entries.seek(SeekFrom::Start(HEADER_LEN as u64))?;
    let mut nodes = 0;
    write_sidecar(merkle, &MERKLE_MAGIC, count, |w| {
        nodes = write_levels(w, &mut entries, count)?;
        Ok(())
    })?;
    debug_assert_eq!(nodes, node_count(count));

    tracing::info!(users = count, nodes, "built snapshot sidecars");
    Ok(count)
}

/// Stream every tree level into `out`, leaves first. Returns the node count.
///
/// Odd non-root levels are padded by repeating their last node, matching
/// [`crate::merkle::build_levels`].
fn write_levels<R: Read>(out: &mut SidecarBody<'_>, entries: &mut R, count: u64) -> Result<u64> {
    if count == 0 {
        return Ok(0);
    }

    let mut last: Digest = [0u8; DIGEST_LEN];
    for _ in 0..count {
        let id = entries.read_u64::<LittleEndian>()?;
        let balance = entries.read_u64::<LittleEndian>()?;
        last = leaf_hash(id, balance);
        out.write_all(&last)?;
    }

    let mut written = count;
    let mut level_start = HEADER_LEN as u64;
    let mut width = count;
    let (mut left, mut right) = ([0u8; DIGEST_LEN], [0u8; DIGEST_LEN]);
    while width > 1 {
        if width & 1 == 1 {
            out.write_all(&last)?;
            width += 1;
            written += 1;
        }
        let mut level = out.read_back(level_start)?;
        for _ in 0..width / 2 {
            level.read_exact(&mut left)?;
            level.read_exact(&mut right)?;
            last = branch_hash(&left, &right);
            out.write_all(&last)?;
        }
        written += width / 2;
        level_start += width * DIGEST_LEN as u64;
        width /= 2;
    }
    Ok(written)
}
