// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! File-backed snapshots.
//!
//! A snapshot is a plain user file plus two derived sidecars living next to
//! it:
//!
//! ```text
//! users.txt          N\n(id,balance)\n(id,balance)\n...
//! users.txt.index    | blake3 32 | magic 8 | N u64 | (id u64, balance u64) * N |
//! users.txt.merkle   | blake3 32 | magic 8 | N u64 | digest * node_count(N)     |
//! ```
//!
//! The leading BLAKE3 digest covers every byte after it. Sidecars failing
//! that check are rebuilt from the user file on load.

pub mod encode;
pub mod decode;
pub mod db;

pub use db::PorDb;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const FINGERPRINT_LEN: usize = 32;
pub const MAGIC_LEN: usize = 8;
/// Fingerprint + magic + count.
pub const HEADER_LEN: usize = FINGERPRINT_LEN + MAGIC_LEN + 8;
/// `id u64` + `balance u64`.
pub const INDEX_ENTRY_LEN: usize = 16;

pub const INDEX_MAGIC: [u8; MAGIC_LEN] = [0x38, 0x08, 0x0d, 0xf4, 0x4a, 0x0c, 0x38, 0x73];
pub const MERKLE_MAGIC: [u8; MAGIC_LEN] = [0x68, 0xba, 0x80, 0xa5, 0x91, 0xd5, 0xf6, 0x43];

/// `users.txt` -> `users.txt.<ext>`
pub fn sidecar_path(path: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

pub fn index_path(path: &Path) -> PathBuf {
    sidecar_path(path, "index")
}

pub fn merkle_path(path: &Path) -> PathBuf {
    sidecar_path(path, "merkle")
}
