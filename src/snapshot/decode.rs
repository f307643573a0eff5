// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Snapshot decoding.

use crate::codec::parse_leaf;
use crate::error::{Result, StoreError};
use crate::snapshot::{FINGERPRINT_LEN, HEADER_LEN, MAGIC_LEN};
use byteorder::{ByteOrder, LittleEndian};
use std::io::{BufRead, Lines};

/// Parsed sidecar header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidecarHeader {
    pub fingerprint: [u8; FINGERPRINT_LEN],
    pub magic: [u8; MAGIC_LEN],
    pub count: u64,
}

pub fn read_header(buf: &[u8]) -> Result<SidecarHeader> {
    if buf.len() < HEADER_LEN {
        return Err(StoreError::InvalidFormat(format!(
            "sidecar too short: {} bytes",
            buf.len()
        )));
    }
    let mut fingerprint = [0u8; FINGERPRINT_LEN];
    fingerprint.copy_from_slice(&buf[..FINGERPRINT_LEN]);
    let mut magic = [0u8; MAGIC_LEN];
    magic.copy_from_slice(&buf[FINGERPRINT_LEN..FINGERPRINT_LEN + MAGIC_LEN]);
    let count = LittleEndian::read_u64(&buf[FINGERPRINT_LEN + MAGIC_LEN..HEADER_LEN]);

    Ok(SidecarHeader {
        fingerprint,
        magic,
        count,
    })
}

/// True when `buf` carries `magic` and its BLAKE3 fingerprint matches.
pub fn verify_fingerprint(buf: &[u8], magic: &[u8; MAGIC_LEN]) -> bool {
    match read_header(buf) {
        Ok(header) if &header.magic == magic => {
            *blake3::hash(&buf[FINGERPRINT_LEN..]).as_bytes() == header.fingerprint
        }
        _ => false,
    }
}

/// Streaming reader over a user file: a count line followed by that many
/// `(id,balance)` lines.
///
/// Ids must be strictly ascending so lookups can binary search the index.
/// Surrounding whitespace on a line is ignored; lines past the declared
/// count are not read. Iteration stops after the first error.
pub struct UserReader<R> {
    lines: Lines<R>,
    expected: u64,
    read: u64,
    previous: Option<u64>,
    failed: bool,
}

impl<R: BufRead> UserReader<R> {
    /// Consume the count line.
    pub fn new(reader: R) -> Result<Self> {
        let mut lines = reader.lines();
        let header = match lines.next() {
            Some(line) => line?,
            None => return Err(StoreError::InvalidFormat("missing user count".into())),
        };
        let expected: u64 = header.trim().parse().map_err(|_| {
            StoreError::InvalidFormat(format!("bad user count {:?}", header.trim()))
        })?;

        Ok(Self {
            lines,
            expected,
            read: 0,
            previous: None,
            failed: false,
        })
    }

    /// User count declared on the first line.
    pub fn expected(&self) -> u64 {
        self.expected
    }

    fn next_user(&mut self, line: std::io::Result<String>) -> Result<(u64, u64)> {
        let line = line?;
        // 1-based, counting the count line.
        let line_no = self.read as usize + 2;
        let (id, balance) = parse_leaf(line.trim()).map_err(|_| {
            StoreError::InvalidFormat(format!("line {}: expected (id,balance)", line_no))
        })?;
        if self.previous.is_some_and(|prev| prev >= id) {
            return Err(StoreError::UnsortedInput { line: line_no });
        }
        self.previous = Some(id);
        self.read += 1;
        Ok((id, balance))
    }
}

impl<R: BufRead> Iterator for UserReader<R> {
    type Item = Result<(u64, u64)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.read == self.expected {
            return None;
        }
        let item = match self.lines.next() {
            Some(line) => self.next_user(line),
            None => Err(StoreError::CountMismatch {
                expected: self.expected,
                found: self.read,
            }),
        };
        self.failed = item.is_err();
        Some(item)
    }
}

/// Read a whole user file into memory. See [`UserReader`] for the format.
pub fn read_users<R: BufRead>(reader: R) -> Result<Vec<(u64, u64)>> {
    UserReader::new(reader)?.collect()
}
