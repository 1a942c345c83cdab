// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! On-disk snapshot of a built engine.
//!
//! ```text
//! ┌──────────────── header (24 bytes) ────────────────┐
//! │ magic "WKDX" │ version │ flags │ reserved (2)     │
//! │ article count (u32 LE) │ payload length (u64 LE)  │
//! │ reserved (4)                                      │
//! ├───────────────────── payload ─────────────────────┤
//! │ bincode-encoded engine state                      │
//! ├────────────────── footer (8 bytes) ───────────────┤
//! │ CRC32 of header + payload │ magic "XDKW"          │
//! └───────────────────────────────────────────────────┘
//! ```
//!
//! The header flags duplicate the index options so `wikidex stats` style
//! tooling can tell what a snapshot holds without decoding the payload. On
//! load they must agree with the decoded options, and the decoded engine is
//! run through the structural verifier before it is handed out. A custom
//! stemmer is not persisted: a loaded engine stems with Snowball in the
//! language recorded in its options.

use std::fs;
use std::path::Path;

use crc32fast::Hasher as Crc32Hasher;
use tracing::info;

use crate::engine::{Engine, EngineState};
use crate::error::{Error, Result};
use crate::types::IndexOptions;
use crate::verify::check_well_formed;

// ============================================================================
// CONSTANTS
// ============================================================================

/// "WKDX"
pub const MAGIC: [u8; 4] = *b"WKDX";

/// "XDKW", the header magic reversed.
pub const FOOTER_MAGIC: [u8; 4] = *b"XDKW";

pub const VERSION: u8 = 2;

pub const HEADER_SIZE: usize = 24;

pub const FOOTER_SIZE: usize = 8;

// ============================================================================
// FLAGS
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotFlags(pub(crate) u8);

impl SnapshotFlags {
    pub const MULTIFIELD: u8 = 0b0000_0001;
    pub const POSITIONAL: u8 = 0b0000_0010;
    pub const STEMMING: u8 = 0b0000_0100;
    pub const PERMUTERM: u8 = 0b0000_1000;

    pub fn from_options(options: &IndexOptions) -> Self {
        let mut bits = 0;
        if options.multifield {
            bits |= Self::MULTIFIELD;
        }
        if options.positional {
            bits |= Self::POSITIONAL;
        }
        if options.stemming {
            bits |= Self::STEMMING;
        }
        if options.permuterm {
            bits |= Self::PERMUTERM;
        }
        Self(bits)
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

// ============================================================================
// HEADER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotHeader {
    pub version: u8,
    pub flags: SnapshotFlags,
    pub article_count: u32,
    pub payload_len: u64,
}

impl SnapshotHeader {
    fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0..4].copy_from_slice(&MAGIC);
        buf[4] = self.version;
        buf[5] = self.flags.0;
        // buf[6..8] reserved
        buf[8..12].copy_from_slice(&self.article_count.to_le_bytes());
        buf[12..20].copy_from_slice(&self.payload_len.to_le_bytes());
        // buf[20..24] reserved
        buf
    }

    /// Parse and validate the fixed header at the start of `bytes`.
    pub fn read(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::Snapshot("file too short for header".into()));
        }
        if bytes[0..4] != MAGIC {
            return Err(Error::Snapshot(format!(
                "invalid magic: expected WKDX, got {:?}",
                &bytes[0..4]
            )));
        }
        let version = bytes[4];
        if version != VERSION {
            return Err(Error::Snapshot(format!(
                "unsupported version {} (expected {})",
                version, VERSION
            )));
        }

        let mut count = [0u8; 4];
        count.copy_from_slice(&bytes[8..12]);
        let mut len = [0u8; 8];
        len.copy_from_slice(&bytes[12..20]);

        Ok(Self {
            version,
            flags: SnapshotFlags(bytes[5]),
            article_count: u32::from_le_bytes(count),
            payload_len: u64::from_le_bytes(len),
        })
    }
}

fn compute_crc32(data: &[u8]) -> u32 {
    let mut hasher = Crc32Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

// ============================================================================
// ENCODE / DECODE
// ============================================================================

/// Serialize `engine` into snapshot bytes.
pub fn to_bytes(engine: &Engine) -> Result<Vec<u8>> {
    let state = engine.to_state();
    let payload = bincode::serde::encode_to_vec(&state, bincode::config::standard())
        .map_err(|e| Error::Snapshot(format!("encoding failed: {}", e)))?;

    let header = SnapshotHeader {
        version: VERSION,
        flags: SnapshotFlags::from_options(&state.options),
        article_count: state.articles.len() as u32,
        payload_len: payload.len() as u64,
    };

    let mut bytes = Vec::with_capacity(HEADER_SIZE + payload.len() + FOOTER_SIZE);
    bytes.extend_from_slice(&header.encode());
    bytes.extend_from_slice(&payload);
    let crc = compute_crc32(&bytes);
    bytes.extend_from_slice(&crc.to_le_bytes());
    bytes.extend_from_slice(&FOOTER_MAGIC);
    Ok(bytes)
}

/// Decode and verify snapshot bytes.
pub fn from_bytes(bytes: &[u8]) -> Result<Engine> {
    let header = SnapshotHeader::read(bytes)?;

    let expected_len = usize::try_from(header.payload_len)
        .ok()
        .and_then(|len| len.checked_add(HEADER_SIZE + FOOTER_SIZE))
        .ok_or_else(|| Error::Snapshot("payload length overflows".into()))?;
    if bytes.len() != expected_len {
        return Err(Error::Snapshot(format!(
            "expected {} bytes, found {} (truncated or trailing data)",
            expected_len,
            bytes.len()
        )));
    }

    let footer_start = bytes.len() - FOOTER_SIZE;
    if bytes[footer_start + 4..] != FOOTER_MAGIC {
        return Err(Error::Snapshot("invalid footer magic".into()));
    }
    let mut stored = [0u8; 4];
    stored.copy_from_slice(&bytes[footer_start..footer_start + 4]);
    let stored = u32::from_le_bytes(stored);
    let actual = compute_crc32(&bytes[..footer_start]);
    if stored != actual {
        return Err(Error::Snapshot(format!(
            "checksum mismatch: stored {:08x}, computed {:08x}",
            stored, actual
        )));
    }

    let payload = &bytes[HEADER_SIZE..footer_start];
    let (state, read): (EngineState, usize) =
        bincode::serde::decode_from_slice(payload, bincode::config::standard())
            .map_err(|e| Error::Snapshot(format!("decoding failed: {}", e)))?;
    if read != payload.len() {
        return Err(Error::Snapshot("trailing bytes after payload".into()));
    }

    if SnapshotFlags::from_options(&state.options) != header.flags
        || state.articles.len() as u64 != u64::from(header.article_count)
    {
        return Err(Error::Snapshot("header does not match payload".into()));
    }

    let engine = Engine::from_state(state);
    check_well_formed(&engine).map_err(|e| Error::Snapshot(e.to_string()))?;
    Ok(engine)
}

/// Write `engine` to `path`.
pub fn save(engine: &Engine, path: &Path) -> Result<()> {
    let bytes = to_bytes(engine)?;
    fs::write(path, &bytes).map_err(|e| Error::io(path, e))?;
    info!(
        path = %path.display(),
        bytes = bytes.len(),
        articles = engine.article_count(),
        "saved snapshot"
    );
    Ok(())
}

/// Read an engine back from `path`.
pub fn load(path: &Path) -> Result<Engine> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let engine = from_bytes(&bytes)?;
    info!(
        path = %path.display(),
        articles = engine.article_count(),
        "loaded snapshot"
    );
    Ok(engine)
}
