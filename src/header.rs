//! MPS7 file header validation.

use crate::error::{LedgerError, Result};
use log::debug;
use serde::Serialize;

/// Magic token every MPS7 log starts with.
pub const MAGIC: &[u8; 4] = b"MPS7";

/// Header length: 4 magic + 1 version + 4 record count.
pub const HEADER_LEN: usize = 9;

/// Decoded file header.
///
/// `declared_record_count` is informational only. The record section is
/// consumed until the buffer is exhausted regardless of this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Opaque format version byte.
    pub version: u8,

    /// Record count as written by the producer.
    pub declared_record_count: u32,
}

impl Header {
    /// Validates the header at the start of `buf`.
    ///
    /// Returns the header and the record section that follows it.
    pub fn parse(buf: &[u8]) -> Result<(Header, &[u8])> {
        if buf.len() < HEADER_LEN || &buf[..4] != MAGIC {
            return Err(LedgerError::Format {
                found: buf[..buf.len().min(4)].to_vec(),
            });
        }

        let version = buf[4];
        let declared_record_count = u32::from_be_bytes([buf[5], buf[6], buf[7], buf[8]]);

        debug!(
            "MPS7 header: version {}, {} records declared",
            version, declared_record_count
        );

        Ok((
            Header {
                version,
                declared_record_count,
            },
            &buf[HEADER_LEN..],
        ))
    }
}
