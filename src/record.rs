//! Record framing for the MPS7 record section.
//!
//! Each record starts with a one-byte type tag that fixes its width:
//!
//! | tag | kind          | width | layout                                  |
//! |-----|---------------|-------|-----------------------------------------|
//! | 0   | Debit         | 21    | tag, user id (i64), 4 unused, amount (f64) |
//! | 1   | Credit        | 21    | same as Debit                           |
//! | 2   | AutopayStart  | 13    | tag, user id (i64), 4 unused             |
//! | 3   | AutopayEnd    | 13    | same as AutopayStart                    |
//!
//! All multi-byte fields are big-endian.

use crate::error::{LedgerError, Result};
use serde::Serialize;

const USER_ID_RANGE: std::ops::Range<usize> = 1..9;
const AMOUNT_RANGE: std::ops::Range<usize> = 13..21;

/// Record kind, as identified by the leading tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RecordKind {
    Debit,
    Credit,
    AutopayStart,
    AutopayEnd,
}

impl RecordKind {
    /// Maps a tag byte to its kind. Returns `None` for unknown tags.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(RecordKind::Debit),
            1 => Some(RecordKind::Credit),
            2 => Some(RecordKind::AutopayStart),
            3 => Some(RecordKind::AutopayEnd),
            _ => None,
        }
    }

    /// Total encoded width in bytes, tag included.
    pub fn width(self) -> usize {
        match self {
            RecordKind::Debit | RecordKind::Credit => 21,
            RecordKind::AutopayStart | RecordKind::AutopayEnd => 13,
        }
    }
}

/// A decoded record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Record {
    /// Money paid by the user.
    Debit { user_id: i64, amount: f64 },

    /// Money refunded or credited to the user.
    Credit { user_id: i64, amount: f64 },

    /// Autopay enrollment started.
    AutopayStart { user_id: i64 },

    /// Autopay enrollment ended.
    AutopayEnd { user_id: i64 },
}

impl Record {
    /// Frames and decodes one record from the front of `buf`.
    ///
    /// `offset` is the absolute position of `buf[0]` in the input and is only
    /// used for error reporting. Returns the record and the number of bytes
    /// it occupies.
    pub fn frame(buf: &[u8], offset: usize) -> Result<(Record, usize)> {
        let tag = match buf.first() {
            Some(&tag) => tag,
            None => {
                return Err(LedgerError::TruncatedRecord {
                    offset,
                    tag: 0,
                    needed: 1,
                    available: 0,
                })
            }
        };

        let kind =
            RecordKind::from_tag(tag).ok_or(LedgerError::UnknownRecordType { tag, offset })?;

        let width = kind.width();
        if buf.len() < width {
            return Err(LedgerError::TruncatedRecord {
                offset,
                tag,
                needed: width,
                available: buf.len(),
            });
        }

        let user_id = read_i64(&buf[USER_ID_RANGE]);

        let record = match kind {
            RecordKind::Debit => Record::Debit {
                user_id,
                amount: read_f64(&buf[AMOUNT_RANGE]),
            },
            RecordKind::Credit => Record::Credit {
                user_id,
                amount: read_f64(&buf[AMOUNT_RANGE]),
            },
            RecordKind::AutopayStart => Record::AutopayStart { user_id },
            RecordKind::AutopayEnd => Record::AutopayEnd { user_id },
        };

        Ok((record, width))
    }

    /// The record kind.
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Debit { .. } => RecordKind::Debit,
            Record::Credit { .. } => RecordKind::Credit,
            Record::AutopayStart { .. } => RecordKind::AutopayStart,
            Record::AutopayEnd { .. } => RecordKind::AutopayEnd,
        }
    }

    /// User the record refers to.
    pub fn user_id(&self) -> i64 {
        match *self {
            Record::Debit { user_id, .. }
            | Record::Credit { user_id, .. }
            | Record::AutopayStart { user_id }
            | Record::AutopayEnd { user_id } => user_id,
        }
    }

    /// Amount carried by debit and credit records.
    pub fn amount(&self) -> Option<f64> {
        match *self {
            Record::Debit { amount, .. } | Record::Credit { amount, .. } => Some(amount),
            Record::AutopayStart { .. } | Record::AutopayEnd { .. } => None,
        }
    }

    /// Encoded width of this record in bytes.
    pub fn encoded_len(&self) -> usize {
        self.kind().width()
    }
}

fn read_i64(bytes: &[u8]) -> i64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(bytes);
    i64::from_be_bytes(raw)
}

fn read_f64(bytes: &[u8]) -> f64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(bytes);
    f64::from_be_bytes(raw)
}

/// Walks a record section, yielding one decoded record at a time.
///
/// Stops after the first error: once framing fails the rest of the buffer
/// cannot be aligned, so the iterator is fused from that point on.
pub struct RecordReader<'a> {
    remaining: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> RecordReader<'a> {
    /// Creates a reader over `records`, whose first byte sits at absolute
    /// position `base_offset` in the input.
    pub fn new(records: &'a [u8], base_offset: usize) -> Self {
        RecordReader {
            remaining: records,
            offset: base_offset,
            failed: false,
        }
    }

    /// Absolute position of the next unread byte.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl<'a> Iterator for RecordReader<'a> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining.is_empty() {
            return None;
        }

        match Record::frame(self.remaining, self.offset) {
            Ok((record, consumed)) => {
                self.remaining = &self.remaining[consumed..];
                self.offset += consumed;
                Some(Ok(record))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for RecordReader<'_> {}
