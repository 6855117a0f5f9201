//! Streaming aggregation over decoded records.
//!
//! A single forward pass: validate the header, frame records until the
//! buffer is exhausted, fold each one into the running totals. Any framing
//! failure aborts the pass and nothing is reported.

use crate::account::UserAccount;
use crate::error::Result;
use crate::header::{Header, HEADER_LEN};
use crate::record::{Record, RecordReader};
use crate::report::AggregateReport;
use log::{debug, info, warn};
use std::collections::HashMap;

/// Decodes an MPS7 log held in memory and aggregates it.
///
/// Fails with `Format` on a bad header, and with `TruncatedRecord` or
/// `UnknownRecordType` if the record section cannot be framed.
pub fn process_bytes(buf: &[u8]) -> Result<AggregateReport> {
    let (header, records) = Header::parse(buf)?;

    let mut engine = LedgerEngine::new(header);
    let mut reader = RecordReader::new(records, HEADER_LEN);
    for record in reader.by_ref() {
        engine.apply(&record?);
    }
    debug!("Framed {} of {} bytes", reader.offset(), buf.len());

    Ok(engine.finish())
}

/// Running state of one aggregation pass.
///
/// Owned exclusively by the pass that created it; the only way out is
/// [`LedgerEngine::finish`], which hands back an immutable report.
#[derive(Debug)]
pub struct LedgerEngine {
    header: Header,
    record_count: u64,
    total_credit: f64,
    total_debit: f64,
    autopay_start_count: u64,
    autopay_end_count: u64,

    /// Accounts indexed by user id, created on first reference.
    accounts: HashMap<i64, UserAccount>,
}

impl LedgerEngine {
    /// Creates an empty engine for a log with the given header.
    pub fn new(header: Header) -> Self {
        LedgerEngine {
            header,
            record_count: 0,
            total_credit: 0.0,
            total_debit: 0.0,
            autopay_start_count: 0,
            autopay_end_count: 0,
            accounts: HashMap::new(),
        }
    }

    /// Folds one record into the running state.
    pub fn apply(&mut self, record: &Record) {
        self.record_count += 1;
        let account = self.ensure_account_exists(record.user_id());

        match *record {
            Record::Debit { user_id, amount } => {
                account.debit(amount);
                self.total_debit += amount;
                debug!(
                    "Record {}: debit {} for user {}",
                    self.record_count, amount, user_id
                );
            }
            Record::Credit { user_id, amount } => {
                account.credit(amount);
                self.total_credit += amount;
                debug!(
                    "Record {}: credit {} for user {}",
                    self.record_count, amount, user_id
                );
            }
            Record::AutopayStart { user_id } => {
                self.autopay_start_count += 1;
                debug!(
                    "Record {}: autopay start for user {}",
                    self.record_count, user_id
                );
            }
            Record::AutopayEnd { user_id } => {
                self.autopay_end_count += 1;
                debug!(
                    "Record {}: autopay end for user {}",
                    self.record_count, user_id
                );
            }
        }
    }

    /// Ensures an account exists for the given user, creating one if needed.
    ///
    /// Never resets an existing account.
    fn ensure_account_exists(&mut self, user_id: i64) -> &mut UserAccount {
        self.accounts
            .entry(user_id)
            .or_insert_with(|| UserAccount::new(user_id))
    }

    /// Ends the pass and produces the report.
    pub fn finish(self) -> AggregateReport {
        if u64::from(self.header.declared_record_count) != self.record_count {
            warn!(
                "Header declares {} records but {} were read",
                self.header.declared_record_count, self.record_count
            );
        }

        info!(
            "Processed {} records for {} users",
            self.record_count,
            self.accounts.len()
        );

        AggregateReport::new(
            self.header,
            self.record_count,
            self.total_credit,
            self.total_debit,
            self.autopay_start_count,
            self.autopay_end_count,
            self.accounts,
        )
    }
}
