//! Aggregate report and its renderers.

use crate::account::UserAccount;
use crate::decimal::Money2;
use crate::error::Result;
use crate::header::Header;
use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;

/// Final state of a completed aggregation pass.
///
/// Immutable once built. Lookups for users that never appeared in the log
/// return a synthesized zero-balance account instead of failing.
#[derive(Debug, Clone)]
pub struct AggregateReport {
    header: Header,
    record_count: u64,
    total_credit: f64,
    total_debit: f64,
    autopay_start_count: u64,
    autopay_end_count: u64,
    accounts: HashMap<i64, UserAccount>,
}

impl AggregateReport {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        header: Header,
        record_count: u64,
        total_credit: f64,
        total_debit: f64,
        autopay_start_count: u64,
        autopay_end_count: u64,
        accounts: HashMap<i64, UserAccount>,
    ) -> Self {
        AggregateReport {
            header,
            record_count,
            total_credit,
            total_debit,
            autopay_start_count,
            autopay_end_count,
            accounts,
        }
    }

    /// Header of the processed log.
    pub fn header(&self) -> Header {
        self.header
    }

    /// Number of records actually framed.
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    pub fn total_credit(&self) -> f64 {
        self.total_credit
    }

    pub fn total_debit(&self) -> f64 {
        self.total_debit
    }

    pub fn autopay_start_count(&self) -> u64 {
        self.autopay_start_count
    }

    pub fn autopay_end_count(&self) -> u64 {
        self.autopay_end_count
    }

    /// Returns `true` if the user appeared in any record.
    pub fn contains(&self, user_id: i64) -> bool {
        self.accounts.contains_key(&user_id)
    }

    /// Returns the user's account, or a zero-balance account if the user
    /// never appeared.
    pub fn account(&self, user_id: i64) -> UserAccount {
        self.accounts
            .get(&user_id)
            .copied()
            .unwrap_or_else(|| UserAccount::new(user_id))
    }

    /// All accounts, sorted by user id ascending.
    pub fn accounts(&self) -> impl Iterator<Item = &UserAccount> {
        let mut accounts: Vec<_> = self.accounts.values().collect();
        accounts.sort_by_key(|a| a.user_id);
        accounts.into_iter()
    }

    /// Writes the plain-text summary, including one user's balance.
    pub fn write_summary<W: Write>(&self, mut writer: W, user_id: i64) -> Result<()> {
        writeln!(
            writer,
            "total credit amount={}",
            Money2::from_f64(self.total_credit)
        )?;
        writeln!(
            writer,
            "total debit amount={}",
            Money2::from_f64(self.total_debit)
        )?;
        writeln!(writer, "autopays started={}", self.autopay_start_count)?;
        writeln!(writer, "autopays ended={}", self.autopay_end_count)?;
        writeln!(
            writer,
            "balance for user {}={}",
            user_id,
            Money2::from_f64(self.account(user_id).balance)
        )?;
        writer.flush()?;
        Ok(())
    }

    /// Writes every account as CSV.
    ///
    /// Output is sorted by user id for deterministic results.
    /// Balances are formatted with exactly 2 decimal places.
    pub fn write_accounts_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["user_id", "balance"])?;

        for account in self.accounts() {
            csv_writer.write_record([
                account.user_id.to_string(),
                Money2::from_f64(account.balance).to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Writes the full report as pretty-printed JSON.
    pub fn write_json<W: Write>(&self, mut writer: W, user_id: i64) -> Result<()> {
        let view = JsonReport {
            version: self.header.version,
            declared_record_count: self.header.declared_record_count,
            record_count: self.record_count,
            total_credit: Money2::from_f64(self.total_credit),
            total_debit: Money2::from_f64(self.total_debit),
            autopay_start_count: self.autopay_start_count,
            autopay_end_count: self.autopay_end_count,
            user: JsonAccount::from(&self.account(user_id)),
            accounts: self.accounts().map(JsonAccount::from).collect(),
        };

        serde_json::to_writer_pretty(&mut writer, &view)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonReport {
    version: u8,
    declared_record_count: u32,
    record_count: u64,
    total_credit: Money2,
    total_debit: Money2,
    autopay_start_count: u64,
    autopay_end_count: u64,
    user: JsonAccount,
    accounts: Vec<JsonAccount>,
}

// User ids are strings so JSON consumers with 53-bit integers don't round them.
#[derive(Serialize)]
struct JsonAccount {
    user_id: String,
    balance: Money2,
}

impl From<&UserAccount> for JsonAccount {
    fn from(account: &UserAccount) -> Self {
        JsonAccount {
            user_id: account.user_id.to_string(),
            balance: Money2::from_f64(account.balance),
        }
    }
}
