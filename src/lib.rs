//! # MPS7 Ledger
//!
//! Decodes MPS7 binary transaction logs and aggregates credit/debit totals,
//! autopay counts, and per-user running balances.
//!
//! ## Design Principles
//!
//! - **Single forward pass**: records are framed from their leading tag and
//!   folded immediately, with no buffering beyond the cursor
//! - **Fail fast**: a bad header, a truncated record, or an unknown tag aborts
//!   the pass; partial reports are never produced
//! - **Owned state**: each pass owns its accumulators and hands back an
//!   immutable [`AggregateReport`]
//! - **Deterministic output**: accounts sorted by user id
//!
//! ## Example
//!
//! ```no_run
//! let bytes = std::fs::read("txnlog.dat").unwrap();
//! let report = mps7_ledger::process_bytes(&bytes).unwrap();
//! report.write_summary(std::io::stdout(), 2456938384156277127).unwrap();
//! ```

pub mod account;
pub mod decimal;
pub mod engine;
pub mod error;
pub mod header;
pub mod record;
pub mod report;

pub use account::UserAccount;
pub use decimal::Money2;
pub use engine::{process_bytes, LedgerEngine};
pub use error::{LedgerError, Result};
pub use header::{Header, HEADER_LEN, MAGIC};
pub use record::{Record, RecordKind, RecordReader};
pub use report::AggregateReport;
