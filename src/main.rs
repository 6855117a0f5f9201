//! MPS7 Ledger CLI
//!
//! Reads an MPS7 transaction log and prints totals, autopay counts and the
//! balance of one user.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- txnlog.dat --user 2456938384156277127 --format text
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use clap::{Parser, ValueEnum};
use mps7_ledger::{process_bytes, Result};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "mps7-ledger")]
#[command(about = "Decode an MPS7 transaction log and report totals and balances", long_about = None)]
struct Cli {
    /// Transaction log to read
    #[arg(default_value = "txnlog.dat")]
    input: PathBuf,

    /// User whose balance the summary reports
    #[arg(
        short,
        long,
        default_value_t = 2_456_938_384_156_277_127,
        allow_negative_numbers = true
    )]
    user: i64,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    /// Totals, autopay counts and one user's balance
    Text,
    /// Every account as `user_id,balance`
    Csv,
    /// Full report as JSON
    Json,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let bytes = fs::read(&cli.input)?;
    let report = process_bytes(&bytes)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    match cli.format {
        OutputFormat::Text => report.write_summary(handle, cli.user)?,
        OutputFormat::Csv => report.write_accounts_csv(handle)?,
        OutputFormat::Json => report.write_json(handle, cli.user)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("mps7-ledger").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.input, PathBuf::from("txnlog.dat"));
        assert_eq!(cli.user, 2_456_938_384_156_277_127);
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_all_flags() {
        let cli = parse(&["log.dat", "--user", "-5", "--format", "json"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("log.dat"));
        assert_eq!(cli.user, -5);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_equals_and_short_forms() {
        let cli = parse(&["--user=7", "-f", "csv"]).unwrap();
        assert_eq!(cli.user, 7);
        assert_eq!(cli.format, OutputFormat::Csv);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(parse(&["--user"]).is_err());
        assert!(parse(&["--user", "abc"]).is_err());
        assert!(parse(&["--user", "9223372036854775808"]).is_err());
        assert!(parse(&["--format", "xml"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
        assert!(parse(&["a.dat", "b.dat"]).is_err());
    }

    #[test]
    fn test_help_is_not_a_usage_error() {
        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
