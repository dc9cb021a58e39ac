// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use bank_demo_rs::{Bank, Report, ReportOptions, ZipCode};
use clap::{Parser, ValueEnum};
use csv::{Terminator, WriterBuilder};
use rust_decimal::Decimal;
use std::fmt::Display;
use std::io::Write;
use std::process;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Bank Demo - Query a sample bank
///
/// Builds a bank from deterministic sample data, runs every query against
/// it and prints the results to stdout.
#[derive(Parser, Debug)]
#[command(name = "bank-demo-rs")]
#[command(about = "Runs the bank queries over generated sample data", long_about = None)]
struct Args {
    /// Number of sample customers (each owns two accounts, the last one three)
    #[arg(short, long, default_value_t = 10)]
    customers: usize,

    /// Name of the bank
    #[arg(short, long, default_value = "Sample")]
    name: String,

    /// Balance threshold for the "accounts above" query
    #[arg(short, long, default_value_t = ReportOptions::DEFAULT_THRESHOLD)]
    threshold: Decimal,

    /// Account number whose owner ZIP code is looked up (repeatable)
    #[arg(long = "lookup", value_name = "ACCOUNT", default_values_t = ReportOptions::DEFAULT_LOOKUPS.map(String::from))]
    lookups: Vec<String>,

    /// ZIP code whose customers are listed (repeatable)
    #[arg(long = "zip", value_name = "ZIP", allow_negative_numbers = true, default_values_t = ReportOptions::DEFAULT_ZIP_CODES.map(|zip| zip.0))]
    zip_codes: Vec<i32>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl Args {
    fn report_options(&self) -> ReportOptions {
        ReportOptions {
            threshold: self.threshold,
            lookups: self.lookups.iter().map(|n| n.as_str().into()).collect(),
            zip_codes: self.zip_codes.iter().copied().map(ZipCode).collect(),
        }
    }
}

/// Failure while rendering a report.
#[derive(Error, Debug)]
enum OutputError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn main() {
    // Diagnostics go to stderr, report to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let bank = Bank::sample(args.name.as_str(), args.customers);
    let report = match Report::collect(&bank, &args.report_options()) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error querying bank '{}': {}", bank.name(), e);
            process::exit(1);
        }
    };

    let stdout = std::io::stdout();
    let result = match args.format {
        Format::Text => write_report_text(&report, stdout.lock()),
        Format::Json => write_report_json(&report, stdout.lock()),
    };
    if let Err(e) = result {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}

/// Write the report as pretty-printed JSON.
fn write_report_json<W: Write>(report: &Report, mut writer: W) -> Result<(), OutputError> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    Ok(())
}

/// Write the report as narrative text.
///
/// Each section starts with a heading and ends with a blank line. Grouped
/// results are written as two-column CSV tables.
///
/// # Example
///
/// ```text
/// sum of account balances: 777000.0
///
/// ZIP code, number of customers
/// zip_code,customers
/// 12222,3
/// 12223,3
/// ```
fn write_report_text<W: Write>(report: &Report, mut writer: W) -> Result<(), OutputError> {
    writeln!(writer, "bank: {}", report.bank)?;
    writeln!(writer)?;

    write_list(&mut writer, "customers:", &report.customers)?;
    write_list(&mut writer, "accounts:", &report.accounts)?;
    write_list(
        &mut writer,
        &format!("accounts with balance > {}:", report.threshold),
        &report.accounts_above_threshold,
    )?;

    for lookup in &report.zip_code_lookups {
        let zip_code = lookup
            .zip_code
            .map_or_else(|| "none".to_string(), |zip| zip.to_string());
        writeln!(
            writer,
            "ZIP code of the owner of account {}: {}",
            lookup.account_number, zip_code
        )?;
    }
    writeln!(writer)?;

    writeln!(writer, "account number, ZIP code")?;
    write_table(
        &mut writer,
        ["account_number", "zip_code"],
        &report.account_zip_codes,
    )?;

    writeln!(writer, "sum of account balances: {}", report.total_balance)?;
    writeln!(writer)?;
    writeln!(
        writer,
        "maximum of account balances: {}",
        report.maximum_balance
    )?;
    writeln!(writer)?;

    writeln!(writer, "ZIP code, number of customers")?;
    write_table(
        &mut writer,
        ["zip_code", "customers"],
        &report.customers_per_zip_code,
    )?;

    for group in &report.customers_by_zip_code {
        write_list(
            &mut writer,
            &format!("customers with ZIP code {}:", group.zip_code),
            &group.customers,
        )?;
    }

    writeln!(writer, "ZIP code, number of accounts")?;
    write_table(
        &mut writer,
        ["zip_code", "accounts"],
        &report.accounts_per_zip_code,
    )?;

    write_list(
        &mut writer,
        "accounts with the maximum balance:",
        &report.max_balance_accounts,
    )?;

    writer.flush()?;
    Ok(())
}

fn write_list<W: Write, T: Display>(
    writer: &mut W,
    heading: &str,
    items: &[T],
) -> Result<(), OutputError> {
    writeln!(writer, "{heading}")?;
    for item in items {
        writeln!(writer, "{item}")?;
    }
    writeln!(writer)?;
    Ok(())
}

fn write_table<W: Write, K: Display, V: Display>(
    writer: &mut W,
    header: [&str; 2],
    rows: &[(K, V)],
) -> Result<(), OutputError> {
    {
        let mut wtr = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(&mut *writer);
        wtr.write_record(header)?;
        for (key, value) in rows {
            wtr.write_record([key.to_string(), value.to_string()])?;
        }
        wtr.flush()?;
    }
    writeln!(writer)?;
    Ok(())
}
