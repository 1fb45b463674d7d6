use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::{FinancialReport, build_report};
use crate::domain::{Transaction, format_cents};

/// Ledger snapshot for JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub transactions: Vec<Transaction>,
    pub report: FinancialReport,
}

/// Exporter for converting ledger data to various formats
pub struct Exporter<'a> {
    transactions: &'a [Transaction],
}

impl<'a> Exporter<'a> {
    pub fn new(transactions: &'a [Transaction]) -> Self {
        Self { transactions }
    }

    /// Export transactions to CSV format
    pub fn export_transactions_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "date", "description", "category", "amount"])?;

        let mut count = 0;
        for transaction in self.transactions {
            csv_writer.write_record([
                transaction.id.as_str(),
                transaction.date.as_str(),
                transaction.description.as_str(),
                transaction.category.as_str(),
                format_cents(transaction.amount).as_str(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export transactions plus the derived report as a JSON snapshot
    pub fn export_json<W: Write>(&self, mut writer: W) -> Result<LedgerSnapshot> {
        let snapshot = LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            transactions: self.transactions.to_vec(),
            report: build_report(self.transactions),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}
