use std::fs::File;
use std::io::{self, Read, Write};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use log::{LevelFilter, info};

use crate::api::{ApiClient, ApiResponse, DEFAULT_BASE_URL, LoginRequest};
use crate::application::{AppError, TrackerService, TransactionDraft};
use crate::domain::{
    Locale, Transaction, TransactionPatch, format_currency, format_date, parse_cents,
};
use crate::io::Exporter;
use crate::storage::LedgerStore;

mod session;

pub use session::{run_session, split_args};

/// Pocketbook - Personal Finance Tracker
#[derive(Parser)]
#[command(name = "pocketbook")]
#[command(about = "Track income and expenses and see where the money goes")]
#[command(version)]
pub struct Cli {
    /// Display locale for currency and dates: pt-BR, en-US
    #[arg(long, global = true, env = "POCKETBOOK_LOCALE", default_value = "pt-BR")]
    pub locale: Locale,

    /// Backend base URL for remote commands
    #[arg(long, global = true, env = "API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Ledger(LedgerCommands),

    /// Run a script of ledger commands against a single session
    Session {
        /// Script file, one command per line (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Talk to the finance backend
    #[command(subcommand)]
    Remote(RemoteCommands),
}

/// Commands operating on the in-memory ledger.
#[derive(Subcommand, Debug)]
pub enum LedgerCommands {
    /// List transactions, most recent first
    List,

    /// Record a transaction
    Add {
        /// Description (e.g., "Compra no supermercado")
        description: String,

        /// Amount, positive for income and negative for expense (e.g., "150.00", "-45,90")
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Category (e.g., "Alimentação", "Salário", "Transporte")
        category: String,

        /// Date of the transaction (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Remove a transaction by id
    Remove {
        /// Transaction ID
        id: String,
    },

    /// Show totals and expenses by category
    Report {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Export transactions to CSV or JSON
    Export {
        /// Format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum RemoteCommands {
    /// Show backend status
    Status,

    /// Log in with email and password
    Login {
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// List transactions stored on the backend
    Transactions,

    /// Create a transaction on the backend
    Create {
        description: String,

        #[arg(allow_hyphen_values = true)]
        amount: String,

        category: String,

        #[arg(long)]
        date: Option<String>,
    },

    /// Update fields of a backend transaction
    Update {
        id: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        amount: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a backend transaction
    Delete { id: String },

    /// Show the backend's financial summary
    Summary,
}

impl Cli {
    /// Initialize logging. RUST_LOG, when set, refines the level chosen by `-v`.
    pub fn init_logging(&self) {
        let level = match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        };
        let _ = env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .try_init();
    }

    pub async fn run(self) -> Result<()> {
        let locale = self.locale;

        match self.command {
            Commands::Ledger(cmd) => {
                let mut store = LedgerStore::seeded();
                let mut service = TrackerService::new(&mut store);
                let stdout = io::stdout();
                run_ledger_command(&mut service, cmd, locale, &mut stdout.lock())?;
            }

            Commands::Session { input } => {
                let script = match input {
                    Some(path) => std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read session script {}", path))?,
                    None => {
                        let mut script = String::new();
                        io::stdin()
                            .read_to_string(&mut script)
                            .context("Failed to read session script from stdin")?;
                        script
                    }
                };

                let mut store = LedgerStore::seeded();
                let mut service = TrackerService::new(&mut store);
                let stdout = io::stdout();
                run_session(&mut service, &script, locale, &mut stdout.lock())?;
            }

            Commands::Remote(cmd) => {
                let client = ApiClient::new(self.api_url);
                info!("Using backend at {}", client.base_url());
                run_remote_command(&client, cmd, locale, &mut io::stdout()).await?;
            }
        }

        Ok(())
    }
}

/// Execute one ledger command, writing human-readable output to `out`.
pub fn run_ledger_command<W: Write>(
    service: &mut TrackerService<'_>,
    cmd: LedgerCommands,
    locale: Locale,
    out: &mut W,
) -> Result<()> {
    match cmd {
        LedgerCommands::List => {
            print_transactions(service.transactions(), locale, out)?;
        }

        LedgerCommands::Add {
            description,
            amount,
            category,
            date,
        } => {
            let mut draft = TransactionDraft::new(description, amount, category);
            draft.date = date;
            let transaction = service.record(&draft)?;

            writeln!(
                out,
                "Recorded transaction: {} {} ({})",
                transaction.description,
                format_currency(transaction.amount, locale),
                transaction.id
            )?;
            writeln!(out)?;
            print_transactions(service.transactions(), locale, out)?;
        }

        LedgerCommands::Remove { id } => match service.remove(&id) {
            Some(transaction) => {
                writeln!(out, "Removed transaction: {}", transaction.description)?;
            }
            None => writeln!(out, "No transaction with id {}", id)?,
        },

        LedgerCommands::Report { format } => {
            let report = service.report();
            match format.as_str() {
                "json" => writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?,
                "table" => {
                    writeln!(out, "Financial Report")?;
                    writeln!(out)?;
                    writeln!(
                        out,
                        "Total revenues:  {:>18}",
                        format_currency(report.summary.revenues, locale)
                    )?;
                    writeln!(
                        out,
                        "Total expenses:  {:>18}",
                        format_currency(report.summary.expenses, locale)
                    )?;
                    writeln!(out, "{}", "-".repeat(35))?;
                    writeln!(
                        out,
                        "Balance:         {:>18}",
                        format_currency(report.summary.balance, locale)
                    )?;
                    writeln!(out)?;

                    if report.has_expenses() {
                        writeln!(out, "Expenses by Category")?;
                        writeln!(
                            out,
                            "{:<24} {:>18} {:>8} {:>8}",
                            "CATEGORY", "AMOUNT", "SHARE", "COLOR"
                        )?;
                        writeln!(out, "{}", "-".repeat(61))?;
                        for slice in &report.chart {
                            writeln!(
                                out,
                                "{:<24} {:>18} {:>7.1}% {:>8}",
                                slice.category,
                                format_currency(slice.amount, locale),
                                slice.percentage,
                                slice.color
                            )?;
                        }
                    } else {
                        writeln!(out, "No expenses found to build the report.")?;
                    }
                }
                other => bail!("Unknown report format '{}'. Use table or json", other),
            }
        }

        LedgerCommands::Export { format, output } => {
            let exporter = Exporter::new(service.transactions());
            let count = match output.as_deref() {
                Some(path) => {
                    let file = File::create(path)
                        .with_context(|| format!("Failed to create {}", path))?;
                    let count = export_to(&exporter, &format, file)?;
                    writeln!(out, "Exported {} transactions to {}", count, path)?;
                    count
                }
                None => export_to(&exporter, &format, &mut *out)?,
            };
            info!("Exported {} transactions as {}", count, format);
        }
    }

    Ok(())
}

fn export_to<W: Write>(exporter: &Exporter<'_>, format: &str, writer: W) -> Result<usize> {
    match format {
        "csv" => exporter.export_transactions_csv(writer),
        "json" => Ok(exporter.export_json(writer)?.transactions.len()),
        other => bail!("Unknown export format '{}'. Use csv or json", other),
    }
}

fn print_transactions<W: Write>(
    transactions: &[Transaction],
    locale: Locale,
    out: &mut W,
) -> Result<()> {
    if transactions.is_empty() {
        writeln!(out, "No transactions found.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<36} {:<10} {:<26} {:<16} {:>16}",
        "ID", "DATE", "DESCRIPTION", "CATEGORY", "AMOUNT"
    )?;
    writeln!(out, "{}", "-".repeat(108))?;
    for transaction in transactions {
        writeln!(
            out,
            "{:<36} {:<10} {:<26} {:<16} {:>16}",
            transaction.id,
            format_date(&transaction.date, locale),
            truncate(&transaction.description, 26),
            truncate(&transaction.category, 16),
            format_currency(transaction.amount, locale)
        )?;
    }
    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width - 1).collect();
        cut.push('…');
        cut
    }
}

/// Execute one backend command, writing human-readable output to `out`.
pub async fn run_remote_command<W: Write>(
    client: &ApiClient,
    cmd: RemoteCommands,
    locale: Locale,
    out: &mut W,
) -> Result<()> {
    match cmd {
        RemoteCommands::Status => {
            let status = remote(client.get_api_status().await)?;
            writeln!(out, "Status:    {}", status.status)?;
            writeln!(out, "Version:   {}", status.version)?;
            writeln!(out, "Timestamp: {}", status.timestamp)?;
        }

        RemoteCommands::Login { email, password } => {
            let login = remote(client.login(&LoginRequest { email, password }).await)?;
            writeln!(
                out,
                "Logged in as {} <{}>",
                login.user.name, login.user.email
            )?;
            writeln!(out, "Token: {}", login.token)?;
        }

        RemoteCommands::Transactions => {
            let transactions = remote(client.get_transactions().await)?;
            print_transactions(&transactions, locale, out)?;
        }

        RemoteCommands::Create {
            description,
            amount,
            category,
            date,
        } => {
            let mut draft = TransactionDraft::new(description, amount, category);
            draft.date = date;
            let new = draft.validate()?;
            let created = remote(client.create_transaction(&new).await)?;
            writeln!(
                out,
                "Created transaction {} ({})",
                created.description, created.id
            )?;
        }

        RemoteCommands::Update {
            id,
            description,
            amount,
            category,
            date,
        } => {
            let amount = amount
                .map(|a| parse_cents(&a).with_context(|| format!("Invalid amount '{}'", a)))
                .transpose()?;
            let patch = TransactionPatch {
                description,
                amount,
                category,
                date,
            };
            if patch.is_empty() {
                bail!("Nothing to update. Pass at least one of --description, --amount, --category, --date");
            }
            let updated = remote(client.update_transaction(&id, &patch).await)?;
            writeln!(
                out,
                "Updated transaction {}: {} {}",
                updated.id,
                updated.description,
                format_currency(updated.amount, locale)
            )?;
        }

        RemoteCommands::Delete { id } => {
            let deleted = remote(client.delete_transaction(&id).await)?;
            writeln!(out, "{}", deleted.message)?;
        }

        RemoteCommands::Summary => {
            let summary = remote(client.get_financial_summary().await)?;
            writeln!(out, "Revenues: {:>18}", format_currency(summary.revenues, locale))?;
            writeln!(out, "Expenses: {:>18}", format_currency(summary.expenses, locale))?;
            writeln!(out, "Balance:  {:>18}", format_currency(summary.balance, locale))?;
            for total in summary.categories_by_amount() {
                writeln!(
                    out,
                    "  {:<22} {:>18}",
                    total.category,
                    format_currency(total.amount, locale)
                )?;
            }
        }
    }

    Ok(())
}

fn remote<T>(response: ApiResponse<T>) -> Result<T> {
    Ok(response.into_result().map_err(AppError::Api)?)
}
