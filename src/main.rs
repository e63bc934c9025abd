mod models;
mod normalizer;
mod storage;
mod store;
mod types;

use std::fs::File;
use std::io::{stderr, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::models::TransactionType;
use crate::storage::{write_csv, FileStorage, Persistence, DEFAULT_SLOT};
use crate::store::TransactionStore;
use crate::types::{SystemClock, UuidGenerator};

#[derive(Debug, Parser)]
#[command(name = "finance-tracker", about = "Record income and expenses and keep a running balance")]
struct Cli {
    /// Directory holding the transaction slot.
    #[arg(long, default_value = ".finance-tracker")]
    data_dir: PathBuf,
    /// Verbosity of the diagnostics written to stderr.
    #[arg(long, value_enum, default_value = "error")]
    log_level: LogLevel,
    #[command(subcommand)]
    command: Command
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Record a new transaction and print its id.
    Add {
        description: String,
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
        #[arg(long = "type", value_enum, default_value = "expense")]
        transaction_type: TransactionType
    },
    /// Delete a transaction by id.
    Delete {
        id: String
    },
    /// Print every transaction in insertion order.
    List,
    /// Print total income, total expenses and the balance.
    Summary,
    /// Export all transactions as CSV.
    Export {
        /// Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.log_level.into());

    let storage = FileStorage::new(&cli.data_dir);
    info!("Using data directory {}", storage.directory().display());

    let persistence = Persistence::new(Rc::new(storage), DEFAULT_SLOT);
    let mut store = TransactionStore::open(persistence, Box::new(UuidGenerator), Box::new(SystemClock));

    let mut output = BufWriter::new(stdout().lock());

    match cli.command {
        Command::Add { description, amount, transaction_type } => {
            let id = store.add(&description, amount, transaction_type);
            writeln!(output, "{id}")?;
        },
        Command::Delete { id } => {
            if let Some(transaction) = store.find(&id) {
                info!("Deleting [{}] {} {}", transaction.id, transaction.transaction_type, transaction.amount);
            }

            if store.delete(&id) {
                writeln!(output, "Deleted {id}")?;
            } else {
                writeln!(output, "No transaction {id}")?;
            }
        },
        Command::List => {
            for transaction in store.transactions() {
                writeln!(
                    output,
                    "{}  {}  {}  {}  {}",
                    transaction.id,
                    transaction.date_string(),
                    transaction.transaction_type,
                    transaction.amount,
                    transaction.description
                )?;
            }
        },
        Command::Summary => {
            let summary = store.summary();

            writeln!(output, "income,expenses,balance")?;
            writeln!(output, "{},{},{}", summary.total_income, summary.total_expenses, summary.balance)?;

            if summary.overflowed {
                eprintln!("Totals exceed the decimal range, saturated values shown");
            }
        },
        Command::Export { output: Some(path) } => {
            write_csv(store.transactions(), BufWriter::new(File::create(&path)?))?;
            info!("Exported {} transactions to {}", store.transactions().len(), path.display());
        },
        Command::Export { output: None } => {
            write_csv(store.transactions(), &mut output)?;
        }
    }

    output.flush()?;

    Ok(())
}

/// Diagnostics go to stderr so they never mix with command output on stdout.
fn setup_logging(level: LevelFilter) {
    let stderr_layer = fmt::layer()
        .with_target(false)
        .without_time()
        .with_ansi(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .init();
}
