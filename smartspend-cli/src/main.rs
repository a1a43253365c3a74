use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use smartspend_core::{Timeframe, TransactionKind, aggregate, catalog, search_categories};
use smartspend_store::{JsonFileStore, Ledger};
use tracing_subscriber::EnvFilter;

mod config;
mod render;
mod state;

use config::Config;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SMARTSPEND_BUILD_SHA"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "smartspend", version, long_version = LONG_VERSION, about = "Personal finance tracker")]
struct Cli {
    /// Act on this user's document instead of profile.user from config
    #[arg(long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a transaction
    Add {
        kind: EntryKind,

        /// Positive amount, e.g. 1250.50
        amount: Decimal,

        /// Category from `smartspend categories <kind>`
        #[arg(long)]
        category: String,

        /// Name to use when --category is "Other"
        #[arg(long)]
        custom: Option<String>,
    },

    /// Delete a transaction by its index in `smartspend list`
    Delete { index: usize },

    /// List transactions, newest first
    List {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Aggregate income, expense and balance by period
    Report {
        /// daily, weekly, monthly or yearly (default: dashboard.default_timeframe)
        #[arg(long)]
        timeframe: Option<Timeframe>,

        /// Anchor the window at this instant (RFC 3339 or YYYY-MM-DD) instead of now
        #[arg(long)]
        now: Option<String>,

        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show or search the category catalog
    Categories {
        kind: EntryKind,

        #[arg(long)]
        search: Option<String>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,
    /// Print the effective configuration
    Show,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum EntryKind {
    Income,
    Expense,
}

impl From<EntryKind> for TransactionKind {
    fn from(k: EntryKind) -> Self {
        match k {
            EntryKind::Income => TransactionKind::Income,
            EntryKind::Expense => TransactionKind::Expense,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let cfg = config::load_config()?;
    let user = cli.user.clone().unwrap_or_else(|| cfg.profile.user.clone());
    let currency = cfg.profile.currency.clone();

    match cli.command {
        Command::Add {
            kind,
            amount,
            category,
            custom,
        } => {
            let mut ledger = open_ledger(&cfg, &user)?;
            let t = ledger.record(
                kind.into(),
                amount,
                &category,
                custom.as_deref(),
                chrono::Utc::now(),
            )?;
            println!(
                "Added {} of {} ({})",
                t.kind.as_str(),
                render::money(&currency, t.amount),
                t.category
            );
            println!("Total: {}", render::money(&currency, ledger.total()));
        }

        Command::Delete { index } => {
            let mut ledger = open_ledger(&cfg, &user)?;
            let t = ledger.delete(index)?;
            println!(
                "Deleted {} of {} ({})",
                t.kind.as_str(),
                render::money(&currency, t.amount),
                t.category
            );
            println!("Total: {}", render::money(&currency, ledger.total()));
        }

        Command::List { limit } => {
            let tz = cfg.timezone()?;
            let ledger = open_ledger(&cfg, &user)?;
            let (income, expense) = ledger.document().totals();
            println!("Total: {}", render::money(&currency, ledger.total()));
            println!(
                "Income: {}  Expense: {}\n",
                render::money(&currency, income),
                render::money(&currency, expense)
            );
            print!("{}", render::listing(&ledger.listing(), &currency, tz, limit));
        }

        Command::Report {
            timeframe,
            now,
            json,
        } => {
            let tz = cfg.timezone()?;
            let now = match now {
                Some(s) => smartspend_core::time::parse_now(&s, tz)?,
                None => smartspend_core::time::now_in(tz),
            };
            let timeframe = timeframe.unwrap_or(cfg.dashboard.default_timeframe);

            let ledger = open_ledger(&cfg, &user)?;
            let report = aggregate(&ledger.transactions(), timeframe, &now);

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).context("serialize report")?
                );
            } else {
                print!("{}", render::report_table(&report, &currency));
            }
        }

        Command::Categories { kind, search } => {
            let kind = TransactionKind::from(kind);
            let names = match search.as_deref() {
                Some(term) => search_categories(kind, term),
                None => catalog(kind).to_vec(),
            };
            if names.is_empty() {
                println!("No matching categories.");
            }
            for name in names {
                println!("{name}");
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn open_ledger(cfg: &Config, user: &str) -> Result<Ledger<JsonFileStore>> {
    let store = JsonFileStore::new(cfg.data_dir()?);
    Ledger::open(store, user)
}

/// Logs go to stderr so report output stays pipeable. Level from `RUST_LOG`.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
