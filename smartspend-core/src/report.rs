//! Aggregation engine: turns a flat transaction list into the dashboard's
//! per-period income, expense and running-balance series.
//!
//! The whole report is recomputed from scratch on every call. Nothing is
//! cached between calls and "now" is always passed in, so identical inputs
//! give identical output.
//!
//! Steps:
//! 1. Seed the window for the timeframe (every period gets a zero bucket).
//! 2. Fold each transaction's amount into its bucket's income or expense.
//!    Transactions outside the window are dropped, not collected elsewhere.
//! 3. Rebuild the balance from the full history: an opening balance for
//!    everything before the window, then the last running total seen in each
//!    period, carried forward across periods with no activity.
//!
//! Sums saturate at the bounds of `Decimal` instead of overflowing.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, TimeZone};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Serialize, Serializer};

use crate::period::PeriodKey;
use crate::summary::Summary;
use crate::timeframe::Timeframe;
use crate::transaction::{Transaction, TransactionKind};
use crate::window::seed_window;

/// One period's income and expense totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub key: PeriodKey,
    pub label: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub expense: Decimal,
}

impl Bucket {
    fn empty(key: PeriodKey) -> Self {
        Self {
            key,
            label: key.label(),
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
        }
    }
}

/// Dashboard output: parallel series indexed by the same bucket order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub timeframe: Timeframe,
    pub keys: Vec<String>,
    pub labels: Vec<String>,
    #[serde(serialize_with = "float_series")]
    pub income: Vec<Decimal>,
    #[serde(serialize_with = "float_series")]
    pub expense: Vec<Decimal>,
    #[serde(serialize_with = "float_series")]
    pub balance: Vec<Decimal>,
    pub summary: Summary,
}

/// Series go out as JSON numbers, like amounts in the stored documents.
fn float_series<S: Serializer>(series: &[Decimal], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(series.iter().map(|v| v.to_f64().unwrap_or(0.0)))
}

impl Report {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Aggregate `transactions` for `timeframe`, with the window anchored at `now`.
///
/// The time zone of `now` defines the local calendar used for every bucket
/// key. `transactions` may be in any order.
pub fn aggregate<Tz: TimeZone>(
    transactions: &[Transaction],
    timeframe: Timeframe,
    now: &DateTime<Tz>,
) -> Report {
    let tz = now.timezone();
    let today = now.date_naive();
    let local_date = |t: &Transaction| t.date.with_timezone(&tz).date_naive();

    let window = seed_window(timeframe, today, transactions.iter().map(local_date));
    let buckets = fold(transactions, timeframe, &window, local_date);
    let balance = running_balance(transactions, timeframe, &window, local_date);

    tracing::debug!(
        %timeframe,
        %today,
        buckets = window.len(),
        transactions = transactions.len(),
        "aggregated report"
    );

    let mut keys = Vec::with_capacity(buckets.len());
    let mut labels = Vec::with_capacity(buckets.len());
    let mut income = Vec::with_capacity(buckets.len());
    let mut expense = Vec::with_capacity(buckets.len());
    for b in buckets {
        keys.push(b.key.to_string());
        labels.push(b.label);
        income.push(b.income);
        expense.push(b.expense);
    }

    let summary = Summary::from_series(&income, &expense, &balance);

    Report {
        timeframe,
        keys,
        labels,
        income,
        expense,
        balance,
        summary,
    }
}

/// Income/expense per windowed bucket, in window order.
pub fn fold(
    transactions: &[Transaction],
    timeframe: Timeframe,
    window: &[PeriodKey],
    local_date: impl Fn(&Transaction) -> NaiveDate,
) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = window.iter().copied().map(Bucket::empty).collect();
    let index: HashMap<PeriodKey, usize> = window
        .iter()
        .enumerate()
        .map(|(i, k)| (*k, i))
        .collect();

    for t in transactions {
        let key = PeriodKey::containing(local_date(t), timeframe);
        let Some(&i) = index.get(&key) else {
            tracing::trace!(%key, "transaction outside window");
            continue;
        };

        match t.kind {
            TransactionKind::Income => {
                buckets[i].income = buckets[i].income.saturating_add(t.amount);
            }
            TransactionKind::Expense => {
                buckets[i].expense = buckets[i].expense.saturating_add(t.amount);
            }
            TransactionKind::Unrecognized => {}
        }
    }

    buckets
}

/// Balance as of the end of each windowed period.
pub fn running_balance(
    transactions: &[Transaction],
    timeframe: Timeframe,
    window: &[PeriodKey],
    local_date: impl Fn(&Transaction) -> NaiveDate,
) -> Vec<Decimal> {
    let Some(first) = window.first() else {
        return Vec::new();
    };

    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|t| t.date);

    // Last running total observed in every period touched, in or out of the window.
    let mut running = Decimal::ZERO;
    let mut points: HashMap<PeriodKey, Decimal> = HashMap::new();
    for &t in &sorted {
        running = running.saturating_add(t.net());
        points.insert(PeriodKey::containing(local_date(t), timeframe), running);
    }

    let window_start = first.start_date();
    let opening: Decimal = sorted
        .iter()
        .copied()
        .filter(|&t| local_date(t) < window_start)
        .map(Transaction::net)
        .fold(Decimal::ZERO, Decimal::saturating_add);

    let mut last_known = opening;
    window
        .iter()
        .map(|key| {
            if let Some(&b) = points.get(key) {
                last_known = b;
            }
            last_known
        })
        .collect()
}
