//! Per-user document: running total plus the list of stored records.

use anyhow::{Result, bail};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smartspend_core::{RawTransaction, Transaction, TransactionKind, collect_dated};

/// Stored shape: `{ "totalAmount": <number>, "transactions": [ ... ] }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "totalAmount", default, with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,

    #[serde(default)]
    pub transactions: Vec<RawTransaction>,
}

impl UserDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that pass the upstream filter, in stored order.
    pub fn dated(&self) -> Vec<Transaction> {
        collect_dated(&self.transactions)
    }

    /// Dated records, most recent first. Indexes for [`UserDocument::remove`]
    /// refer to this order.
    pub fn newest_first(&self) -> Vec<Transaction> {
        self.newest_first_pairs().into_iter().map(|(_, t)| t).collect()
    }

    /// Append a confirmed transaction and move the running total with it.
    pub fn append(&mut self, t: &Transaction) {
        self.transactions.push(RawTransaction::from(t));
        self.total_amount = self.total_amount.saturating_add(t.net());
    }

    /// Remove the transaction at `index` in newest-first order.
    ///
    /// The stored list is rewritten from the dated view, so records without a
    /// usable date are dropped as a side effect.
    pub fn remove(&mut self, index: usize) -> Result<Transaction> {
        let mut pairs = self.newest_first_pairs();
        if index >= pairs.len() {
            bail!(
                "no transaction at index {index} ({} transaction(s) recorded)",
                pairs.len()
            );
        }

        let (_, removed) = pairs.remove(index);
        self.total_amount = match removed.kind {
            TransactionKind::Income => self.total_amount.saturating_sub(removed.amount),
            _ => self.total_amount.saturating_add(removed.amount),
        };
        self.transactions = pairs.into_iter().map(|(raw, _)| raw).collect();

        Ok(removed)
    }

    /// All-time income and expense over dated records.
    pub fn totals(&self) -> (Decimal, Decimal) {
        self.dated()
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(inc, exp), t| match t.kind {
                TransactionKind::Income => (inc.saturating_add(t.amount), exp),
                TransactionKind::Expense => (inc, exp.saturating_add(t.amount)),
                TransactionKind::Unrecognized => (inc, exp),
            })
    }

    fn newest_first_pairs(&self) -> Vec<(RawTransaction, Transaction)> {
        let mut pairs: Vec<(RawTransaction, Transaction)> = self
            .transactions
            .iter()
            .filter_map(|raw| raw.to_transaction().map(|t| (raw.clone(), t)))
            .collect();
        pairs.sort_by(|a, b| b.1.date.cmp(&a.1.date));
        pairs
    }
}
