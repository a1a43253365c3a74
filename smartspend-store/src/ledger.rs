//! Session view of one user's transactions.
//!
//! The document is fetched once on open. Each change is applied to a copy,
//! saved, and only then becomes the ledger's document, so a failed save
//! leaves the ledger as it was.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use smartspend_core::{EntryDraft, Transaction, TransactionKind};

use crate::document::UserDocument;
use crate::store::TransactionStore;

pub struct Ledger<S: TransactionStore> {
    store: S,
    user: String,
    doc: UserDocument,
}

impl<S: TransactionStore> Ledger<S> {
    pub fn open(store: S, user: impl Into<String>) -> Result<Self> {
        let user = user.into();
        let doc = store
            .load(&user)
            .with_context(|| format!("loading transactions for '{user}'"))?;
        Ok(Self { store, user, doc })
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn document(&self) -> &UserDocument {
        &self.doc
    }

    /// Running total as stored.
    pub fn total(&self) -> Decimal {
        self.doc.total_amount
    }

    /// Snapshot handed to the aggregation engine.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.doc.dated()
    }

    /// Newest-first listing; positions match [`Ledger::delete`].
    pub fn listing(&self) -> Vec<Transaction> {
        self.doc.newest_first()
    }

    /// Stage and confirm a new entry against the current total, then persist it.
    pub fn record(
        &mut self,
        kind: TransactionKind,
        amount: Decimal,
        category: &str,
        custom_name: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Transaction> {
        let mut draft = EntryDraft::new();
        draft.stage(kind, amount, self.doc.total_amount)?;
        let t = draft.confirm(category, custom_name, now)?;

        let mut next = self.doc.clone();
        next.append(&t);
        self.commit(next)?;
        tracing::info!(
            user = %self.user,
            kind = t.kind.as_str(),
            amount = %t.amount,
            category = %t.category,
            "recorded transaction"
        );
        Ok(t)
    }

    /// Delete by newest-first position and persist.
    pub fn delete(&mut self, index: usize) -> Result<Transaction> {
        let mut next = self.doc.clone();
        let removed = next.remove(index)?;
        self.commit(next)?;
        tracing::info!(
            user = %self.user,
            index,
            amount = %removed.amount,
            "deleted transaction"
        );
        Ok(removed)
    }

    fn commit(&mut self, next: UserDocument) -> Result<()> {
        self.store
            .save(&self.user, &next)
            .with_context(|| format!("saving transactions for '{}'", self.user))?;
        self.doc = next;
        Ok(())
    }
}
