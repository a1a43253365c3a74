//! Two-step transaction entry.
//!
//! Step one stages a kind and an amount; step two picks a category and yields
//! the transaction to append. Only confirmed entries reach the store.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::category::OTHER;
use crate::transaction::{MAX_AMOUNT, Transaction, TransactionKind};

#[derive(Debug, Error, PartialEq)]
pub enum EntryError {
    #[error("please enter a valid positive amount")]
    InvalidAmount,

    #[error("expense of {amount} exceeds the current total of {total}")]
    ExceedsTotal { amount: Decimal, total: Decimal },

    #[error("only income or expense entries can be recorded")]
    UnsupportedKind,

    #[error("nothing staged; enter an amount first")]
    NothingStaged,

    #[error("please select a category")]
    MissingCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EntryDraft {
    #[default]
    Idle,
    Staged {
        kind: TransactionKind,
        amount: Decimal,
    },
}

impl EntryDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step one. Amounts must lie in `(0, MAX_AMOUNT]`; expenses may not
    /// exceed `current_total`.
    pub fn stage(
        &mut self,
        kind: TransactionKind,
        amount: Decimal,
        current_total: Decimal,
    ) -> Result<(), EntryError> {
        if amount <= Decimal::ZERO || amount > MAX_AMOUNT {
            return Err(EntryError::InvalidAmount);
        }
        match kind {
            TransactionKind::Income => {}
            TransactionKind::Expense if amount > current_total => {
                return Err(EntryError::ExceedsTotal {
                    amount,
                    total: current_total,
                });
            }
            TransactionKind::Expense => {}
            TransactionKind::Unrecognized => return Err(EntryError::UnsupportedKind),
        }

        *self = EntryDraft::Staged { kind, amount };
        Ok(())
    }

    /// Step two. `"Other"` takes the custom name when one is given.
    ///
    /// On success the draft returns to idle; on error it stays staged.
    pub fn confirm(
        &mut self,
        category: &str,
        custom_name: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Transaction, EntryError> {
        let EntryDraft::Staged { kind, amount } = *self else {
            return Err(EntryError::NothingStaged);
        };

        let category = category.trim();
        if category.is_empty() {
            return Err(EntryError::MissingCategory);
        }

        let category = if category == OTHER {
            custom_name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or(OTHER)
        } else {
            category
        };

        *self = EntryDraft::Idle;
        Ok(Transaction::new(kind, amount, category, now))
    }

    pub fn cancel(&mut self) {
        *self = EntryDraft::Idle;
    }

    pub fn is_staged(&self) -> bool {
        matches!(self, EntryDraft::Staged { .. })
    }
}
