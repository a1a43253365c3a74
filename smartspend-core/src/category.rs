//! Static category catalog offered when recording a transaction.

use crate::transaction::TransactionKind;

/// Category whose name is replaced by a user-supplied one.
pub const OTHER: &str = "Other";

pub const INCOME_CATEGORIES: &[&str] = &["Income-Allowance", "Rent Gain", "Gifts", OTHER];

pub const EXPENSE_CATEGORIES: &[&str] = &[
    OTHER,
    "Housing",
    "Utilities",
    "Groceries",
    "Transportation",
    "Insurance",
    "Healthcare",
    "Minimum debt payments",
    "Childcare",
    "Dining out",
    "Entertainment",
    "Hobbies",
    "Clothing",
    "Travel/vacations",
    "Personal care",
    "Gifts/subscriptions",
    "Investments",
];

/// Categories offered for `kind`.
pub fn catalog(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Income => INCOME_CATEGORIES,
        TransactionKind::Expense => EXPENSE_CATEGORIES,
        TransactionKind::Unrecognized => &[],
    }
}

/// Case-insensitive substring search over the catalog, keeping catalog order.
pub fn search(kind: TransactionKind, term: &str) -> Vec<&'static str> {
    let needle = term.trim().to_lowercase();
    catalog(kind)
        .iter()
        .copied()
        .filter(|c| c.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_term_lists_everything() {
        assert_eq!(search(TransactionKind::Income, ""), INCOME_CATEGORIES.to_vec());
        assert_eq!(search(TransactionKind::Expense, "  ").len(), EXPENSE_CATEGORIES.len());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        assert_eq!(search(TransactionKind::Expense, "GROC"), vec!["Groceries"]);
        assert_eq!(
            search(TransactionKind::Expense, "care"),
            vec!["Healthcare", "Childcare", "Personal care"]
        );
    }

    #[test]
    fn test_search_respects_kind() {
        assert_eq!(search(TransactionKind::Income, "gift"), vec!["Gifts"]);
        assert_eq!(search(TransactionKind::Expense, "gift"), vec!["Gifts/subscriptions"]);
        assert!(search(TransactionKind::Unrecognized, "").is_empty());
    }

    #[test]
    fn test_no_match() {
        assert!(search(TransactionKind::Expense, "yacht").is_empty());
    }
}
