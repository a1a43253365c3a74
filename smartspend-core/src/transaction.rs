//! Transaction records: the lenient stored shape and the typed shape the
//! aggregation engine consumes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::time::{parse_timestamp, to_rfc3339_utc};

/// Category used when a record carries none.
pub const DEFAULT_CATEGORY: &str = "General";

/// Largest magnitude a single amount may have. Stored values beyond it read
/// as zero and new entries beyond it are rejected.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Direction of a transaction.
///
/// Matching against stored `type` strings is exact and case-sensitive; anything
/// other than `"Income"` or `"Expense"` is `Unrecognized` and contributes to no
/// sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
    Unrecognized,
}

impl TransactionKind {
    pub fn from_type_str(s: &str) -> Self {
        match s {
            "Income" => TransactionKind::Income,
            "Expense" => TransactionKind::Expense,
            _ => TransactionKind::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
            TransactionKind::Unrecognized => "Unrecognized",
        }
    }

    /// Signed contribution of `amount` to a running balance.
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            TransactionKind::Income => amount,
            TransactionKind::Expense => -amount,
            TransactionKind::Unrecognized => Decimal::ZERO,
        }
    }
}

/// A validated transaction. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category: String,
    /// Effective date.
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a transaction effective at `at`; `created_at` is set to the same instant.
    pub fn new(
        kind: TransactionKind,
        amount: Decimal,
        category: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        let category = category.into();
        let category = if category.trim().is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            category
        };

        Self {
            kind,
            amount,
            category,
            date: at,
            created_at: at,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Contribution of this transaction to a running balance.
    pub fn net(&self) -> Decimal {
        self.kind.signed(self.amount)
    }
}

/// A transaction exactly as held by the store.
///
/// Every field is optional or lenient so that one malformed record never makes
/// a whole document unreadable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_amount",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub amount: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl RawTransaction {
    /// The upstream filter: `None` when the record has no usable `date`.
    pub fn to_transaction(&self) -> Option<Transaction> {
        let date = parse_timestamp(self.date.as_deref()?)?;
        let created_at = self
            .created_at
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(date);

        let kind = self
            .kind
            .as_deref()
            .map(TransactionKind::from_type_str)
            .unwrap_or(TransactionKind::Unrecognized);

        let category = self
            .category
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        Some(Transaction {
            kind,
            amount: self.amount,
            category,
            date,
            created_at,
        })
    }
}

impl From<&Transaction> for RawTransaction {
    fn from(t: &Transaction) -> Self {
        Self {
            kind: Some(t.kind.as_str().to_string()),
            amount: t.amount,
            category: Some(t.category.clone()),
            date: Some(to_rfc3339_utc(t.date)),
            created_at: Some(to_rfc3339_utc(t.created_at)),
        }
    }
}

/// Apply the upstream filter to a list of stored records, keeping order.
pub fn collect_dated(raw: &[RawTransaction]) -> Vec<Transaction> {
    let out: Vec<Transaction> = raw.iter().filter_map(RawTransaction::to_transaction).collect();
    if out.len() != raw.len() {
        tracing::debug!(
            dropped = raw.len() - out.len(),
            "skipped records without a usable date"
        );
    }
    out
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountRepr {
    Parsed(Decimal),
    Other(serde::de::IgnoredAny),
}

/// Numbers and numeric strings up to [`MAX_AMOUNT`] parse; anything else
/// (null, text, objects, out-of-range values) is zero.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match AmountRepr::deserialize(deserializer)? {
        AmountRepr::Parsed(v) if v.abs() <= MAX_AMOUNT => v,
        AmountRepr::Parsed(_) | AmountRepr::Other(_) => Decimal::ZERO,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::dec;

    fn raw(json: &str) -> RawTransaction {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_kind_matching_is_case_sensitive() {
        assert_eq!(TransactionKind::from_type_str("Income"), TransactionKind::Income);
        assert_eq!(TransactionKind::from_type_str("Expense"), TransactionKind::Expense);
        assert_eq!(TransactionKind::from_type_str("income"), TransactionKind::Unrecognized);
        assert_eq!(TransactionKind::from_type_str("Refund"), TransactionKind::Unrecognized);
    }

    #[test]
    fn test_stored_record_parses() {
        let r = raw(r#"{"type":"Income","amount":100.5,"category":"Gifts","date":"2024-01-01T00:00:00.000Z","createdAt":"2024-01-01T00:00:00.000Z"}"#);
        let t = r.to_transaction().unwrap();
        assert_eq!(t.kind, TransactionKind::Income);
        assert_eq!(t.amount, dec!(100.5));
        assert_eq!(t.category, "Gifts");
        assert_eq!(t.date, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_missing_or_bad_amount_is_zero() {
        let missing = raw(r#"{"type":"Expense","date":"2024-01-01"}"#);
        let null = raw(r#"{"type":"Expense","amount":null,"date":"2024-01-01"}"#);
        let text = raw(r#"{"type":"Expense","amount":"lots","date":"2024-01-01"}"#);
        let numeric_text = raw(r#"{"type":"Expense","amount":"12.25","date":"2024-01-01"}"#);

        assert_eq!(missing.amount, Decimal::ZERO);
        assert_eq!(null.amount, Decimal::ZERO);
        assert_eq!(text.amount, Decimal::ZERO);
        assert_eq!(numeric_text.amount, dec!(12.25));
    }

    #[test]
    fn test_oversized_amount_is_zero() {
        let huge = raw(r#"{"type":"Income","amount":"50000000000000000000000000000","date":"2024-01-01"}"#);
        let negative = raw(r#"{"type":"Expense","amount":-2e15,"date":"2024-01-01"}"#);
        let at_limit = raw(r#"{"type":"Income","amount":"1000000000000000","date":"2024-01-01"}"#);

        assert_eq!(huge.amount, Decimal::ZERO);
        assert_eq!(negative.amount, Decimal::ZERO);
        assert_eq!(at_limit.amount, MAX_AMOUNT);
    }

    #[test]
    fn test_undated_records_are_filtered() {
        let records = vec![
            raw(r#"{"type":"Income","amount":10}"#),
            raw(r#"{"type":"Income","amount":20,"date":""}"#),
            raw(r#"{"type":"Income","amount":30,"date":"not a date"}"#),
            raw(r#"{"type":"Income","amount":40,"date":"2024-03-01"}"#),
        ];
        let dated = collect_dated(&records);
        assert_eq!(dated.len(), 1);
        assert_eq!(dated[0].amount, dec!(40));
    }

    #[test]
    fn test_defaults_category_and_created_at() {
        let t = raw(r#"{"type":"Expense","amount":5,"date":"2024-03-01"}"#)
            .to_transaction()
            .unwrap();
        assert_eq!(t.category, DEFAULT_CATEGORY);
        assert_eq!(t.created_at, t.date);
    }

    #[test]
    fn test_unknown_kind_is_preserved_but_neutral() {
        let t = raw(r#"{"type":"Transfer","amount":75,"date":"2024-03-01"}"#)
            .to_transaction()
            .unwrap();
        assert_eq!(t.kind, TransactionKind::Unrecognized);
        assert_eq!(t.net(), Decimal::ZERO);
    }

    #[test]
    fn test_raw_from_transaction_writes_store_shape() {
        let at = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let t = Transaction::new(TransactionKind::Expense, dec!(30), "Groceries", at);
        let json = serde_json::to_value(RawTransaction::from(&t)).unwrap();

        assert_eq!(json["type"], "Expense");
        assert_eq!(json["amount"], 30.0);
        assert_eq!(json["category"], "Groceries");
        assert_eq!(json["date"], "2024-05-06T07:08:09.000Z");
        assert_eq!(json["createdAt"], json["date"]);
    }
}
