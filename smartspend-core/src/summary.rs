//! Summary statistics derived from a report's series.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

/// Scalar figures shown next to the dashboard charts.
///
/// Ratios are percentages. Any ratio whose denominator is zero reports 0.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Summary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_balance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance_change: Decimal,
    pub savings_rate: f64,
    pub expense_ratio: f64,
    /// Income as a share of income + expense.
    pub income_share: f64,
    /// Expense as a share of income + expense.
    pub expense_share: f64,
}

impl Summary {
    pub fn from_series(income: &[Decimal], expense: &[Decimal], balance: &[Decimal]) -> Self {
        let total_income = saturating_sum(income);
        let total_expense = saturating_sum(expense);

        let current_balance = balance.last().copied().unwrap_or(Decimal::ZERO);
        let balance_change = match balance {
            [.., previous, current] => current.saturating_sub(*previous),
            _ => Decimal::ZERO,
        };

        let savings_rate =
            percent(total_income.saturating_sub(total_expense), total_income).max(0.0);
        let expense_ratio = percent(total_expense, total_income);

        let turnover = total_income.saturating_add(total_expense);
        let income_share = percent(total_income, turnover);
        let expense_share = percent(total_expense, turnover);

        Self {
            total_income,
            total_expense,
            current_balance,
            balance_change,
            savings_rate,
            expense_ratio,
            income_share,
            expense_share,
        }
    }

    /// Income minus expense over the window.
    pub fn net(&self) -> Decimal {
        self.total_income.saturating_sub(self.total_expense)
    }
}

fn saturating_sum(series: &[Decimal]) -> Decimal {
    series.iter().copied().fold(Decimal::ZERO, Decimal::saturating_add)
}

/// `part / whole * 100`, or 0 unless `whole` is positive.
fn percent(part: Decimal, whole: Decimal) -> f64 {
    if whole <= Decimal::ZERO {
        return 0.0;
    }
    part.checked_div(whole)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|p| p.to_f64())
        .unwrap_or(0.0)
}
