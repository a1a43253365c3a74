//! Plain-text output for the terminal.

use chrono_tz::Tz;
use rust_decimal::Decimal;
use smartspend_core::{Report, Transaction};

pub fn money(currency: &str, amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{currency}{:.2}", rounded.abs())
    } else {
        format!("{currency}{:.2}", rounded.abs())
    }
}

pub fn report_table(report: &Report, currency: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Dashboard ({})\n\n", report.timeframe));
    out.push_str(&format!(
        "{:<12} {:>14} {:>14} {:>14}\n",
        "Period", "Income", "Expense", "Balance"
    ));

    for i in 0..report.len() {
        out.push_str(&format!(
            "{:<12} {:>14} {:>14} {:>14}\n",
            report.labels[i],
            money(currency, report.income[i]),
            money(currency, report.expense[i]),
            money(currency, report.balance[i]),
        ));
    }

    let s = &report.summary;
    out.push_str("\n## Summary\n\n");
    out.push_str(&format!("Total income:    {}\n", money(currency, s.total_income)));
    out.push_str(&format!("Total expense:   {}\n", money(currency, s.total_expense)));
    out.push_str(&format!("Current balance: {}\n", money(currency, s.current_balance)));
    out.push_str(&format!("Balance change:  {}\n", money(currency, s.balance_change)));
    out.push_str(&format!("Savings rate:    {:.1}%\n", s.savings_rate));
    out.push_str(&format!("Expense ratio:   {:.1}%\n", s.expense_ratio));
    out.push_str(&format!(
        "Breakdown:       income {:.1}% / expense {:.1}%\n",
        s.income_share, s.expense_share
    ));
    out
}

/// Timestamps are shown in `tz`, the same zone the report buckets by.
pub fn listing(transactions: &[Transaction], currency: &str, tz: Tz, limit: usize) -> String {
    if transactions.is_empty() {
        return "No transactions yet. Add one with `smartspend add income <amount> --category <name>`.\n"
            .to_string();
    }

    let mut out = String::new();
    for (i, t) in transactions.iter().take(limit).enumerate() {
        out.push_str(&format!(
            "[{i}] {} {:<8} {:>12}  {}\n",
            t.date.with_timezone(&tz).format("%Y-%m-%d %H:%M"),
            t.kind.as_str(),
            money(currency, t.amount),
            t.category
        ));
    }
    if transactions.len() > limit {
        out.push_str(&format!("... {} more\n", transactions.len() - limit));
    }
    out
}
