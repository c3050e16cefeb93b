use crate::model::{Amount, Transaction, YearMonth};
use chrono::NaiveDate;
use serde::Serialize;

/// The number of months in the trailing series, including the reference month.
pub const ROLLUP_MONTHS: usize = 6;

/// Income and expense totals for one calendar month.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MonthTotals {
    pub month: YearMonth,
    /// Three-letter month name for chart axes, e.g. `Jun`.
    pub label: String,
    pub income: Amount,
    pub expenses: Amount,
}

impl MonthTotals {
    /// Sums the income and expenses in `transactions` that fall within `month`.
    pub fn for_month(month: YearMonth, transactions: &[Transaction]) -> Self {
        let mut income = Amount::ZERO;
        let mut expenses = Amount::ZERO;
        for t in transactions.iter().filter(|t| month.contains(t.date())) {
            if t.is_income() {
                income += t.amount();
            } else {
                expenses += t.amount();
            }
        }
        Self {
            month,
            label: month.short_name().to_string(),
            income,
            expenses,
        }
    }

    pub fn net(&self) -> Amount {
        self.income - self.expenses
    }
}

/// The headline figures for the reference month and the trailing monthly series.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MonthlyRollup {
    pub month: YearMonth,
    pub total_income: Amount,
    pub total_expenses: Amount,
    pub net_income: Amount,
    /// Exactly `ROLLUP_MONTHS` entries, oldest first, ending with `month`.
    pub series: Vec<MonthTotals>,
}

/// Rolls `transactions` up by calendar month relative to `today`.
pub fn monthly_rollup(transactions: &[Transaction], today: NaiveDate) -> MonthlyRollup {
    let current = YearMonth::of(today);
    let series: Vec<MonthTotals> = current
        .trailing(ROLLUP_MONTHS)
        .into_iter()
        .map(|month| MonthTotals::for_month(month, transactions))
        .collect();

    // The last element of the series is always the reference month.
    let (total_income, total_expenses) = series
        .last()
        .map(|m| (m.income, m.expenses))
        .unwrap_or_default();

    MonthlyRollup {
        month: current,
        total_income,
        total_expenses,
        net_income: total_income - total_expenses,
        series,
    }
}
