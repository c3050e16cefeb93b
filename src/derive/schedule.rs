use crate::model::{Amount, Frequency, RecurringTransaction, TransactionType};
use chrono::{Days, Months, NaiveDate};
use serde::Serialize;

/// Projects the next occurrence of a recurring transaction from `date`.
///
/// Monthly and yearly steps that land past the end of the target month are clamped to its last
/// day, so January 31st is followed by the last day of February. Returns `None` only when the
/// result would be outside the range chrono can represent.
pub fn next_occurrence(date: NaiveDate, frequency: Frequency) -> Option<NaiveDate> {
    match frequency {
        Frequency::Weekly => date.checked_add_days(Days::new(7)),
        Frequency::Monthly => date.checked_add_months(Months::new(1)),
        Frequency::Yearly => date.checked_add_months(Months::new(12)),
    }
}

/// Totals over a user's recurring templates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RecurringSummary {
    pub count: usize,
    /// Sum of the monthly income templates. Weekly and yearly ones are not converted.
    pub monthly_income: Amount,
    /// Sum of the monthly expense templates.
    pub monthly_expenses: Amount,
}

pub fn recurring_summary(recurring: &[RecurringTransaction]) -> RecurringSummary {
    let mut summary = RecurringSummary {
        count: recurring.len(),
        monthly_income: Amount::ZERO,
        monthly_expenses: Amount::ZERO,
    };
    for r in recurring.iter().filter(|r| r.frequency() == Frequency::Monthly) {
        if r.kind() == TransactionType::Income {
            summary.monthly_income += r.amount();
        } else {
            summary.monthly_expenses += r.amount();
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewRecurring, UserId};
    use std::str::FromStr;

    fn next(from: &str, frequency: Frequency) -> String {
        next_occurrence(NaiveDate::from_str(from).unwrap(), frequency)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_weekly_crosses_month_boundary() {
        assert_eq!(next("2024-01-29", Frequency::Weekly), "2024-02-05");
        assert_eq!(next("2023-12-28", Frequency::Weekly), "2024-01-04");
    }

    #[test]
    fn test_monthly_clamps_to_month_end() {
        assert_eq!(next("2024-01-31", Frequency::Monthly), "2024-02-29");
        assert_eq!(next("2023-01-31", Frequency::Monthly), "2023-02-28");
        assert_eq!(next("2024-03-31", Frequency::Monthly), "2024-04-30");
        assert_eq!(next("2024-12-15", Frequency::Monthly), "2025-01-15");
    }

    #[test]
    fn test_yearly() {
        assert_eq!(next("2024-06-05", Frequency::Yearly), "2025-06-05");
        assert_eq!(next("2024-02-29", Frequency::Yearly), "2025-02-28");
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(next_occurrence(NaiveDate::MAX, Frequency::Weekly), None);
    }

    fn template(kind: TransactionType, amount: &str, frequency: Frequency) -> RecurringTransaction {
        NewRecurring {
            kind,
            amount: Amount::from_str(amount).unwrap(),
            category: "Misc".to_string(),
            description: String::new(),
            frequency,
            next_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            user_id: UserId::from("u1"),
        }
        .into_recurring(format!("{kind}-{amount}"))
    }

    #[test]
    fn test_summary_counts_only_monthly_templates_in_totals() {
        let recurring = vec![
            template(TransactionType::Income, "3000", Frequency::Monthly),
            template(TransactionType::Income, "500", Frequency::Weekly),
            template(TransactionType::Expense, "15.99", Frequency::Monthly),
            template(TransactionType::Expense, "1200", Frequency::Monthly),
            template(TransactionType::Expense, "99", Frequency::Yearly),
        ];
        let summary = recurring_summary(&recurring);
        assert_eq!(summary.count, 5);
        assert_eq!(summary.monthly_income, Amount::from_str("3000").unwrap());
        assert_eq!(summary.monthly_expenses, Amount::from_str("1215.99").unwrap());
        assert_eq!(recurring_summary(&[]).monthly_income, Amount::ZERO);
    }
}
