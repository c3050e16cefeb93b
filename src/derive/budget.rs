use crate::model::{Amount, Budget, Transaction};
use rust_decimal::Decimal;
use serde::Serialize;

/// How much of one budget has been spent.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BudgetUtilization {
    pub budget: Budget,
    /// Sum of the matching expenses. Not capped at the budget amount.
    pub spent: Amount,
    /// `spent` as a percentage of the budget amount, capped at 100. Zero for a zero budget.
    pub percentage: Decimal,
    /// The budget amount minus `spent`. Negative once the budget is exceeded.
    pub remaining: Amount,
    pub is_over_budget: bool,
}

/// The overview shown above the budget rows.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BudgetSummary {
    pub count: usize,
    /// Sum of every budget amount, whatever its month.
    pub total_budgeted: Amount,
    pub over_budget: usize,
}

pub fn budget_summary(rows: &[BudgetUtilization]) -> BudgetSummary {
    BudgetSummary {
        count: rows.len(),
        total_budgeted: rows.iter().map(|row| row.budget.amount()).sum(),
        over_budget: rows.iter().filter(|row| row.is_over_budget).count(),
    }
}

/// Computes one utilization row per budget, in the order the budgets are given.
///
/// A transaction counts against a budget when it is an expense, its category text equals the
/// budget's category exactly, and its date falls within the budget's month. Duplicate budgets each
/// get their own row and each sees the full spend.
pub fn budget_utilization(
    budgets: &[Budget],
    transactions: &[Transaction],
) -> Vec<BudgetUtilization> {
    budgets
        .iter()
        .map(|budget| utilization(budget, transactions))
        .collect()
}

fn utilization(budget: &Budget, transactions: &[Transaction]) -> BudgetUtilization {
    let spent: Amount = transactions
        .iter()
        .filter(|t| {
            t.is_expense() && t.category() == budget.category() && budget.month().contains(t.date())
        })
        .map(|t| t.amount())
        .sum();

    BudgetUtilization {
        budget: budget.clone(),
        spent,
        percentage: percentage(spent, budget.amount()),
        remaining: budget.amount() - spent,
        is_over_budget: spent > budget.amount(),
    }
}

/// `spent` over `ceiling` as a percentage in `0..=100`. A quotient too large to represent is
/// already past 100.
fn percentage(spent: Amount, ceiling: Amount) -> Decimal {
    let ceiling = ceiling.value();
    if ceiling <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    spent
        .value()
        .checked_div(ceiling)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map_or(Decimal::ONE_HUNDRED, |p| p.min(Decimal::ONE_HUNDRED))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewBudget, NewTransaction, TransactionType, UserId, YearMonth};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn amt(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    fn budget(id: &str, category: &str, amount: &str, month: &str) -> Budget {
        NewBudget {
            category: category.to_string(),
            amount: amt(amount),
            month: YearMonth::from_str(month).unwrap(),
            user_id: UserId::from("u1"),
        }
        .into_budget(id.to_string())
    }

    fn txn(kind: TransactionType, category: &str, amount: &str, date: &str) -> Transaction {
        NewTransaction {
            kind,
            amount: amt(amount),
            category: category.to_string(),
            description: String::new(),
            date: NaiveDate::from_str(date).unwrap(),
            user_id: UserId::from("u1"),
        }
        .into_transaction(format!("{category}-{date}-{amount}"))
    }

    #[test]
    fn test_over_budget_is_capped_at_one_hundred_percent() {
        let budgets = vec![budget("b1", "Food", "200", "2024-06")];
        let transactions = vec![
            txn(TransactionType::Expense, "Food", "150", "2024-06-05"),
            txn(TransactionType::Expense, "Food", "80", "2024-06-20"),
        ];
        let rows = budget_utilization(&budgets, &transactions);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.spent, amt("230"));
        assert_eq!(row.percentage, Decimal::ONE_HUNDRED);
        assert_eq!(row.remaining, amt("-30"));
        assert!(row.is_over_budget);
    }

    #[test]
    fn test_no_matching_transactions() {
        let budgets = vec![budget("b1", "Food", "200", "2024-06")];
        let transactions = vec![
            // wrong type
            txn(TransactionType::Income, "Food", "50", "2024-06-05"),
            // wrong month
            txn(TransactionType::Expense, "Food", "50", "2024-07-01"),
            // wrong category, including case
            txn(TransactionType::Expense, "food", "50", "2024-06-05"),
        ];
        let row = &budget_utilization(&budgets, &transactions)[0];
        assert_eq!(row.spent, Amount::ZERO);
        assert_eq!(row.percentage, Decimal::ZERO);
        assert_eq!(row.remaining, amt("200"));
        assert!(!row.is_over_budget);
    }

    #[test]
    fn test_partial_spend() {
        let budgets = vec![budget("b1", "Food", "200", "2024-06")];
        let transactions = vec![txn(TransactionType::Expense, "Food", "150", "2024-06-05")];
        let row = &budget_utilization(&budgets, &transactions)[0];
        assert_eq!(row.percentage, Decimal::from(75));
        assert_eq!(row.remaining, amt("50"));
        assert!(!row.is_over_budget);
    }

    #[test]
    fn test_exactly_on_budget_is_not_over() {
        let budgets = vec![budget("b1", "Food", "200", "2024-06")];
        let transactions = vec![txn(TransactionType::Expense, "Food", "200", "2024-06-30")];
        let row = &budget_utilization(&budgets, &transactions)[0];
        assert_eq!(row.percentage, Decimal::ONE_HUNDRED);
        assert_eq!(row.remaining, Amount::ZERO);
        assert!(!row.is_over_budget);
    }

    #[test]
    fn test_zero_budget_has_zero_percentage() {
        let budgets = vec![budget("b1", "Food", "0", "2024-06")];
        let transactions = vec![txn(TransactionType::Expense, "Food", "10", "2024-06-05")];
        let row = &budget_utilization(&budgets, &transactions)[0];
        assert_eq!(row.percentage, Decimal::ZERO);
        assert_eq!(row.remaining, amt("-10"));
        assert!(row.is_over_budget);
    }

    #[test]
    fn test_duplicate_budgets_get_independent_rows_in_order() {
        let budgets = vec![
            budget("b1", "Food", "200", "2024-06"),
            budget("b2", "Rent", "1000", "2024-06"),
            budget("b3", "Food", "100", "2024-06"),
        ];
        let transactions = vec![txn(TransactionType::Expense, "Food", "150", "2024-06-05")];
        let rows = budget_utilization(&budgets, &transactions);
        let ids: Vec<&str> = rows.iter().map(|r| r.budget.id()).collect();
        assert_eq!(ids, vec!["b1", "b2", "b3"]);
        assert_eq!(rows[0].spent, amt("150"));
        assert_eq!(rows[2].spent, amt("150"));
        assert!(!rows[0].is_over_budget);
        assert!(rows[2].is_over_budget);
    }

    #[test]
    fn test_summary() {
        let budgets = vec![
            budget("b1", "Food", "200", "2024-06"),
            budget("b2", "Rent", "1000", "2024-06"),
            budget("b3", "Food", "100", "2024-05"),
        ];
        let transactions = vec![
            txn(TransactionType::Expense, "Food", "250", "2024-06-05"),
            txn(TransactionType::Expense, "Food", "101", "2024-05-05"),
        ];
        let summary = budget_summary(&budget_utilization(&budgets, &transactions));
        assert_eq!(summary.count, 3);
        assert_eq!(summary.total_budgeted, amt("1300"));
        assert_eq!(summary.over_budget, 2);

        let empty = budget_summary(&[]);
        assert_eq!(empty.count, 0);
        assert_eq!(empty.total_budgeted, Amount::ZERO);
        assert_eq!(empty.over_budget, 0);
    }

    #[test]
    fn test_huge_amounts_do_not_overflow() {
        let budgets = vec![budget("b1", "Food", "0.01", "2024-06")];
        let transactions = vec![
            txn(TransactionType::Expense, "Food", "70000000000000000000000000000", "2024-06-05"),
            txn(TransactionType::Expense, "Food", "70000000000000000000000000000", "2024-06-06"),
        ];
        let row = &budget_utilization(&budgets, &transactions)[0];
        assert_eq!(row.spent, Amount::new(Decimal::MAX));
        assert_eq!(row.percentage, Decimal::ONE_HUNDRED);
        assert!(row.is_over_budget);
        assert!(row.remaining.is_negative());
    }

    #[test]
    fn test_percentage_bounds_and_remaining_identity() {
        let budgets: Vec<Budget> = ["0.01", "1", "99.99", "150", "230", "1000"]
            .iter()
            .enumerate()
            .map(|(i, a)| budget(&format!("b{i}"), "Food", a, "2024-06"))
            .collect();
        let transactions = vec![
            txn(TransactionType::Expense, "Food", "150", "2024-06-05"),
            txn(TransactionType::Expense, "Food", "80", "2024-06-20"),
        ];
        for row in budget_utilization(&budgets, &transactions) {
            assert!(row.percentage >= Decimal::ZERO);
            assert!(row.percentage <= Decimal::ONE_HUNDRED);
            if row.spent >= row.budget.amount() {
                assert_eq!(row.percentage, Decimal::ONE_HUNDRED);
            }
            assert_eq!(row.remaining.value(), row.budget.amount().value() - row.spent.value());
        }
    }
}
