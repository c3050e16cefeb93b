use crate::model::{Amount, Category, Transaction, YearMonth};
use rust_decimal::Decimal;
use serde::Serialize;

/// Total spending in one category for a month.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CategorySpend {
    /// The category text as written on the transactions.
    pub category: String,
    pub amount: Amount,
    pub color: String,
}

impl CategorySpend {
    /// This row's share of `total` as a percentage. Zero when `total` is zero.
    pub fn share_of(&self, total: Amount) -> Decimal {
        if total.is_zero() {
            return Decimal::ZERO;
        }
        self.amount
            .value()
            .checked_div(total.value())
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ONE_HUNDRED)
    }
}

/// Groups the expenses in `month` by category text and sums them.
///
/// Each row takes the color of the first category whose name equals the transaction's category
/// text. Spending whose category matches nothing is still reported, drawn in `fallback_color`.
/// Rows appear in the order their category is first seen.
pub fn category_breakdown(
    transactions: &[Transaction],
    categories: &[Category],
    month: YearMonth,
    fallback_color: &str,
) -> Vec<CategorySpend> {
    let mut rows: Vec<CategorySpend> = Vec::new();
    for t in transactions
        .iter()
        .filter(|t| t.is_expense() && month.contains(t.date()))
    {
        match rows.iter_mut().find(|row| row.category == t.category()) {
            Some(row) => row.amount += t.amount(),
            None => rows.push(CategorySpend {
                category: t.category().to_string(),
                amount: t.amount(),
                color: color_of(t.category(), categories, fallback_color),
            }),
        }
    }
    rows
}

/// Sum of all rows, which equals the month's total expenses.
pub fn breakdown_total(rows: &[CategorySpend]) -> Amount {
    rows.iter().map(|row| row.amount).sum()
}

fn color_of(name: &str, categories: &[Category], fallback_color: &str) -> String {
    categories
        .iter()
        .find(|c| c.name() == name)
        .map(|c| c.color())
        .unwrap_or(fallback_color)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::monthly_rollup;
    use crate::model::{NewCategory, NewTransaction, TransactionType, UserId, FALLBACK_COLOR};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn amt(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
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
        .into_transaction(format!("{category}-{date}"))
    }

    fn categories() -> Vec<Category> {
        NewCategory::defaults(&UserId::from("u1"))
            .into_iter()
            .enumerate()
            .map(|(i, c)| c.into_category(i.to_string()))
            .collect()
    }

    fn june() -> YearMonth {
        YearMonth::from_str("2024-06").unwrap()
    }

    #[test]
    fn test_groups_and_colors() {
        let transactions = vec![
            txn(TransactionType::Expense, "Food & Dining", "12", "2024-06-01"),
            txn(TransactionType::Expense, "Shopping", "40", "2024-06-02"),
            txn(TransactionType::Expense, "Food & Dining", "8.50", "2024-06-03"),
            txn(TransactionType::Income, "Salary", "3000", "2024-06-01"),
            txn(TransactionType::Expense, "Shopping", "1000", "2024-05-30"),
        ];
        let rows = category_breakdown(&transactions, &categories(), june(), FALLBACK_COLOR);
        assert_eq!(
            rows,
            vec![
                CategorySpend {
                    category: "Food & Dining".to_string(),
                    amount: amt("20.50"),
                    color: "#ef4444".to_string(),
                },
                CategorySpend {
                    category: "Shopping".to_string(),
                    amount: amt("40"),
                    color: "#eab308".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_unmatched_category_uses_fallback_color() {
        let transactions = vec![
            txn(TransactionType::Expense, "Pet Supplies", "33.33", "2024-06-10"),
            txn(TransactionType::Expense, "Shopping", "10", "2024-06-11"),
        ];
        let rows = category_breakdown(&transactions, &categories(), june(), "#000000");
        assert_eq!(rows[0].category, "Pet Supplies");
        assert_eq!(rows[0].amount, amt("33.33"));
        assert_eq!(rows[0].color, "#000000");
        assert_eq!(rows[1].color, "#eab308");
    }

    #[test]
    fn test_no_categories_at_all() {
        let transactions = vec![txn(TransactionType::Expense, "Rent", "900", "2024-06-01")];
        let rows = category_breakdown(&transactions, &[], june(), FALLBACK_COLOR);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].color, FALLBACK_COLOR);
    }

    #[test]
    fn test_total_equals_month_expenses() {
        let transactions = vec![
            txn(TransactionType::Expense, "Food & Dining", "12.34", "2024-06-01"),
            txn(TransactionType::Expense, "Unknown", "7.66", "2024-06-02"),
            txn(TransactionType::Expense, "Food & Dining", "100", "2024-06-30"),
            txn(TransactionType::Expense, "Transportation", "45", "2024-06-15"),
            txn(TransactionType::Income, "Salary", "2000", "2024-06-15"),
            txn(TransactionType::Expense, "Transportation", "45", "2024-07-01"),
        ];
        let rows = category_breakdown(&transactions, &categories(), june(), FALLBACK_COLOR);
        let rollup = monthly_rollup(&transactions, NaiveDate::from_ymd_opt(2024, 6, 20).unwrap());
        assert_eq!(breakdown_total(&rows), rollup.total_expenses);
    }

    #[test]
    fn test_share_of() {
        let rows = vec![
            CategorySpend {
                category: "A".to_string(),
                amount: amt("25"),
                color: FALLBACK_COLOR.to_string(),
            },
            CategorySpend {
                category: "B".to_string(),
                amount: amt("75"),
                color: FALLBACK_COLOR.to_string(),
            },
        ];
        let total = breakdown_total(&rows);
        assert_eq!(rows[0].share_of(total), Decimal::from(25));
        assert_eq!(rows[1].share_of(total), Decimal::from(75));
        assert_eq!(rows[0].share_of(Amount::ZERO), Decimal::ZERO);
    }
}
