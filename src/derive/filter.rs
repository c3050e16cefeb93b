use crate::model::{Category, Transaction, TransactionType};

/// Narrows a transaction list the way the transactions page does.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct TransactionQuery {
    /// `None` keeps both income and expenses.
    pub kind: Option<TransactionType>,
    /// Case-insensitive substring of the description or category. Empty matches everything.
    pub search: String,
}

impl TransactionQuery {
    fn matches(&self, t: &Transaction, needle: &str) -> bool {
        if let Some(kind) = self.kind {
            if t.kind() != kind {
                return false;
            }
        }
        needle.is_empty()
            || t.description().to_lowercase().contains(needle)
            || t.category().to_lowercase().contains(needle)
    }
}

/// Returns the transactions matching `query`, newest first. Same-day transactions keep their
/// relative order.
pub fn filter_transactions(
    transactions: &[Transaction],
    query: &TransactionQuery,
) -> Vec<Transaction> {
    let needle = query.search.to_lowercase();
    let mut matched: Vec<Transaction> = transactions
        .iter()
        .filter(|t| query.matches(t, &needle))
        .cloned()
        .collect();
    matched.sort_by(|a, b| b.date().cmp(&a.date()));
    matched
}

/// The categories a budget can be set against.
pub fn expense_categories(categories: &[Category]) -> Vec<Category> {
    categories
        .iter()
        .filter(|c| c.kind() == TransactionType::Expense)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, NewCategory, NewTransaction, UserId};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn txn(
        id: &str,
        kind: TransactionType,
        category: &str,
        description: &str,
        date: &str,
    ) -> Transaction {
        NewTransaction {
            kind,
            amount: Amount::from_str("1").unwrap(),
            category: category.to_string(),
            description: description.to_string(),
            date: NaiveDate::from_str(date).unwrap(),
            user_id: UserId::from("u1"),
        }
        .into_transaction(id.to_string())
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn("1", TransactionType::Expense, "Food & Dining", "Corner cafe", "2024-06-02"),
            txn("2", TransactionType::Income, "Salary", "June pay", "2024-06-01"),
            txn("3", TransactionType::Expense, "Shopping", "Cafe mugs", "2024-06-10"),
            txn("4", TransactionType::Expense, "Transportation", "Bus pass", "2024-06-02"),
        ]
    }

    fn ids(transactions: &[Transaction]) -> Vec<&str> {
        transactions.iter().map(|t| t.id()).collect()
    }

    #[test]
    fn test_default_query_sorts_newest_first_and_is_stable() {
        let result = filter_transactions(&sample(), &TransactionQuery::default());
        assert_eq!(ids(&result), vec!["3", "1", "4", "2"]);
    }

    #[test]
    fn test_type_filter() {
        let query = TransactionQuery {
            kind: Some(TransactionType::Income),
            ..Default::default()
        };
        assert_eq!(ids(&filter_transactions(&sample(), &query)), vec!["2"]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_description_and_category() {
        let query = TransactionQuery {
            kind: None,
            search: "CAFE".to_string(),
        };
        assert_eq!(ids(&filter_transactions(&sample(), &query)), vec!["3", "1"]);

        let query = TransactionQuery {
            kind: Some(TransactionType::Expense),
            search: "transport".to_string(),
        };
        assert_eq!(ids(&filter_transactions(&sample(), &query)), vec!["4"]);
    }

    #[test]
    fn test_search_whitespace_is_significant() {
        let query = TransactionQuery {
            kind: None,
            search: " cafe".to_string(),
        };
        assert_eq!(ids(&filter_transactions(&sample(), &query)), vec!["1"]);
    }

    #[test]
    fn test_type_filter_keeps_same_day_order() {
        let transactions = vec![
            txn("a", TransactionType::Expense, "Food & Dining", "Lunch", "2024-06-02"),
            txn("b", TransactionType::Income, "Freelance", "Invoice", "2024-06-02"),
            txn("c", TransactionType::Expense, "Shopping", "Shoes", "2024-06-02"),
            txn("d", TransactionType::Expense, "Shopping", "Socks", "2024-06-03"),
            txn("e", TransactionType::Income, "Salary", "Pay", "2024-06-02"),
        ];
        let expenses = TransactionQuery {
            kind: Some(TransactionType::Expense),
            search: String::new(),
        };
        assert_eq!(ids(&filter_transactions(&transactions, &expenses)), vec!["d", "a", "c"]);
        let income = TransactionQuery {
            kind: Some(TransactionType::Income),
            search: String::new(),
        };
        assert_eq!(ids(&filter_transactions(&transactions, &income)), vec!["b", "e"]);
        let all = filter_transactions(&transactions, &TransactionQuery::default());
        assert_eq!(ids(&all), vec!["d", "a", "b", "c", "e"]);
    }

    #[test]
    fn test_expense_categories() {
        let categories: Vec<Category> = NewCategory::defaults(&UserId::from("u1"))
            .into_iter()
            .enumerate()
            .map(|(i, c)| c.into_category(i.to_string()))
            .collect();
        let expenses = expense_categories(&categories);
        assert_eq!(expenses.len(), 6);
        assert!(expenses.iter().all(|c| c.kind() == TransactionType::Expense));
        assert_eq!(expenses[0].name(), "Food & Dining");
    }
}
