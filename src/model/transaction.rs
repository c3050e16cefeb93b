use crate::model::{Amount, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether a record brings money in or sends it out.
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

/// A single income or expense record.
///
/// `category` is free text that is matched against `Category::name`; it is not required to name
/// an existing category.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub(crate) id: String,
    #[serde(rename = "type")]
    pub(crate) kind: TransactionType,
    pub(crate) amount: Amount,
    pub(crate) category: String,
    #[serde(default)]
    pub(crate) description: String,
    pub(crate) date: NaiveDate,
    pub(crate) user_id: UserId,
}

impl Transaction {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Set any of the fields on `self` that are set in `update`.
    pub fn merge_updates(&mut self, update: TransactionUpdates) {
        if let Some(x) = update.kind {
            self.kind = x;
        }
        if let Some(x) = update.amount {
            self.amount = x;
        }
        if let Some(x) = update.category {
            self.category = x;
        }
        if let Some(x) = update.description {
            self.description = x;
        }
        if let Some(x) = update.date {
            self.date = x;
        }
    }
}

/// The fields of a `Transaction` before the store has assigned it an ID.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionType,
    pub amount: Amount,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub user_id: UserId,
}

impl NewTransaction {
    pub(crate) fn into_transaction(self, id: String) -> Transaction {
        Transaction {
            id,
            kind: self.kind,
            amount: self.amount,
            category: self.category,
            description: self.description,
            date: self.date,
            user_id: self.user_id,
        }
    }
}

/// A partial update of a `Transaction`. Only the fields that are `Some` are changed.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct TransactionUpdates {
    pub kind: Option<TransactionType>,
    pub amount: Option<Amount>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

impl TransactionUpdates {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample() -> Transaction {
        NewTransaction {
            kind: TransactionType::Expense,
            amount: Amount::from_str("12.50").unwrap(),
            category: "Food & Dining".to_string(),
            description: "Lunch".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
            user_id: UserId::from("u1"),
        }
        .into_transaction("t1".to_string())
    }

    #[test]
    fn test_transaction_type_strings() {
        assert_eq!(TransactionType::Income.to_string(), "income");
        assert_eq!(
            TransactionType::from_str("expense").unwrap(),
            TransactionType::Expense
        );
        assert!(TransactionType::from_str("transfer").is_err());
    }

    #[test]
    fn test_merge_updates_only_changes_some_fields() {
        let mut t = sample();
        t.merge_updates(TransactionUpdates {
            amount: Some(Amount::from_str("20").unwrap()),
            description: Some("Dinner".to_string()),
            ..Default::default()
        });
        assert_eq!(t.amount(), Amount::from_str("20").unwrap());
        assert_eq!(t.description(), "Dinner");
        assert_eq!(t.category(), "Food & Dining");
        assert!(t.is_expense());
        assert_eq!(t.id(), "t1");
    }

    #[test]
    fn test_serde_uses_browser_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["date"], "2024-06-05");
        assert_eq!(json["amount"], "12.5");
    }

    #[test]
    fn test_deserialize_browser_record() {
        let json = r#"{"id":"1718000000000","type":"income","amount":2500,
            "category":"Salary","description":"June pay","date":"2024-06-01","userId":"1"}"#;
        let t: Transaction = serde_json::from_str(json).unwrap();
        assert!(t.is_income());
        assert_eq!(t.amount(), Amount::from_str("2500").unwrap());
        assert_eq!(t.user_id().as_str(), "1");
    }

    #[test]
    fn test_updates_is_empty() {
        assert!(TransactionUpdates::default().is_empty());
        let u = TransactionUpdates {
            kind: Some(TransactionType::Income),
            ..Default::default()
        };
        assert!(!u.is_empty());
    }
}
