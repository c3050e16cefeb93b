use crate::model::{Amount, UserId, YearMonth};
use serde::{Deserialize, Serialize};

/// A spending ceiling for one category in one calendar month.
///
/// Nothing prevents two budgets for the same user, category and month. Each one is reported on
/// its own.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub(crate) id: String,
    pub(crate) category: String,
    pub(crate) amount: Amount,
    pub(crate) month: YearMonth,
    pub(crate) user_id: UserId,
}

impl Budget {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Set any of the fields on `self` that are set in `update`.
    pub fn merge_updates(&mut self, update: BudgetUpdates) {
        if let Some(x) = update.category {
            self.category = x;
        }
        if let Some(x) = update.amount {
            self.amount = x;
        }
        if let Some(x) = update.month {
            self.month = x;
        }
    }
}

/// The fields of a `Budget` before the store has assigned it an ID.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NewBudget {
    pub category: String,
    pub amount: Amount,
    pub month: YearMonth,
    pub user_id: UserId,
}

impl NewBudget {
    pub(crate) fn into_budget(self, id: String) -> Budget {
        Budget {
            id,
            category: self.category,
            amount: self.amount,
            month: self.month,
            user_id: self.user_id,
        }
    }
}

/// A partial update of a `Budget`. Only the fields that are `Some` are changed.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct BudgetUpdates {
    pub category: Option<String>,
    pub amount: Option<Amount>,
    pub month: Option<YearMonth>,
}

impl BudgetUpdates {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.amount.is_none() && self.month.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_merge_updates() {
        let mut b = NewBudget {
            category: "Food".to_string(),
            amount: Amount::from_str("200").unwrap(),
            month: YearMonth::from_str("2024-06").unwrap(),
            user_id: UserId::from("u1"),
        }
        .into_budget("b1".to_string());

        b.merge_updates(BudgetUpdates {
            month: Some(YearMonth::from_str("2024-07").unwrap()),
            ..Default::default()
        });
        assert_eq!(b.month().to_string(), "2024-07");
        assert_eq!(b.category(), "Food");
        assert_eq!(b.amount(), Amount::from_str("200").unwrap());
    }

    #[test]
    fn test_deserialize_browser_record() {
        let json = r#"{"id":"9","category":"Food","amount":200,"month":"2024-06","userId":"1"}"#;
        let b: Budget = serde_json::from_str(json).unwrap();
        assert_eq!(b.month(), YearMonth::new(2024, 6).unwrap());
        assert_eq!(b.amount(), Amount::from_str("200").unwrap());
    }
}
