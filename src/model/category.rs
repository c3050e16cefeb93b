use crate::model::{TransactionType, UserId};
use serde::{Deserialize, Serialize};

/// The color used for spending whose category text matches no `Category`.
pub const FALLBACK_COLOR: &str = "#8b5cf6";

/// A named bucket for transactions, with the color used to draw it in charts.
///
/// Names are not required to be unique. Transactions refer to categories by name only, so a
/// renamed or deleted category leaves its transactions pointing at text that matches nothing.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub(crate) id: String,
    pub(crate) name: String,
    #[serde(rename = "type")]
    pub(crate) kind: TransactionType,
    pub(crate) color: String,
    pub(crate) user_id: UserId,
}

impl Category {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

/// The fields of a `Category` before the store has assigned it an ID.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub kind: TransactionType,
    pub color: String,
    pub user_id: UserId,
}

impl NewCategory {
    pub(crate) fn into_category(self, id: String) -> Category {
        Category {
            id,
            name: self.name,
            kind: self.kind,
            color: self.color,
            user_id: self.user_id,
        }
    }

    /// The categories every new user starts with.
    pub fn defaults(user_id: &UserId) -> Vec<NewCategory> {
        DEFAULT_CATEGORIES
            .iter()
            .map(|(name, kind, color)| NewCategory {
                name: name.to_string(),
                kind: *kind,
                color: color.to_string(),
                user_id: user_id.clone(),
            })
            .collect()
    }
}

const DEFAULT_CATEGORIES: &[(&str, TransactionType, &str)] = &[
    ("Food & Dining", TransactionType::Expense, "#ef4444"),
    ("Transportation", TransactionType::Expense, "#f97316"),
    ("Shopping", TransactionType::Expense, "#eab308"),
    ("Entertainment", TransactionType::Expense, "#22c55e"),
    ("Bills & Utilities", TransactionType::Expense, "#3b82f6"),
    ("Healthcare", TransactionType::Expense, "#8b5cf6"),
    ("Salary", TransactionType::Income, "#10b981"),
    ("Freelance", TransactionType::Income, "#06b6d4"),
    ("Investments", TransactionType::Income, "#8b5cf6"),
];
