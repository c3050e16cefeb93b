use crate::model::{Amount, TransactionType, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How often a recurring transaction repeats.
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
pub enum Frequency {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

serde_plain::derive_display_from_serialize!(Frequency);
serde_plain::derive_fromstr_from_deserialize!(Frequency);

/// A template for a transaction that repeats.
///
/// `next_date` is projected once, when the template is created. Templates are never turned into
/// transactions automatically and `next_date` is never advanced.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTransaction {
    pub(crate) id: String,
    #[serde(rename = "type")]
    pub(crate) kind: TransactionType,
    pub(crate) amount: Amount,
    pub(crate) category: String,
    #[serde(default)]
    pub(crate) description: String,
    pub(crate) frequency: Frequency,
    pub(crate) next_date: NaiveDate,
    pub(crate) user_id: UserId,
}

impl RecurringTransaction {
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

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn next_date(&self) -> NaiveDate {
        self.next_date
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

/// The fields of a `RecurringTransaction` before the store has assigned it an ID.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NewRecurring {
    pub kind: TransactionType,
    pub amount: Amount,
    pub category: String,
    pub description: String,
    pub frequency: Frequency,
    pub next_date: NaiveDate,
    pub user_id: UserId,
}

impl NewRecurring {
    pub(crate) fn into_recurring(self, id: String) -> RecurringTransaction {
        RecurringTransaction {
            id,
            kind: self.kind,
            amount: self.amount,
            category: self.category,
            description: self.description,
            frequency: self.frequency,
            next_date: self.next_date,
            user_id: self.user_id,
        }
    }
}
