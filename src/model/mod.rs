//! Types that represent the core data model, such as `Transaction`, `Budget` and `Category`.
mod amount;
mod budget;
mod category;
mod month;
mod recurring;
mod transaction;
mod user;

pub use amount::{Amount, AmountError};
pub use budget::{Budget, BudgetUpdates, NewBudget};
pub use category::{Category, NewCategory, FALLBACK_COLOR};
pub use month::YearMonth;
pub use recurring::{Frequency, NewRecurring, RecurringTransaction};
pub use transaction::{NewTransaction, Transaction, TransactionType, TransactionUpdates};
pub use user::{User, UserId};

use serde::{Deserialize, Serialize};

/// Everything the app stores, for all users, serialized together as a single JSON document.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceData {
    #[serde(default)]
    pub(crate) transactions: Vec<Transaction>,
    #[serde(default)]
    pub(crate) categories: Vec<Category>,
    #[serde(default)]
    pub(crate) budgets: Vec<Budget>,
    #[serde(default)]
    pub(crate) recurring_transactions: Vec<RecurringTransaction>,
}

impl FinanceData {
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn recurring_transactions(&self) -> &[RecurringTransaction] {
        &self.recurring_transactions
    }

    /// Merges `updates` into the transaction with `id`, if `user_id` owns it.
    pub(crate) fn update_transaction(
        &mut self,
        user_id: &UserId,
        id: &str,
        updates: TransactionUpdates,
    ) -> Option<Transaction> {
        let transaction = self
            .transactions
            .iter_mut()
            .find(|t| t.id() == id && t.user_id() == user_id)?;
        transaction.merge_updates(updates);
        Some(transaction.clone())
    }

    /// Removes the transaction with `id`, if `user_id` owns it.
    pub(crate) fn remove_transaction(&mut self, user_id: &UserId, id: &str) -> Option<Transaction> {
        let ix = self
            .transactions
            .iter()
            .position(|t| t.id() == id && t.user_id() == user_id)?;
        Some(self.transactions.remove(ix))
    }

    /// Merges `updates` into the budget with `id`, if `user_id` owns it.
    pub(crate) fn update_budget(
        &mut self,
        user_id: &UserId,
        id: &str,
        updates: BudgetUpdates,
    ) -> Option<Budget> {
        let budget = self
            .budgets
            .iter_mut()
            .find(|b| b.id() == id && b.user_id() == user_id)?;
        budget.merge_updates(updates);
        Some(budget.clone())
    }
}
