//! The record store: where transactions, categories, budgets and recurring templates live.
//!
//! `Store` is passed to whoever needs it (see `Session`); there is no process-wide instance.
//! Every successful mutation is announced on a broadcast channel so that derived views can be
//! recomputed when, and only when, their inputs change.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::model::{
    Budget, BudgetUpdates, Category, NewBudget, NewCategory, NewRecurring, NewTransaction,
    RecurringTransaction, Transaction, TransactionUpdates, UserId,
};
use crate::Result;
use tokio::sync::broadcast;

/// How many unread change notifications a subscriber may fall behind before it is told it lagged.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// The four record collections.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Collection {
    Transactions,
    Categories,
    Budgets,
    Recurring,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// A notification that one record was changed.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Change {
    /// The owner of the changed record.
    pub user_id: UserId,
    pub collection: Collection,
    pub kind: ChangeKind,
    pub id: String,
}

/// Create, read, update and delete access to a user's records.
///
/// Lists are filtered by owner and returned in insertion order. Creation assigns a fresh unique
/// ID. Updates and deletes only touch records owned by the given user. Updating or deleting an ID
/// that does not exist, or that belongs to someone else, is not an error: updates return `None`
/// and deletes return `false`. Errors are reserved for failures of the underlying storage, and a
/// failed mutation leaves the records unchanged and announces nothing.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    async fn list_transactions(&self, user_id: &UserId) -> Result<Vec<Transaction>>;

    async fn list_categories(&self, user_id: &UserId) -> Result<Vec<Category>>;

    async fn list_budgets(&self, user_id: &UserId) -> Result<Vec<Budget>>;

    async fn list_recurring(&self, user_id: &UserId) -> Result<Vec<RecurringTransaction>>;

    async fn create_transaction(&self, new: NewTransaction) -> Result<Transaction>;

    async fn update_transaction(
        &self,
        user_id: &UserId,
        id: &str,
        updates: TransactionUpdates,
    ) -> Result<Option<Transaction>>;

    async fn delete_transaction(&self, user_id: &UserId, id: &str) -> Result<bool>;

    async fn create_category(&self, new: NewCategory) -> Result<Category>;

    async fn create_budget(&self, new: NewBudget) -> Result<Budget>;

    async fn update_budget(
        &self,
        user_id: &UserId,
        id: &str,
        updates: BudgetUpdates,
    ) -> Result<Option<Budget>>;

    async fn create_recurring(&self, new: NewRecurring) -> Result<RecurringTransaction>;

    /// Returns a receiver for every change made after this call.
    fn subscribe(&self) -> broadcast::Receiver<Change>;
}
