use crate::model::{
    Budget, BudgetUpdates, Category, FinanceData, NewBudget, NewCategory, NewRecurring,
    NewTransaction, RecurringTransaction, Transaction, TransactionUpdates, UserId,
};
use crate::store::{Change, ChangeKind, Collection, Store, CHANGE_CHANNEL_CAPACITY};
use crate::utils::generate_id;
use crate::Result;
use tokio::sync::{broadcast, RwLock, RwLockWriteGuard};
use tracing::{debug, trace};

/// A `Store` that keeps everything in memory. Nothing survives the process.
#[derive(Debug)]
pub struct MemoryStore {
    data: RwLock<FinanceData>,
    changes: broadcast::Sender<Change>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(FinanceData::default())
    }
}

impl MemoryStore {
    pub fn new(data: FinanceData) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            data: RwLock::new(data),
            changes,
        }
    }

    /// A copy of every record, for all users.
    pub async fn snapshot(&self) -> FinanceData {
        self.data.read().await.clone()
    }

    /// Exclusive access to the records. Changes made through the guard are not announced.
    pub(super) async fn write(&self) -> RwLockWriteGuard<'_, FinanceData> {
        self.data.write().await
    }

    pub(super) fn notify(
        &self,
        user_id: &UserId,
        collection: Collection,
        kind: ChangeKind,
        id: &str,
    ) {
        debug!("{kind:?} {collection:?} record {id}");
        // An error only means that nobody is listening.
        let _ = self.changes.send(Change {
            user_id: user_id.clone(),
            collection,
            kind,
            id: id.to_string(),
        });
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn list_transactions(&self, user_id: &UserId) -> Result<Vec<Transaction>> {
        trace!("list_transactions for {user_id}");
        let data = self.data.read().await;
        Ok(data
            .transactions
            .iter()
            .filter(|t| t.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn list_categories(&self, user_id: &UserId) -> Result<Vec<Category>> {
        trace!("list_categories for {user_id}");
        let data = self.data.read().await;
        Ok(data
            .categories
            .iter()
            .filter(|c| c.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn list_budgets(&self, user_id: &UserId) -> Result<Vec<Budget>> {
        trace!("list_budgets for {user_id}");
        let data = self.data.read().await;
        Ok(data
            .budgets
            .iter()
            .filter(|b| b.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn list_recurring(&self, user_id: &UserId) -> Result<Vec<RecurringTransaction>> {
        trace!("list_recurring for {user_id}");
        let data = self.data.read().await;
        Ok(data
            .recurring_transactions
            .iter()
            .filter(|r| r.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn create_transaction(&self, new: NewTransaction) -> Result<Transaction> {
        let transaction = new.into_transaction(generate_id());
        self.data
            .write()
            .await
            .transactions
            .push(transaction.clone());
        self.notify(
            transaction.user_id(),
            Collection::Transactions,
            ChangeKind::Created,
            transaction.id(),
        );
        Ok(transaction)
    }

    async fn update_transaction(
        &self,
        user_id: &UserId,
        id: &str,
        updates: TransactionUpdates,
    ) -> Result<Option<Transaction>> {
        let updated = self
            .data
            .write()
            .await
            .update_transaction(user_id, id, updates);
        if updated.is_some() {
            self.notify(user_id, Collection::Transactions, ChangeKind::Updated, id);
        }
        Ok(updated)
    }

    async fn delete_transaction(&self, user_id: &UserId, id: &str) -> Result<bool> {
        let removed = self.data.write().await.remove_transaction(user_id, id);
        if removed.is_some() {
            self.notify(user_id, Collection::Transactions, ChangeKind::Deleted, id);
        }
        Ok(removed.is_some())
    }

    async fn create_category(&self, new: NewCategory) -> Result<Category> {
        let category = new.into_category(generate_id());
        self.data.write().await.categories.push(category.clone());
        self.notify(
            category.user_id(),
            Collection::Categories,
            ChangeKind::Created,
            category.id(),
        );
        Ok(category)
    }

    async fn create_budget(&self, new: NewBudget) -> Result<Budget> {
        let budget = new.into_budget(generate_id());
        self.data.write().await.budgets.push(budget.clone());
        self.notify(
            budget.user_id(),
            Collection::Budgets,
            ChangeKind::Created,
            budget.id(),
        );
        Ok(budget)
    }

    async fn update_budget(
        &self,
        user_id: &UserId,
        id: &str,
        updates: BudgetUpdates,
    ) -> Result<Option<Budget>> {
        let updated = self.data.write().await.update_budget(user_id, id, updates);
        if updated.is_some() {
            self.notify(user_id, Collection::Budgets, ChangeKind::Updated, id);
        }
        Ok(updated)
    }

    async fn create_recurring(&self, new: NewRecurring) -> Result<RecurringTransaction> {
        let recurring = new.into_recurring(generate_id());
        self.data
            .write()
            .await
            .recurring_transactions
            .push(recurring.clone());
        self.notify(
            recurring.user_id(),
            Collection::Recurring,
            ChangeKind::Created,
            recurring.id(),
        );
        Ok(recurring)
    }

    fn subscribe(&self) -> broadcast::Receiver<Change> {
        self.changes.subscribe()
    }
}
