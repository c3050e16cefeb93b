use crate::model::{
    Budget, BudgetUpdates, Category, FinanceData, NewBudget, NewCategory, NewRecurring,
    NewTransaction, RecurringTransaction, Transaction, TransactionUpdates, UserId,
};
use crate::store::{Change, ChangeKind, Collection, MemoryStore, Store};
use crate::utils::generate_id;
use crate::{utils, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// A `Store` backed by a single JSON document holding every user's records.
///
/// The document is read once when the store is opened and rewritten in full after each change.
/// A change is applied to a copy of the records, written to a sibling temp file and renamed over
/// the original. Only then does it replace the in-memory records and get announced, so a failed
/// write leaves both the file and memory as they were.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    memory: MemoryStore,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file is an empty store; the file will be created on
    /// the first change.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data: FinanceData = if path.is_file() {
            debug!("Loading records from {}", path.display());
            utils::deserialize(&path).await?
        } else {
            info!(
                "No data file at {}, starting with an empty store",
                path.display()
            );
            FinanceData::default()
        };
        Ok(Self {
            path,
            memory: MemoryStore::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs `edit` on a copy of the records and, when it reports a change, saves the copy and
    /// makes it current. The write lock is held throughout so saves happen in order.
    async fn commit<T, F>(&self, edit: F) -> Result<Option<T>>
    where
        T: Send,
        F: FnOnce(&mut FinanceData) -> Option<T> + Send,
    {
        let mut current = self.memory.write().await;
        let mut edited = current.clone();
        let Some(out) = edit(&mut edited) else {
            return Ok(None);
        };
        if let Err(e) = self.save(&edited).await {
            warn!("Change not applied: {e:#}");
            return Err(e);
        }
        *current = edited;
        Ok(Some(out))
    }

    async fn save(&self, data: &FinanceData) -> Result<()> {
        let json = serde_json::to_string_pretty(data).context("Unable to serialize records")?;
        let tmp = self.path.with_extension("json.tmp");
        utils::write(&tmp, json).await?;
        utils::rename(&tmp, &self.path).await?;
        debug!("Saved records to {}", self.path.display());
        Ok(())
    }
}

#[async_trait::async_trait]
impl Store for JsonFileStore {
    async fn list_transactions(&self, user_id: &UserId) -> Result<Vec<Transaction>> {
        self.memory.list_transactions(user_id).await
    }

    async fn list_categories(&self, user_id: &UserId) -> Result<Vec<Category>> {
        self.memory.list_categories(user_id).await
    }

    async fn list_budgets(&self, user_id: &UserId) -> Result<Vec<Budget>> {
        self.memory.list_budgets(user_id).await
    }

    async fn list_recurring(&self, user_id: &UserId) -> Result<Vec<RecurringTransaction>> {
        self.memory.list_recurring(user_id).await
    }

    async fn create_transaction(&self, new: NewTransaction) -> Result<Transaction> {
        let transaction = new.into_transaction(generate_id());
        self.commit(|data| {
            data.transactions.push(transaction.clone());
            Some(())
        })
        .await?;
        self.memory.notify(
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
            .commit(|data| data.update_transaction(user_id, id, updates))
            .await?;
        if updated.is_some() {
            self.memory
                .notify(user_id, Collection::Transactions, ChangeKind::Updated, id);
        }
        Ok(updated)
    }

    async fn delete_transaction(&self, user_id: &UserId, id: &str) -> Result<bool> {
        let removed = self
            .commit(|data| data.remove_transaction(user_id, id))
            .await?;
        if removed.is_some() {
            self.memory
                .notify(user_id, Collection::Transactions, ChangeKind::Deleted, id);
        }
        Ok(removed.is_some())
    }

    async fn create_category(&self, new: NewCategory) -> Result<Category> {
        let category = new.into_category(generate_id());
        self.commit(|data| {
            data.categories.push(category.clone());
            Some(())
        })
        .await?;
        self.memory.notify(
            category.user_id(),
            Collection::Categories,
            ChangeKind::Created,
            category.id(),
        );
        Ok(category)
    }

    async fn create_budget(&self, new: NewBudget) -> Result<Budget> {
        let budget = new.into_budget(generate_id());
        self.commit(|data| {
            data.budgets.push(budget.clone());
            Some(())
        })
        .await?;
        self.memory.notify(
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
        let updated = self
            .commit(|data| data.update_budget(user_id, id, updates))
            .await?;
        if updated.is_some() {
            self.memory
                .notify(user_id, Collection::Budgets, ChangeKind::Updated, id);
        }
        Ok(updated)
    }

    async fn create_recurring(&self, new: NewRecurring) -> Result<RecurringTransaction> {
        let recurring = new.into_recurring(generate_id());
        self.commit(|data| {
            data.recurring_transactions.push(recurring.clone());
            Some(())
        })
        .await?;
        self.memory.notify(
            recurring.user_id(),
            Collection::Recurring,
            ChangeKind::Created,
            recurring.id(),
        );
        Ok(recurring)
    }

    fn subscribe(&self) -> broadcast::Receiver<Change> {
        self.memory.subscribe()
    }
}
