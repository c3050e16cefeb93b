//! A `Session` is the current user plus the `Store` holding their records. It fetches the user's
//! collections and hands them to the functions in `derive`.

use crate::derive::{
    budget_utilization, category_breakdown, expense_categories, filter_transactions,
    monthly_rollup, next_occurrence, BudgetUtilization, CategorySpend, MonthlyRollup,
    TransactionQuery,
};
use crate::model::{
    Amount, Budget, BudgetUpdates, Category, Frequency, NewBudget, NewCategory, NewRecurring,
    NewTransaction, RecurringTransaction, Transaction, TransactionType, TransactionUpdates, User,
    YearMonth, FALLBACK_COLOR,
};
use crate::store::Store;
use crate::Result;
use anyhow::anyhow;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// How many of the month's transactions the dashboard lists.
pub const RECENT_TRANSACTIONS: usize = 5;

/// Everything the dashboard shows for one reference date.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Dashboard {
    pub rollup: MonthlyRollup,
    /// Expenses in the reference month by category.
    pub breakdown: Vec<CategorySpend>,
    /// The first few transactions of the reference month, in stored order.
    pub recent: Vec<Transaction>,
}

/// The fields of a transaction as entered by the user. The owner is filled in by the `Session`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TransactionInput {
    pub kind: TransactionType,
    pub amount: Amount,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RecurringInput {
    pub kind: TransactionType,
    pub amount: Amount,
    pub category: String,
    pub description: String,
    pub frequency: Frequency,
}

#[derive(Clone)]
pub struct Session {
    user: User,
    store: Arc<dyn Store>,
    fallback_color: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("fallback_color", &self.fallback_color)
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(user: User, store: Arc<dyn Store>) -> Self {
        Self {
            user,
            store,
            fallback_color: FALLBACK_COLOR.to_string(),
        }
    }

    /// Replaces the color used for spending in categories that match no `Category`.
    pub fn with_fallback_color(mut self, color: impl Into<String>) -> Self {
        self.fallback_color = color.into();
        self
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    pub fn fallback_color(&self) -> &str {
        &self.fallback_color
    }

    pub async fn dashboard(&self, today: NaiveDate) -> Result<Dashboard> {
        let transactions = self.store.list_transactions(self.user.id()).await?;
        let categories = self.store.list_categories(self.user.id()).await?;
        let month = YearMonth::of(today);
        let breakdown =
            category_breakdown(&transactions, &categories, month, &self.fallback_color);
        let recent = transactions
            .iter()
            .filter(|t| month.contains(t.date()))
            .take(RECENT_TRANSACTIONS)
            .cloned()
            .collect();
        Ok(Dashboard {
            rollup: monthly_rollup(&transactions, today),
            breakdown,
            recent,
        })
    }

    /// One utilization row per budget, in stored order.
    pub async fn budget_report(&self) -> Result<Vec<BudgetUtilization>> {
        let budgets = self.store.list_budgets(self.user.id()).await?;
        let transactions = self.store.list_transactions(self.user.id()).await?;
        Ok(budget_utilization(&budgets, &transactions))
    }

    pub async fn transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>> {
        let transactions = self.store.list_transactions(self.user.id()).await?;
        Ok(filter_transactions(&transactions, query))
    }

    /// The user's categories, optionally only those of one type.
    pub async fn categories(&self, kind: Option<TransactionType>) -> Result<Vec<Category>> {
        let categories = self.store.list_categories(self.user.id()).await?;
        Ok(match kind {
            Some(TransactionType::Expense) => expense_categories(&categories),
            Some(kind) => categories.into_iter().filter(|c| c.kind() == kind).collect(),
            None => categories,
        })
    }

    pub async fn recurring(&self) -> Result<Vec<RecurringTransaction>> {
        self.store.list_recurring(self.user.id()).await
    }

    pub async fn add_transaction(&self, input: TransactionInput) -> Result<Transaction> {
        debug!("Adding a {} transaction for {}", input.kind, self.user.id());
        self.store
            .create_transaction(NewTransaction {
                kind: input.kind,
                amount: input.amount,
                category: input.category,
                description: input.description,
                date: input.date,
                user_id: self.user.id().clone(),
            })
            .await
    }

    pub async fn add_category(
        &self,
        name: impl Into<String>,
        kind: TransactionType,
        color: Option<String>,
    ) -> Result<Category> {
        self.store
            .create_category(NewCategory {
                name: name.into(),
                kind,
                color: color.unwrap_or_else(|| self.fallback_color.clone()),
                user_id: self.user.id().clone(),
            })
            .await
    }

    /// Creates the categories every new user starts with.
    pub async fn seed_default_categories(&self) -> Result<Vec<Category>> {
        let mut created = Vec::new();
        for category in NewCategory::defaults(self.user.id()) {
            created.push(self.store.create_category(category).await?);
        }
        Ok(created)
    }

    pub async fn add_budget(
        &self,
        category: impl Into<String>,
        amount: Amount,
        month: YearMonth,
    ) -> Result<Budget> {
        self.store
            .create_budget(NewBudget {
                category: category.into(),
                amount,
                month,
                user_id: self.user.id().clone(),
            })
            .await
    }

    /// Creates a recurring template whose first occurrence is one period after `from`.
    pub async fn add_recurring(
        &self,
        input: RecurringInput,
        from: NaiveDate,
    ) -> Result<RecurringTransaction> {
        let next_date = next_occurrence(from, input.frequency).ok_or_else(|| {
            anyhow!(
                "Cannot schedule a {} transaction after {from}",
                input.frequency
            )
        })?;
        self.store
            .create_recurring(NewRecurring {
                kind: input.kind,
                amount: input.amount,
                category: input.category,
                description: input.description,
                frequency: input.frequency,
                next_date,
                user_id: self.user.id().clone(),
            })
            .await
    }

    pub async fn update_transaction(
        &self,
        id: &str,
        updates: TransactionUpdates,
    ) -> Result<Option<Transaction>> {
        self.store
            .update_transaction(self.user.id(), id, updates)
            .await
    }

    pub async fn update_budget(&self, id: &str, updates: BudgetUpdates) -> Result<Option<Budget>> {
        self.store.update_budget(self.user.id(), id, updates).await
    }

    /// Deletes one of this user's transactions. Returns `false` when the user has no transaction
    /// with `id`.
    pub async fn delete_transaction(&self, id: &str) -> Result<bool> {
        self.store.delete_transaction(self.user.id(), id).await
    }
}
