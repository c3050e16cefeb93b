//! Cached derived views that are recomputed only when the records they depend on change.
//!
//! `LiveViews` subscribes to the store's change notifications. Each notification marks the views
//! that read the changed collection as stale; the next read of a stale view recomputes it and
//! every other view is served from the cache.

use crate::derive::{BudgetUtilization, TransactionQuery};
use crate::model::{RecurringTransaction, Transaction};
use crate::session::{Dashboard, Session};
use crate::store::{Change, Collection};
use crate::Result;
use chrono::NaiveDate;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, warn};

/// The derived views that `LiveViews` caches.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum View {
    Dashboard,
    Budgets,
    Transactions,
    Recurring,
}

impl View {
    pub const ALL: [View; 4] = [
        View::Dashboard,
        View::Budgets,
        View::Transactions,
        View::Recurring,
    ];

    /// The views that must be recomputed when `collection` changes.
    pub fn affected_by(collection: Collection) -> &'static [View] {
        match collection {
            Collection::Transactions => &[View::Dashboard, View::Budgets, View::Transactions],
            // Category colors only show up in the dashboard breakdown.
            Collection::Categories => &[View::Dashboard],
            Collection::Budgets => &[View::Budgets],
            Collection::Recurring => &[View::Recurring],
        }
    }
}

#[derive(Debug)]
pub struct LiveViews {
    session: Session,
    changes: broadcast::Receiver<Change>,
    today: NaiveDate,
    query: TransactionQuery,
    dashboard: Option<Dashboard>,
    budgets: Option<Vec<BudgetUtilization>>,
    transactions: Option<Vec<Transaction>>,
    recurring: Option<Vec<RecurringTransaction>>,
}

impl LiveViews {
    /// Subscribes to the session's store. Nothing is computed until a view is first read.
    pub fn new(session: Session, today: NaiveDate) -> Self {
        let changes = session.store().subscribe();
        Self {
            session,
            changes,
            today,
            query: TransactionQuery::default(),
            dashboard: None,
            budgets: None,
            transactions: None,
            recurring: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Moves the reference date of the dashboard.
    pub fn set_today(&mut self, today: NaiveDate) {
        if self.today != today {
            self.today = today;
            self.invalidate(View::Dashboard);
        }
    }

    /// Replaces the filter of the transaction list.
    pub fn set_query(&mut self, query: TransactionQuery) {
        if self.query != query {
            self.query = query;
            self.invalidate(View::Transactions);
        }
    }

    /// Whether `view` would be served from the cache, given the notifications received so far.
    pub fn is_cached(&mut self, view: View) -> bool {
        self.drain_changes();
        match view {
            View::Dashboard => self.dashboard.is_some(),
            View::Budgets => self.budgets.is_some(),
            View::Transactions => self.transactions.is_some(),
            View::Recurring => self.recurring.is_some(),
        }
    }

    pub async fn dashboard(&mut self) -> Result<&Dashboard> {
        self.drain_changes();
        let dashboard = match self.dashboard.take() {
            Some(cached) => cached,
            None => {
                debug!("Recomputing the dashboard");
                self.session.dashboard(self.today).await?
            }
        };
        Ok(&*self.dashboard.insert(dashboard))
    }

    pub async fn budgets(&mut self) -> Result<&[BudgetUtilization]> {
        self.drain_changes();
        let budgets = match self.budgets.take() {
            Some(cached) => cached,
            None => {
                debug!("Recomputing budget utilization");
                self.session.budget_report().await?
            }
        };
        Ok(self.budgets.insert(budgets).as_slice())
    }

    pub async fn transactions(&mut self) -> Result<&[Transaction]> {
        self.drain_changes();
        let transactions = match self.transactions.take() {
            Some(cached) => cached,
            None => {
                debug!("Recomputing the transaction list");
                self.session.transactions(&self.query).await?
            }
        };
        Ok(self.transactions.insert(transactions).as_slice())
    }

    pub async fn recurring(&mut self) -> Result<&[RecurringTransaction]> {
        self.drain_changes();
        let recurring = match self.recurring.take() {
            Some(cached) => cached,
            None => {
                debug!("Recomputing the recurring list");
                self.session.recurring().await?
            }
        };
        Ok(self.recurring.insert(recurring).as_slice())
    }

    fn drain_changes(&mut self) {
        loop {
            match self.changes.try_recv() {
                Ok(change) => {
                    if &change.user_id != self.session.user().id() {
                        continue;
                    }
                    for view in View::affected_by(change.collection) {
                        self.invalidate(*view);
                    }
                }
                Err(TryRecvError::Lagged(missed)) => {
                    warn!("Missed {missed} change notifications, invalidating every view");
                    for view in View::ALL {
                        self.invalidate(view);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    fn invalidate(&mut self, view: View) {
        match view {
            View::Dashboard => self.dashboard = None,
            View::Budgets => self.budgets = None,
            View::Transactions => self.transactions = None,
            View::Recurring => self.recurring = None,
        }
    }
}
