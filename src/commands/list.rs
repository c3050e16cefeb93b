//! List command handlers.

use crate::args::{ListCategoriesArgs, ListTransactionsArgs};
use crate::commands::{plural, Out};
use crate::derive::{recurring_summary, TransactionQuery};
use crate::error::{ErrorType, IntoResult};
use crate::model::{Budget, Category, RecurringTransaction, Transaction};
use crate::session::Session;
use crate::store::Store;
use crate::{Config, Result};
use std::fmt::Write;

/// Lists the configured user's transactions, newest first, narrowed by type and search text.
pub async fn list_transactions(
    config: Config,
    args: ListTransactionsArgs,
) -> Result<Out<Vec<Transaction>>> {
    let session = open(&config).await?;
    let query = TransactionQuery {
        kind: args.kind().kind(),
        search: args.search().to_string(),
    };
    let transactions = session
        .transactions(&query)
        .await
        .pub_result(ErrorType::Store)?;

    let mut message = plural(transactions.len(), "transaction", "transactions");
    for t in &transactions {
        let sign = if t.is_income() { "+" } else { "-" };
        let _ = write!(
            message,
            "\n  {}  {sign}{:>12}  {:<20} {}  [{}]",
            t.date(),
            t.amount().to_string(),
            t.category(),
            t.description(),
            t.id()
        );
    }
    Ok(Out::new(message, transactions))
}

pub async fn list_categories(
    config: Config,
    args: ListCategoriesArgs,
) -> Result<Out<Vec<Category>>> {
    let session = open(&config).await?;
    let categories = session
        .categories(args.kind().kind())
        .await
        .pub_result(ErrorType::Store)?;

    let mut message = plural(categories.len(), "category", "categories");
    for c in &categories {
        let _ = write!(message, "\n  {:<20} {:<8} {}", c.name(), c.kind(), c.color());
    }
    Ok(Out::new(message, categories))
}

pub async fn list_budgets(config: Config) -> Result<Out<Vec<Budget>>> {
    let session = open(&config).await?;
    let budgets = session
        .store()
        .list_budgets(session.user().id())
        .await
        .pub_result(ErrorType::Store)?;

    let mut message = plural(budgets.len(), "budget", "budgets");
    for b in &budgets {
        let _ = write!(
            message,
            "\n  {}  {:<20} {:>12}  [{}]",
            b.month(),
            b.category(),
            b.amount().to_string(),
            b.id()
        );
    }
    Ok(Out::new(message, budgets))
}

pub async fn list_recurring(config: Config) -> Result<Out<Vec<RecurringTransaction>>> {
    let session = open(&config).await?;
    let recurring = session.recurring().await.pub_result(ErrorType::Store)?;

    let mut message = plural(recurring.len(), "recurring transaction", "recurring transactions");
    if !recurring.is_empty() {
        let summary = recurring_summary(&recurring);
        let _ = write!(
            message,
            "\n  monthly income {}  monthly expenses {}",
            summary.monthly_income, summary.monthly_expenses
        );
    }
    for r in &recurring {
        let _ = write!(
            message,
            "\n  next {}  {:<8} {:<8} {:>12}  {:<20} {}  [{}]",
            r.next_date(),
            r.frequency(),
            r.kind(),
            r.amount().to_string(),
            r.category(),
            r.description(),
            r.id()
        );
    }
    Ok(Out::new(message, recurring))
}

async fn open(config: &Config) -> Result<Session> {
    config.session().await.pub_result(ErrorType::Store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::TypeFilter;
    use crate::model::{Frequency, TransactionType};
    use crate::session::RecurringInput;
    use crate::test::{amount, date, TestEnv};

    #[tokio::test]
    async fn test_list_transactions_filters_and_sorts() {
        let env = TestEnv::new().await;
        env.insert_test_transaction(TransactionType::Expense, "12", "Food & Dining", "2024-06-02")
            .await;
        env.insert_test_transaction(TransactionType::Income, "3000", "Salary", "2024-06-01")
            .await;
        let newest = env
            .insert_test_transaction(TransactionType::Expense, "40", "Shopping", "2024-06-09")
            .await;

        let out = list_transactions(env.config(), ListTransactionsArgs::default())
            .await
            .unwrap();
        let all = out.structure().unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0], newest);
        assert!(out.message().starts_with("3 transactions"));

        let args = ListTransactionsArgs::new(TypeFilter::Income, "");
        let out = list_transactions(env.config(), args).await.unwrap();
        assert_eq!(out.structure().unwrap().len(), 1);
        assert!(out.message().starts_with("1 transaction\n"));

        let args = ListTransactionsArgs::new(TypeFilter::All, "FOOD");
        let out = list_transactions(env.config(), args).await.unwrap();
        assert_eq!(out.structure().unwrap()[0].category(), "Food & Dining");
    }

    #[tokio::test]
    async fn test_list_categories() {
        let env = TestEnv::new().await;
        let out = list_categories(env.config(), ListCategoriesArgs::new(TypeFilter::Income))
            .await
            .unwrap();
        let names: Vec<&str> = out.structure().unwrap().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Salary", "Freelance", "Investments"]);
    }

    #[tokio::test]
    async fn test_list_budgets_and_recurring() {
        let env = TestEnv::new().await;
        let session = env.session().await;
        session
            .add_budget("Shopping", amount("100"), "2024-06".parse().unwrap())
            .await
            .unwrap();
        session
            .add_recurring(
                RecurringInput {
                    kind: TransactionType::Income,
                    amount: amount("500"),
                    category: "Freelance".to_string(),
                    description: "retainer".to_string(),
                    frequency: Frequency::Weekly,
                },
                date("2024-01-29"),
            )
            .await
            .unwrap();

        let budgets = list_budgets(env.config()).await.unwrap();
        assert_eq!(budgets.structure().unwrap().len(), 1);
        assert!(budgets.message().contains("2024-06"));

        session
            .add_recurring(
                RecurringInput {
                    kind: TransactionType::Expense,
                    amount: amount("1200"),
                    category: "Bills & Utilities".to_string(),
                    description: "rent".to_string(),
                    frequency: Frequency::Monthly,
                },
                date("2024-01-29"),
            )
            .await
            .unwrap();

        let recurring = list_recurring(env.config()).await.unwrap();
        assert_eq!(recurring.structure().unwrap().len(), 2);
        assert!(recurring.message().contains("next 2024-02-05"));
        assert!(recurring
            .message()
            .contains("monthly income $0.00  monthly expenses $1,200.00"));
    }

    #[tokio::test]
    async fn test_list_empty() {
        let env = TestEnv::new().await;
        let out = list_budgets(env.config()).await.unwrap();
        assert_eq!(out.message(), "0 budgets");
        assert!(out.structure().unwrap().is_empty());
    }
}
