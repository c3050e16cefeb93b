//! Insert command handlers.

use crate::args::{InsertBudgetArgs, InsertCategoryArgs, InsertRecurringArgs, InsertTransactionArgs};
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::{Budget, Category, RecurringTransaction, Transaction, YearMonth};
use crate::session::{RecurringInput, TransactionInput};
use crate::{Config, Result};
use chrono::NaiveDate;

/// Records a new transaction for the configured user. The date defaults to `today`.
///
/// # Returns
///
/// On success, returns an `Out` containing a confirmation message and the stored `Transaction`,
/// including its newly assigned ID.
///
/// # Errors
///
/// - Returns an error if the data file cannot be read or written.
pub async fn insert_transaction(
    config: Config,
    args: InsertTransactionArgs,
    today: NaiveDate,
) -> Result<Out<Transaction>> {
    let session = config.session().await.pub_result(ErrorType::Store)?;
    let transaction = session
        .add_transaction(TransactionInput {
            kind: args.kind(),
            amount: args.amount(),
            category: args.category().to_string(),
            description: args.description().to_string(),
            date: args.date().unwrap_or(today),
        })
        .await
        .pub_result(ErrorType::Store)?;
    let message = format!(
        "Added {} of {} in {} on {} with ID {}",
        transaction.kind(),
        transaction.amount(),
        transaction.category(),
        transaction.date(),
        transaction.id()
    );
    Ok(Out::new(message, transaction))
}

/// Adds a category for the configured user. Names are not required to be unique.
pub async fn insert_category(config: Config, args: InsertCategoryArgs) -> Result<Out<Category>> {
    let session = config.session().await.pub_result(ErrorType::Store)?;
    let category = session
        .add_category(args.name(), args.kind(), args.color().map(str::to_string))
        .await
        .pub_result(ErrorType::Store)?;
    let message = format!(
        "Added {} category {} with ID {}",
        category.kind(),
        category.name(),
        category.id()
    );
    Ok(Out::new(message, category))
}

/// Sets a spending ceiling for a category in a month, which defaults to the month of `today`.
///
/// A second budget for the same category and month is allowed; each is reported separately.
pub async fn insert_budget(
    config: Config,
    args: InsertBudgetArgs,
    today: NaiveDate,
) -> Result<Out<Budget>> {
    let session = config.session().await.pub_result(ErrorType::Store)?;
    let month = args.month().unwrap_or_else(|| YearMonth::of(today));
    let budget = session
        .add_budget(args.category(), args.amount(), month)
        .await
        .pub_result(ErrorType::Store)?;
    let message = format!(
        "Added a budget of {} for {} in {} with ID {}",
        budget.amount(),
        budget.category(),
        budget.month(),
        budget.id()
    );
    Ok(Out::new(message, budget))
}

/// Adds a recurring template. Its next date is one period after `--from`, or after `today`.
///
/// # Errors
///
/// - Returns an error if the next date cannot be represented.
/// - Returns an error if the data file cannot be read or written.
pub async fn insert_recurring(
    config: Config,
    args: InsertRecurringArgs,
    today: NaiveDate,
) -> Result<Out<RecurringTransaction>> {
    let session = config.session().await.pub_result(ErrorType::Store)?;
    let recurring = session
        .add_recurring(
            RecurringInput {
                kind: args.kind(),
                amount: args.amount(),
                category: args.category().to_string(),
                description: args.description().to_string(),
                frequency: args.frequency(),
            },
            args.from().unwrap_or(today),
        )
        .await
        .pub_result(ErrorType::Request)?;
    let message = format!(
        "Added {} {} of {} in {}, next on {}, with ID {}",
        recurring.frequency(),
        recurring.kind(),
        recurring.amount(),
        recurring.category(),
        recurring.next_date(),
        recurring.id()
    );
    Ok(Out::new(message, recurring))
}
