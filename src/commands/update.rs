//! Update command handlers.

use crate::args::{UpdateBudgetArgs, UpdateTransactionArgs};
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::{Budget, Transaction};
use crate::{Config, Result};
use anyhow::ensure;

/// Updates one transaction by ID with the specified field changes.
///
/// # Returns
///
/// On success, returns an `Out` containing a message and the updated `Transaction`. An unknown ID
/// is not an error: the message says so and there is no structure.
///
/// # Errors
///
/// - Returns an error if no field to change was given.
/// - Returns an error if the data file cannot be read or written.
pub async fn update_transaction(
    config: Config,
    args: UpdateTransactionArgs,
) -> Result<Out<Transaction>> {
    let updates = args.updates();
    ensure!(!updates.is_empty(), "Nothing to update, give at least one field to change");
    let session = config.session().await.pub_result(ErrorType::Store)?;
    let updated = session
        .update_transaction(args.id(), updates)
        .await
        .pub_result(ErrorType::Store)?;
    Ok(match updated {
        Some(transaction) => Out::new(
            format!("Updated transaction {}", transaction.id()),
            transaction,
        ),
        None => format!("No transaction with ID {}", args.id()).into(),
    })
}

/// Updates one budget by ID with the specified field changes.
///
/// An unknown ID is reported in the message, not as an error.
pub async fn update_budget(config: Config, args: UpdateBudgetArgs) -> Result<Out<Budget>> {
    let updates = args.updates();
    ensure!(!updates.is_empty(), "Nothing to update, give at least one field to change");
    let session = config.session().await.pub_result(ErrorType::Store)?;
    let updated = session
        .update_budget(args.id(), updates)
        .await
        .pub_result(ErrorType::Store)?;
    Ok(match updated {
        Some(budget) => Out::new(format!("Updated budget {}", budget.id()), budget),
        None => format!("No budget with ID {}", args.id()).into(),
    })
}
