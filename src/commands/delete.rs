//! Delete command handlers.

use crate::args::DeleteTransactionArgs;
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};

/// Deletes one transaction by ID.
///
/// # Returns
///
/// On success, returns an `Out` whose structure is `true` when the transaction was removed and
/// `false` when no transaction had that ID.
///
/// # Errors
///
/// - Returns an error if the data file cannot be read or written.
pub async fn delete_transaction(config: Config, args: DeleteTransactionArgs) -> Result<Out<bool>> {
    let session = config.session().await.pub_result(ErrorType::Store)?;
    let deleted = session
        .delete_transaction(args.id())
        .await
        .pub_result(ErrorType::Store)?;
    let message = if deleted {
        format!("Deleted transaction {}", args.id())
    } else {
        format!("No transaction with ID {}", args.id())
    };
    Ok(Out::new(message, deleted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::TransactionQuery;
    use crate::model::TransactionType;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_delete_transaction() {
        let env = TestEnv::new().await;
        let keep = env
            .insert_test_transaction(TransactionType::Expense, "1", "Shopping", "2024-06-01")
            .await;
        let gone = env
            .insert_test_transaction(TransactionType::Expense, "2", "Shopping", "2024-06-02")
            .await;

        let out = delete_transaction(env.config(), DeleteTransactionArgs::new(gone.id()))
            .await
            .unwrap();
        assert_eq!(out.structure(), Some(&true));

        let remaining = env
            .session()
            .await
            .transactions(&TransactionQuery::default())
            .await
            .unwrap();
        assert_eq!(remaining, vec![keep]);
    }

    #[tokio::test]
    async fn test_delete_unknown_transaction() {
        let env = TestEnv::new().await;
        let out = delete_transaction(env.config(), DeleteTransactionArgs::new("bad-id"))
            .await
            .unwrap();
        assert_eq!(out.structure(), Some(&false));
        assert_eq!(out.message(), "No transaction with ID bad-id");
    }
}
