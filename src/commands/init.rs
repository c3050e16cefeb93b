use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory and:
/// - Creates an initial `config.json` file for a new user named `user_name`
/// - Creates the data file, seeded with the default categories.
///
/// # Arguments
/// - `fintrack_home` - The directory that will be the root of data directory, e.g.
///   `$HOME/fintrack`
/// - `user_name` - The user's display name.
///
/// # Errors
/// - Returns an error if the directory is already initialized or any file operation fails.
pub async fn init(fintrack_home: &Path, user_name: &str) -> Result<Out<()>> {
    let config = Config::create(fintrack_home, user_name)
        .await
        .context("Unable to create the data directory and configs")
        .pub_result(ErrorType::Config)?;
    Ok(format!(
        "Successfully created the fintrack directory at {} for {}",
        config.root().display(),
        user_name
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("home");
        let out = init(&home, "Ada").await.unwrap();
        assert!(out.message().contains("for Ada"));
        assert!(home.join("config.json").is_file());
        assert!(home.join("expense-tracker-data.json").is_file());
    }

    #[tokio::test]
    async fn test_init_twice_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        init(dir.path(), "Ada").await.unwrap();
        let err = init(dir.path(), "Ada").await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ErrorType>(),
            Some(&ErrorType::Config)
        );
    }
}
